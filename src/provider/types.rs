use crate::persona::Persona;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const COMPLETION_TEMPERATURE: f32 = 0.0;
pub const FAILURE_SENTINEL: &str = "回答を生成できませんでした。";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Instruction message followed by the user's question. Built per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub instruction: ChatMessage,
    pub question: ChatMessage,
}

impl Exchange {
    pub fn new(persona: Persona, user_text: &str) -> Self {
        Self {
            instruction: ChatMessage::system(persona.instruction()),
            question: ChatMessage::user(user_text),
        }
    }

    pub fn into_messages(self) -> Vec<ChatMessage> {
        vec![self.instruction, self.question]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn from_exchange(model: &str, exchange: Exchange) -> Self {
        Self {
            model: model.to_string(),
            messages: exchange.into_messages(),
            temperature: COMPLETION_TEMPERATURE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Configuration,
    Transport,
    Authentication,
    RateLimited,
    MalformedResponse,
    Service,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Configuration => "configuration",
            Self::Transport => "transport",
            Self::Authentication => "authentication",
            Self::RateLimited => "rate_limited",
            Self::MalformedResponse => "malformed_response",
            Self::Service => "service",
        }
    }

    pub fn user_hint(self) -> &'static str {
        match self {
            Self::Configuration => "APIキーの設定を確認してください。",
            Self::Transport => "ネットワーク接続を確認してください。",
            Self::Authentication => "APIキーが無効か、権限がありません。",
            Self::RateLimited => "利用上限に達しました。しばらく待ってから再試行してください。",
            Self::MalformedResponse => "LLMから想定外の応答が返されました。",
            Self::Service => "LLMサービスがエラーを返しました。",
        }
    }
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseResult {
    Answer(String),
    Failed {
        reason: FailureReason,
        detail: String,
    },
}

impl ResponseResult {
    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer(_))
    }

    /// The generated text, or the fixed sentinel when the call failed.
    pub fn text(&self) -> &str {
        match self {
            Self::Answer(text) => text,
            Self::Failed { .. } => FAILURE_SENTINEL,
        }
    }
}
