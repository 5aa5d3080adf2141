use crate::provider::{CompletionBackend, CompletionRequest, ProviderError};
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Clone)]
pub struct OpenAiClient {
    api_base: String,
    api_key: Option<String>,
    agent: ureq::Agent,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Clone, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl OpenAiClient {
    pub fn new(api_base: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            agent,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl CompletionBackend for OpenAiClient {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential(API_KEY_ENV.to_string()))?;
        let body =
            serde_json::to_value(request).map_err(|e| ProviderError::Encode(e.to_string()))?;

        let response = self
            .agent
            .post(&self.endpoint())
            .set("Authorization", &format!("Bearer {api_key}"))
            .set("user-agent", concat!("expertchat/", env!("CARGO_PKG_VERSION")))
            .send_json(body)
            .map_err(map_request_error)?;

        let parsed = response
            .into_json::<ChatCompletionResponse>()
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
        extract_content(parsed)
    }
}

fn extract_content(response: ChatCompletionResponse) -> Result<String, ProviderError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse("response has no choices".to_string()))?;
    match choice.message.content {
        Some(content) if !content.is_empty() => Ok(content),
        _ => Err(ProviderError::MalformedResponse(
            "response message has no content".to_string(),
        )),
    }
}

fn map_request_error(err: ureq::Error) -> ProviderError {
    match err {
        ureq::Error::Status(status, response) => {
            let raw = response.into_string().unwrap_or_default();
            let message = api_error_message(&raw);
            match status {
                401 | 403 => ProviderError::Authentication { status, message },
                429 => ProviderError::RateLimited(message),
                _ => ProviderError::Status { status, message },
            }
        }
        ureq::Error::Transport(transport) => ProviderError::Transport(transport.to_string()),
    }
}

fn api_error_message(raw: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(raw) {
        Ok(envelope) if !envelope.error.message.is_empty() => envelope.error.message,
        _ => raw.trim().to_string(),
    }
}
