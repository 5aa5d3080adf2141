pub mod invoker;
pub mod openai;
pub mod types;

pub use invoker::{CompletionBackend, CompletionInvoker};
pub use openai::{OpenAiClient, DEFAULT_API_BASE};
pub use types::{
    ChatMessage, CompletionRequest, Exchange, FailureReason, ResponseResult, Role, DEFAULT_MODEL,
    FAILURE_SENTINEL,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("environment variable {0} is not set")]
    MissingCredential(String),
    #[error("provider rejected credentials with status {status}: {message}")]
    Authentication { status: u16, message: String },
    #[error("provider rate limit or quota exceeded: {0}")]
    RateLimited(String),
    #[error("provider returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("provider request failed: {0}")]
    Transport(String),
    #[error("provider response could not be parsed: {0}")]
    MalformedResponse(String),
    #[error("failed to encode completion request: {0}")]
    Encode(String),
}

impl ProviderError {
    pub fn reason(&self) -> FailureReason {
        match self {
            Self::MissingCredential(_) | Self::Encode(_) => FailureReason::Configuration,
            Self::Authentication { .. } => FailureReason::Authentication,
            Self::RateLimited(_) => FailureReason::RateLimited,
            Self::Status { .. } => FailureReason::Service,
            Self::Transport(_) => FailureReason::Transport,
            Self::MalformedResponse(_) => FailureReason::MalformedResponse,
        }
    }
}
