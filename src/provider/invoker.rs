use crate::persona::Persona;
use crate::provider::{CompletionRequest, Exchange, ProviderError, ResponseResult, DEFAULT_MODEL};
use crate::shared::logging::EventLog;

/// Transport seam for one chat completion call.
pub trait CompletionBackend: Send + Sync {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}

impl<B: CompletionBackend + ?Sized> CompletionBackend for Box<B> {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        (**self).complete(request)
    }
}

#[derive(Debug)]
pub struct CompletionInvoker<B> {
    backend: B,
    model: String,
    log: EventLog,
}

impl<B: CompletionBackend> CompletionInvoker<B> {
    pub fn new(backend: B, model: &str) -> Self {
        Self {
            backend,
            model: model.to_string(),
            log: EventLog::disabled(),
        }
    }

    pub fn with_default_model(backend: B) -> Self {
        Self::new(backend, DEFAULT_MODEL)
    }

    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn build_request(&self, user_text: &str, persona: Persona) -> CompletionRequest {
        CompletionRequest::from_exchange(&self.model, Exchange::new(persona, user_text))
    }

    /// Issues exactly one backend call. Failures are contained here and
    /// returned as a tagged result.
    pub fn invoke(&self, user_text: &str, persona: Persona) -> ResponseResult {
        let request = self.build_request(user_text, persona);
        self.log.info(
            "completion.request",
            &format!(
                "persona={} model={} question_chars={}",
                persona.slug(),
                self.model,
                user_text.chars().count()
            ),
        );

        match self.backend.complete(&request) {
            Ok(text) => {
                self.log.info(
                    "completion.success",
                    &format!(
                        "persona={} answer_chars={}",
                        persona.slug(),
                        text.chars().count()
                    ),
                );
                ResponseResult::Answer(text)
            }
            Err(err) => {
                let reason = err.reason();
                self.log.error(
                    "completion.failure",
                    &format!("persona={} reason={reason} error={err}", persona.slug()),
                );
                ResponseResult::Failed {
                    reason,
                    detail: err.to_string(),
                }
            }
        }
    }
}
