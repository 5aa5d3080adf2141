use crate::config::ConfigIssue;
use crate::persona::Persona;
use crate::provider::{CompletionBackend, CompletionInvoker, FailureReason, ResponseResult};

pub const ANSWER_HEADING: &str = "LLMからの回答:";
pub const EMPTY_QUESTION_WARNING: &str = "質問を入力してください。";
pub const INVOCATION_ERROR_NOTICE: &str = "LLMとの通信中にエラーが発生しました";
pub const RETRY_ERROR_NOTICE: &str =
    "エラーにより回答を生成できませんでした。もう一度お試しください。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Error,
    Warning,
    Info,
}

impl NoticeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level.as_str(), self.text)
    }
}

impl From<&ConfigIssue> for Notice {
    fn from(issue: &ConfigIssue) -> Self {
        match issue {
            ConfigIssue::HomeDirectoryUnavailable => Notice::warning(issue.message()),
            ConfigIssue::MissingCredential | ConfigIssue::InvalidSettings(_) => {
                Notice::error(issue.message())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Rejected,
    Answered(String),
    Failed {
        reason: FailureReason,
        detail: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub persona: Persona,
    pub outcome: SubmissionOutcome,
    pub notices: Vec<Notice>,
}

/// Empty or whitespace-only questions are rejected before any call.
pub fn check_question(input: &str) -> Result<(), Notice> {
    if input.trim().is_empty() {
        return Err(Notice::warning(EMPTY_QUESTION_WARNING));
    }
    Ok(())
}

pub fn submit<B: CompletionBackend>(
    invoker: &CompletionInvoker<B>,
    persona: Persona,
    input: &str,
) -> Submission {
    if let Err(notice) = check_question(input) {
        invoker.log().warn(
            "submission.rejected",
            &format!("persona={} empty question", persona.slug()),
        );
        return Submission {
            persona,
            outcome: SubmissionOutcome::Rejected,
            notices: vec![notice],
        };
    }

    match invoker.invoke(input, persona) {
        ResponseResult::Answer(text) => Submission {
            persona,
            outcome: SubmissionOutcome::Answered(text),
            notices: Vec::new(),
        },
        ResponseResult::Failed { reason, detail } => Submission {
            persona,
            notices: vec![
                Notice::error(INVOCATION_ERROR_NOTICE),
                Notice::error(RETRY_ERROR_NOTICE),
                Notice::info(format!("{} ({reason}: {detail})", reason.user_hint())),
            ],
            outcome: SubmissionOutcome::Failed { reason, detail },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{CompletionRequest, ProviderError, FAILURE_SENTINEL};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingBackend {
        calls: AtomicUsize,
        reply: Result<String, ProviderError>,
    }

    impl CountingBackend {
        fn new(reply: Result<String, ProviderError>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CompletionBackend for CountingBackend {
        fn complete(&self, _request: &CompletionRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    #[test]
    fn empty_question_never_reaches_the_backend() {
        let invoker =
            CompletionInvoker::with_default_model(CountingBackend::new(Ok("unused".to_string())));
        for input in ["", "   ", "\n\t"] {
            let submission = submit(&invoker, Persona::ItEngineer, input);
            assert_eq!(submission.outcome, SubmissionOutcome::Rejected);
            assert_eq!(submission.notices, vec![Notice::warning(EMPTY_QUESTION_WARNING)]);
        }
        assert_eq!(invoker.backend().calls(), 0);
    }

    #[test]
    fn answered_submission_carries_text_without_notices() {
        let invoker = CompletionInvoker::with_default_model(CountingBackend::new(Ok(
            "ぜひ京都へ。".to_string(),
        )));
        let submission = submit(&invoker, Persona::TravelConcierge, "おすすめの旅行先は？");
        assert_eq!(
            submission.outcome,
            SubmissionOutcome::Answered("ぜひ京都へ。".to_string())
        );
        assert!(submission.notices.is_empty());
        assert_eq!(invoker.backend().calls(), 1);
    }

    #[test]
    fn answer_containing_sentinel_phrase_is_still_an_answer() {
        let invoker = CompletionInvoker::with_default_model(CountingBackend::new(Ok(format!(
            "例文: {FAILURE_SENTINEL}"
        ))));
        let submission = submit(&invoker, Persona::GeneralAssistant, "例文をください");
        assert!(matches!(
            submission.outcome,
            SubmissionOutcome::Answered(_)
        ));
        assert!(submission.notices.is_empty());
    }

    #[test]
    fn failed_submission_reports_both_error_notices_and_reason() {
        let invoker = CompletionInvoker::with_default_model(CountingBackend::new(Err(
            ProviderError::Authentication {
                status: 401,
                message: "invalid key".to_string(),
            },
        )));
        let submission = submit(&invoker, Persona::PsychologicalCounselor, "眠れません");
        assert!(matches!(
            submission.outcome,
            SubmissionOutcome::Failed {
                reason: FailureReason::Authentication,
                ..
            }
        ));
        assert_eq!(submission.notices[0], Notice::error(INVOCATION_ERROR_NOTICE));
        assert_eq!(submission.notices[1], Notice::error(RETRY_ERROR_NOTICE));
        assert!(submission.notices[2].text.contains("authentication"));
        assert_eq!(invoker.backend().calls(), 1);
    }

    #[test]
    fn whitespace_padded_question_is_sent_verbatim() {
        struct EchoBackend;
        impl CompletionBackend for EchoBackend {
            fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
                Ok(request.messages[1].content.clone())
            }
        }
        let invoker = CompletionInvoker::with_default_model(EchoBackend);
        let submission = submit(&invoker, Persona::ItEngineer, "  What is TCP?\n");
        assert_eq!(
            submission.outcome,
            SubmissionOutcome::Answered("  What is TCP?\n".to_string())
        );
    }
}
