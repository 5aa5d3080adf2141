use expertchat::app::submission::{submit, SubmissionOutcome};
use expertchat::persona::{resolve, resolve_label, Persona};
use expertchat::provider::{
    CompletionBackend, CompletionInvoker, CompletionRequest, ProviderError, ResponseResult,
    FAILURE_SENTINEL,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
struct ScriptedBackend {
    replies: Mutex<Vec<Result<String, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    fn with_replies(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().rev().collect()),
            ..Self::default()
        }
    }
}

impl CompletionBackend for ScriptedBackend {
    fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().expect("lock").push(request.clone());
        self.replies
            .lock()
            .expect("lock")
            .pop()
            .unwrap_or_else(|| Err(ProviderError::Transport("no scripted reply".to_string())))
    }
}

#[test]
fn resolver_is_total_over_arbitrary_labels() {
    for raw in ["", "shell", "ITエンジニア ", "旅行", "general assistant"] {
        let instruction = resolve_label(raw);
        assert!(!instruction.is_empty());
    }
    assert_eq!(resolve_label("ITエンジニア"), resolve(Persona::ItEngineer));
    assert_eq!(resolve_label("ITエンジニア "), resolve(Persona::GeneralAssistant));
    assert_eq!(resolve_label("it-engineer"), resolve(Persona::GeneralAssistant));
    assert_eq!(resolve_label("旅行コンシェルジュ\n"), resolve(Persona::GeneralAssistant));
    assert_eq!(resolve_label("旅行"), resolve(Persona::GeneralAssistant));
}

#[test]
fn success_and_failure_are_reported_per_call() {
    let backend = ScriptedBackend::with_replies(vec![
        Ok("first answer".to_string()),
        Err(ProviderError::Status {
            status: 503,
            message: "overloaded".to_string(),
        }),
    ]);
    let invoker = CompletionInvoker::new(backend, "gpt-4o-mini");

    let first = invoker.invoke("q1", Persona::ItEngineer);
    assert_eq!(first, ResponseResult::Answer("first answer".to_string()));
    assert!(!first.text().is_empty());

    let second = invoker.invoke("q2", Persona::ItEngineer);
    assert!(!second.is_answer());
    assert_eq!(second.text(), FAILURE_SENTINEL);

    assert_eq!(invoker.backend().calls.load(Ordering::SeqCst), 2);
}

#[test]
fn each_request_is_a_fresh_two_message_exchange() {
    let backend = ScriptedBackend::with_replies(vec![Ok("a".to_string()), Ok("b".to_string())]);
    let invoker = CompletionInvoker::with_default_model(backend);

    invoker.invoke("最初の質問", Persona::PsychologicalCounselor);
    invoker.invoke("次の質問", Persona::TravelConcierge);

    let requests = invoker.backend().requests.lock().expect("lock");
    assert_eq!(requests.len(), 2);
    for request in requests.iter() {
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, 0.0);
    }
    assert_eq!(
        requests[1].messages[0].content,
        Persona::TravelConcierge.instruction()
    );
    assert_eq!(requests[1].messages[1].content, "次の質問");
}

#[test]
fn empty_submission_makes_no_backend_call() {
    let invoker = CompletionInvoker::with_default_model(ScriptedBackend::default());
    let submission = submit(&invoker, Persona::ItEngineer, "");
    assert_eq!(submission.outcome, SubmissionOutcome::Rejected);
    assert_eq!(invoker.backend().calls.load(Ordering::SeqCst), 0);
}
