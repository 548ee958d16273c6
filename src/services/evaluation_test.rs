use std::sync::Mutex;

use notebook::geom::Point;
use notebook::unit::Alphabet;

use super::*;

// =========================================================================
// MockEvaluator
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
struct Call {
    prompt: String,
    image: String,
    language: String,
}

struct MockEvaluator {
    responses: Mutex<Vec<Result<String, FeedbackError>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockEvaluator {
    fn new(responses: Vec<Result<String, FeedbackError>>) -> Self {
        Self { responses: Mutex::new(responses), calls: Mutex::new(Vec::new()) }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FeedbackEvaluator for MockEvaluator {
    async fn evaluate(&self, prompt: &str, image_base64: &str, language: &str) -> Result<String, FeedbackError> {
        self.calls.lock().unwrap().push(Call {
            prompt: prompt.to_string(),
            image: image_base64.to_string(),
            language: language.to_string(),
        });
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() { Ok("done".into()) } else { responses.remove(0) }
    }
}

fn inked_core() -> NotebookCore {
    let mut core = NotebookCore::new(Alphabet::latin()).unwrap();
    core.on_pointer_down(&Point::new(100.0, 200.0));
    core.on_pointer_move(&Point::new(200.0, 250.0));
    core.on_pointer_up();
    core
}

// =========================================================================
// EvaluationRequest
// =========================================================================

#[test]
fn capture_uses_session_prompt_and_snapshot() {
    let core = inked_core();
    let request = EvaluationRequest::capture(&core, "es").unwrap();
    assert_eq!(request.task_prompt, core.session().task_prompt());
    assert_eq!(request.snapshot, core.capture().unwrap());
    assert_eq!(request.language, "es");
}

// =========================================================================
// evaluate / spawn_evaluation
// =========================================================================

#[tokio::test]
async fn evaluator_receives_data_uri_prompt_and_language() {
    let core = inked_core();
    let request = EvaluationRequest::capture(&core, "fr").unwrap();
    let mock = MockEvaluator::new(vec![Ok("Très bien".into())]);

    let feedback = evaluate(&mock, &request).await.unwrap();
    assert_eq!(feedback, Feedback { text: "Très bien".into(), language: "fr".into() });

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].prompt, request.task_prompt);
    assert_eq!(calls[0].image, request.snapshot.data_uri());
    assert_eq!(calls[0].language, "fr");
}

#[tokio::test]
async fn spawned_evaluation_completes_while_caller_continues() {
    let mut core = inked_core();
    let request = Arc::new(EvaluationRequest::capture(&core, "en").unwrap());
    let mock: Arc<dyn FeedbackEvaluator> = Arc::new(MockEvaluator::new(vec![Ok("Nice!".into())]));

    let handle = spawn_evaluation(mock, Arc::clone(&request));
    core.clear_ink();

    let feedback = handle.await.unwrap().unwrap();
    assert_eq!(feedback.text, "Nice!");
    assert!(core.foreground().is_blank());
}

#[tokio::test]
async fn failure_keeps_request_for_retry() {
    let core = inked_core();
    let request = Arc::new(EvaluationRequest::capture(&core, "en").unwrap());
    let snapshot_before = request.snapshot.clone();
    let mock = Arc::new(MockEvaluator::new(vec![
        Err(FeedbackError::ApiResponse { status: 503, body: "busy".into() }),
        Ok("Second try".into()),
    ]));

    let err = spawn_evaluation(mock.clone(), Arc::clone(&request)).await.unwrap().unwrap_err();
    assert!(err.retryable());
    assert_eq!(request.snapshot, snapshot_before);

    let feedback = spawn_evaluation(mock.clone(), Arc::clone(&request)).await.unwrap().unwrap();
    assert_eq!(feedback.text, "Second try");
    assert_eq!(mock.calls()[0], mock.calls()[1]);
}

#[tokio::test]
async fn failure_does_not_touch_notebook() {
    let core = inked_core();
    let foreground = core.foreground().clone();
    let request = EvaluationRequest::capture(&core, "en").unwrap();
    let mock = MockEvaluator::new(vec![Err(FeedbackError::EmptyResponse)]);

    assert!(matches!(evaluate(&mock, &request).await, Err(FeedbackError::EmptyResponse)));
    assert_eq!(core.foreground(), &foreground);
}
