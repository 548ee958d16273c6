//! Evaluation service: hands a snapshot to a feedback evaluator off the drawing path.
//!
//! DESIGN
//! ======
//! The notebook core is synchronous and never waits on the network. A caller
//! captures a snapshot, wraps it in an [`EvaluationRequest`], and spawns the
//! evaluation on the tokio runtime. The request is shared (`Arc`), so a
//! failed evaluation leaves the caller holding the same snapshot to retry.
//!
//! ERROR HANDLING
//! ==============
//! Remote failures are logged at `warn` with their retryability and returned
//! unchanged; nothing here touches notebook state.

use std::sync::Arc;
use std::time::Instant;

use notebook::compositor::{CompositeError, CompositeSnapshot};
use notebook::engine::NotebookCore;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::feedback::{FeedbackError, FeedbackEvaluator};

/// An immutable snapshot plus the instructions to evaluate it with.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub snapshot: CompositeSnapshot,
    pub task_prompt: String,
    pub language: String,
}

impl EvaluationRequest {
    #[must_use]
    pub fn new(snapshot: CompositeSnapshot, task_prompt: impl Into<String>, language: impl Into<String>) -> Self {
        Self { snapshot, task_prompt: task_prompt.into(), language: language.into() }
    }

    /// Capture the notebook's current screen with its session's task prompt.
    ///
    /// # Errors
    ///
    /// Returns [`CompositeError`] if the snapshot cannot be produced.
    pub fn capture(core: &NotebookCore, language: impl Into<String>) -> Result<Self, CompositeError> {
        Ok(Self::new(core.capture()?, core.session().task_prompt(), language))
    }
}

/// Evaluator output for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub language: String,
}

/// Run one evaluation to completion.
///
/// # Errors
///
/// Returns the evaluator's [`FeedbackError`] unchanged.
pub async fn evaluate(evaluator: &dyn FeedbackEvaluator, request: &EvaluationRequest) -> Result<Feedback, FeedbackError> {
    let started = Instant::now();
    let result = evaluator
        .evaluate(&request.task_prompt, request.snapshot.data_uri(), &request.language)
        .await;
    let elapsed_ms = started.elapsed().as_millis();

    match result {
        Ok(text) => {
            info!(elapsed_ms, chars = text.len(), language = %request.language, "feedback received");
            Ok(Feedback { text, language: request.language.clone() })
        }
        Err(e) => {
            warn!(error = %e, retryable = e.retryable(), elapsed_ms, "feedback request failed");
            Err(e)
        }
    }
}

/// Spawn [`evaluate`] on the runtime and return immediately.
#[must_use]
pub fn spawn_evaluation(
    evaluator: Arc<dyn FeedbackEvaluator>,
    request: Arc<EvaluationRequest>,
) -> JoinHandle<Result<Feedback, FeedbackError>> {
    tokio::spawn(async move { evaluate(evaluator.as_ref(), &request).await })
}

#[cfg(test)]
#[path = "evaluation_test.rs"]
mod tests;
