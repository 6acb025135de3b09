use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ids::StepId;
use crate::wizard::WizardMessages;

/// Errors returned to callers that misuse the wizard API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("wizard flow `{0}` has no steps")]
    EmptyFlow(String),

    #[error("wizard flow `{flow}` declares step `{step}` more than once")]
    DuplicateStepId { flow: String, step: StepId },

    #[error("unknown wizard flow: {0}")]
    UnknownFlow(String),

    #[error("wizard flow `{flow}` has no step `{step}`")]
    UnknownStep { flow: String, step: StepId },

    #[error("wizard is not active")]
    NotActive,
}

/// Why an advance attempt did not move the wizard forward.
///
/// 提交失败原因。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionFailure {
    /// Advance was pressed before the step registered its handler.
    NoHandler,
    /// The handler returned `false`; `message` is the step's recorded error.
    Rejected { message: Option<String> },
    /// The handler returned an error.
    Unexpected { message: String },
}

impl SubmissionFailure {
    /// Text shown to the user, falling back to the configured generic messages.
    pub fn user_message(&self, messages: &WizardMessages) -> String {
        match self {
            SubmissionFailure::NoHandler => messages.no_handler.clone(),
            SubmissionFailure::Rejected { message } => match message {
                Some(message) if !message.trim().is_empty() => {
                    format!("{}{}", messages.rejected_prefix, message)
                }
                _ => messages.validation_failed.clone(),
            },
            SubmissionFailure::Unexpected { message } if !message.trim().is_empty() => {
                message.clone()
            }
            SubmissionFailure::Unexpected { .. } => messages.unexpected_failure.clone(),
        }
    }
}
