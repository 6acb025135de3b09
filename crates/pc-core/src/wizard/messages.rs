use serde::{Deserialize, Serialize};

pub const DEFAULT_NO_HANDLER_MESSAGE: &str = "Current step has issues";
pub const DEFAULT_VALIDATION_FAILED_MESSAGE: &str = "Please correct the errors in the current step";
pub const DEFAULT_UNEXPECTED_FAILURE_MESSAGE: &str =
    "Something went wrong while submitting this step";
pub const DEFAULT_NEXT_LABEL: &str = "Next";

/// User-visible texts the controller falls back to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardMessages {
    pub no_handler: String,
    pub validation_failed: String,
    pub unexpected_failure: String,
    pub next_label: String,
    /// Prepended to an error message recorded by a rejecting step.
    #[serde(default)]
    pub rejected_prefix: String,
}

impl Default for WizardMessages {
    fn default() -> Self {
        Self {
            no_handler: DEFAULT_NO_HANDLER_MESSAGE.to_string(),
            validation_failed: DEFAULT_VALIDATION_FAILED_MESSAGE.to_string(),
            unexpected_failure: DEFAULT_UNEXPECTED_FAILURE_MESSAGE.to_string(),
            next_label: DEFAULT_NEXT_LABEL.to_string(),
            rejected_prefix: String::new(),
        }
    }
}

/// Partial set of [`WizardMessages`]; unset fields keep the base text.
///
/// 消息覆盖：用于全局配置和单个流程。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_handler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_failed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unexpected_failure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected_prefix: Option<String>,
}

impl MessageOverrides {
    pub fn with_no_handler(mut self, text: impl Into<String>) -> Self {
        self.no_handler = Some(text.into());
        self
    }

    pub fn with_validation_failed(mut self, text: impl Into<String>) -> Self {
        self.validation_failed = Some(text.into());
        self
    }

    pub fn with_rejected_prefix(mut self, text: impl Into<String>) -> Self {
        self.rejected_prefix = Some(text.into());
        self
    }

    /// Fields set in `other` win.
    pub fn merged(&self, other: &MessageOverrides) -> MessageOverrides {
        MessageOverrides {
            no_handler: other.no_handler.clone().or_else(|| self.no_handler.clone()),
            validation_failed: other
                .validation_failed
                .clone()
                .or_else(|| self.validation_failed.clone()),
            unexpected_failure: other
                .unexpected_failure
                .clone()
                .or_else(|| self.unexpected_failure.clone()),
            next_label: other.next_label.clone().or_else(|| self.next_label.clone()),
            rejected_prefix: other
                .rejected_prefix
                .clone()
                .or_else(|| self.rejected_prefix.clone()),
        }
    }

    pub fn apply(&self, base: WizardMessages) -> WizardMessages {
        WizardMessages {
            no_handler: self.no_handler.clone().unwrap_or(base.no_handler),
            validation_failed: self
                .validation_failed
                .clone()
                .unwrap_or(base.validation_failed),
            unexpected_failure: self
                .unexpected_failure
                .clone()
                .unwrap_or(base.unexpected_failure),
            next_label: self.next_label.clone().unwrap_or(base.next_label),
            rejected_prefix: self.rejected_prefix.clone().unwrap_or(base.rejected_prefix),
        }
    }
}
