use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::ids::StepId;
use crate::wizard::{MessageOverrides, NavigationTarget, WizardError, WizardStep};

pub const DEFAULT_FINAL_BUTTON_TEXT: &str = "Finish";

/// Everything a controller needs to know about one flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDefinition {
    pub key: String,
    pub title: String,
    pub steps: Vec<WizardStep>,
    pub success_target: NavigationTarget,
    pub cancel_target: NavigationTarget,
    /// Toast fired on completion; empty means no toast.
    pub success_message: String,
    pub final_button_text: String,
    /// Toast fired on every intermediate advance.
    pub step_advanced_message: Option<String>,
    /// Flow-specific texts layered over the console-wide messages.
    #[serde(default)]
    pub messages: MessageOverrides,
}

impl WizardDefinition {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        success_target: impl Into<NavigationTarget>,
        cancel_target: impl Into<NavigationTarget>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            steps: Vec::new(),
            success_target: success_target.into(),
            cancel_target: cancel_target.into(),
            success_message: String::new(),
            final_button_text: DEFAULT_FINAL_BUTTON_TEXT.to_string(),
            step_advanced_message: None,
            messages: MessageOverrides::default(),
        }
    }

    pub fn with_step(mut self, id: impl Into<StepId>, title: impl Into<String>) -> Self {
        self.steps.push(WizardStep::new(id, title));
        self
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    pub fn with_final_button_text(mut self, text: impl Into<String>) -> Self {
        self.final_button_text = text.into();
        self
    }

    pub fn with_step_advanced_message(mut self, message: impl Into<String>) -> Self {
        self.step_advanced_message = Some(message.into());
        self
    }

    pub fn with_messages(mut self, messages: MessageOverrides) -> Self {
        self.messages = messages;
        self
    }

    /// A flow needs at least one step and unique step ids.
    pub fn validate(&self) -> Result<(), WizardError> {
        if self.steps.is_empty() {
            return Err(WizardError::EmptyFlow(self.key.clone()));
        }
        let mut seen = HashSet::new();
        for step in &self.steps {
            if !seen.insert(&step.id) {
                return Err(WizardError::DuplicateStepId {
                    flow: self.key.clone(),
                    step: step.id.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn step_index(&self, id: &StepId) -> Option<usize> {
        self.steps.iter().position(|step| &step.id == id)
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flow_is_rejected() {
        let definition = WizardDefinition::new("empty", "Empty", "/done", "/back");
        assert_eq!(
            definition.validate(),
            Err(WizardError::EmptyFlow("empty".into()))
        );
    }

    #[test]
    fn duplicate_step_ids_are_rejected() {
        let definition = WizardDefinition::new("dup", "Dup", "/done", "/back")
            .with_step("prompt", "Prompt")
            .with_step("prompt", "Prompt again");
        assert_eq!(
            definition.validate(),
            Err(WizardError::DuplicateStepId {
                flow: "dup".into(),
                step: StepId::from("prompt"),
            })
        );
    }

    #[test]
    fn step_index_follows_declaration_order() {
        let definition = WizardDefinition::new("flow", "Flow", "/done", "/back")
            .with_step("prompt", "Prompt")
            .with_step("review", "Review");
        assert!(definition.validate().is_ok());
        assert_eq!(definition.step_index(&"review".into()), Some(1));
        assert_eq!(definition.step_index(&"missing".into()), None);
        assert_eq!(definition.final_button_text, DEFAULT_FINAL_BUTTON_TEXT);
    }
}
