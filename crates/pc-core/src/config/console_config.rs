use std::collections::BTreeMap;

use serde::Deserialize;

use crate::flows::WizardDefinition;
use crate::wizard::{MessageOverrides, NavigationTarget, WizardMessages};

/// Console configuration DTO.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub messages: MessageOverrides,
    /// Per-flow overrides keyed by flow key (e.g. `create-inventory-item`).
    pub flows: BTreeMap<String, FlowOverride>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FlowOverride {
    pub title: Option<String>,
    pub success_target: Option<String>,
    pub cancel_target: Option<String>,
    pub success_message: Option<String>,
    pub final_button_text: Option<String>,
    pub step_advanced_message: Option<String>,
    /// `[flows.<key>.messages]`, layered over the flow's built-in texts.
    pub messages: MessageOverrides,
}

impl ConsoleConfig {
    /// Create ConsoleConfig from TOML value
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let config: ConsoleConfig = toml_value.clone().try_into()?;
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let value: toml::Value = toml::from_str(content)?;
        Self::from_toml(&value)
    }

    /// Console-wide texts. Flow-specific texts still win in the controller.
    pub fn messages(&self) -> WizardMessages {
        self.messages.apply(WizardMessages::default())
    }

    /// Apply the override for `definition.key`, if any.
    pub fn apply_to(&self, definition: WizardDefinition) -> WizardDefinition {
        match self.flows.get(&definition.key) {
            Some(flow) => flow.apply(definition),
            None => definition,
        }
    }
}

impl FlowOverride {
    pub fn apply(&self, mut definition: WizardDefinition) -> WizardDefinition {
        if let Some(title) = &self.title {
            definition.title = title.clone();
        }
        if let Some(target) = &self.success_target {
            definition.success_target = NavigationTarget::new(target.clone());
        }
        if let Some(target) = &self.cancel_target {
            definition.cancel_target = NavigationTarget::new(target.clone());
        }
        if let Some(message) = &self.success_message {
            definition.success_message = message.clone();
        }
        if let Some(text) = &self.final_button_text {
            definition.final_button_text = text.clone();
        }
        if let Some(message) = &self.step_advanced_message {
            definition.step_advanced_message = Some(message.clone()).filter(|m| !m.is_empty());
        }
        definition.messages = definition.messages.merged(&self.messages);

        #[cfg(feature = "tracing")]
        tracing::debug!(flow = %definition.key, "applied flow override");

        definition
    }
}
