use serde::{Deserialize, Serialize};

use crate::ids::StepId;

/// Static step descriptor.
///
/// 静态步骤描述。The order of descriptors inside a flow defines navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardStep {
    pub id: StepId,
    pub title: String,
}

impl WizardStep {
    pub fn new(id: impl Into<StepId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}
