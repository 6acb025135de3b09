use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifies one mounted wizard screen in logs and spans.
///
/// Two controllers built from the same flow never share an instance id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WizardInstanceId(String);

impl_id!(WizardInstanceId);
