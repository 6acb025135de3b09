//! ID type wrappers for type safety.

mod id_macro;
pub mod step_id;
pub mod wizard_id;

pub use step_id::StepId;
pub use wizard_id::WizardInstanceId;
