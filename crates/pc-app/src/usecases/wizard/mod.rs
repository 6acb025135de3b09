//! Wizard use cases.
//!
//! This module exposes the wizard controller and the handle steps use to
//! talk back to it.

mod context;
pub mod controller;
pub mod step_context;

pub use controller::{AdvanceOutcome, WizardController};
pub use step_context::StepContext;
