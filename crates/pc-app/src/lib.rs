//! Catalog Console Application Orchestration Layer
//!
//! This crate contains the wizard use case: the controller that owns one
//! wizard's state and drives its steps, toasts and terminal navigation.

pub mod usecases;

pub use usecases::wizard::{AdvanceOutcome, StepContext, WizardController};
