//! # pc-core
//!
//! Core domain models and business logic for the catalog console wizards.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! step descriptors, wizard state, the pure wizard state machine, the built-in
//! flow catalog, the configuration DTO and the ports implemented by outer layers.

// Public module exports
pub mod config;
pub mod flows;
pub mod ids;
pub mod ports;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::ConsoleConfig;
pub use flows::{CatalogFlow, GeneratedEntity, WizardDefinition};
pub use ids::{StepId, WizardInstanceId};
pub use wizard::{
    MessageOverrides, NavigationTarget, SubmissionFailure, TerminalTarget, WizardAction, WizardError, WizardEvent,
    WizardMessages, WizardPhase, WizardState, WizardStateMachine, WizardStep,
};
