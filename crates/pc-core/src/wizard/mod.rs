//! Wizard domain module.
//!
//! This module defines the multi-step wizard state machine types shared by every
//! catalog flow (AI generation, bulk brand creation, inventory and product creation).

pub mod action;
pub mod error;
pub mod event;
pub mod layout;
pub mod messages;
pub mod state;
pub mod state_machine;
pub mod step;
pub mod target;

pub use action::{TerminalTarget, WizardAction};
pub use error::{SubmissionFailure, WizardError};
pub use event::WizardEvent;
pub use layout::{affordances, steps_for_layout, NavigationAffordances, StepView};
pub use messages::{MessageOverrides, WizardMessages};
pub use state::{WizardPhase, WizardState};
pub use state_machine::WizardStateMachine;
pub use step::WizardStep;
pub use target::NavigationTarget;
