//! Step components that submit from a script instead of a form.

mod scripted;

pub use scripted::{ParseOutcomeError, ScriptedOutcome, ScriptedStep};
