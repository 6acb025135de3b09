use serde::{Deserialize, Serialize};

use crate::wizard::SubmissionFailure;

/// Which configured destination a terminal state navigates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalTarget {
    Success,
    Cancel,
}

/// Side-effects produced by state transitions.
///
/// 状态迁移产生的副作用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Await the handler registered at the time advance was requested.
    InvokeHandler,
    /// Deactivate the step at `index`; its handler is cleared.
    UnmountStep { index: usize },
    /// Activate the step at `index` so it can register its handler.
    MountStep { index: usize },
    /// Intermediate advance notification (only if the flow configures one).
    NotifyStepAdvanced,
    /// Completion notification.
    NotifyCompleted,
    /// User-visible failure notification.
    NotifyFailure(SubmissionFailure),
    /// Navigate to a configured terminal destination.
    Navigate(TerminalTarget),
}
