use serde::{Deserialize, Serialize};

/// Wizard lifecycle phase.
///
/// 向导生命周期阶段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    /// The active step has not registered a submit handler yet.
    ///
    /// 当前步骤尚未注册提交处理器。
    AwaitingHandler,
    /// A handler is registered and no submission is pending.
    ///
    /// 已注册处理器，空闲。
    Idle,
    /// The registered handler's future is pending.
    ///
    /// 提交中。
    Submitting,
    /// The index moved forward; the next step is being mounted.
    ///
    /// 已前进到下一步，等待新步骤挂载。
    StepAdvanced,
    /// The last step succeeded (terminal).
    ///
    /// 已完成（终态）。
    Completed,
    /// The wizard was cancelled (terminal).
    ///
    /// 已取消（终态）。
    Cancelled,
}

impl WizardPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, WizardPhase::Completed | WizardPhase::Cancelled)
    }
}

/// State owned by exactly one wizard instance.
///
/// Only the controller mutates it, and only through
/// [`crate::WizardStateMachine::transition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step_index: usize,
    pub step_count: usize,
    pub is_current_step_valid: bool,
    pub is_submitting: bool,
    pub last_error: Option<String>,
    pub phase: WizardPhase,
}

impl WizardState {
    /// Initial values used on mount.
    pub fn initial(step_count: usize) -> Self {
        Self {
            current_step_index: 0,
            step_count,
            is_current_step_valid: false,
            is_submitting: false,
            last_error: None,
            phase: WizardPhase::AwaitingHandler,
        }
    }

    /// Initial values, parked in a terminal phase.
    pub fn reset_to(step_count: usize, phase: WizardPhase) -> Self {
        Self {
            phase,
            ..Self::initial(step_count)
        }
    }

    pub fn is_active(&self) -> bool {
        !self.phase.is_terminal()
    }

    pub fn is_first_step(&self) -> bool {
        self.current_step_index == 0
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step_index + 1 >= self.step_count
    }
}
