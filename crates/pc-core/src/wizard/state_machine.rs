//! Wizard state machine.
//!
//! Defines a pure state transition function for every multi-step flow.
//! Side effects (awaiting handlers, mounting steps, toasts, navigation) are
//! returned as [`WizardAction`]s and executed by the application layer.

use crate::wizard::{
    SubmissionFailure, TerminalTarget, WizardAction, WizardEvent, WizardPhase, WizardState,
};

/// Pure wizard state machine.
///
/// 纯状态机：不包含副作用。
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        use WizardPhase::{AwaitingHandler, Cancelled, Completed, Idle, StepAdvanced, Submitting};

        match (state.phase, event) {
            (_, WizardEvent::Mount) => (
                WizardState::initial(state.step_count),
                vec![WizardAction::MountStep { index: 0 }],
            ),
            (_, WizardEvent::CancelRequested) => {
                let mut actions = Vec::new();
                if state.is_active() {
                    actions.push(WizardAction::UnmountStep {
                        index: state.current_step_index,
                    });
                }
                actions.push(WizardAction::Navigate(TerminalTarget::Cancel));
                (WizardState::reset_to(state.step_count, Cancelled), actions)
            }
            (phase, _) if phase.is_terminal() => (state, Vec::new()),

            (AwaitingHandler | StepAdvanced, WizardEvent::HandlerRegistered) => (
                WizardState {
                    phase: Idle,
                    ..state
                },
                Vec::new(),
            ),
            (Idle, WizardEvent::HandlerCleared) => (
                WizardState {
                    phase: AwaitingHandler,
                    ..state
                },
                Vec::new(),
            ),
            (_, WizardEvent::HandlerRegistered | WizardEvent::HandlerCleared) => {
                (state, Vec::new())
            }
            (_, WizardEvent::StepValidityChanged { valid }) => (
                WizardState {
                    is_current_step_valid: valid,
                    ..state
                },
                Vec::new(),
            ),
            (_, WizardEvent::ErrorReported { message }) => (
                WizardState {
                    last_error: message,
                    ..state
                },
                Vec::new(),
            ),

            (Submitting, WizardEvent::AdvanceRequested { .. }) => (state, Vec::new()),
            (
                _,
                WizardEvent::AdvanceRequested {
                    handler_registered: false,
                },
            ) => (
                state,
                vec![WizardAction::NotifyFailure(SubmissionFailure::NoHandler)],
            ),
            (_, WizardEvent::AdvanceRequested { .. }) => (
                WizardState {
                    is_submitting: true,
                    last_error: None,
                    phase: Submitting,
                    ..state
                },
                vec![WizardAction::InvokeHandler],
            ),

            (Submitting, WizardEvent::SubmissionSucceeded) => {
                let from = state.current_step_index;
                if from + 1 < state.step_count {
                    (
                        WizardState {
                            current_step_index: from + 1,
                            is_submitting: false,
                            phase: StepAdvanced,
                            ..state
                        },
                        vec![
                            WizardAction::UnmountStep { index: from },
                            WizardAction::MountStep { index: from + 1 },
                            WizardAction::NotifyStepAdvanced,
                        ],
                    )
                } else {
                    (
                        WizardState::reset_to(state.step_count, Completed),
                        vec![
                            WizardAction::UnmountStep { index: from },
                            WizardAction::NotifyCompleted,
                            WizardAction::Navigate(TerminalTarget::Success),
                        ],
                    )
                }
            }
            (
                Submitting,
                WizardEvent::SubmissionFailed {
                    error,
                    handler_registered,
                },
            ) => {
                let failure = match error {
                    Some(message) => SubmissionFailure::Unexpected { message },
                    None => SubmissionFailure::Rejected {
                        message: state.last_error.clone(),
                    },
                };
                let last_error = match &failure {
                    SubmissionFailure::Unexpected { message } => {
                        Some(message.clone()).filter(|m| !m.trim().is_empty())
                    }
                    SubmissionFailure::Rejected { message } => message.clone(),
                    SubmissionFailure::NoHandler => None,
                };
                let phase = if handler_registered {
                    Idle
                } else {
                    AwaitingHandler
                };
                (
                    WizardState {
                        is_submitting: false,
                        last_error,
                        phase,
                        ..state
                    },
                    vec![WizardAction::NotifyFailure(failure)],
                )
            }
            // A result that arrives outside a submission belongs to nobody.
            (_, WizardEvent::SubmissionSucceeded | WizardEvent::SubmissionFailed { .. }) => {
                (state, Vec::new())
            }

            (StepAdvanced, WizardEvent::StepEntered) => (
                WizardState {
                    phase: AwaitingHandler,
                    ..state
                },
                Vec::new(),
            ),
            (_, WizardEvent::StepEntered) => (state, Vec::new()),

            (Submitting, WizardEvent::RetreatRequested) => (state, Vec::new()),
            (_, WizardEvent::RetreatRequested) if state.current_step_index == 0 => {
                (state, Vec::new())
            }
            (_, WizardEvent::RetreatRequested) => {
                let from = state.current_step_index;
                (
                    WizardState {
                        current_step_index: from - 1,
                        last_error: None,
                        phase: AwaitingHandler,
                        ..state
                    },
                    vec![
                        WizardAction::UnmountStep { index: from },
                        WizardAction::MountStep { index: from - 1 },
                    ],
                )
            }
        }
    }
}
