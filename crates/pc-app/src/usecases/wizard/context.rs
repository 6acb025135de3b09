use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use pc_core::{
    ports::SharedSubmitHandler,
    wizard::{
        NavigationTarget, SubmissionFailure, WizardAction, WizardEvent, WizardPhase, WizardState,
        WizardStateMachine,
    },
};

/// Wizard context owned by exactly one controller.
///
/// Holds the state, the active submit handler and the in-flight submission
/// behind one lock, so handler lifecycle and state always change together.
///
/// ## Locking
/// The lock is never held across an `.await` and never while step components
/// run; components call back into the context through their `StepContext`.
pub(crate) struct WizardContext {
    inner: Mutex<ContextInner>,
    state_tx: watch::Sender<WizardState>,
}

struct ContextInner {
    state: WizardState,
    handler: Option<SharedSubmitHandler>,
    /// Bumped on every mount and unmount; step handles carry the epoch they
    /// were created with.
    mount_epoch: u64,
    mounted: Option<usize>,
    submission: Option<InFlightSubmission>,
    next_submission_id: u64,
    success_target: NavigationTarget,
}

struct InFlightSubmission {
    id: u64,
    shutdown_tx: watch::Sender<bool>,
}

/// Result of asking the context to start a submission.
pub(crate) enum SubmissionStart {
    NotActive,
    Busy,
    NoHandler(Vec<WizardAction>),
    Started(SubmissionTicket),
}

pub(crate) struct SubmissionTicket {
    pub id: u64,
    pub handler: SharedSubmitHandler,
    pub shutdown_rx: watch::Receiver<bool>,
}

/// How a finished submission changed the wizard.
pub(crate) enum SubmissionEnd {
    Advanced {
        index: usize,
        actions: Vec<WizardAction>,
    },
    Completed {
        actions: Vec<WizardAction>,
    },
    Rejected {
        failure: SubmissionFailure,
        actions: Vec<WizardAction>,
    },
    /// The submission was cancelled or superseded; its result was dropped.
    Discarded,
}

impl WizardContext {
    pub fn new(step_count: usize, success_target: NavigationTarget) -> Self {
        let state = WizardState::initial(step_count);
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            inner: Mutex::new(ContextInner {
                state,
                handler: None,
                mount_epoch: 0,
                mounted: None,
                submission: None,
                next_submission_id: 0,
                success_target,
            }),
            state_tx,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ContextInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get_state(&self) -> WizardState {
        self.lock().state.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.state_tx.subscribe()
    }

    pub fn success_target(&self) -> NavigationTarget {
        self.lock().success_target.clone()
    }

    pub fn mounted_step(&self) -> Option<usize> {
        self.lock().mounted
    }

    pub fn current_epoch(&self) -> u64 {
        self.lock().mount_epoch
    }

    /// Run one event through the state machine and publish the new state.
    pub fn dispatch(&self, event: WizardEvent) -> Vec<WizardAction> {
        let mut inner = self.lock();
        self.apply(&mut inner, event)
    }

    fn apply(&self, inner: &mut ContextInner, event: WizardEvent) -> Vec<WizardAction> {
        let from = inner.state.clone();
        let event_name = format!("{:?}", event);
        let (next, actions) = WizardStateMachine::transition(from.clone(), event);

        if actions
            .iter()
            .any(|action| matches!(action, WizardAction::UnmountStep { .. }))
        {
            // The step being left may no longer be invoked.
            inner.handler = None;
        }

        if from.phase != next.phase || from.current_step_index != next.current_step_index {
            info!(
                from = ?from.phase,
                to = ?next.phase,
                from_index = from.current_step_index,
                to_index = next.current_step_index,
                event = %event_name,
                "wizard state transition"
            );
        } else {
            debug!(phase = ?next.phase, event = %event_name, "wizard state updated");
        }

        inner.state = next.clone();
        self.state_tx.send_replace(next);
        actions
    }

    fn epoch_is_current(inner: &ContextInner, epoch: Option<u64>, what: &str) -> bool {
        match epoch {
            Some(epoch) if epoch != inner.mount_epoch => {
                warn!(
                    epoch,
                    current_epoch = inner.mount_epoch,
                    call = what,
                    "ignoring call from an unmounted step"
                );
                false
            }
            _ => true,
        }
    }

    /// Replace or clear the active handler. `epoch: None` targets whatever
    /// step is currently active.
    pub fn register_handler(&self, epoch: Option<u64>, handler: Option<SharedSubmitHandler>) {
        let mut inner = self.lock();
        if !Self::epoch_is_current(&inner, epoch, "register_handler") {
            return;
        }
        if !inner.state.is_active() && handler.is_some() {
            warn!(phase = ?inner.state.phase, "ignoring handler registration on inactive wizard");
            return;
        }
        let event = if handler.is_some() {
            WizardEvent::HandlerRegistered
        } else {
            WizardEvent::HandlerCleared
        };
        inner.handler = handler;
        self.apply(&mut inner, event);
    }

    pub fn set_step_valid(&self, epoch: Option<u64>, valid: bool) {
        let mut inner = self.lock();
        if Self::epoch_is_current(&inner, epoch, "set_step_valid") {
            self.apply(&mut inner, WizardEvent::StepValidityChanged { valid });
        }
    }

    pub fn set_error(&self, epoch: Option<u64>, message: Option<String>) {
        let mut inner = self.lock();
        if Self::epoch_is_current(&inner, epoch, "set_error") {
            self.apply(&mut inner, WizardEvent::ErrorReported { message });
        }
    }

    pub fn set_success_target(&self, epoch: Option<u64>, target: NavigationTarget) {
        let mut inner = self.lock();
        if Self::epoch_is_current(&inner, epoch, "set_success_target") {
            debug!(target = %target, "wizard success target changed");
            inner.success_target = target;
        }
    }

    /// Reset for a fresh mount. Any in-flight submission is abandoned.
    pub fn mount(&self, success_target: NavigationTarget) -> Vec<WizardAction> {
        let mut inner = self.lock();
        Self::abandon_submission(&mut inner);
        inner.handler = None;
        inner.success_target = success_target;
        self.apply(&mut inner, WizardEvent::Mount)
    }

    /// Returns the epoch the mounted step's handle must carry.
    pub fn begin_mount(&self, index: usize) -> u64 {
        let mut inner = self.lock();
        inner.mount_epoch += 1;
        inner.mounted = Some(index);
        inner.mount_epoch
    }

    /// Makes every handle of the step being unmounted stale.
    pub fn retire_mount(&self) {
        let mut inner = self.lock();
        inner.handler = None;
        inner.mounted = None;
        inner.mount_epoch += 1;
    }

    pub fn begin_submission(&self) -> SubmissionStart {
        let mut inner = self.lock();
        match inner.state.phase {
            phase if phase.is_terminal() => return SubmissionStart::NotActive,
            // A previous advance is pending, or its next step is still mounting.
            WizardPhase::Submitting | WizardPhase::StepAdvanced => return SubmissionStart::Busy,
            _ => {}
        }

        let handler = inner.handler.clone();
        let actions = self.apply(
            &mut inner,
            WizardEvent::AdvanceRequested {
                handler_registered: handler.is_some(),
            },
        );
        let Some(handler) = handler else {
            return SubmissionStart::NoHandler(actions);
        };

        inner.next_submission_id += 1;
        let id = inner.next_submission_id;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        inner.submission = Some(InFlightSubmission { id, shutdown_tx });
        SubmissionStart::Started(SubmissionTicket {
            id,
            handler,
            shutdown_rx,
        })
    }

    pub fn finish_submission(&self, id: u64, result: anyhow::Result<bool>) -> SubmissionEnd {
        let mut inner = self.lock();
        match inner.submission.as_ref() {
            Some(submission) if submission.id == id => {
                inner.submission = None;
            }
            _ => return SubmissionEnd::Discarded,
        }

        let handler_registered = inner.handler.is_some();
        let event = match result {
            Ok(true) => WizardEvent::SubmissionSucceeded,
            Ok(false) => WizardEvent::SubmissionFailed {
                error: None,
                handler_registered,
            },
            Err(err) => WizardEvent::SubmissionFailed {
                error: Some(err.to_string()),
                handler_registered,
            },
        };
        let actions = self.apply(&mut inner, event);

        match inner.state.phase {
            WizardPhase::StepAdvanced => SubmissionEnd::Advanced {
                index: inner.state.current_step_index,
                actions,
            },
            WizardPhase::Completed => SubmissionEnd::Completed { actions },
            _ => {
                let failure = actions
                    .iter()
                    .find_map(|action| match action {
                        WizardAction::NotifyFailure(failure) => Some(failure.clone()),
                        _ => None,
                    })
                    .unwrap_or(SubmissionFailure::Rejected { message: None });
                SubmissionEnd::Rejected { failure, actions }
            }
        }
    }

    pub fn retreat(&self) -> Vec<WizardAction> {
        let mut inner = self.lock();
        if inner.state.phase == WizardPhase::Submitting {
            warn!("ignoring retreat while a submission is pending");
            return Vec::new();
        }
        self.apply(&mut inner, WizardEvent::RetreatRequested)
    }

    pub fn cancel(&self) -> Vec<WizardAction> {
        let mut inner = self.lock();
        Self::abandon_submission(&mut inner);
        inner.handler = None;
        self.apply(&mut inner, WizardEvent::CancelRequested)
    }

    fn abandon_submission(inner: &mut ContextInner) {
        if let Some(submission) = inner.submission.take() {
            info!(submission_id = submission.id, "abandoning in-flight submission");
            if let Err(err) = submission.shutdown_tx.send(true) {
                // The advancing task already stopped listening.
                debug!("submission shutdown send failed: {err}");
            }
        }
    }
}
