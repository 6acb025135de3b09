use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;

use pc_core::{
    ports::{SharedSubmitHandler, StepComponent, StepHandle},
    wizard::NavigationTarget,
};

/// What the next submission of a scripted step does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ScriptedOutcome {
    /// Handler returns `true`.
    Accept,
    /// Records the message as the step error, then returns `false`.
    Reject(Option<String>),
    /// Handler returns an error with this message.
    Fail(String),
}

#[derive(Debug, thiserror::Error)]
#[error("unrecognised step outcome `{0}`; expected ok, fail[:message] or error:message")]
pub struct ParseOutcomeError(String);

impl FromStr for ScriptedOutcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, message) = match s.split_once(':') {
            Some((kind, message)) => (kind, Some(message.to_string())),
            None => (s, None),
        };
        match (kind.trim(), message) {
            ("ok", None) => Ok(ScriptedOutcome::Accept),
            ("fail", message) => Ok(ScriptedOutcome::Reject(message)),
            ("error", Some(message)) => Ok(ScriptedOutcome::Fail(message)),
            _ => Err(ParseOutcomeError(s.to_string())),
        }
    }
}

impl Display for ScriptedOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ScriptedOutcome::Accept => f.write_str("ok"),
            ScriptedOutcome::Reject(None) => f.write_str("fail"),
            ScriptedOutcome::Reject(Some(message)) => write!(f, "fail:{message}"),
            ScriptedOutcome::Fail(message) => write!(f, "error:{message}"),
        }
    }
}

/// A step whose submissions replay queued outcomes.
///
/// On activation it reports itself valid and registers a handler that pops
/// the next outcome (`Accept` once the queue is empty). Outcomes are shared
/// across mounts, so going back and forth keeps consuming the same script.
#[derive(Default)]
pub struct ScriptedStep {
    outcomes: Arc<Mutex<VecDeque<ScriptedOutcome>>>,
    success_target: Option<NavigationTarget>,
    submissions: Arc<AtomicUsize>,
    activations: AtomicUsize,
    last_handle: Mutex<Option<StepHandle>>,
}

fn recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedStep {
    pub fn new(outcomes: impl IntoIterator<Item = ScriptedOutcome>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into_iter().collect())),
            ..Self::default()
        }
    }

    /// On an accepted submission, re-target the wizard's completion route.
    pub fn with_success_target(mut self, target: impl Into<NavigationTarget>) -> Self {
        self.success_target = Some(target.into());
        self
    }

    pub fn push(&self, outcome: ScriptedOutcome) {
        recover(&self.outcomes).push_back(outcome);
    }

    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    /// Handle from the most recent activation.
    pub fn last_handle(&self) -> Option<StepHandle> {
        recover(&self.last_handle).clone()
    }

    fn handler(&self, handle: StepHandle) -> SharedSubmitHandler {
        let outcomes = Arc::clone(&self.outcomes);
        let submissions = Arc::clone(&self.submissions);
        let success_target = self.success_target.clone();
        Arc::new(move || {
            let outcome = recover(&outcomes)
                .pop_front()
                .unwrap_or(ScriptedOutcome::Accept);
            submissions.fetch_add(1, Ordering::SeqCst);
            debug!(%outcome, "scripted step submitting");
            let handle = Arc::clone(&handle);
            let success_target = success_target.clone();
            async move {
                match outcome {
                    ScriptedOutcome::Accept => {
                        if let Some(target) = success_target {
                            handle.set_success_target(target);
                        }
                        Ok::<bool, anyhow::Error>(true)
                    }
                    ScriptedOutcome::Reject(message) => {
                        handle.set_error(message);
                        Ok(false)
                    }
                    ScriptedOutcome::Fail(message) => Err(anyhow::anyhow!(message)),
                }
            }
        })
    }
}

impl StepComponent for ScriptedStep {
    fn activate(&self, handle: StepHandle) {
        self.activations.fetch_add(1, Ordering::SeqCst);
        *recover(&self.last_handle) = Some(Arc::clone(&handle));
        handle.set_step_valid(true);
        handle.register_handler(Some(self.handler(Arc::clone(&handle))));
    }
}
