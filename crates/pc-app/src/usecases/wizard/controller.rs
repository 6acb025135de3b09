//! Wizard controller.
//!
//! Drives one wizard screen: feeds navigation requests into the pure
//! [`WizardStateMachine`](pc_core::wizard::WizardStateMachine) held by the
//! wizard context, then executes the returned actions (step lifecycle,
//! toasts, terminal navigation).
//!
//! ```text
//! advance / retreat / cancel / step callbacks
//!   ↓
//! WizardContext (state + active handler, one lock)
//!   ↓
//! WizardAction list
//!   ↓
//! StepComponent / NotificationPort / NavigationPort
//! ```

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, info_span, warn, Instrument};

use pc_core::{
    flows::WizardDefinition,
    ids::{StepId, WizardInstanceId},
    ports::{
        NavigationPort, Notification, NotificationPort, SharedSubmitHandler, StepComponent,
        StepHandle,
    },
    wizard::{
        affordances, steps_for_layout, NavigationAffordances, NavigationTarget, StepView,
        SubmissionFailure, TerminalTarget, WizardAction, WizardError, WizardEvent, WizardMessages,
        WizardState,
    },
};

use super::context::{SubmissionEnd, SubmissionStart, SubmissionTicket, WizardContext};
use super::step_context::StepContext;

/// What a call to [`WizardController::advance`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the step at `index`.
    Advanced { index: usize },
    /// The final step succeeded; the wizard reset and navigated away.
    Completed,
    /// Position unchanged; the failure was surfaced as a notification.
    Rejected(SubmissionFailure),
    /// Another advance is still pending; nothing changed.
    Busy,
    /// The wizard was cancelled or restarted while the handler ran.
    Cancelled,
}

/// 向导控制器
///
/// One controller per wizard screen. Cheap to share behind an `Arc`.
pub struct WizardController {
    id: WizardInstanceId,
    definition: WizardDefinition,
    messages: WizardMessages,
    context: Arc<WizardContext>,
    components: Vec<Option<Arc<dyn StepComponent>>>,
    notifier: Arc<dyn NotificationPort>,
    navigator: Arc<dyn NavigationPort>,
}

impl WizardController {
    /// `messages` are console-wide; texts set on the definition take precedence.
    pub fn new(
        definition: WizardDefinition,
        messages: WizardMessages,
        notifier: Arc<dyn NotificationPort>,
        navigator: Arc<dyn NavigationPort>,
    ) -> Result<Self, WizardError> {
        definition.validate()?;
        let messages = definition.messages.apply(messages);
        let context = Arc::new(WizardContext::new(
            definition.step_count(),
            definition.success_target.clone(),
        ));
        Ok(Self {
            id: WizardInstanceId::new(),
            components: vec![None; definition.step_count()],
            definition,
            messages,
            context,
            notifier,
            navigator,
        })
    }

    /// Bind the component activated when `step` mounts.
    pub fn with_component(
        mut self,
        step: impl Into<StepId>,
        component: Arc<dyn StepComponent>,
    ) -> Result<Self, WizardError> {
        let step = step.into();
        let index = self
            .definition
            .step_index(&step)
            .ok_or_else(|| WizardError::UnknownStep {
                flow: self.definition.key.clone(),
                step,
            })?;
        self.components[index] = Some(component);
        Ok(self)
    }

    pub fn id(&self) -> &WizardInstanceId {
        &self.id
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn messages(&self) -> &WizardMessages {
        &self.messages
    }

    pub fn snapshot(&self) -> WizardState {
        self.context.get_state()
    }

    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.context.subscribe()
    }

    pub fn steps_for_layout(&self) -> Vec<StepView> {
        steps_for_layout(&self.definition.steps, &self.context.get_state())
    }

    pub fn affordances(&self) -> NavigationAffordances {
        affordances(
            &self.context.get_state(),
            &self.definition.final_button_text,
            &self.messages.next_label,
        )
    }

    /// Mount (or remount) the wizard at its first step.
    pub async fn start(&self) -> WizardState {
        let span = info_span!(
            "usecase.wizard_controller.start",
            wizard = %self.id,
            flow = %self.definition.key
        );
        async {
            if let Some(index) = self.context.mounted_step() {
                self.unmount_step(index);
            }
            let actions = self
                .context
                .mount(self.definition.success_target.clone());
            self.execute_actions(actions).await;
            self.context.get_state()
        }
        .instrument(span)
        .await
    }

    /// Submit the current step through its registered handler.
    ///
    /// Only the handler registered when this call starts is awaited. Returns
    /// `Err(WizardError::NotActive)` once the wizard completed or was cancelled.
    pub async fn advance(&self) -> Result<AdvanceOutcome, WizardError> {
        let span = info_span!(
            "usecase.wizard_controller.advance",
            wizard = %self.id,
            flow = %self.definition.key
        );
        async {
            let SubmissionTicket {
                id,
                handler,
                mut shutdown_rx,
            } = match self.context.begin_submission() {
                SubmissionStart::NotActive => return Err(WizardError::NotActive),
                SubmissionStart::Busy => {
                    warn!("advance requested while a submission is pending");
                    return Ok(AdvanceOutcome::Busy);
                }
                SubmissionStart::NoHandler(actions) => {
                    warn!("advance requested before the step registered a handler");
                    self.execute_actions(actions).await;
                    return Ok(AdvanceOutcome::Rejected(SubmissionFailure::NoHandler));
                }
                SubmissionStart::Started(ticket) => ticket,
            };

            debug!(submission_id = id, "awaiting step submit handler");
            let result = tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    info!(submission_id = id, "submission abandoned by cancel");
                    return Ok(AdvanceOutcome::Cancelled);
                }
                result = handler.submit() => result,
            };

            let outcome = match self.context.finish_submission(id, result) {
                SubmissionEnd::Discarded => {
                    info!(submission_id = id, "discarding late submission result");
                    return Ok(AdvanceOutcome::Cancelled);
                }
                SubmissionEnd::Advanced { index, actions } => {
                    self.execute_actions(actions).await;
                    AdvanceOutcome::Advanced { index }
                }
                SubmissionEnd::Completed { actions } => {
                    self.execute_actions(actions).await;
                    AdvanceOutcome::Completed
                }
                SubmissionEnd::Rejected { failure, actions } => {
                    self.execute_actions(actions).await;
                    AdvanceOutcome::Rejected(failure)
                }
            };
            info!(outcome = ?outcome, "advance finished");
            Ok(outcome)
        }
        .instrument(span)
        .await
    }

    /// Go back one step. No-op at the first step or while submitting.
    pub async fn retreat(&self) -> WizardState {
        let span = info_span!("usecase.wizard_controller.retreat", wizard = %self.id);
        async {
            let actions = self.context.retreat();
            self.execute_actions(actions).await;
            self.context.get_state()
        }
        .instrument(span)
        .await
    }

    /// Discard all progress and navigate to the cancel target.
    pub async fn cancel(&self) -> WizardState {
        let span = info_span!("usecase.wizard_controller.cancel", wizard = %self.id);
        async {
            let actions = self.context.cancel();
            self.execute_actions(actions).await;
            self.context.get_state()
        }
        .instrument(span)
        .await
    }

    /// Replace (`Some`) or clear (`None`) the current step's handler.
    pub fn register_step_handler(&self, handler: Option<SharedSubmitHandler>) {
        self.context.register_handler(None, handler);
    }

    pub fn set_step_valid(&self, valid: bool) {
        self.context.set_step_valid(None, valid);
    }

    pub fn set_error(&self, message: Option<String>) {
        self.context.set_error(None, message);
    }

    pub fn set_success_target(&self, target: impl Into<NavigationTarget>) {
        self.context.set_success_target(None, target.into());
    }

    /// Step lifecycle runs first, in order; notifications and navigation after.
    async fn execute_actions(&self, actions: Vec<WizardAction>) {
        let mut effects = Vec::new();
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                WizardAction::UnmountStep { index } => self.unmount_step(index),
                WizardAction::MountStep { index } => self.mount_step(index),
                // Awaited by `advance` itself.
                WizardAction::InvokeHandler => {}
                effect => effects.push(effect),
            }
        }

        for effect in effects {
            match effect {
                WizardAction::NotifyStepAdvanced => {
                    if let Some(message) = self.definition.step_advanced_message.clone() {
                        self.notify(Notification::success(message)).await;
                    }
                }
                WizardAction::NotifyCompleted => {
                    if !self.definition.success_message.is_empty() {
                        self.notify(Notification::success(
                            self.definition.success_message.clone(),
                        ))
                        .await;
                    }
                }
                WizardAction::NotifyFailure(failure) => {
                    self.notify(Notification::error(failure.user_message(&self.messages)))
                        .await;
                }
                WizardAction::Navigate(target) => {
                    let target = match target {
                        TerminalTarget::Success => self.context.success_target(),
                        TerminalTarget::Cancel => self.definition.cancel_target.clone(),
                    };
                    self.navigate(&target).await;
                }
                WizardAction::InvokeHandler
                | WizardAction::UnmountStep { .. }
                | WizardAction::MountStep { .. } => {}
            }
        }
    }

    fn mount_step(&self, index: usize) {
        let Some(step) = self.definition.steps.get(index) else {
            warn!(index, "mount requested for unknown step index");
            return;
        };
        self.context.dispatch(WizardEvent::StepEntered);
        let epoch = self.context.begin_mount(index);
        debug!(index, step = %step.id, epoch, "mounting step");
        if let Some(component) = self.component_at(index) {
            component.activate(self.step_handle(epoch, &step.id));
        }
    }

    fn unmount_step(&self, index: usize) {
        if self.context.mounted_step() != Some(index) {
            return;
        }
        if let (Some(step), Some(component)) =
            (self.definition.steps.get(index), self.component_at(index))
        {
            debug!(index, step = %step.id, "unmounting step");
            component.deactivate(self.step_handle(self.context.current_epoch(), &step.id));
        }
        self.context.retire_mount();
    }

    fn component_at(&self, index: usize) -> Option<&Arc<dyn StepComponent>> {
        self.components.get(index).and_then(Option::as_ref)
    }

    fn step_handle(&self, epoch: u64, step: &StepId) -> StepHandle {
        Arc::new(StepContext::new(self.context.clone(), epoch, step.clone()))
    }

    async fn notify(&self, notification: Notification) {
        if let Err(err) = self.notifier.notify(notification).await {
            error!(error = %err, "failed to deliver wizard notification");
        }
    }

    async fn navigate(&self, target: &NavigationTarget) {
        info!(target = %target, "wizard navigating");
        if let Err(err) = self.navigator.navigate(target).await {
            error!(target = %target, error = %err, "wizard navigation failed");
        }
    }
}
