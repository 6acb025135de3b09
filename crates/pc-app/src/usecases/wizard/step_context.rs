use std::sync::Arc;

use pc_core::{
    ids::StepId,
    ports::{SharedSubmitHandler, StepRegistrar},
    wizard::NavigationTarget,
};

use super::context::WizardContext;

/// Handle given to a step component for one mount.
///
/// 步骤挂载句柄：步骤卸载后，通过旧句柄的调用会被忽略。
#[derive(Clone)]
pub struct StepContext {
    context: Arc<WizardContext>,
    epoch: u64,
    step: StepId,
}

impl StepContext {
    pub(crate) fn new(context: Arc<WizardContext>, epoch: u64, step: StepId) -> Self {
        Self {
            context,
            epoch,
            step,
        }
    }

    pub fn step_id(&self) -> &StepId {
        &self.step
    }

    /// False once the step this handle was created for has unmounted.
    pub fn is_current(&self) -> bool {
        self.context.current_epoch() == self.epoch
    }
}

impl std::fmt::Debug for StepContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepContext")
            .field("step", &self.step)
            .field("epoch", &self.epoch)
            .finish()
    }
}

impl StepRegistrar for StepContext {
    fn register_handler(&self, handler: Option<SharedSubmitHandler>) {
        self.context.register_handler(Some(self.epoch), handler);
    }

    fn set_step_valid(&self, valid: bool) {
        self.context.set_step_valid(Some(self.epoch), valid);
    }

    fn set_error(&self, message: Option<String>) {
        self.context.set_error(Some(self.epoch), message);
    }

    fn set_success_target(&self, target: NavigationTarget) {
        self.context.set_success_target(Some(self.epoch), target);
    }
}
