use std::sync::Arc;

use crate::ports::SharedSubmitHandler;
use crate::wizard::NavigationTarget;

/// What a mounted step may do to its wizard.
///
/// Handles are bound to one mount of one step: once the step unmounts, calls
/// through its old handle are ignored.
pub trait StepRegistrar: Send + Sync {
    /// Replace (`Some`) or clear (`None`) the active submit handler.
    fn register_handler(&self, handler: Option<SharedSubmitHandler>);

    fn set_step_valid(&self, valid: bool);

    fn set_error(&self, message: Option<String>);

    fn set_success_target(&self, target: NavigationTarget);
}

pub type StepHandle = Arc<dyn StepRegistrar>;

/// Step contract: activated on mount, deactivated on unmount.
pub trait StepComponent: Send + Sync {
    /// Must register the step's submit handler through `handle`.
    fn activate(&self, handle: StepHandle);

    fn deactivate(&self, handle: StepHandle) {
        handle.register_handler(None);
    }
}
