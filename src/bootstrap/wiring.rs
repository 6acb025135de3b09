//! Dependency wiring / 依赖注入
//!
//! Builds a controller for a catalog flow with in-process adapters and a
//! scripted component bound to every step.

use std::sync::Arc;

use tracing::debug;

use pc_app::WizardController;
use pc_core::{
    config::ConsoleConfig,
    flows::{CatalogFlow, GeneratedEntity},
    ports::StepComponent,
};
use pc_infra::{RouteHistory, ScriptedStep, SystemClock, ToastQueue};

/// Adapters shared by one console session.
pub struct ConsoleRuntime {
    pub toasts: Arc<ToastQueue>,
    pub router: Arc<RouteHistory>,
}

impl ConsoleRuntime {
    pub fn new() -> Self {
        Self {
            toasts: Arc::new(ToastQueue::new(Arc::new(SystemClock))),
            router: Arc::new(RouteHistory::new()),
        }
    }
}

impl Default for ConsoleRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// Controller for `flow` with config overrides applied.
///
/// Returns the scripted components in step order. `entity` re-targets the
/// completion route from the first step, as the AI prompt step does.
pub fn build_controller(
    flow: CatalogFlow,
    config: &ConsoleConfig,
    runtime: &ConsoleRuntime,
    entity: Option<GeneratedEntity>,
) -> anyhow::Result<(WizardController, Vec<Arc<ScriptedStep>>)> {
    let definition = config.apply_to(flow.definition());
    let step_ids: Vec<_> = definition.steps.iter().map(|step| step.id.clone()).collect();

    let mut controller = WizardController::new(
        definition,
        config.messages(),
        runtime.toasts.clone(),
        runtime.router.clone(),
    )?;

    let mut steps = Vec::with_capacity(step_ids.len());
    for (index, id) in step_ids.into_iter().enumerate() {
        let mut step = ScriptedStep::default();
        if let (0, Some(entity)) = (index, entity) {
            step = step.with_success_target(entity.success_target());
        }
        let step = Arc::new(step);
        controller = controller.with_component(id, step.clone() as Arc<dyn StepComponent>)?;
        steps.push(step);
    }

    debug!(flow = %flow, wizard = %controller.id(), "wizard controller wired");
    Ok((controller, steps))
}
