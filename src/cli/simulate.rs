use std::collections::VecDeque;

use serde::Serialize;
use tracing::{info, info_span, warn, Instrument};

use pc_core::{
    config::ConsoleConfig,
    flows::{CatalogFlow, GeneratedEntity},
    wizard::{NavigationTarget, WizardState},
};
use pc_infra::{ScriptedOutcome, ToastRecord};

use crate::bootstrap::{build_controller, ConsoleRuntime};

pub const DEFAULT_MAX_ATTEMPTS: usize = 20;

#[derive(Debug, Clone, Default)]
pub struct SimulationOptions {
    /// Consumed in order by whichever step is current; steps accept once empty.
    pub outcomes: Vec<ScriptedOutcome>,
    pub entity: Option<GeneratedEntity>,
    pub cancel_after: Option<usize>,
    pub max_attempts: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttemptReport {
    pub step: String,
    pub scripted: Option<String>,
    pub outcome: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub flow: String,
    pub attempts: Vec<AttemptReport>,
    pub final_state: WizardState,
    pub notifications: Vec<ToastRecord>,
    pub routes: Vec<NavigationTarget>,
}

/// Drive `flow` to a terminal state (or the attempt cap) with scripted steps.
pub async fn simulate(
    flow: CatalogFlow,
    config: &ConsoleConfig,
    options: SimulationOptions,
) -> anyhow::Result<SimulationReport> {
    let span = info_span!("cli.simulate", flow = %flow);
    async {
        let runtime = ConsoleRuntime::new();
        let (controller, steps) = build_controller(flow, config, &runtime, options.entity)?;
        let mut outcomes: VecDeque<_> = options.outcomes.into();
        let mut attempts = Vec::new();

        controller.start().await;
        while controller.snapshot().is_active() {
            if options.cancel_after == Some(attempts.len()) {
                info!(attempts = attempts.len(), "cancelling simulated wizard");
                controller.cancel().await;
                break;
            }
            if attempts.len() >= options.max_attempts {
                warn!(max_attempts = options.max_attempts, "simulation stopped at attempt cap");
                break;
            }

            let index = controller.snapshot().current_step_index;
            let scripted = outcomes.pop_front();
            if let (Some(outcome), Some(step)) = (scripted.clone(), steps.get(index)) {
                step.push(outcome);
            }
            let outcome = controller.advance().await?;
            attempts.push(AttemptReport {
                step: controller.definition().steps[index].id.to_string(),
                scripted: scripted.map(|outcome| outcome.to_string()),
                outcome: format!("{outcome:?}"),
            });
        }

        Ok(SimulationReport {
            flow: flow.to_string(),
            attempts,
            final_state: controller.snapshot(),
            notifications: runtime.toasts.drain().await,
            routes: runtime.router.history().await,
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_core::wizard::WizardPhase;

    fn options(outcomes: Vec<ScriptedOutcome>) -> SimulationOptions {
        SimulationOptions {
            outcomes,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            ..SimulationOptions::default()
        }
    }

    #[tokio::test]
    async fn failures_are_retried_until_completion() -> anyhow::Result<()> {
        let report = simulate(
            CatalogFlow::BulkBrand,
            &ConsoleConfig::default(),
            options(vec![
                ScriptedOutcome::Accept,
                ScriptedOutcome::Reject(Some("No brands to create".to_string())),
            ]),
        )
        .await?;

        assert_eq!(report.attempts.len(), 3);
        assert_eq!(report.attempts[1].step, "bulk-brand-review");
        assert_eq!(report.final_state.phase, WizardPhase::Completed);
        let messages: Vec<&str> = report
            .notifications
            .iter()
            .map(|toast| toast.notification.message.as_str())
            .collect();
        assert_eq!(messages, vec!["No brands to create"]);
        assert_eq!(report.routes, vec![NavigationTarget::new("/brands")]);
        Ok(())
    }

    #[tokio::test]
    async fn entity_choice_retargets_ai_generation() -> anyhow::Result<()> {
        let report = simulate(
            CatalogFlow::AiGeneration,
            &ConsoleConfig::default(),
            SimulationOptions {
                entity: Some(GeneratedEntity::Category),
                ..options(vec![])
            },
        )
        .await?;

        assert_eq!(report.routes, vec![NavigationTarget::new("/categories")]);
        Ok(())
    }

    #[tokio::test]
    async fn cancel_after_navigates_to_cancel_target() -> anyhow::Result<()> {
        let report = simulate(
            CatalogFlow::CreateInventoryItem,
            &ConsoleConfig::default(),
            SimulationOptions {
                cancel_after: Some(1),
                ..options(vec![])
            },
        )
        .await?;

        assert_eq!(report.attempts.len(), 1);
        assert_eq!(report.final_state.phase, WizardPhase::Cancelled);
        assert_eq!(report.routes, vec![NavigationTarget::new("/inventory")]);
        Ok(())
    }

    #[tokio::test]
    async fn attempt_cap_stops_a_stuck_flow() -> anyhow::Result<()> {
        let report = simulate(
            CatalogFlow::CreateProduct,
            &ConsoleConfig::default(),
            SimulationOptions {
                max_attempts: 2,
                ..options(vec![ScriptedOutcome::Reject(None); 5])
            },
        )
        .await?;

        assert_eq!(report.attempts.len(), 2);
        assert_eq!(report.final_state.current_step_index, 0);
        assert!(report.routes.is_empty());
        Ok(())
    }
}
