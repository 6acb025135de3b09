use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tracing_subscriber::EnvFilter;

use pc_app::{AdvanceOutcome, WizardController};
use pc_core::flows::{CatalogFlow, WizardDefinition};
use pc_core::ports::{SharedSubmitHandler, StepComponent};
use pc_core::wizard::{NavigationTarget, SubmissionFailure, WizardError, WizardMessages, WizardPhase};
use pc_infra::{RouteHistory, ScriptedOutcome, ScriptedStep, SystemClock, ToastQueue};

struct Harness {
    controller: Arc<WizardController>,
    toasts: Arc<ToastQueue>,
    router: Arc<RouteHistory>,
    steps: Vec<Arc<ScriptedStep>>,
}

impl Harness {
    async fn routes(&self) -> Vec<String> {
        self.router
            .history()
            .await
            .iter()
            .map(|route| route.as_str().to_string())
            .collect()
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Controller for `definition` with a scripted component bound to every step.
async fn harness(definition: WizardDefinition, scripts: Vec<Vec<ScriptedOutcome>>) -> Harness {
    init_tracing();
    let toasts = Arc::new(ToastQueue::new(Arc::new(SystemClock)));
    let router = Arc::new(RouteHistory::new());
    let step_ids: Vec<_> = definition.steps.iter().map(|s| s.id.clone()).collect();

    let mut controller = WizardController::new(
        definition,
        WizardMessages::default(),
        toasts.clone(),
        router.clone(),
    )
    .expect("valid definition");

    let mut scripts = scripts.into_iter();
    let mut steps = Vec::new();
    for id in step_ids {
        let step = Arc::new(ScriptedStep::new(scripts.next().unwrap_or_default()));
        controller = controller
            .with_component(id, step.clone() as Arc<dyn StepComponent>)
            .expect("known step");
        steps.push(step);
    }

    let controller = Arc::new(controller);
    controller.start().await;
    Harness {
        controller,
        toasts,
        router,
        steps,
    }
}

/// Bare controller without step components; handlers are registered by hand.
fn bare(definition: WizardDefinition) -> (WizardController, Arc<ToastQueue>, Arc<RouteHistory>) {
    init_tracing();
    let toasts = Arc::new(ToastQueue::new(Arc::new(SystemClock)));
    let router = Arc::new(RouteHistory::new());
    let controller = WizardController::new(
        definition,
        WizardMessages::default(),
        toasts.clone(),
        router.clone(),
    )
    .expect("valid definition");
    (controller, toasts, router)
}

/// Handler that resolves `true` once `gate` is notified, counting its calls.
fn gated_handler(gate: Arc<Notify>, calls: Arc<AtomicUsize>) -> SharedSubmitHandler {
    Arc::new(move || {
        calls.fetch_add(1, Ordering::SeqCst);
        let gate = gate.clone();
        async move {
            gate.notified().await;
            Ok::<_, anyhow::Error>(true)
        }
    })
}

fn prompt_review_confirm() -> WizardDefinition {
    WizardDefinition::new("import", "Import Items", "/items", "/home")
        .with_step("prompt", "Prompt")
        .with_step("review", "Review")
        .with_step("confirm", "Confirm")
        .with_success_message("Items imported")
}

#[tokio::test]
async fn test_advance_without_handler_reports_and_keeps_state() {
    let (controller, toasts, router) = bare(CatalogFlow::CreateProduct.definition());
    controller.start().await;
    let before = controller.snapshot();

    let outcome = controller.advance().await.expect("active wizard");

    assert_eq!(outcome, AdvanceOutcome::Rejected(SubmissionFailure::NoHandler));
    assert_eq!(controller.snapshot(), before);
    assert!(!controller.snapshot().is_submitting);
    assert_eq!(toasts.messages().await, vec!["Current step has issues"]);
    assert!(router.history().await.is_empty());
}

#[tokio::test]
async fn test_intermediate_advance_moves_forward_and_mounts_next_step() {
    let h = harness(CatalogFlow::CreateInventoryItem.definition(), vec![]).await;

    let outcome = h.controller.advance().await.expect("active wizard");

    assert_eq!(outcome, AdvanceOutcome::Advanced { index: 1 });
    let state = h.controller.snapshot();
    assert_eq!(state.current_step_index, 1);
    assert!(!state.is_submitting);
    // The next step registered its handler on mount.
    assert_eq!(state.phase, WizardPhase::Idle);
    assert_eq!(h.steps[0].submissions(), 1);
    assert_eq!(h.steps[1].activations(), 1);
    assert!(h.toasts.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_ai_flow_toasts_each_intermediate_advance() {
    let h = harness(CatalogFlow::ProductAiGeneration.definition(), vec![]).await;

    h.controller.advance().await.expect("active wizard");

    assert_eq!(
        h.toasts.messages().await,
        vec!["Prompt successfully submitted"]
    );
}

#[tokio::test]
async fn test_terminal_advance_resets_and_completes_once() {
    let h = harness(CatalogFlow::BulkBrand.definition(), vec![]).await;

    assert_eq!(
        h.controller.advance().await,
        Ok(AdvanceOutcome::Advanced { index: 1 })
    );
    assert_eq!(h.controller.advance().await, Ok(AdvanceOutcome::Completed));

    let state = h.controller.snapshot();
    assert_eq!(state.phase, WizardPhase::Completed);
    assert_eq!(state.current_step_index, 0);
    assert!(!state.is_submitting);
    assert!(!state.is_current_step_valid);
    assert_eq!(state.last_error, None);
    // Bulk brand creation has no success toast.
    assert!(h.toasts.snapshot().await.is_empty());
    assert_eq!(h.routes().await, vec!["/brands"]);

    // Completed wizards stay inert until restarted.
    assert_eq!(h.controller.advance().await, Err(WizardError::NotActive));
    assert_eq!(h.routes().await.len(), 1);
}

#[tokio::test]
async fn test_failed_advance_preserves_position() {
    let h = harness(
        CatalogFlow::CreateProduct.definition(),
        vec![vec![
            ScriptedOutcome::Reject(Some("Product name is required".to_string())),
            ScriptedOutcome::Reject(None),
            ScriptedOutcome::Fail("Backend unavailable".to_string()),
            ScriptedOutcome::Fail(String::new()),
        ]],
    )
    .await;

    let outcome = h.controller.advance().await.expect("active wizard");
    assert_eq!(
        outcome,
        AdvanceOutcome::Rejected(SubmissionFailure::Rejected {
            message: Some("Product name is required".to_string())
        })
    );
    assert_eq!(
        h.controller.snapshot().last_error.as_deref(),
        Some("Product name is required")
    );

    h.controller.advance().await.expect("active wizard");

    let outcome = h.controller.advance().await.expect("active wizard");
    assert_eq!(
        outcome,
        AdvanceOutcome::Rejected(SubmissionFailure::Unexpected {
            message: "Backend unavailable".to_string()
        })
    );
    assert_eq!(
        h.controller.snapshot().last_error.as_deref(),
        Some("Backend unavailable")
    );

    h.controller.advance().await.expect("active wizard");

    let state = h.controller.snapshot();
    assert_eq!(state.current_step_index, 0);
    assert!(!state.is_submitting);
    assert_eq!(state.phase, WizardPhase::Idle);
    assert_eq!(
        h.toasts.messages().await,
        vec![
            "Product name is required",
            "Please correct errors on form",
            "Backend unavailable",
            "Something went wrong while submitting this step",
        ]
    );
    assert!(h.router.history().await.is_empty());
}

#[tokio::test]
async fn test_retreat_stops_at_first_step() {
    let h = harness(CatalogFlow::CreateInventoryItem.definition(), vec![]).await;

    let state = h.controller.retreat().await;
    assert_eq!(state.current_step_index, 0);
    assert_eq!(h.steps[0].activations(), 1);

    h.controller.advance().await.expect("active wizard");
    let state = h.controller.retreat().await;
    assert_eq!(state.current_step_index, 0);
    assert_eq!(h.steps[0].activations(), 2);
    // Going back remounts the step without invoking its handler again.
    assert_eq!(h.steps[0].submissions(), 1);

    // The remounted first step is usable again.
    assert_eq!(
        h.controller.advance().await,
        Ok(AdvanceOutcome::Advanced { index: 1 })
    );
}

#[tokio::test]
async fn test_retreat_is_ignored_while_submission_pending() {
    let (controller, _toasts, _router) = bare(CatalogFlow::CreateInventoryItem.definition());
    controller.start().await;
    controller.register_step_handler(Some(Arc::new(|| async {
        Ok::<_, anyhow::Error>(true)
    })));
    controller.advance().await.expect("active wizard");

    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    controller.register_step_handler(Some(gated_handler(gate.clone(), calls.clone())));
    let mut states = controller.subscribe();

    let (outcome, during) = tokio::join!(controller.advance(), async {
        states
            .wait_for(|state| state.is_submitting)
            .await
            .expect("state channel open");
        let during = controller.retreat().await;
        gate.notify_one();
        during
    });

    assert_eq!(during.current_step_index, 1);
    assert!(during.is_submitting);
    assert_eq!(outcome, Ok(AdvanceOutcome::Advanced { index: 2 }));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.snapshot().current_step_index, 2);
}

#[tokio::test]
async fn test_ai_flow_rejection_uses_layout_texts() {
    let h = harness(
        CatalogFlow::AiGeneration.definition(),
        vec![vec![ScriptedOutcome::Reject(Some("prompt is empty".to_string()))]],
    )
    .await;

    h.controller.advance().await.expect("active wizard");
    assert_eq!(h.toasts.messages().await, vec!["errors: prompt is empty"]);

    let (controller, toasts, _router) = bare(CatalogFlow::ProductFromImage.definition());
    controller.start().await;
    controller.advance().await.expect("active wizard");
    assert_eq!(toasts.messages().await, vec!["No step handler set"]);
}

#[tokio::test]
async fn test_cancel_resets_from_any_state() {
    let h = harness(CatalogFlow::CreateInventoryItem.definition(), vec![]).await;
    h.controller.advance().await.expect("active wizard");
    h.controller.set_error(Some("stale".to_string()));

    let state = h.controller.cancel().await;

    assert_eq!(state.phase, WizardPhase::Cancelled);
    assert_eq!(state.current_step_index, 0);
    assert!(!state.is_current_step_valid);
    assert_eq!(state.last_error, None);
    assert_eq!(h.routes().await, vec!["/inventory"]);
    assert_eq!(h.controller.advance().await, Err(WizardError::NotActive));

    // Restarting mounts the first step again.
    let state = h.controller.start().await;
    assert_eq!(state.phase, WizardPhase::Idle);
    assert_eq!(h.steps[0].activations(), 2);
}

#[tokio::test]
async fn test_cancel_from_awaiting_handler_still_navigates() {
    let (controller, _toasts, router) = bare(CatalogFlow::AiGeneration.definition());
    controller.start().await;

    controller.cancel().await;

    assert_eq!(
        router.history().await,
        vec![NavigationTarget::new("/ai-tools")]
    );
}

#[tokio::test]
async fn test_stale_step_context_cannot_reregister() {
    let h = harness(CatalogFlow::BulkBrand.definition(), vec![]).await;
    let first_handle = h.steps[0].last_handle().expect("first step mounted");

    h.controller.advance().await.expect("active wizard");

    let stale_calls = Arc::new(AtomicUsize::new(0));
    let counter = stale_calls.clone();
    first_handle.register_handler(Some(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok::<_, anyhow::Error>(true) }
    })));

    assert_eq!(h.controller.advance().await, Ok(AdvanceOutcome::Completed));
    assert_eq!(stale_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.steps[1].submissions(), 1);
}

#[tokio::test]
async fn test_only_handler_active_at_advance_is_awaited() {
    let (controller, _toasts, _router) = bare(CatalogFlow::CreateProduct.definition());
    let controller = Arc::new(controller);
    controller.start().await;

    let gate = Arc::new(Notify::new());
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));
    controller.register_step_handler(Some(gated_handler(gate.clone(), first_calls.clone())));

    let mut states = controller.subscribe();
    let pending = tokio::spawn({
        let controller = controller.clone();
        async move { controller.advance().await }
    });
    states
        .wait_for(|state| state.is_submitting)
        .await
        .expect("state channel open");

    controller.register_step_handler(Some(gated_handler(gate.clone(), second_calls.clone())));
    gate.notify_one();

    let outcome = pending.await.expect("advance task");
    assert_eq!(outcome, Ok(AdvanceOutcome::Advanced { index: 1 }));
    assert_eq!(first_calls.load(Ordering::SeqCst), 1);
    assert_eq!(second_calls.load(Ordering::SeqCst), 0);
    // The replacement belonged to the step that was left.
    assert_eq!(controller.snapshot().phase, WizardPhase::AwaitingHandler);
}

#[tokio::test]
async fn test_concurrent_advance_is_busy() {
    let (controller, _toasts, _router) = bare(CatalogFlow::CreateProduct.definition());
    controller.start().await;
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    controller.register_step_handler(Some(gated_handler(gate.clone(), calls.clone())));
    let mut states = controller.subscribe();

    let (first, second) = tokio::join!(controller.advance(), async {
        states
            .wait_for(|state| state.is_submitting)
            .await
            .expect("state channel open");
        let second = controller.advance().await;
        gate.notify_one();
        second
    });

    assert_eq!(first, Ok(AdvanceOutcome::Advanced { index: 1 }));
    assert_eq!(second, Ok(AdvanceOutcome::Busy));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(controller.snapshot().current_step_index, 1);
}

#[tokio::test]
async fn test_cancel_during_pending_submission_discards_result() {
    let (controller, toasts, router) = bare(CatalogFlow::BulkBrand.definition());
    controller.start().await;
    let gate = Arc::new(Notify::new());
    let calls = Arc::new(AtomicUsize::new(0));
    controller.register_step_handler(Some(gated_handler(gate.clone(), calls.clone())));
    let mut states = controller.subscribe();

    let (outcome, _) = tokio::join!(controller.advance(), async {
        states
            .wait_for(|state| state.is_submitting)
            .await
            .expect("state channel open");
        controller.cancel().await;
        gate.notify_one();
    });

    assert_eq!(outcome, Ok(AdvanceOutcome::Cancelled));
    let state = controller.snapshot();
    assert_eq!(state.phase, WizardPhase::Cancelled);
    assert_eq!(state.current_step_index, 0);
    assert!(!state.is_submitting);
    assert_eq!(
        router.history().await,
        vec![NavigationTarget::new("/brands")]
    );
    assert!(toasts.snapshot().await.is_empty());
}

#[tokio::test]
async fn test_prompt_review_confirm_scenario() {
    let h = harness(
        prompt_review_confirm(),
        vec![
            vec![ScriptedOutcome::Accept],
            vec![
                ScriptedOutcome::Reject(Some("No items to import".to_string())),
                ScriptedOutcome::Accept,
            ],
            vec![ScriptedOutcome::Accept],
        ],
    )
    .await;

    assert_eq!(
        h.controller.advance().await,
        Ok(AdvanceOutcome::Advanced { index: 1 })
    );

    let outcome = h.controller.advance().await.expect("active wizard");
    assert!(matches!(outcome, AdvanceOutcome::Rejected(_)));
    assert_eq!(h.controller.snapshot().current_step_index, 1);
    assert_eq!(h.toasts.messages().await, vec!["No items to import"]);

    assert_eq!(
        h.controller.advance().await,
        Ok(AdvanceOutcome::Advanced { index: 2 })
    );
    let affordances = h.controller.affordances();
    assert!(affordances.is_last_step);
    assert_eq!(affordances.next_label, "Finish");

    assert_eq!(h.controller.advance().await, Ok(AdvanceOutcome::Completed));
    assert_eq!(h.controller.snapshot().current_step_index, 0);
    assert_eq!(
        h.toasts.messages().await,
        vec!["No items to import", "Items imported"]
    );
    assert_eq!(h.routes().await, vec!["/items"]);
}

#[tokio::test]
async fn test_generated_entity_retargets_completion() {
    let toasts = Arc::new(ToastQueue::new(Arc::new(SystemClock)));
    let router = Arc::new(RouteHistory::new());
    let prompt = Arc::new(ScriptedStep::default().with_success_target("/product-attributes"));
    let review = Arc::new(ScriptedStep::default());
    let controller = WizardController::new(
        CatalogFlow::AiGeneration.definition(),
        WizardMessages::default(),
        toasts.clone(),
        router.clone(),
    )
    .and_then(|c| c.with_component("prompt", prompt))
    .and_then(|c| c.with_component("review", review))
    .expect("valid wiring");

    controller.start().await;
    controller.advance().await.expect("active wizard");
    controller.advance().await.expect("active wizard");

    assert_eq!(
        router.current().await,
        Some(NavigationTarget::new("/product-attributes"))
    );
}

#[tokio::test]
async fn test_restart_forgets_success_target_override() {
    let (controller, _toasts, router) = bare(CatalogFlow::AiGeneration.definition());
    controller.start().await;
    controller.set_success_target("/categories");

    controller.start().await;
    for _ in 0..2 {
        controller.register_step_handler(Some(Arc::new(|| async {
            Ok::<_, anyhow::Error>(true)
        })));
        controller.advance().await.expect("active wizard");
    }

    assert_eq!(router.history().await, vec![NavigationTarget::new("/brands")]);
}

#[tokio::test]
async fn test_layout_tracks_progress() {
    let h = harness(CatalogFlow::CreateInventoryItem.definition(), vec![]).await;
    h.controller.advance().await.expect("active wizard");

    let layout = h.controller.steps_for_layout();
    let flags: Vec<(bool, bool)> = layout
        .iter()
        .map(|view| (view.is_completed, view.is_current))
        .collect();
    assert_eq!(flags, vec![(true, false), (false, true), (false, false)]);

    let affordances = h.controller.affordances();
    assert!(affordances.can_go_next);
    assert!(affordances.can_go_previous);
    assert_eq!(affordances.next_label, "Next");
}

#[tokio::test]
async fn test_independent_controllers_do_not_share_state() {
    let a = harness(CatalogFlow::BulkBrand.definition(), vec![]).await;
    let b = harness(CatalogFlow::BulkBrand.definition(), vec![]).await;

    a.controller.advance().await.expect("active wizard");

    assert_eq!(a.controller.snapshot().current_step_index, 1);
    assert_eq!(b.controller.snapshot().current_step_index, 0);
    assert_ne!(a.controller.id(), b.controller.id());
}
