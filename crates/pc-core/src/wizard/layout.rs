//! View data for the wizard chrome (step sidebar and navigation buttons).

use serde::{Deserialize, Serialize};

use crate::ids::StepId;
use crate::wizard::{WizardState, WizardStep};

/// One entry of the step sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepView {
    pub id: StepId,
    pub title: String,
    pub is_completed: bool,
    pub is_current: bool,
}

/// Which navigation buttons are enabled and how the forward button reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationAffordances {
    pub can_go_next: bool,
    pub can_go_previous: bool,
    pub is_first_step: bool,
    pub is_last_step: bool,
    pub is_submitting: bool,
    pub next_label: String,
}

/// Steps before the current index are completed.
pub fn steps_for_layout(steps: &[WizardStep], state: &WizardState) -> Vec<StepView> {
    steps
        .iter()
        .enumerate()
        .map(|(idx, step)| StepView {
            id: step.id.clone(),
            title: step.title.clone(),
            is_completed: state.is_active() && idx < state.current_step_index,
            is_current: state.is_active() && idx == state.current_step_index,
        })
        .collect()
}

pub fn affordances(
    state: &WizardState,
    final_button_text: &str,
    next_label: &str,
) -> NavigationAffordances {
    let active = state.is_active();
    let is_last_step = state.is_last_step();
    NavigationAffordances {
        can_go_next: active && state.is_current_step_valid && !state.is_submitting,
        can_go_previous: active && !state.is_first_step() && !state.is_submitting,
        is_first_step: state.is_first_step(),
        is_last_step,
        is_submitting: state.is_submitting,
        next_label: if is_last_step {
            final_button_text.to_string()
        } else {
            next_label.to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::WizardPhase;

    fn steps() -> Vec<WizardStep> {
        vec![
            WizardStep::new("choose-product", "Choose Product"),
            WizardStep::new("choose-product-attributes", "Choose Product Attributes"),
            WizardStep::new("inventory-item-data", "Inventory Item Data"),
        ]
    }

    #[test]
    fn steps_before_current_are_completed() {
        let state = WizardState {
            current_step_index: 2,
            phase: WizardPhase::Idle,
            ..WizardState::initial(3)
        };
        let views = steps_for_layout(&steps(), &state);
        let completed: Vec<bool> = views.iter().map(|v| v.is_completed).collect();
        let current: Vec<bool> = views.iter().map(|v| v.is_current).collect();
        assert_eq!(completed, vec![true, true, false]);
        assert_eq!(current, vec![false, false, true]);
    }

    #[test]
    fn next_requires_valid_step_and_no_pending_submission() {
        let mut state = WizardState::initial(3);
        assert!(!affordances(&state, "Finish", "Next").can_go_next);

        state.is_current_step_valid = true;
        assert!(affordances(&state, "Finish", "Next").can_go_next);

        state.is_submitting = true;
        state.phase = WizardPhase::Submitting;
        let view = affordances(&state, "Finish", "Next");
        assert!(!view.can_go_next);
        assert!(view.is_submitting);
    }

    #[test]
    fn last_step_uses_final_button_text() {
        let state = WizardState {
            current_step_index: 2,
            ..WizardState::initial(3)
        };
        let view = affordances(&state, "Create", "Next");
        assert!(view.is_last_step);
        assert!(view.can_go_previous);
        assert_eq!(view.next_label, "Create");

        let first = affordances(&WizardState::initial(3), "Create", "Next");
        assert_eq!(first.next_label, "Next");
        assert!(!first.can_go_previous);
    }

    #[test]
    fn terminal_state_disables_navigation() {
        let state = WizardState {
            is_current_step_valid: true,
            ..WizardState::reset_to(3, WizardPhase::Cancelled)
        };
        let view = affordances(&state, "Finish", "Next");
        assert!(!view.can_go_next);
        assert!(!view.can_go_previous);
        assert!(steps_for_layout(&steps(), &state)
            .iter()
            .all(|v| !v.is_current && !v.is_completed));
    }
}
