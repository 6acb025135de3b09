use serde::Serialize;

use pc_core::{
    config::ConsoleConfig,
    flows::{CatalogFlow, WizardDefinition},
    wizard::{affordances, steps_for_layout, NavigationAffordances, StepView, WizardState},
};

#[derive(Debug, Serialize)]
pub struct FlowDescription {
    pub definition: WizardDefinition,
    pub layout: Vec<StepView>,
    pub affordances: NavigationAffordances,
}

/// Definition with config overrides, plus how the wizard looks on mount.
pub fn describe(flow: CatalogFlow, config: &ConsoleConfig) -> FlowDescription {
    let definition = config.apply_to(flow.definition());
    let state = WizardState::initial(definition.step_count());
    let messages = config.messages();
    FlowDescription {
        layout: steps_for_layout(&definition.steps, &state),
        affordances: affordances(&state, &definition.final_button_text, &messages.next_label),
        definition,
    }
}
