use std::fs;

use pc_core::flows::CatalogFlow;
use pc_infra::load_config;
use tempfile::TempDir;

#[test]
fn config_file_overrides_catalog_flow() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("console.toml");
    fs::write(
        &path,
        r#"
        [messages]
        no_handler = "This step is still loading"
        next_label = "Continue"

        [flows.create-inventory-item]
        title = "New Inventory Item"
        success_target = "/inventory?tab=recent"
        final_button_text = "Create Item"

        [flows.ai-generation]
        step_advanced_message = ""
        "#,
    )?;

    let config = load_config(&path)?;

    let messages = config.messages();
    assert_eq!(messages.no_handler, "This step is still loading");
    assert_eq!(messages.next_label, "Continue");
    assert_eq!(
        messages.validation_failed,
        "Please correct the errors in the current step"
    );

    let inventory = config.apply_to(CatalogFlow::CreateInventoryItem.definition());
    assert_eq!(inventory.title, "New Inventory Item");
    assert_eq!(inventory.success_target.as_str(), "/inventory?tab=recent");
    assert_eq!(inventory.cancel_target.as_str(), "/inventory");
    assert_eq!(inventory.final_button_text, "Create Item");
    assert_eq!(inventory.steps.len(), 3);

    let ai = config.apply_to(CatalogFlow::AiGeneration.definition());
    assert_eq!(ai.step_advanced_message, None);

    let untouched = config.apply_to(CatalogFlow::CreateProduct.definition());
    assert_eq!(untouched, CatalogFlow::CreateProduct.definition());
    Ok(())
}

#[test]
fn unknown_keys_are_ignored_and_wrong_types_rejected() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("console.toml");

    fs::write(&path, "[theme]\naccent = \"blue\"\n")?;
    assert!(load_config(&path)?.flows.is_empty());

    fs::write(&path, "[messages]\nno_handler = 3\n")?;
    assert!(load_config(&path).is_err());
    Ok(())
}
