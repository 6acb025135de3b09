//! Built-in catalog flows.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::flows::routes::{
    AI_TOOLS_URL, BRANDS_URL, CATEGORIES_URL, INVENTORY_URL, PRODUCTS_URL,
    PRODUCT_ATTRIBUTES_URL,
};
use crate::flows::WizardDefinition;
use crate::wizard::{MessageOverrides, NavigationTarget, WizardError};

const PROMPT_SUBMITTED_MESSAGE: &str = "Prompt successfully submitted";
const ALL_STEPS_COMPLETED_MESSAGE: &str = "All steps completed";
const FORM_ERRORS_MESSAGE: &str = "Please correct errors on form";

/// Texts of the AI generation layout.
fn ai_layout_messages() -> MessageOverrides {
    MessageOverrides::default()
        .with_no_handler("No step handler set")
        .with_rejected_prefix("errors: ")
}

/// Multi-step flows shipped with the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CatalogFlow {
    AiGeneration,
    BulkBrand,
    CreateInventoryItem,
    CreateProduct,
    ProductFromImage,
    ProductAiGeneration,
}

impl CatalogFlow {
    pub const ALL: [CatalogFlow; 6] = [
        CatalogFlow::AiGeneration,
        CatalogFlow::BulkBrand,
        CatalogFlow::CreateInventoryItem,
        CatalogFlow::CreateProduct,
        CatalogFlow::ProductFromImage,
        CatalogFlow::ProductAiGeneration,
    ];

    pub fn key(self) -> &'static str {
        match self {
            CatalogFlow::AiGeneration => "ai-generation",
            CatalogFlow::BulkBrand => "bulk-brand",
            CatalogFlow::CreateInventoryItem => "create-inventory-item",
            CatalogFlow::CreateProduct => "create-product",
            CatalogFlow::ProductFromImage => "product-from-image",
            CatalogFlow::ProductAiGeneration => "product-ai-generation",
        }
    }

    pub fn definition(self) -> WizardDefinition {
        match self {
            CatalogFlow::AiGeneration => {
                WizardDefinition::new(self.key(), "Generate Data with AI", BRANDS_URL, AI_TOOLS_URL)
                    .with_step("prompt", "Generate Prompt")
                    .with_step("review", "Review Data")
                    .with_success_message(ALL_STEPS_COMPLETED_MESSAGE)
                    .with_step_advanced_message(PROMPT_SUBMITTED_MESSAGE)
                    .with_messages(ai_layout_messages())
            }
            CatalogFlow::BulkBrand => {
                WizardDefinition::new(self.key(), "Bulk Brand Creation", BRANDS_URL, BRANDS_URL)
                    .with_step("bulk-brand-prompt", "Bulk Brand Prompt Generation")
                    .with_step("bulk-brand-review", "Bulk Brand Review")
            }
            CatalogFlow::CreateInventoryItem => WizardDefinition::new(
                self.key(),
                "Create New Inventory Item",
                INVENTORY_URL,
                INVENTORY_URL,
            )
            .with_step("choose-product", "Choose Product")
            .with_step("choose-product-attributes", "Choose Product Attributes")
            .with_step("inventory-item-data", "Inventory Item Data")
            .with_success_message("Inventory Item Created")
            .with_messages(MessageOverrides::default().with_validation_failed(FORM_ERRORS_MESSAGE)),
            CatalogFlow::CreateProduct => {
                WizardDefinition::new(self.key(), "Create New Product", PRODUCTS_URL, PRODUCTS_URL)
                    .with_step("product", "Product Info")
                    .with_step("attribute_set", "Attribute Set")
                    .with_step("image_association", "Provide Images")
                    .with_success_message("Product Created")
                    .with_final_button_text("Skip/Finish")
                    .with_messages(
                        MessageOverrides::default().with_validation_failed(FORM_ERRORS_MESSAGE),
                    )
            }
            CatalogFlow::ProductFromImage => WizardDefinition::new(
                self.key(),
                "Generate Product with Image",
                PRODUCTS_URL,
                PRODUCTS_URL,
            )
            .with_step("prompt", "Generate Prompt")
            .with_step("review", "Review Product Info")
            .with_success_message(ALL_STEPS_COMPLETED_MESSAGE)
            .with_step_advanced_message(PROMPT_SUBMITTED_MESSAGE)
            .with_messages(ai_layout_messages()),
            CatalogFlow::ProductAiGeneration => WizardDefinition::new(
                self.key(),
                "Generate Products with AI",
                PRODUCTS_URL,
                PRODUCTS_URL,
            )
            .with_step("prompt", "Generate Prompt")
            .with_step("review", "Review Data")
            .with_success_message(ALL_STEPS_COMPLETED_MESSAGE)
            .with_step_advanced_message(PROMPT_SUBMITTED_MESSAGE)
            .with_messages(ai_layout_messages()),
        }
    }
}

impl Display for CatalogFlow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CatalogFlow {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CatalogFlow::ALL
            .into_iter()
            .find(|flow| flow.key() == s)
            .ok_or_else(|| WizardError::UnknownFlow(s.to_string()))
    }
}

/// Entity type chosen in the AI prompt step; decides where completion lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratedEntity {
    Brand,
    Category,
    ProductAttribute,
    Product,
}

impl GeneratedEntity {
    pub fn success_target(self) -> NavigationTarget {
        match self {
            GeneratedEntity::Brand => BRANDS_URL.into(),
            GeneratedEntity::Category => CATEGORIES_URL.into(),
            GeneratedEntity::ProductAttribute => PRODUCT_ATTRIBUTES_URL.into(),
            GeneratedEntity::Product => PRODUCTS_URL.into(),
        }
    }
}
