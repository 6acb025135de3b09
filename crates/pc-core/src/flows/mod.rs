//! Flow definitions for the catalog console wizards.

pub mod catalog;
pub mod definition;
pub mod routes;

pub use catalog::{CatalogFlow, GeneratedEntity};
pub use definition::WizardDefinition;
