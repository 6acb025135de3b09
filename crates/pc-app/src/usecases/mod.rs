//! Business logic use cases

pub mod wizard;

pub use wizard::WizardController;
