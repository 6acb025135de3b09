//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define console configuration data structures
//! - Provide TOML → DTO mapping
//! - Merge overrides into built-in flow definitions and messages
//!
//! The DTO accepts whatever the file contains; a missing section simply means
//! "keep the built-in value".

pub mod console_config;

pub use console_config::{ConsoleConfig, FlowOverride};
