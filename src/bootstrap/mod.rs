//! Process bootstrap: logging, configuration and controller wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::resolve_config;
pub use wiring::{build_controller, ConsoleRuntime};
