//! Tracing configuration for the console.
//!
//! ## Behavior / 行为
//!
//! - **Development**: debug level for workspace crates
//! - **Production**: info level
//! - **RUST_LOG** overrides the defaults
//! - Output goes to stderr so command output on stdout stays machine-readable

use std::io;

use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

fn is_development() -> bool {
    cfg!(debug_assertions)
}

fn build_filter_directives(is_dev: bool, verbose: bool) -> Vec<String> {
    let workspace_level = if verbose || is_dev { "debug" } else { "info" };
    vec![
        if verbose { "info" } else { "warn" }.to_string(),
        format!("catalog_console={workspace_level}"),
        format!("catalog_console_lib={workspace_level}"),
        format!("pc_core={workspace_level}"),
        format!("pc_app={workspace_level}"),
        format!("pc_infra={workspace_level}"),
    ]
}

/// Initialize the global tracing subscriber.
///
/// Call once, before any command runs.
///
/// ## Errors / 错误
///
/// Returns `Err` if a subscriber is already registered.
pub fn init_tracing_subscriber(verbose: bool) -> anyhow::Result<()> {
    let filter_directives = build_filter_directives(is_development(), verbose);
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives.join(",")));

    // "2025-01-15 10:30:45.123 INFO [file.rs:42] [target] message"
    let stderr_layer = fmt::layer()
        .with_timer(fmt::time::ChronoUtc::new(
            "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        ))
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .with_ansi(cfg!(not(test)))
        .with_writer(io::stderr);

    registry().with(env_filter).with(stderr_layer).try_init()?;
    Ok(())
}
