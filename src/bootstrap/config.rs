//! # Configuration resolution / 配置解析
//!
//! Decides which file (if any) feeds the console config. Parsing lives in
//! `pc_infra::config`.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use pc_core::config::ConsoleConfig;
use pc_infra::load_config;

/// Environment variable naming the config file when `--config` is absent.
pub const CONFIG_ENV_VAR: &str = "CATALOG_CONSOLE_CONFIG";

/// File picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "catalog-console.toml";

/// Resolve and load the console configuration.
///
/// Order: explicit path, then `CATALOG_CONSOLE_CONFIG`, then
/// `./catalog-console.toml` if present. With none of them, built-in
/// defaults apply. An explicitly named file that fails to load is an error.
pub fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<ConsoleConfig> {
    let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    resolve_config_from(explicit, from_env, Path::new(DEFAULT_CONFIG_FILE))
}

fn resolve_config_from(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    fallback: &Path,
) -> anyhow::Result<ConsoleConfig> {
    if let Some(path) = explicit.map(Path::to_path_buf).or(from_env) {
        info!(path = %path.display(), "loading console config");
        return load_config(&path);
    }
    if fallback.is_file() {
        info!(path = %fallback.display(), "loading console config from working directory");
        return load_config(fallback);
    }
    debug!("no console config file; using built-in defaults");
    Ok(ConsoleConfig::default())
}
