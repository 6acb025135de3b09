//! # Configuration Loader / 配置加载器
//!
//! Reads the console TOML file and maps it onto [`ConsoleConfig`]. Pure data
//! loading: missing sections stay empty, merging with built-in defaults
//! happens where the config is applied.

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use pc_core::config::ConsoleConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read, is not valid TOML, or does not
/// map onto the config structure.
pub fn load_config(config_path: impl AsRef<Path>) -> anyhow::Result<ConsoleConfig> {
    let config_path = config_path.as_ref();
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    let config = ConsoleConfig::from_toml(&toml_value).with_context(|| {
        format!(
            "Config file does not match the console schema: {}",
            config_path.display()
        )
    })?;
    debug!(
        path = %config_path.display(),
        flow_overrides = config.flows.len(),
        "console config loaded"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(
            file,
            r#"
            [messages]
            validation_failed = "Fix the highlighted fields"

            [flows.bulk-brand]
            success_target = "/brands?created=1"
            "#
        )?;

        let config = load_config(file.path())?;
        assert_eq!(
            config.messages().validation_failed,
            "Fix the highlighted fields"
        );
        assert_eq!(
            config.flows["bulk-brand"].success_target.as_deref(),
            Some("/brands?created=1")
        );
        Ok(())
    }

    #[test]
    fn test_load_config_missing_file_names_the_path() {
        let err = load_config("/definitely/not/here/console.toml").expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here/console.toml"));
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "[messages\nno_handler = ")?;
        let err = load_config(file.path()).expect_err("invalid toml");
        assert!(err.to_string().contains("TOML"));
        Ok(())
    }
}
