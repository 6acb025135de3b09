use std::fs;

use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;

use catalog_console_lib::cli::{run, Cli};

async fn run_json(args: &[&str]) -> anyhow::Result<Value> {
    let cli = Cli::try_parse_from(args)?;
    Ok(serde_json::from_str(&run(cli).await?)?)
}

#[tokio::test]
async fn describe_applies_config_file() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("console.toml");
    fs::write(
        &config,
        "[messages]\nnext_label = \"Continue\"\n\n[flows.create-inventory-item]\ntitle = \"Stock Item\"\n",
    )?;
    let config = config.to_string_lossy().to_string();

    let json = run_json(&[
        "catalog-console",
        "--config",
        &config,
        "describe",
        "create-inventory-item",
    ])
    .await?;

    assert_eq!(json["definition"]["title"], "Stock Item");
    assert_eq!(json["affordances"]["next_label"], "Continue");
    assert_eq!(json["layout"].as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn simulate_reports_notifications_and_routes() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let config = dir.path().join("console.toml");
    fs::write(&config, "")?;
    let config = config.to_string_lossy().to_string();

    let json = run_json(&[
        "catalog-console",
        "--config",
        &config,
        "simulate",
        "create-product",
        "--outcome",
        "error:Upload failed",
    ])
    .await?;

    assert_eq!(json["flow"], "create-product");
    assert_eq!(json["final_state"]["phase"], "completed");
    assert_eq!(json["notifications"][0]["level"], "error");
    assert_eq!(json["notifications"][0]["message"], "Upload failed");
    assert_eq!(json["notifications"][1]["message"], "Product Created");
    assert_eq!(json["routes"][0], "/products");
    Ok(())
}
