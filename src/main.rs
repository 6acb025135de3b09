use clap::Parser;

use catalog_console_lib::bootstrap::tracing::init_tracing_subscriber;
use catalog_console_lib::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_subscriber(cli.verbose)?;

    let output = run(cli).await?;
    println!("{output}");
    Ok(())
}
