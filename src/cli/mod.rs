//! Command-line front end.

mod describe;
mod simulate;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use pc_core::flows::{CatalogFlow, GeneratedEntity};
use pc_infra::ScriptedOutcome;

use crate::bootstrap::resolve_config;

pub use describe::{describe, FlowDescription};
pub use simulate::{simulate, AttemptReport, SimulationOptions, SimulationReport};

#[derive(Parser)]
#[command(name = "catalog-console")]
#[command(about = "Catalog console wizard runtime", long_about = None)]
pub struct Cli {
    /// Console config file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a flow's definition and initial layout as JSON
    Describe {
        /// Flow key, e.g. create-product
        flow: CatalogFlow,
    },
    /// Run a flow with scripted step outcomes
    Simulate {
        /// Flow key, e.g. create-product
        flow: CatalogFlow,
        /// Outcome of the next submission: ok, fail[:message] or error:message
        #[arg(short, long = "outcome")]
        outcomes: Vec<ScriptedOutcome>,
        /// Entity chosen in the first step (AI generation flow)
        #[arg(short, long)]
        entity: Option<EntityArg>,
        /// Cancel after this many advance attempts
        #[arg(long)]
        cancel_after: Option<usize>,
        /// Stop after this many advance attempts
        #[arg(long, default_value_t = simulate::DEFAULT_MAX_ATTEMPTS)]
        max_attempts: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    Brand,
    Category,
    ProductAttribute,
    Product,
}

impl From<EntityArg> for GeneratedEntity {
    fn from(value: EntityArg) -> Self {
        match value {
            EntityArg::Brand => GeneratedEntity::Brand,
            EntityArg::Category => GeneratedEntity::Category,
            EntityArg::ProductAttribute => GeneratedEntity::ProductAttribute,
            EntityArg::Product => GeneratedEntity::Product,
        }
    }
}

/// Run the parsed command and return its JSON output.
pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let config = resolve_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Describe { flow } => {
            let description = describe(flow, &config);
            Ok(serde_json::to_string_pretty(&description)?)
        }
        Commands::Simulate {
            flow,
            outcomes,
            entity,
            cancel_after,
            max_attempts,
        } => {
            let options = SimulationOptions {
                outcomes,
                entity: entity.map(GeneratedEntity::from),
                cancel_after,
                max_attempts,
            };
            let report = simulate(flow, &config, options).await?;
            Ok(serde_json::to_string_pretty(&report)?)
        }
    }
}
