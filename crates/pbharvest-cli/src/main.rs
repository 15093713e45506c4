mod collect;
mod sink;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pbharvest")]
#[command(about = "Harvests participatory-budgeting proposals into a tabular export")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Crawl the proposal listing and export every detail page
    Collect(collect::CollectArgs),
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = pbharvest_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Collect(args) => collect::run_collect(config, &args),
    }
}
