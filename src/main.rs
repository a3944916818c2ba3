use anyhow::Result;
use clap::{Parser, Subcommand};
use javore::cli::{plan, stats, tdee};
use javore::config::Config;
use javore::observability::init_logging;

/// javore - weekly meal planning from the terminal
#[derive(Parser)]
#[command(name = "javore")]
#[command(about = "Weekly meal plans, shopping lists and calorie targets", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a weekly meal plan and its shopping list
    Plan(plan::PlanArgs),
    /// Compute daily calorie and macro targets from body data
    Tdee(tdee::TdeeArgs),
    /// Summarize the recipe catalog
    Stats(stats::StatsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize logging
    init_logging(&config.observability.log_level)?;

    match cli.command {
        Commands::Plan(args) => plan::run(&config, args),
        Commands::Tdee(args) => tdee::run(args),
        Commands::Stats(args) => stats::run(&config, args),
    }
}
