use clap::{Parser, Subcommand};
use ecostats_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod commands;
mod di;

#[derive(Parser)]
#[command(name = "ecostats")]
#[command(version)]
#[command(about = "Ecostats - plugin marketplace ecosystem statistics")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Scanner dataset path
    #[arg(long, value_name = "FILE")]
    data: Option<String>,

    /// Stats cache TTL in seconds
    #[arg(long)]
    cache_ttl: Option<u64>,

    /// Seed for synthetic data and estimates
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print ecosystem statistics as JSON
    Show(commands::ShowArgs),
    /// Print cache diagnostics as JSON
    CacheStats {
        #[arg(long)]
        pretty: bool,
    },
    /// Keep the stats cache warm until Ctrl-C
    Watch,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        data_path: cli.data.clone(),
        cache_ttl_secs: cli.cache_ttl,
        rng_seed: cli.seed,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Ecostats v{}", env!("CARGO_PKG_VERSION"));

    let use_cases = di::UseCases::new(&config)?;

    match cli.command {
        Command::Show(args) => commands::run_show(&use_cases, args).await?,
        Command::CacheStats { pretty } => commands::run_cache_stats(&use_cases, pretty).await?,
        Command::Watch => commands::run_watch(&use_cases, &config).await?,
    }

    Ok(())
}
