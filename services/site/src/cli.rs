use crate::reports::{
    run_compare, run_rank, run_sitemap, run_validate, CompareArgs, RankArgs, SitemapArgs,
    ValidateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use custody_compare::config::AppConfig;
use custody_compare::error::AppError;
use custody_compare::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Custody Compare",
    about = "Serve and inspect the Bitcoin custody comparison site from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print providers ranked by Custody Score
    Rank(RankArgs),
    /// Resolve a comparison slug and print the head-to-head summary
    Compare(CompareArgs),
    /// Print the sitemap for the configured site origin
    Sitemap(SitemapArgs),
    /// Load a dataset file and report whether it passes validation
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

/// Loads configuration and installs logging shared by every subcommand.
pub(crate) fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));
    let config = bootstrap()?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Rank(args) => run_rank(&config, args),
        Command::Compare(args) => run_compare(&config, args),
        Command::Sitemap(args) => run_sitemap(&config, args),
        Command::Validate(args) => run_validate(&config, args),
    }
}
