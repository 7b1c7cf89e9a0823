use anyhow::Result;
use clap::{Parser, Subcommand};

/// codex - factions and heroes catalog
#[derive(Parser)]
#[command(name = "codex")]
#[command(about = "Browse factions and heroes, collect suggestions", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = codex::config::Config::load(cli.config)?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    codex::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => codex::cli::serve(config, host, port).await,
        Commands::Migrate => codex::cli::migrate(config).await,
        Commands::Reset => codex::cli::reset(config).await,
    }
}
