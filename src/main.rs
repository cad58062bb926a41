use anyhow::Result;
use clap::{Parser, Subcommand};

/// mediavault - password-gated image library
#[derive(Parser)]
#[command(name = "mediavault")]
#[command(about = "Upload, browse and delete images behind a shared password", long_about = None)]
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
    let cli = Cli::parse();

    let config = mediavault::config::Config::load(cli.config.clone())?;

    mediavault::observability::init_observability(
        "mediavault",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    match cli.command {
        Commands::Serve { host, port } => mediavault::cli::serve(config, host, port).await,
        Commands::Migrate => mediavault::cli::migrate(&config).await,
        Commands::Reset => mediavault::cli::reset(&config).await,
    }
}
