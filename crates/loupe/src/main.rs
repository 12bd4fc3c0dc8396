//! Loupe CLI - Inspect the generation metadata embedded in AI-created images.
//!
//! Loupe reads the parameter text that image-generation tools store inside
//! their output files and prints it as parsed fields, raw text, or JSON.
//!
//! # Usage
//!
//! ```bash
//! # Inspect a single image
//! loupe inspect image.png
//!
//! # Inspect several inputs, as JSON
//! loupe inspect a.png https://example.com/b.png --format json
//!
//! # Check whether any input carries metadata (exit code 0/1)
//! loupe scan render-01.png render-02.png
//!
//! # View configuration
//! loupe config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Loupe - Inspect the generation metadata embedded in AI-created images.
#[derive(Parser, Debug)]
#[command(name = "loupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract and display metadata from images
    Inspect(cli::inspect::InspectArgs),

    /// Report the first input that carries metadata
    Scan(cli::scan::ScanArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go to stderr directly.
    let config = match loupe_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `loupe config path`."
            );
            loupe_core::Config::default()
        }
    };
    logging::init(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Loupe v{}", loupe_core::VERSION);

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Inspect(args) => cli::inspect::execute(args, config).await,
        Commands::Scan(args) => {
            let found = cli::scan::execute(args, config).await?;
            if !found {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
