//! page-actions CLI - raw markdown mirrors and llms.txt for documentation sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::build::Stage;

#[derive(Parser)]
#[command(name = "page-actions")]
#[command(about = "Raw markdown mirrors and llms.txt generation for documentation sites")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docs.toml config file
    #[arg(short, long, default_value = "docs.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter docs.toml and content directory
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Pre-build stage: mirror documents and write the config module
    Setup {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base URL exposed to client code (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Post-build stage: write llms.txt from the generated output
    Finalize {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base URL for manifest links (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Run both stages
    Build {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Base URL for manifest links (overrides config)
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Print the resolved client configuration
    Config,

    /// Mirror documents, serve the output and re-mirror on change
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },

    /// Preview a built output directory
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve
        #[arg(short, long, default_value = "dist")]
        dir: PathBuf,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Setup { output, base_url } => {
            commands::build::run(&cli.config, output, base_url, Stage::Setup)?;
        }
        Commands::Finalize { output, base_url } => {
            commands::build::run(&cli.config, output, base_url, Stage::Finalize)?;
        }
        Commands::Build { output, base_url } => {
            commands::build::run(&cli.config, output, base_url, Stage::All)?;
        }
        Commands::Config => {
            commands::config::run(&cli.config)?;
        }
        Commands::Dev {
            port,
            output,
            no_open,
        } => {
            commands::dev::run(&cli.config, port, output, !no_open).await?;
        }
        Commands::Serve { port, dir, no_open } => {
            commands::serve::run(&cli.config, port, dir, !no_open).await?;
        }
    }

    Ok(())
}
