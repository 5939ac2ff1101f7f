//! Precis CLI - Extractive text summarization
//!
//! Summarizes text or PDFs from the terminal, or serves the summarization
//! page and JSON API locally.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use precis_core::{Algorithm, Config, SentenceCount};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Precis - Extractive text summarization
#[derive(Parser)]
#[command(name = "precis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Server port (overrides config)
    #[arg(long, global = true, env = "PRECIS_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "PRECIS_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize text, a text file or a PDF
    Summarize(SummarizeArgs),

    /// Show word, character and sentence counts
    Stats {
        #[command(flatten)]
        input: InputArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the summarization algorithms
    Algorithms {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the summarization web page and JSON API
    Serve {
        /// Open the page in the default browser
        #[arg(long)]
        open: bool,
    },

    /// Check whether a server is running
    Status,

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Where the text comes from
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Text to process (read from stdin if not provided)
    text: Option<String>,

    /// PDF or plain-text file; a PDF with text wins over typed text
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Algorithm: LSA, Luhn, LexRank or TextRank (overrides config)
    #[arg(short, long)]
    algorithm: Option<Algorithm>,

    /// Number of sentences to keep (overrides config)
    #[arg(short = 'n', long)]
    sentences: Option<SentenceCount>,

    /// Drop English stop words before ranking
    #[arg(long)]
    stop_words: bool,

    /// Write the summary to this file (or `summary.txt` inside this directory)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output the full report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Initialize default configuration
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = if let Some(path) = &cli.config {
        Config::load_from(path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Apply CLI overrides
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }

    init_logging(&config.logging.level);

    // Run the appropriate command
    match cli.command {
        Commands::Summarize(args) => commands::summarize::run(config, args),
        Commands::Stats { input, json } => commands::stats::run(input, json),
        Commands::Algorithms { json } => commands::algorithms::run(json),
        Commands::Serve { open } => commands::serve::run(config, open).await,
        Commands::Status => commands::status::run(config).await,
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => commands::config::show(config),
            ConfigCommands::Init { force } => commands::config::init(force),
        },
    }
}
