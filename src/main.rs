mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use askdoc::config::AskdocConfig;

#[derive(Parser)]
#[command(name = "askdoc", version, about = "Ask questions about your documents — local semantic search, LLM-grounded answers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Index documents and answer a single question
    Ask {
        /// Document files to index (.txt, .md, .csv)
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// The question to answer
        #[arg(short, long)]
        question: String,
        /// How many chunks to retrieve as context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
    /// Index documents once, then answer questions interactively
    Chat {
        /// Document files to index (.txt, .md, .csv)
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Manage the embedding model
    Model {
        #[command(subcommand)]
        action: ModelAction,
    },
}

#[derive(Subcommand)]
enum ModelAction {
    /// Download the embedding model to ~/.askdoc/models/
    Download,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config (for log level)
    let config = AskdocConfig::load()?;

    // Initialize tracing with the configured log level.
    // Log to stderr so stdout stays clean for answers.
    let filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Ask {
            files,
            question,
            top_k,
        } => {
            cli::ask::run_ask(config, files, question, top_k).await?;
        }
        Command::Chat { files } => {
            cli::ask::run_chat(config, files).await?;
        }
        Command::Model { action } => match action {
            ModelAction::Download => {
                cli::model_download(&config.embedding).await?;
            }
        },
    }

    Ok(())
}
