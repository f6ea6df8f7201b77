//! `ask` and `chat` command implementations.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use askdoc::agent::Pipeline;
use askdoc::config::AskdocConfig;
use askdoc::embedding;

/// One-shot: ingest the given files, answer a single question, exit.
pub async fn run_ask(
    mut config: AskdocConfig,
    files: Vec<PathBuf>,
    question: String,
    top_k: Option<usize>,
) -> Result<()> {
    if let Some(k) = top_k {
        config.retrieval.top_k = k;
    }

    let mut pipeline = build_pipeline(&config)?;
    let chunks = pipeline.ingest(&files)?;
    info!(chunks, "documents indexed");

    let answer = pipeline.answer(&question).await?;
    print_answer(&answer);
    Ok(())
}

/// Interactive: ingest once, then answer questions from stdin until EOF.
pub async fn run_chat(config: AskdocConfig, files: Vec<PathBuf>) -> Result<()> {
    let mut pipeline = build_pipeline(&config)?;
    let chunks = pipeline.ingest(&files)?;
    println!("Indexed {chunks} chunks from {} file(s). Ask away (Ctrl-D to quit).", files.len());

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        let answer = pipeline.answer(question).await?;
        print_answer(&answer);
    }
    println!("Bye.");
    Ok(())
}

fn build_pipeline(config: &AskdocConfig) -> Result<Pipeline> {
    let provider = embedding::create_provider(&config.embedding)
        .context("failed to initialize embedding provider")?;
    Ok(Pipeline::new(config, provider))
}

fn print_answer(answer: &askdoc::agent::Answer) {
    println!("\n{}\n", answer.text);
    if !answer.sources.is_empty() {
        println!("Sources:");
        for (i, source) in answer.sources.iter().enumerate() {
            let preview: String = source.chars().take(120).collect();
            println!("  [{}] {}", i + 1, preview);
        }
        println!();
    }
}
