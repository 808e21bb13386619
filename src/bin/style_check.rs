//! Offline writing-style checker for Japanese text files.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use news_stock_curator::logging::init_tracing;
use news_stock_curator::style_check::{check_document_with, DEFAULT_MAX_SENTENCE_CHARS};

#[derive(Debug, Parser)]
#[command(name = "style-check", version, about = "Check Japanese text for style rule violations")]
struct Cli {
    /// UTF-8 text file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Print violations as JSON
    #[arg(long)]
    json: bool,

    /// Flag sentences longer than this many characters
    #[arg(long, default_value_t = DEFAULT_MAX_SENTENCE_CHARS)]
    max_sentence_chars: usize,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let text = read_input(cli.file.as_ref())?;
    let violations = check_document_with(&text, cli.max_sentence_chars);

    if cli.json {
        let out = serde_json::to_string_pretty(&violations).context("serializing violations")?;
        println!("{out}");
        return Ok(());
    }

    for (i, v) in violations.iter().enumerate() {
        println!("[{}] {} ({}, {})", i + 1, v.rule_name, v.rule_id, v.severity);
        println!("    Location: {}", v.location);
        println!("    Reason: {}", v.reason);
        println!("    Suggestion: {}\n", v.suggestion);
    }
    println!("{} issue(s) found", violations.len());
    Ok(())
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(false);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
