use anyhow::Result;
use clap::Parser;
use search_core::MAX_RESULT_DOCUMENT_COUNT;
use server::{open_input, run, OutputFormat, RunOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search-server")]
#[command(about = "Index a small set of documents and rank them for one query", long_about = None)]
struct Args {
    /// Read the session from a file instead of stdin
    #[arg(long)]
    input: Option<PathBuf>,
    /// Maximum number of results to print
    #[arg(long, env = "SEARCH_TOP_K", default_value_t = MAX_RESULT_DOCUMENT_COUNT)]
    top_k: usize,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    // stdout carries the results, so logs go to stderr
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();
    let options = RunOptions { top_k: args.top_k, format: args.format };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &args.input {
        Some(path) => run(open_input(path)?, &mut out, &options)?,
        None => run(io::stdin().lock(), &mut out, &options)?,
    };
    out.flush()?;
    Ok(())
}
