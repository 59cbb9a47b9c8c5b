use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use search_core::{DocId, InvertedIndex, ScoredDocument, MAX_RESULT_DOCUMENT_COUNT};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Write};
use std::path::Path;

/// One run of the line protocol: stop words, `N`, `N` documents, a query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionInput {
    pub stop_words: String,
    pub documents: Vec<String>,
    pub query: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `{ document_id = <id>, relevance = <score> }` per line
    #[default]
    Text,
    /// A single JSON array of results
    Json,
}

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub top_k: usize,
    pub format: OutputFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { top_k: MAX_RESULT_DOCUMENT_COUNT, format: OutputFormat::Text }
    }
}

pub fn open_input(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open input {}", path.display()))?;
    Ok(BufReader::new(file))
}

fn next_line<R: BufRead>(lines: &mut Lines<R>) -> Result<Option<String>> {
    match lines.next() {
        Some(line) => {
            let mut line = line.context("failed to read input line")?;
            if line.ends_with('\r') {
                line.pop();
            }
            Ok(Some(line))
        }
        None => Ok(None),
    }
}

/// Read the session framing. Only the first word of the count line is used;
/// a missing query line counts as an empty query.
pub fn read_session<R: BufRead>(reader: R) -> Result<SessionInput> {
    let mut lines = reader.lines();
    let Some(stop_words) = next_line(&mut lines)? else {
        bail!("input is empty: expected a stop-word line");
    };
    let Some(count_line) = next_line(&mut lines)? else {
        bail!("missing document count line");
    };
    let count: usize = count_line
        .split_whitespace()
        .next()
        .with_context(|| format!("document count line is blank: {count_line:?}"))?
        .parse()
        .with_context(|| format!("invalid document count {count_line:?}"))?;

    let mut documents = Vec::with_capacity(count);
    for found in 0..count {
        match next_line(&mut lines)? {
            Some(text) => documents.push(text),
            None => bail!("expected {count} documents, found {found}"),
        }
    }
    let query = next_line(&mut lines)?.unwrap_or_default();
    Ok(SessionInput { stop_words, documents, query })
}

/// Index the session's documents under ids `0..N` in input order.
pub fn build_index(session: &SessionInput) -> Result<InvertedIndex> {
    let mut index = InvertedIndex::with_stop_words(&session.stop_words);
    for (position, text) in session.documents.iter().enumerate() {
        let document_id = DocId::try_from(position).context("too many documents")?;
        index
            .insert_document(document_id, text)
            .with_context(|| format!("failed to index document on input line {}", position + 3))?;
    }
    tracing::info!(num_docs = index.total_document_count(), num_terms = index.num_terms(), "index built");
    Ok(index)
}

/// Format a score the way a default C++ stream prints a double: `%g` with
/// six significant digits.
pub fn format_relevance(value: f64) -> String {
    const PRECISION: i32 = 6;
    if value == 0.0 {
        return "0".into();
    }
    if value.is_nan() {
        return "nan".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let scientific = format!("{:.*e}", (PRECISION - 1) as usize, value);
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if exponent < -4 || exponent >= PRECISION {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (PRECISION - 1 - exponent) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

pub fn render_results<W: Write>(out: &mut W, results: &[ScoredDocument], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for doc in results {
                writeln!(out, "{{ document_id = {}, relevance = {} }}", doc.document_id, format_relevance(doc.relevance))?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, results)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Read a whole session, answer its query and write the ranked results.
pub fn run<R: BufRead, W: Write>(reader: R, out: &mut W, options: &RunOptions) -> Result<Vec<ScoredDocument>> {
    let session = read_session(reader)?;
    let index = build_index(&session)?;
    let results = index
        .search(&session.query, options.top_k)
        .with_context(|| format!("invalid query {:?}", session.query))?;
    tracing::info!(query = %session.query, hits = results.len(), "query answered");
    render_results(out, &results, options.format)?;
    Ok(results)
}
