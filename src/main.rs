//! # headline_scan
//!
//! Scrapes headline listings from a fixed set of news outlets, cleans and
//! deduplicates the candidates, runs keyword and topic analysis over the
//! surviving titles, and persists the collection to a CSV file and a SQLite
//! table.
//!
//! ## Architecture
//!
//! One user-triggered run executes the pipeline left to right:
//! 1. **Fetch**: one GET per source, sequential, 15s timeout
//! 2. **Extract**: per-source selector cascade over the listing markup
//! 3. **Clean**: absolutize, gate, dedupe, filter
//! 4. **Analyze**: keyword counts and TF-IDF + LDA topics
//! 5. **Persist**: CSV and SQLite, independent sinks
//!
//! Every stage degrades gracefully: a dead source, an empty extraction, a
//! degenerate corpus, or a failing sink costs only its own contribution and
//! is reported in the rendered summary.
//!
//! ## Usage
//!
//! ```sh
//! headline_scan            # interactive: s + Enter scrapes, q quits
//! headline_scan --once     # one pass, suitable for cron
//! ```

use chrono::Local;
use clap::Parser;
use reqwest::Client;
use std::error::Error;
use std::io::Write as _;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod analysis;
mod cli;
mod error;
mod extract;
mod fetch;
mod models;
mod normalize;
mod outputs;
mod report;
mod sources;

use analysis::topics::TopicModelConfig;
use cli::Cli;
use error::{AnalysisError, ExtractError};
use models::{SessionState, SourceTally, TopicOutcome};
use sources::SourceConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    let client = fetch::build_client()?;
    let source_table = sources::builtin_sources();
    info!(
        sources = source_table.len(),
        keywords = args.keywords.len(),
        "headline_scan starting up"
    );

    if args.once {
        let state = run_pipeline(&client, &source_table, &args).await;
        print!("{}", report::render_session(&state));
        return Ok(());
    }

    println!("Commands: [s]crape latest news, [q]uit.");
    prompt()?;
    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "s" | "scrape" => {
                let state = run_pipeline(&client, &source_table, &args).await;
                print!("{}", report::render_session(&state));
            }
            "q" | "quit" => break,
            "" => {}
            other => println!("Unknown command {other:?}; type s to scrape or q to quit."),
        }
        prompt()?;
    }

    Ok(())
}

fn prompt() -> std::io::Result<()> {
    print!("> ");
    std::io::stdout().flush()
}

/// Execute one full fetch → extract → clean → analyze → persist pass.
///
/// Never fails: each stage's errors are logged, noted in the returned
/// [`SessionState`], and the rest of the pipeline continues with whatever
/// survived.
#[instrument(level = "info", skip_all)]
async fn run_pipeline(client: &Client, source_table: &[SourceConfig], args: &Cli) -> SessionState {
    let start = std::time::Instant::now();
    let mut state = SessionState {
        run_at: Some(Local::now().to_rfc3339()),
        ..Default::default()
    };

    // ---- Fetch, extract, and clean each source in turn ----
    let mut collected = Vec::new();
    for source in source_table {
        let mut tally = SourceTally {
            name: source.name.to_string(),
            ..Default::default()
        };

        info!(source = source.name, url = source.listing_url, "Fetching listing page");
        match fetch::fetch_listing(client, source.listing_url).await {
            Ok(body) => {
                let candidates = extract::extract_candidates(&body, source);
                tally.raw = candidates.len();
                if candidates.is_empty() {
                    let err = ExtractError::Empty {
                        tried: source.cascade.len(),
                    };
                    warn!(source = source.name, error = %err, "Extraction came up empty");
                    tally.note = Some(err.to_string());
                } else {
                    let cleaned = normalize::clean(candidates, source);
                    tally.cleaned = cleaned.len();
                    info!(
                        source = source.name,
                        raw = tally.raw,
                        cleaned = tally.cleaned,
                        "Cleaned listing candidates"
                    );
                    collected.extend(cleaned);
                }
            }
            Err(err) => {
                warn!(source = source.name, error = %err, "Fetch failed; source contributes no articles");
                tally.note = Some(err.to_string());
            }
        }
        state.tallies.push(tally);
    }

    state.articles = normalize::dedup_by_url(collected);
    info!(count = state.articles.len(), "Total cleaned articles this run");

    // ---- Analysis ----
    state.keyword_report = Some(analysis::keywords::analyze_keywords(
        &state.articles,
        &args.keywords,
    ));

    let topic_config = TopicModelConfig {
        num_topics: args.topics,
        ..Default::default()
    };
    state.topic_outcome = Some(
        match analysis::topics::model_topics(&state.articles, &topic_config) {
            Ok(topics) => {
                info!(topics = topics.len(), "Fitted topic model");
                TopicOutcome::Topics(topics)
            }
            Err(AnalysisError::Degenerate { reason }) => {
                warn!(%reason, "Topic modeling not possible this run");
                TopicOutcome::Degenerate { reason }
            }
        },
    );

    // ---- Persistence: sinks are independent, failures don't cascade ----
    let scraped_at = state.run_at.clone().unwrap_or_default();
    match outputs::csv::write_csv(&args.csv_path, &state.articles) {
        Ok(()) => state.persist_notes.push(format!(
            "Saved {} articles to {}",
            state.articles.len(),
            args.csv_path.display()
        )),
        Err(err) => {
            error!(error = %err, path = %args.csv_path.display(), "CSV sink failed");
            state.persist_notes.push(format!("CSV sink failed: {err}"));
        }
    }
    match outputs::sqlite::write_table(&args.db_path, &state.articles, &scraped_at) {
        Ok(()) => state.persist_notes.push(format!(
            "Replaced table '{}' in {}",
            outputs::sqlite::TABLE,
            args.db_path.display()
        )),
        Err(err) => {
            error!(error = %err, path = %args.db_path.display(), "SQLite sink failed");
            state
                .persist_notes
                .push(format!("SQLite sink failed: {err}"));
        }
    }

    let elapsed = start.elapsed();
    info!(?elapsed, "Run complete");
    state
}
