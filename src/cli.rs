//! Command-line interface definitions for headline_scan.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! There is deliberately little here: sources are compiled in, so the flags
//! only cover output locations, the keyword list, and the run mode.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments for the headline_scan application.
///
/// # Examples
///
/// ```sh
/// # Interactive session with defaults
/// headline_scan
///
/// # One non-interactive pass with custom keywords
/// headline_scan --once -k Covid -k vaccine -k economy
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path of the CSV output file, fully overwritten each run
    #[arg(long, default_value = "headline_news.csv")]
    pub csv_path: PathBuf,

    /// Path of the SQLite database holding the replaced articles table
    #[arg(long, default_value = "news_data.db")]
    pub db_path: PathBuf,

    /// Keyword to count in cleaned titles; repeat the flag for more.
    /// The first two drive the co-occurrence metric.
    #[arg(
        short = 'k',
        long = "keyword",
        default_values_t = ["Covid".to_string(), "vaccine".to_string()]
    )]
    pub keywords: Vec<String>,

    /// Number of topics to fit during topic modeling
    #[arg(long, default_value_t = 5)]
    pub topics: usize,

    /// Run a single scrape pass and exit instead of entering the
    /// interactive loop
    #[arg(long)]
    pub once: bool,
}
