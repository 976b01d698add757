//! Data models for headline candidates, cleaned articles, and analysis results.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`RawCandidate`]: An unvalidated (title, url) pair straight out of the extractor
//! - [`Article`]: A cleaned headline that passed normalization
//! - [`KeywordReport`] / [`TopicOutcome`]: Analyzer results
//! - [`SourceTally`] / [`SessionState`]: Per-run bookkeeping handed to the renderer
//!
//! Articles are created fresh each run and discarded afterwards; nothing here
//! survives across runs except through the CSV file and SQLite table, both of
//! which are replaced wholesale every run.

use serde::{Deserialize, Serialize};

/// An unvalidated (title, url) pair extracted from listing-page markup.
///
/// Candidates carry whatever the winning selector strategy found: the url may
/// be relative, the title may be a breadcrumb or an image filename. The
/// normalizer decides what survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCandidate {
    /// Headline text as found in the markup, whitespace-normalized.
    pub title: String,
    /// The link target, possibly relative or protocol-relative.
    pub url: String,
}

/// A cleaned headline attributed to a configured outlet.
///
/// # Invariants
///
/// All enforced by [`crate::normalize::clean`]:
/// - `url` is absolute HTTP(S) and unique within a cleaned result set
/// - `title` is non-empty, contains no `/`, does not end in a known
///   image-file extension, and contains at least one interior space
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Article {
    /// The headline text.
    pub title: String,
    /// Absolute article URL.
    pub url: String,
    /// Display name of the outlet this was scraped from.
    pub source: String,
}

/// Count of cleaned titles containing each configured keyword.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordReport {
    /// Per-keyword counts in configuration order.
    pub counts: Vec<KeywordCount>,
    /// Titles containing both of the first two keywords at once.
    /// `None` when fewer than two keywords are configured, in which case the
    /// metric is not applicable rather than zero.
    pub co_occurrence: Option<CoOccurrence>,
}

/// A single keyword and the number of titles containing it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Simultaneous-match count for the first two configured keywords.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoOccurrence {
    pub first: String,
    pub second: String,
    pub count: usize,
}

/// One fitted topic: its index and its highest-weighted terms.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Topic {
    /// 1-based topic number, stable for a given seed.
    pub index: usize,
    /// Top terms in descending weight order.
    pub terms: Vec<String>,
}

/// Result of the topic-modeling stage.
///
/// A degenerate corpus (too few usable titles, vocabulary below the
/// document-frequency floor) is an expected outcome, not a failure.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub enum TopicOutcome {
    Topics(Vec<Topic>),
    Degenerate { reason: String },
}

/// What happened to one source during a run.
#[derive(Debug, Clone, Default)]
pub struct SourceTally {
    /// Display name of the outlet.
    pub name: String,
    /// Raw candidates produced by the extractor.
    pub raw: usize,
    /// Articles surviving normalization.
    pub cleaned: usize,
    /// Human-readable failure note (fetch error, empty extraction), if any.
    pub note: Option<String>,
}

/// Everything one pipeline run produced, handed to the rendering layer.
///
/// Session state is transient and scoped to one interactive session: each
/// scrape replaces the previous state outright.
#[derive(Debug, Default)]
pub struct SessionState {
    /// RFC 3339 timestamp of the run, set once the pipeline starts.
    pub run_at: Option<String>,
    /// Per-source outcomes in configuration order.
    pub tallies: Vec<SourceTally>,
    /// The cleaned, deduplicated article collection across all sources.
    pub articles: Vec<Article>,
    /// Keyword analysis results, present once analysis has run.
    pub keyword_report: Option<KeywordReport>,
    /// Topic modeling results, present once analysis has run.
    pub topic_outcome: Option<TopicOutcome>,
    /// Outcome lines from the persistence stage, successes and failures both.
    pub persist_notes: Vec<String>,
}
