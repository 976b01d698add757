//! Error taxonomy for the scraping and analysis pipeline.
//!
//! Every error here is non-fatal to a run: a failing source contributes zero
//! articles, a degenerate analysis yields an empty result, and each output
//! sink fails independently of the other. The orchestrator logs the failure
//! and surfaces it in the rendered report; partial results always flow
//! through.

use reqwest::StatusCode;
use thiserror::Error;

/// A listing-page fetch failed.
///
/// The source contributes no articles this run; other sources are unaffected.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure: connection refused, DNS, TLS, or timeout.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected HTTP status {status}")]
    Status { status: StatusCode },
}

/// Extraction produced nothing usable from fetched markup.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Every selector strategy in the source's cascade came up empty.
    /// Usually means the outlet changed its markup again.
    #[error("all {tried} selector strategies yielded no candidates")]
    Empty { tried: usize },
}

/// Text analysis could not run over the cleaned titles.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Too little vocabulary survived preprocessing to fit a topic model.
    /// Reported as zero topics, never as a run failure.
    #[error("topic modeling skipped: {reason}")]
    Degenerate { reason: String },
}

/// A persistence sink failed to write the cleaned collection.
///
/// Sinks are independent: a CSV failure does not block the SQLite write and
/// vice versa.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite write failed: {0}")]
    Db(#[from] rusqlite::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_error_display() {
        let err = FetchError::Status {
            status: StatusCode::NOT_FOUND,
        };
        assert_eq!(err.to_string(), "unexpected HTTP status 404 Not Found");
    }

    #[test]
    fn test_extract_empty_display_names_strategy_count() {
        let err = ExtractError::Empty { tried: 4 };
        assert!(err.to_string().contains("4 selector strategies"));
    }

    #[test]
    fn test_analysis_degenerate_carries_reason() {
        let err = AnalysisError::Degenerate {
            reason: "fewer than 2 usable titles".to_string(),
        };
        assert!(err.to_string().contains("fewer than 2 usable titles"));
    }
}
