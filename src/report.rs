//! Terminal rendering of a session's results.
//!
//! Pure string assembly over [`SessionState`] so the orchestrator just prints
//! the result and tests can assert on it. Per-source failures, degenerate
//! analyses, and sink errors all show up here as plain lines; nothing the
//! pipeline reports is swallowed.

use crate::models::{SessionState, TopicOutcome};

/// Widest a title cell gets before truncation.
const TITLE_WIDTH: usize = 58;

/// Render the full post-run report.
pub fn render_session(state: &SessionState) -> String {
    let mut out = String::new();

    match &state.run_at {
        Some(run_at) => out.push_str(&format!("\n=== Scrape run at {run_at} ===\n")),
        None => {
            out.push_str("No scrape has run yet.\n");
            return out;
        }
    }

    out.push_str("\nSources:\n");
    for tally in &state.tallies {
        match &tally.note {
            Some(note) => out.push_str(&format!("  {:<14} FAILED: {note}\n", tally.name)),
            None => out.push_str(&format!(
                "  {:<14} {} raw -> {} cleaned\n",
                tally.name, tally.raw, tally.cleaned
            )),
        }
    }

    out.push_str(&format!("\nCleaned articles ({}):\n", state.articles.len()));
    for (idx, article) in state.articles.iter().enumerate() {
        out.push_str(&format!(
            "  {idx:>3}  {:<14} {:<TITLE_WIDTH$}  {}\n",
            article.source,
            truncate_cell(&article.title, TITLE_WIDTH),
            article.url
        ));
    }

    if let Some(report) = &state.keyword_report {
        out.push_str("\nKeyword counts:\n");
        for entry in &report.counts {
            out.push_str(&format!("  {:<20} {}\n", entry.keyword, entry.count));
        }
        match &report.co_occurrence {
            Some(pair) => out.push_str(&format!(
                "  {:<20} {}\n",
                format!("both '{}' + '{}'", pair.first, pair.second),
                pair.count
            )),
            None => out.push_str("  co-occurrence: not applicable (fewer than 2 keywords)\n"),
        }
    }

    if let Some(outcome) = &state.topic_outcome {
        out.push_str("\nTopics:\n");
        match outcome {
            TopicOutcome::Topics(topics) => {
                for topic in topics {
                    out.push_str(&format!(
                        "  Topic #{}: {}\n",
                        topic.index,
                        topic.terms.join(", ")
                    ));
                }
            }
            TopicOutcome::Degenerate { reason } => {
                out.push_str(&format!("  none fitted: {reason}\n"));
            }
        }
    }

    if !state.persist_notes.is_empty() {
        out.push_str("\nOutputs:\n");
        for note in &state.persist_notes {
            out.push_str(&format!("  {note}\n"));
        }
    }

    out
}

/// Truncate at a char boundary, marking the cut with an ellipsis.
fn truncate_cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Article, CoOccurrence, KeywordCount, KeywordReport, SourceTally, Topic,
    };

    fn populated_state() -> SessionState {
        SessionState {
            run_at: Some("2025-05-06T08:00:00+00:00".to_string()),
            tallies: vec![
                SourceTally {
                    name: "Example News".to_string(),
                    raw: 40,
                    cleaned: 12,
                    note: None,
                },
                SourceTally {
                    name: "Down Outlet".to_string(),
                    note: Some("unexpected HTTP status 503 Service Unavailable".to_string()),
                    ..Default::default()
                },
            ],
            articles: vec![Article {
                title: "Covid vaccine rollout begins".to_string(),
                url: "https://example.com/news/story-1".to_string(),
                source: "Example News".to_string(),
            }],
            keyword_report: Some(KeywordReport {
                counts: vec![KeywordCount {
                    keyword: "Covid".to_string(),
                    count: 1,
                }],
                co_occurrence: Some(CoOccurrence {
                    first: "Covid".to_string(),
                    second: "vaccine".to_string(),
                    count: 1,
                }),
            }),
            topic_outcome: Some(TopicOutcome::Degenerate {
                reason: "only 1 usable titles after preprocessing (need at least 2)".to_string(),
            }),
            persist_notes: vec!["Saved 1 articles to headline_news.csv".to_string()],
        }
    }

    #[test]
    fn test_render_includes_every_section() {
        let rendered = render_session(&populated_state());

        assert!(rendered.contains("Scrape run at 2025-05-06"));
        assert!(rendered.contains("40 raw -> 12 cleaned"));
        assert!(rendered.contains("FAILED: unexpected HTTP status 503"));
        assert!(rendered.contains("Covid vaccine rollout begins"));
        assert!(rendered.contains("both 'Covid' + 'vaccine'"));
        assert!(rendered.contains("none fitted: only 1 usable titles"));
        assert!(rendered.contains("Saved 1 articles"));
    }

    #[test]
    fn test_render_before_any_run() {
        let rendered = render_session(&SessionState::default());
        assert!(rendered.contains("No scrape has run yet"));
    }

    #[test]
    fn test_render_lists_topics_when_fitted() {
        let mut state = populated_state();
        state.topic_outcome = Some(TopicOutcome::Topics(vec![Topic {
            index: 1,
            terms: vec!["vaccine".to_string(), "rollout".to_string()],
        }]));

        let rendered = render_session(&state);
        assert!(rendered.contains("Topic #1: vaccine, rollout"));
    }

    #[test]
    fn test_truncate_cell_respects_char_boundaries() {
        let text = "héadline with accénts and a very long tail that keeps going";
        let cell = truncate_cell(text, 20);
        assert_eq!(cell.chars().count(), 20);
        assert!(cell.ends_with('…'));

        assert_eq!(truncate_cell("short title", 20), "short title");
    }
}
