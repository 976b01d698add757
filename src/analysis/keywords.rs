//! Keyword frequency and co-occurrence over cleaned titles.

use crate::models::{Article, CoOccurrence, KeywordCount, KeywordReport};
use tracing::instrument;

/// Count titles containing each keyword, case-insensitively.
///
/// Matching is plain substring containment: "vaccine" matches
/// "vaccines rolled out" and "Vaccine trial". The co-occurrence metric counts
/// titles containing both of the first two keywords simultaneously; with
/// fewer than two keywords it is not applicable and reported as `None`.
#[instrument(level = "debug", skip_all, fields(articles = articles.len(), keywords = keywords.len()))]
pub fn analyze_keywords(articles: &[Article], keywords: &[String]) -> KeywordReport {
    let lowered_titles: Vec<String> = articles
        .iter()
        .map(|article| article.title.to_lowercase())
        .collect();

    let count_containing = |needle: &str| {
        lowered_titles
            .iter()
            .filter(|title| title.contains(needle))
            .count()
    };

    let counts = keywords
        .iter()
        .map(|keyword| KeywordCount {
            keyword: keyword.clone(),
            count: count_containing(&keyword.to_lowercase()),
        })
        .collect();

    let co_occurrence = match keywords {
        [first, second, ..] => {
            let first_needle = first.to_lowercase();
            let second_needle = second.to_lowercase();
            let count = lowered_titles
                .iter()
                .filter(|title| title.contains(&first_needle) && title.contains(&second_needle))
                .count();
            Some(CoOccurrence {
                first: first.clone(),
                second: second.clone(),
                count,
            })
        }
        _ => None,
    };

    KeywordReport {
        counts,
        co_occurrence,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn articles_from(titles: &[&str]) -> Vec<Article> {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| Article {
                title: title.to_string(),
                url: format!("https://example.com/news/story-{i}"),
                source: "Example News".to_string(),
            })
            .collect()
    }

    fn keywords(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_reference_counts() {
        let articles = articles_from(&[
            "Covid vaccine rollout begins",
            "New vaccine trial results",
            "Unrelated sports news",
        ]);
        let report = analyze_keywords(&articles, &keywords(&["Covid", "vaccine"]));

        assert_eq!(report.counts[0].count, 1);
        assert_eq!(report.counts[1].count, 2);
        assert_eq!(report.co_occurrence.as_ref().unwrap().count, 1);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let articles = articles_from(&["COVID cases rising again", "covid response criticized"]);
        let report = analyze_keywords(&articles, &keywords(&["Covid"]));
        assert_eq!(report.counts[0].count, 2);
    }

    #[test]
    fn test_co_occurrence_not_applicable_below_two_keywords() {
        let articles = articles_from(&["Covid vaccine rollout begins"]);

        let single = analyze_keywords(&articles, &keywords(&["Covid"]));
        assert!(single.co_occurrence.is_none());

        let none = analyze_keywords(&articles, &[]);
        assert!(none.co_occurrence.is_none());
        assert!(none.counts.is_empty());
    }

    #[test]
    fn test_co_occurrence_bounded_by_individual_counts() {
        let articles = articles_from(&[
            "Covid vaccine rollout begins",
            "Covid restrictions lifted early",
            "New vaccine trial results",
            "Covid vaccine doses shipped overseas",
        ]);
        let report = analyze_keywords(&articles, &keywords(&["Covid", "vaccine"]));

        let covid = report.counts[0].count;
        let vaccine = report.counts[1].count;
        let both = report.co_occurrence.as_ref().unwrap().count;
        assert!(both <= covid.min(vaccine));
        assert_eq!(both, 2);
    }

    #[test]
    fn test_empty_collection_yields_zero_counts() {
        let report = analyze_keywords(&[], &keywords(&["Covid", "vaccine"]));
        assert!(report.counts.iter().all(|c| c.count == 0));
        assert_eq!(report.co_occurrence.unwrap().count, 0);
    }
}
