//! The compiled-in table of news sources.
//!
//! Per-source knowledge (which selectors find headlines, which hosts the
//! outlet serves articles from, what an article path looks like) lives here
//! as data. One generic extraction routine ([`crate::extract`]) and one
//! generic cleaning routine ([`crate::normalize`]) consume these records, so
//! supporting a new outlet means adding a record, not writing code.
//!
//! Selector strings are parsed when the table is built; a malformed selector
//! in this table is a programming error and fails fast at startup.

use crate::extract::SelectStrategy;
use scraper::Selector;

/// Immutable configuration for one news outlet, loaded at startup.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// Display name, also written to the `source` column of outputs.
    pub name: &'static str,
    /// The listing page fetched once per run.
    pub listing_url: &'static str,
    /// Ordered extraction strategies, most specific first.
    pub cascade: Vec<SelectStrategy>,
    /// Preferred nested element for headline text within a matched link.
    pub title_selector: Option<Selector>,
    /// Hosts this outlet serves articles from; subdomains are accepted.
    pub allowed_hosts: &'static [&'static str],
    /// What distinguishes an article URL from navigation/category links.
    pub path_rule: ArticlePathRule,
}

/// Per-source rule distinguishing article paths from navigation links.
#[derive(Debug, Clone)]
pub enum ArticlePathRule {
    /// Path must have at least this many non-empty segments.
    /// Catches dated slugs like `/2025/05/06/health/story-title`.
    MinPathSegments(usize),
    /// Path must contain one of these section fragments.
    SectionPrefixes(&'static [&'static str]),
}

impl ArticlePathRule {
    /// Whether a URL path looks like an article under this rule.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            ArticlePathRule::MinPathSegments(min) => {
                path.split('/').filter(|segment| !segment.is_empty()).count() >= *min
            }
            ArticlePathRule::SectionPrefixes(prefixes) => {
                prefixes.iter().any(|prefix| path.contains(prefix))
            }
        }
    }
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("selector in the built-in source table must parse")
}

/// Build the full outlet table.
///
/// Cascades and path rules mirror what each outlet's markup has actually
/// required; when a selector rots, append a fallback rather than editing the
/// ones that still fire on archived pages.
pub fn builtin_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig {
            name: "BBC News",
            listing_url: "https://www.bbc.com/news",
            cascade: vec![
                SelectStrategy::Anchors(sel("h3 > a, h2 > a")),
                SelectStrategy::HeadlineAscend(sel(
                    ".gs-c-promo-heading__title, .nw-o-link-split__text",
                )),
                SelectStrategy::ClassFragment(&["headline"]),
                SelectStrategy::ContainerLinks(sel("div[data-entityid]")),
            ],
            title_selector: None,
            allowed_hosts: &["bbc.com", "bbc.co.uk"],
            path_rule: ArticlePathRule::SectionPrefixes(&["/news"]),
        },
        SourceConfig {
            name: "CNN Health",
            listing_url: "https://www.cnn.com/health",
            cascade: vec![
                SelectStrategy::Anchors(sel(r#"a[data-link-type="article"]"#)),
                SelectStrategy::HeadlineAscend(sel(r#"span[data-editable="headline"]"#)),
            ],
            title_selector: Some(sel(r#"span[data-editable="headline"]"#)),
            allowed_hosts: &["cnn.com"],
            path_rule: ArticlePathRule::MinPathSegments(4),
        },
        SourceConfig {
            name: "Reuters",
            listing_url: "https://www.reuters.com/",
            cascade: vec![
                SelectStrategy::Anchors(sel(
                    r#"a[data-testid*="Heading"], a[data-testid*="Link"], a[data-testid*="Title"]"#,
                )),
                SelectStrategy::ContainerLinks(sel(
                    r#"div[data-testid*="StoryCard"], article[data-testid]"#,
                )),
            ],
            title_selector: None,
            allowed_hosts: &["reuters.com"],
            path_rule: ArticlePathRule::SectionPrefixes(&[
                "/world/",
                "/business/",
                "/legal/",
                "/markets/",
                "/technology/",
                "/lifestyle/",
                "/sports/",
                "/graphics/",
            ]),
        },
        SourceConfig {
            name: "The Guardian",
            listing_url: "https://www.theguardian.com/international",
            cascade: vec![
                SelectStrategy::Anchors(sel(
                    r#".fc-item__link, a[data-link-name*="headline"]"#,
                )),
                SelectStrategy::HeadlineAscend(sel(".js-headline-text")),
            ],
            title_selector: Some(sel(".js-headline-text")),
            allowed_hosts: &["theguardian.com"],
            path_rule: ArticlePathRule::MinPathSegments(3),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sources_are_well_formed() {
        let sources = builtin_sources();
        assert_eq!(sources.len(), 4);
        for source in &sources {
            assert!(!source.cascade.is_empty(), "{} has an empty cascade", source.name);
            assert!(!source.allowed_hosts.is_empty());
            assert!(
                source.listing_url.starts_with("https://"),
                "{} listing URL is not HTTPS",
                source.name
            );
        }
    }

    #[test]
    fn test_min_path_segments_counts_nonempty_segments() {
        let rule = ArticlePathRule::MinPathSegments(4);
        assert!(rule.matches("/2025/05/06/health/story-title"));
        assert!(rule.matches("/2025/05/06/story"));
        assert!(!rule.matches("/health/story"));
        assert!(!rule.matches("/"));
    }

    #[test]
    fn test_section_prefixes_match_anywhere_in_path() {
        let rule = ArticlePathRule::SectionPrefixes(&["/world/", "/business/"]);
        assert!(rule.matches("/world/europe/story-slug"));
        assert!(rule.matches("/business/markets-report"));
        assert!(!rule.matches("/sports/match-report"));
    }

    #[test]
    fn test_guardian_rule_rejects_section_index_pages() {
        let sources = builtin_sources();
        let guardian = sources
            .iter()
            .find(|s| s.name == "The Guardian")
            .unwrap();
        assert!(guardian.path_rule.matches("/world/2025/may/06/story-slug"));
        assert!(!guardian.path_rule.matches("/world"));
    }
}
