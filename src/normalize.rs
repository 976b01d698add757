//! Candidate normalization and cleaning.
//!
//! Turns the extractor's raw candidates into the cleaned [`Article`]
//! collection. Steps are order-sensitive:
//!
//! 1. URL absolutization (`/…` against the listing origin, `//…` gets
//!    `https:`, absolute kept, anything else dropped)
//! 2. Domain and article-path gate, rejecting homepage/nav links
//! 3. Deduplication by exact URL, first occurrence wins
//! 4. Row-level title filters: breadcrumb slashes, image filenames,
//!    single-word captures
//!
//! The whole pass is idempotent: cleaning an already-clean collection yields
//! the same set.

use crate::models::{Article, RawCandidate};
use crate::sources::SourceConfig;
use itertools::Itertools;
use tracing::{debug, instrument};
use url::Url;

/// Titles ending in these are mis-captured media assets, not headlines.
const IMAGE_EXTENSIONS: [&str; 6] = [".jpg", ".jpeg", ".png", ".gif", ".svg", ".webp"];

/// Clean one source's raw candidates into Articles.
#[instrument(level = "debug", skip(candidates), fields(source = source.name, raw = candidates.len()))]
pub fn clean(candidates: Vec<RawCandidate>, source: &SourceConfig) -> Vec<Article> {
    let base = Url::parse(source.listing_url).expect("built-in listing URL must parse");

    let cleaned: Vec<Article> = candidates
        .into_iter()
        .filter_map(|candidate| {
            absolutize(&candidate.url, &base).map(|url| Article {
                title: candidate.title,
                url,
                source: source.name.to_string(),
            })
        })
        .filter(|article| passes_gate(&article.url, source))
        .unique_by(|article| article.url.clone())
        .filter(|article| title_is_headline(&article.title))
        .collect();

    debug!(cleaned = cleaned.len(), "Normalization pass complete");
    cleaned
}

/// Drop exact-URL duplicates across an aggregated collection, keeping the
/// first occurrence. Used when merging per-source results into one run set.
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    articles
        .into_iter()
        .unique_by(|article| article.url.clone())
        .collect()
}

/// Resolve a raw link target to an absolute HTTP(S) URL.
///
/// Protocol-relative targets get `https:`; root-relative targets resolve
/// against the listing page's origin; absolute targets pass through; anything
/// else (`javascript:`, `mailto:`, fragments) is dropped.
fn absolutize(raw: &str, base: &Url) -> Option<String> {
    if raw.starts_with("//") {
        Some(format!("https:{raw}"))
    } else if raw.starts_with('/') {
        base.join(raw).ok().map(|resolved| resolved.to_string())
    } else if raw.starts_with("http://") || raw.starts_with("https://") {
        Some(raw.to_string())
    } else {
        None
    }
}

/// The URL must live on one of the source's hosts and look like an article
/// path under the source's rule.
fn passes_gate(url: &str, source: &SourceConfig) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return false;
    }
    let Some(host) = parsed.host_str() else {
        return false;
    };

    let host_allowed = source
        .allowed_hosts
        .iter()
        .any(|allowed| host == *allowed || host.ends_with(&format!(".{allowed}")));

    host_allowed && source.path_rule.matches(parsed.path())
}

/// Row-level content filter over the title.
///
/// Slashes indicate a mis-captured breadcrumb; image-extension suffixes are
/// captioned media; a title without an interior space is a code or tag, not
/// prose.
fn title_is_headline(title: &str) -> bool {
    let title = title.trim();
    if title.is_empty() || title.contains('/') {
        return false;
    }
    let lowered = title.to_lowercase();
    if IMAGE_EXTENSIONS.iter().any(|ext| lowered.ends_with(ext)) {
        return false;
    }
    title.contains(' ')
}
