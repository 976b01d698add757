//! Generic selector-cascade extraction over listing-page markup.
//!
//! Outlet markup changes without notice, so no single selector is trusted.
//! Each source configures an ordered cascade of [`SelectStrategy`] values;
//! strategies are tried in sequence and the first one that yields at least one
//! usable candidate wins. A cascade that comes up completely empty is reported
//! by the orchestrator as an extraction failure for that source, not a
//! crash.
//!
//! Adding a fallback for an outlet means appending one entry to its cascade in
//! [`crate::sources::builtin_sources`]; no extraction code changes.

use crate::models::RawCandidate;
use crate::sources::SourceConfig;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static ANY_ANCHOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector must parse"));

/// One way of locating headline links in listing-page markup.
///
/// Strategies are pure functions from a parsed document to a set of anchor
/// elements; candidate assembly and filtering are shared across all of them.
#[derive(Debug, Clone)]
pub enum SelectStrategy {
    /// Anchor elements matching a source-specific attribute signature,
    /// e.g. `a[data-link-type="article"]`.
    Anchors(Selector),
    /// Dedicated headline-text elements; ascend to the nearest enclosing
    /// link element. Elements with no enclosing link are discarded.
    HeadlineAscend(Selector),
    /// Anchors whose `class` attribute contains any of these fragments:
    /// class names the outlet has historically used for headline containers.
    ClassFragment(&'static [&'static str]),
    /// Anchors nested inside elements carrying a generic content-identifying
    /// attribute, e.g. `div[data-entityid]`.
    ContainerLinks(Selector),
}

impl SelectStrategy {
    fn select_anchors<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        match self {
            SelectStrategy::Anchors(selector) => document.select(selector).collect(),
            SelectStrategy::HeadlineAscend(selector) => document
                .select(selector)
                .filter_map(enclosing_anchor)
                .collect(),
            SelectStrategy::ClassFragment(fragments) => document
                .select(&ANY_ANCHOR)
                .filter(|anchor| {
                    anchor.value().attr("class").is_some_and(|classes| {
                        let classes = classes.to_lowercase();
                        fragments.iter().any(|fragment| classes.contains(fragment))
                    })
                })
                .collect(),
            SelectStrategy::ContainerLinks(selector) => document
                .select(selector)
                .flat_map(|container| container.select(&ANY_ANCHOR))
                .collect(),
        }
    }
}

/// Run the source's selector cascade over raw markup.
///
/// Parses the document once, then tries each strategy in order. A strategy
/// "produces results" when at least one of its anchors yields a candidate
/// with a non-empty title and url; a strategy matching only empty anchors
/// falls through to the next one.
///
/// # Returns
///
/// Raw candidates from the first productive strategy, or an empty vector when
/// the whole cascade came up dry.
#[instrument(level = "debug", skip(html), fields(source = source.name))]
pub fn extract_candidates(html: &str, source: &SourceConfig) -> Vec<RawCandidate> {
    let document = Html::parse_document(html);

    for (position, strategy) in source.cascade.iter().enumerate() {
        let anchors = strategy.select_anchors(&document);
        let candidates: Vec<RawCandidate> = anchors
            .into_iter()
            .filter_map(|anchor| candidate_from_anchor(anchor, source))
            .collect();

        if !candidates.is_empty() {
            debug!(
                strategy = position + 1,
                count = candidates.len(),
                "Selector strategy produced candidates"
            );
            return candidates;
        }
        debug!(
            strategy = position + 1,
            "Selector strategy yielded nothing, falling through"
        );
    }

    Vec::new()
}

/// Assemble a candidate from an anchor element.
///
/// Title comes from the source's nested headline element when configured and
/// present, otherwise from the anchor's own text. Candidates with an empty
/// title or url are dropped here.
fn candidate_from_anchor(anchor: ElementRef<'_>, source: &SourceConfig) -> Option<RawCandidate> {
    let url = anchor.value().attr("href")?.trim().to_string();

    let title = source
        .title_selector
        .as_ref()
        .and_then(|selector| anchor.select(selector).next())
        .map(element_text)
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| element_text(anchor));

    if title.is_empty() || url.is_empty() {
        return None;
    }
    Some(RawCandidate { title, url })
}

/// The element itself if it is a link, else its nearest `<a>` ancestor.
fn enclosing_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    if element.value().name() == "a" {
        return Some(element);
    }
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "a")
}

/// Text content of an element with whitespace collapsed to single spaces.
fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
