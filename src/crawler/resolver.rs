//! Next-article resolution
//!
//! This module scans the paragraphs of a rendered article in document order
//! and picks the eligible link to follow:
//! - anchors anywhere inside a `<p>` element are candidates
//! - each candidate is checked with [`is_eligible`]
//! - the candidate at position `skip` among eligible ones wins
//!
//! The returned value is the link's target title, not its display text, so
//! piped links resolve to the canonical article.

use crate::crawler::filter::{is_eligible, LinkCandidate};
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;

/// Raised when an article has fewer eligible links than requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("next article not found")]
pub struct NextArticleNotFound;

/// Returns the target title of the eligible link at position `skip`
///
/// # Arguments
///
/// * `html` - The rendered article body
/// * `skip` - How many eligible links to pass over (0 = first)
///
/// # Returns
///
/// * `Ok(String)` - Title of the chosen article
/// * `Err(NextArticleNotFound)` - Fewer than `skip + 1` eligible links exist
///
/// # Example
///
/// ```
/// use philosophy_crawler::crawler::resolve_next_article;
///
/// let html = r#"<p>A <a href="/wiki/Rock" title="Rock">rock</a> is hard.</p>"#;
/// assert_eq!(resolve_next_article(html, 0).unwrap(), "Rock");
/// ```
pub fn resolve_next_article(html: &str, skip: usize) -> Result<String, NextArticleNotFound> {
    extract_candidates(html)
        .into_iter()
        .filter(is_eligible)
        .nth(skip)
        .and_then(|candidate| candidate.title)
        .ok_or(NextArticleNotFound)
}

/// Returns the target titles of every eligible link, in document order
pub fn eligible_links(html: &str) -> Vec<String> {
    extract_candidates(html)
        .into_iter()
        .filter(is_eligible)
        .filter_map(|candidate| candidate.title)
        .collect()
}

/// Extracts every anchor inside a paragraph as a link candidate
///
/// Candidates come out in document order across all paragraphs, whether or
/// not they pass the eligibility rules.
pub fn extract_candidates(html: &str) -> Vec<LinkCandidate> {
    let document = Html::parse_document(html);
    let mut candidates = Vec::new();

    let (paragraph_selector, anchor_selector) = match (Selector::parse("p"), Selector::parse("a"))
    {
        (Ok(p), Ok(a)) => (p, a),
        _ => return candidates,
    };

    for paragraph in document.select(&paragraph_selector) {
        for anchor in paragraph.select(&anchor_selector) {
            candidates.push(LinkCandidate {
                text: anchor.text().collect(),
                title: anchor.value().attr("title").map(str::to_string),
                preceding: preceding_siblings(anchor, paragraph),
            });
        }
    }

    candidates
}

/// Serializes the nodes before `anchor` within `paragraph`, nearest first
///
/// For anchors nested in inline markup the walk continues outward through
/// each enclosing element's own preceding siblings, stopping at the paragraph.
fn preceding_siblings(anchor: ElementRef<'_>, paragraph: ElementRef<'_>) -> Vec<String> {
    let mut siblings = Vec::new();
    let mut current = *anchor;

    while current.id() != paragraph.id() {
        for sibling in current.prev_siblings() {
            let serialized = match sibling.value() {
                Node::Text(text) => Some(String::from(&**text)),
                Node::Comment(comment) => Some(String::from(&**comment)),
                Node::Element(_) => ElementRef::wrap(sibling).map(|element| element.html()),
                _ => None,
            };
            siblings.extend(serialized);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break,
        }
    }

    siblings
}
