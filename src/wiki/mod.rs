//! Article sources
//!
//! The crawl engine never talks HTTP directly. It asks an [`ArticleSource`]
//! for a random starting title and for rendered articles. [`WikiClient`]
//! implements the trait over the MediaWiki Action API; tests plug in
//! in-memory sources.

mod client;

pub use client::{build_http_client, disambiguation_options, WikiClient};

use crate::CrawlError;

/// A fetched article, ready for link resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArticle {
    /// Title as reported by the source (after redirects)
    pub title: String,

    /// Rendered HTML of the article body
    pub html: String,
}

impl RenderedArticle {
    pub fn new(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            html: html.into(),
        }
    }
}

/// Result of fetching an article by title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The title named a regular article
    Article(RenderedArticle),

    /// The title is ambiguous; alternatives in page order
    Disambiguation(Vec<String>),
}

/// Provider of articles for the crawl engine
///
/// Implementations report transport and API failures as errors; the engine
/// propagates them without retrying.
#[allow(async_fn_in_trait)]
pub trait ArticleSource {
    /// Returns the title of an arbitrarily chosen article
    async fn random_title(&self) -> Result<String, CrawlError>;

    /// Fetches the article with the given title
    async fn fetch_article(&self, title: &str) -> Result<FetchOutcome, CrawlError>;
}

impl<T: ArticleSource + ?Sized> ArticleSource for &T {
    async fn random_title(&self) -> Result<String, CrawlError> {
        (**self).random_title().await
    }

    async fn fetch_article(&self, title: &str) -> Result<FetchOutcome, CrawlError> {
        (**self).fetch_article(title).await
    }
}
