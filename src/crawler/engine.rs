//! Crawl engine - the hop-by-hop walk towards the target article
//!
//! Starting from a title (or a random one), the engine repeatedly:
//! 1. Stops if the title was already visited (cycle)
//! 2. Appends the title to the path and reports it to the observer
//! 3. Stops if the title is the target
//! 4. Fetches the article; a disambiguation page redirects the walk to its
//!    first option
//! 5. Resolves the next title, or stops at a dead end
//!
//! Only fetch failures escape as errors. Every other stop is a normal
//! termination recorded in the [`CrawlReport`].

use crate::config::CrawlConfig;
use crate::crawler::cancel::CancelFlag;
use crate::crawler::report::{CrawlOutcome, CrawlReport};
use crate::crawler::resolver::{resolve_next_article, NextArticleNotFound};
use crate::diagnostics::silenced;
use crate::wiki::{ArticleSource, FetchOutcome};
use crate::CrawlError;
use chrono::{DateTime, Utc};

/// Tunables for a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Title that ends the crawl, compared case-insensitively
    pub target: String,

    /// Eligible link to follow on each page (0 = first)
    pub link_index: usize,

    /// Stop after this many hops (unbounded when `None`)
    pub max_hops: Option<usize>,

    /// Run each fetch with logging silenced
    pub silence_fetch_diagnostics: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self::from(&CrawlConfig::default())
    }
}

impl From<&CrawlConfig> for CrawlOptions {
    fn from(config: &CrawlConfig) -> Self {
        Self {
            target: config.target.clone(),
            link_index: config.link_index,
            max_hops: config.max_hops,
            silence_fetch_diagnostics: config.silence_fetch_diagnostics,
        }
    }
}

/// Walks from article to article until a terminal condition is met
pub struct Crawler<S> {
    source: S,
    options: CrawlOptions,
    cancel: CancelFlag,
}

impl<S: ArticleSource> Crawler<S> {
    pub fn new(source: S, options: CrawlOptions) -> Self {
        Self {
            source,
            options,
            cancel: CancelFlag::new(),
        }
    }

    /// Replaces the cancellation flag checked before every fetch
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// Returns a handle that cancels this crawler's walk
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn options(&self) -> &CrawlOptions {
        &self.options
    }

    /// Runs one crawl
    ///
    /// # Arguments
    ///
    /// * `start` - Title to start from; a random article when `None`
    /// * `on_visit` - Called once per appended title, in path order
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The walk ended normally (target, cycle, dead
    ///   end, hop limit or cancellation)
    /// * `Err(CrawlError)` - A fetch failed; the walk is abandoned
    pub async fn crawl<F>(
        &self,
        start: Option<String>,
        mut on_visit: F,
    ) -> Result<CrawlReport, CrawlError>
    where
        F: FnMut(&str),
    {
        let started_at = Utc::now();
        let mut path: Vec<String> = Vec::new();

        let mut current = match start {
            Some(title) => title,
            None => {
                if self.cancel.is_cancelled() {
                    return Ok(finish(path, CrawlOutcome::Cancelled, None, started_at));
                }
                let title = self.source.random_title().await?;
                tracing::info!("Starting at random article: {}", title);
                title
            }
        };

        let (outcome, repeated) = loop {
            if path.contains(&current) {
                tracing::debug!("Revisited {}, stopping", current);
                break (CrawlOutcome::Cycle, Some(current));
            }

            path.push(current.clone());
            on_visit(&current);

            if self.is_target(&current) {
                break (CrawlOutcome::ReachedTarget, None);
            }

            if let Some(max_hops) = self.options.max_hops {
                if path.len() > max_hops {
                    tracing::debug!("Hop limit of {} reached at {}", max_hops, current);
                    break (CrawlOutcome::HopLimit, None);
                }
            }

            if self.cancel.is_cancelled() {
                tracing::debug!("Cancelled before fetching {}", current);
                break (CrawlOutcome::Cancelled, None);
            }

            let fetched = self.fetch(&current).await?;
            match fetched {
                FetchOutcome::Disambiguation(options) => match options.into_iter().next() {
                    Some(first) => {
                        tracing::debug!("{} is ambiguous, taking {}", current, first);
                        current = first;
                    }
                    None => break (CrawlOutcome::DeadEnd, None),
                },
                FetchOutcome::Article(article) => {
                    match resolve_next_article(&article.html, self.options.link_index) {
                        Ok(next) => {
                            tracing::debug!("{} -> {}", current, next);
                            current = next;
                        }
                        Err(NextArticleNotFound) => {
                            tracing::debug!("No eligible link in {}", current);
                            break (CrawlOutcome::DeadEnd, None);
                        }
                    }
                }
            }
        };

        tracing::info!(
            "Crawl finished after {} hops: {}",
            path.len().saturating_sub(1),
            outcome
        );

        Ok(finish(path, outcome, repeated, started_at))
    }

    fn is_target(&self, title: &str) -> bool {
        title.to_lowercase() == self.options.target.to_lowercase()
    }

    async fn fetch(&self, title: &str) -> Result<FetchOutcome, CrawlError> {
        if self.options.silence_fetch_diagnostics {
            silenced(self.source.fetch_article(title)).await
        } else {
            self.source.fetch_article(title).await
        }
    }
}

fn finish(
    path: Vec<String>,
    outcome: CrawlOutcome,
    repeated: Option<String>,
    started_at: DateTime<Utc>,
) -> CrawlReport {
    CrawlReport {
        path,
        outcome,
        repeated,
        started_at,
        finished_at: Utc::now(),
    }
}

/// Crawls towards "Philosophy" with default options, returning only the path
///
/// The path alone does not say why the walk stopped beyond whether its last
/// element is the target; [`Crawler::crawl`] reports the reason.
///
/// # Example
///
/// ```no_run
/// use philosophy_crawler::config::Config;
/// use philosophy_crawler::crawler::crawl;
/// use philosophy_crawler::wiki::WikiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WikiClient::from_config(&Config::default())?;
/// let path = crawl(&client, Some("Rock music".to_string()), |title| println!("{}", title)).await?;
/// println!("{} hops", path.len() - 1);
/// # Ok(())
/// # }
/// ```
pub async fn crawl<S, F>(
    source: S,
    start: Option<String>,
    on_visit: F,
) -> Result<Vec<String>, CrawlError>
where
    S: ArticleSource,
    F: FnMut(&str),
{
    Crawler::new(source, CrawlOptions::default())
        .crawl(start, on_visit)
        .await
        .map(CrawlReport::into_path)
}
