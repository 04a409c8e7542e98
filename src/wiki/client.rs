//! MediaWiki Action API client
//!
//! This module fetches articles for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - Picking a random article from the main namespace
//! - Fetching rendered article HTML (following redirects)
//! - Detecting disambiguation pages and listing their options
//! - Mapping API errors to [`CrawlError`]

use crate::config::{ApiConfig, Config, UserAgentConfig};
use crate::wiki::{ArticleSource, FetchOutcome, RenderedArticle};
use crate::CrawlError;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// Error body returned by the Action API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    #[serde(default)]
    info: String,
}

#[derive(Debug, Deserialize)]
struct RandomResponse {
    error: Option<ApiErrorBody>,
    query: Option<RandomQuery>,
}

#[derive(Debug, Deserialize)]
struct RandomQuery {
    random: Vec<RandomPage>,
}

#[derive(Debug, Deserialize)]
struct RandomPage {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ParseResponse {
    error: Option<ApiErrorBody>,
    parse: Option<ParsedPage>,
}

#[derive(Debug, Deserialize)]
struct ParsedPage {
    title: String,
    text: String,
    #[serde(default)]
    properties: serde_json::Value,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `api` - The API configuration (timeout)
/// * `user_agent` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    api: &ApiConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        user_agent.crawler_name,
        user_agent.crawler_version,
        user_agent.contact_url,
        user_agent.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(api.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Article source backed by a MediaWiki installation
#[derive(Debug, Clone)]
pub struct WikiClient {
    client: Client,
    endpoint: Url,
}

impl WikiClient {
    /// Creates a client for the configured endpoint
    ///
    /// # Example
    ///
    /// ```no_run
    /// use philosophy_crawler::config::Config;
    /// use philosophy_crawler::wiki::WikiClient;
    ///
    /// let client = WikiClient::from_config(&Config::default()).unwrap();
    /// assert_eq!(client.endpoint().host_str(), Some("en.wikipedia.org"));
    /// ```
    pub fn from_config(config: &Config) -> Result<Self, CrawlError> {
        Self::new(&config.api, &config.user_agent)
    }

    pub fn new(api: &ApiConfig, user_agent: &UserAgentConfig) -> Result<Self, CrawlError> {
        let endpoint = Url::parse(&api.endpoint)?;
        let client = build_http_client(api, user_agent)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one API request and decodes its JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        subject: &str,
        params: &[(&str, &str)],
    ) -> Result<T, CrawlError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(params)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| CrawlError::Http {
                title: subject.to_string(),
                source,
            })?;

        response
            .json::<T>()
            .await
            .map_err(|e| CrawlError::MalformedResponse(format!("{}: {}", subject, e)))
    }
}

impl ArticleSource for WikiClient {
    async fn random_title(&self) -> Result<String, CrawlError> {
        let body: RandomResponse = self
            .get_json(
                "random article",
                &[
                    ("action", "query"),
                    ("list", "random"),
                    ("rnnamespace", "0"),
                    ("rnlimit", "1"),
                    ("format", "json"),
                    ("formatversion", "2"),
                ],
            )
            .await?;

        if let Some(error) = body.error {
            return Err(CrawlError::Api {
                code: error.code,
                info: error.info,
            });
        }

        let title = body
            .query
            .and_then(|query| query.random.into_iter().next())
            .map(|page| page.title)
            .ok_or_else(|| {
                CrawlError::MalformedResponse("random query returned no pages".to_string())
            })?;

        tracing::debug!("Random article: {}", title);
        Ok(title)
    }

    async fn fetch_article(&self, title: &str) -> Result<FetchOutcome, CrawlError> {
        tracing::debug!("Fetching article: {}", title);

        let body: ParseResponse = self
            .get_json(
                title,
                &[
                    ("action", "parse"),
                    ("page", title),
                    ("prop", "text|properties"),
                    ("redirects", "1"),
                    ("format", "json"),
                    ("formatversion", "2"),
                ],
            )
            .await?;

        into_outcome(title, body)
    }
}

/// Turns a decoded `action=parse` response into a fetch outcome
fn into_outcome(requested: &str, body: ParseResponse) -> Result<FetchOutcome, CrawlError> {
    if let Some(error) = body.error {
        return Err(match error.code.as_str() {
            "missingtitle" => CrawlError::MissingPage(requested.to_string()),
            _ => CrawlError::Api {
                code: error.code,
                info: error.info,
            },
        });
    }

    let page = body.parse.ok_or_else(|| {
        CrawlError::MalformedResponse(format!("{}: response has no parse section", requested))
    })?;

    if page.title != requested {
        tracing::debug!("{} resolved to {}", requested, page.title);
    }

    if has_property(&page.properties, "disambiguation") {
        let options = disambiguation_options(&page.text);
        if !options.is_empty() {
            tracing::warn!(
                "{} is a disambiguation page with {} options",
                page.title,
                options.len()
            );
            return Ok(FetchOutcome::Disambiguation(options));
        }
        tracing::warn!(
            "{} is a disambiguation page without listed options",
            page.title
        );
    }

    Ok(FetchOutcome::Article(RenderedArticle::new(page.title, page.text)))
}

/// Checks page properties in either the object or the legacy list layout
fn has_property(properties: &serde_json::Value, name: &str) -> bool {
    match properties {
        serde_json::Value::Object(map) => map.contains_key(name),
        serde_json::Value::Array(entries) => entries
            .iter()
            .any(|entry| entry.get("name").and_then(|n| n.as_str()) == Some(name)),
        _ => false,
    }
}

/// Lists the options of a disambiguation page
///
/// Each list item contributes the title of its first link. Table of
/// contents entries are skipped and repeated titles are kept once, in the
/// order they first appear.
pub fn disambiguation_options(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut options = Vec::new();
    let mut seen = HashSet::new();

    let (item_selector, anchor_selector) = match (Selector::parse("li"), Selector::parse("a")) {
        (Ok(li), Ok(a)) => (li, a),
        _ => return options,
    };

    for item in document.select(&item_selector) {
        let is_toc = item
            .value()
            .classes()
            .any(|class| class.starts_with("toclevel") || class.starts_with("tocsection"));
        if is_toc {
            continue;
        }

        let title = item
            .select(&anchor_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("title"));

        if let Some(title) = title {
            if seen.insert(title.to_string()) {
                options.push(title.to_string());
            }
        }
    }

    options
}
