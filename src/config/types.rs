use serde::Deserialize;

/// Main configuration structure for the crawler
///
/// Every section is optional in the TOML file; missing sections and keys
/// fall back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub crawl: CrawlConfig,
}

/// MediaWiki API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Action API endpoint (e.g., "https://en.wikipedia.org/w/api.php")
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            timeout_secs: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "PhilosophyCrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://en.wikipedia.org/wiki/Wikipedia:Getting_to_Philosophy"
                .to_string(),
            contact_email: "crawler@example.com".to_string(),
        }
    }
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Article that ends the crawl when reached (compared case-insensitively)
    pub target: String,

    /// Which eligible link to follow on each page (0 = first)
    #[serde(rename = "link-index")]
    pub link_index: usize,

    /// Maximum number of hops before giving up (unbounded when absent)
    #[serde(rename = "max-hops")]
    pub max_hops: Option<usize>,

    /// Silence log output emitted while a page is being fetched
    #[serde(rename = "silence-fetch-diagnostics")]
    pub silence_fetch_diagnostics: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            target: "Philosophy".to_string(),
            link_index: 0,
            max_hops: None,
            silence_fetch_diagnostics: true,
        }
    }
}
