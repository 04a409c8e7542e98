//! Crawl results
//!
//! A crawl always ends with the ordered list of visited titles. The report
//! additionally records why the walk stopped, which the bare path only
//! implies through its last element.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrawlOutcome {
    /// The last title is the target article
    ReachedTarget,

    /// The next title was already in the path
    Cycle,

    /// The last article had no eligible link
    DeadEnd,

    /// The configured hop limit was reached
    HopLimit,

    /// Cancellation was requested between hops
    Cancelled,
}

impl CrawlOutcome {
    /// Returns true if the crawl ended on the target article
    pub fn is_success(&self) -> bool {
        matches!(self, Self::ReachedTarget)
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ReachedTarget => "reached target",
            Self::Cycle => "cycle",
            Self::DeadEnd => "dead end",
            Self::HopLimit => "hop limit",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// The result of one crawl invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlReport {
    /// Visited titles in the order they were reached
    pub path: Vec<String>,

    /// Why the crawl stopped
    pub outcome: CrawlOutcome,

    /// Title that closed the cycle, when `outcome` is `Cycle`
    pub repeated: Option<String>,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the crawl stopped
    pub finished_at: DateTime<Utc>,
}

impl CrawlReport {
    /// Number of links followed (one less than the number of titles)
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// The last visited title
    pub fn last(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }

    /// Wall-clock duration of the crawl
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Consumes the report, keeping only the path
    pub fn into_path(self) -> Vec<String> {
        self.path
    }
}
