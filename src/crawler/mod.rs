//! Crawler module for walking from article to article
//!
//! This module contains the core crawling logic, including:
//! - Link eligibility rules
//! - Next-article resolution from rendered HTML
//! - The hop-by-hop crawl engine and its termination rules
//! - Crawl reports and cancellation

mod cancel;
mod engine;
mod filter;
mod report;
mod resolver;

pub use cancel::CancelFlag;
pub use engine::{crawl, CrawlOptions, Crawler};
pub use filter::{is_eligible, LinkCandidate};
pub use report::{CrawlOutcome, CrawlReport};
pub use resolver::{eligible_links, extract_candidates, resolve_next_article, NextArticleNotFound};
