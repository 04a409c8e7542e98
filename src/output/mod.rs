//! Output module for reporting crawl progress and results
//!
//! This module handles:
//! - Streaming visited titles to stdout as the crawl progresses
//! - Printing a human-readable summary of a finished crawl
//! - Rendering the crawl report as JSON

mod summary;

pub use summary::{format_summary, print_summary, render_json};

/// Prints one visited title, as it is appended to the path
pub fn print_visit(title: &str) {
    println!("{}", title);
}
