//! Crawl summaries
//!
//! Text and JSON renderings of a [`CrawlReport`].

use crate::crawler::{CrawlOutcome, CrawlReport};

/// Formats a multi-line, human-readable summary of a crawl
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `target` - The target article the crawl was heading for
pub fn format_summary(report: &CrawlReport, target: &str) -> String {
    let mut lines = Vec::new();

    lines.push("=== Crawl Summary ===".to_string());
    lines.push(format!("  Articles visited: {}", report.path.len()));
    lines.push(format!("  Hops: {}", report.hops()));

    let result = match report.outcome {
        CrawlOutcome::ReachedTarget => format!("reached {}", target),
        CrawlOutcome::Cycle => match &report.repeated {
            Some(title) => format!("cycle back to {}", title),
            None => "cycle".to_string(),
        },
        CrawlOutcome::DeadEnd => match report.last() {
            Some(title) => format!("dead end at {}", title),
            None => "dead end".to_string(),
        },
        CrawlOutcome::HopLimit => "hop limit reached".to_string(),
        CrawlOutcome::Cancelled => "cancelled".to_string(),
    };
    lines.push(format!("  Result: {}", result));

    let millis = report.duration().num_milliseconds();
    lines.push(format!("  Duration: {:.2}s", millis as f64 / 1000.0));

    lines.join("\n")
}

/// Prints the summary to stdout
pub fn print_summary(report: &CrawlReport, target: &str) {
    println!();
    println!("{}", format_summary(report, target));
}

/// Renders the report as pretty-printed JSON
pub fn render_json(report: &CrawlReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
