//! Philosophy Crawler main entry point
//!
//! This is the command-line interface for the first-link crawler.

use anyhow::Context;
use clap::Parser;
use philosophy_crawler::config::{load_config, validate, Config};
use philosophy_crawler::crawler::{CancelFlag, CrawlOptions, Crawler};
use philosophy_crawler::output::{print_summary, print_visit, render_json};
use philosophy_crawler::wiki::WikiClient;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Philosophy Crawler: follow the first link until you reach Philosophy
///
/// Starting from the given article (or a random one), repeatedly follows the
/// first lowercase, non-parenthesized link in the article body until it
/// reaches Philosophy, loops back to an article it has seen, or finds no
/// link to follow.
#[derive(Parser, Debug)]
#[command(name = "philosophy-crawler")]
#[command(version)]
#[command(about = "Follow first links until reaching Philosophy", long_about = None)]
struct Cli {
    /// Starting article title (words are joined with spaces; random if omitted)
    #[arg(value_name = "TITLE")]
    title: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Article that ends the crawl
    #[arg(long, value_name = "TITLE")]
    target: Option<String>,

    /// Follow the N-th eligible link instead of the first (0-based)
    #[arg(long, value_name = "N")]
    link_index: Option<usize>,

    /// Stop after this many hops
    #[arg(long, value_name = "N")]
    max_hops: Option<usize>,

    /// Print the final report as JSON instead of a text summary
    #[arg(long)]
    json: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Starting title built from the positional words
    fn start_title(&self) -> Option<String> {
        if self.title.is_empty() {
            None
        } else {
            Some(self.title.join(" "))
        }
    }

    /// Applies command-line overrides on top of the loaded configuration
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(target) = &self.target {
            config.crawl.target = target.clone();
        }
        if let Some(link_index) = self.link_index {
            config.crawl.link_index = link_index;
        }
        if let Some(max_hops) = self.max_hops {
            config.crawl.max_hops = Some(max_hops);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };
    cli.apply_overrides(&mut config);
    validate(&config).context("invalid configuration")?;

    let client = WikiClient::from_config(&config).context("failed to build API client")?;
    tracing::debug!("Using API endpoint {}", client.endpoint());

    let crawler = Crawler::new(client, CrawlOptions::from(&config.crawl));
    watch_for_interrupt(crawler.cancel_flag());

    let start = cli.start_title();
    match &start {
        Some(title) => tracing::info!("Starting at: {}", title),
        None => tracing::info!("Starting at a random article"),
    }

    let stream_titles = !cli.json;
    let report = crawler
        .crawl(start, |title| {
            if stream_titles {
                print_visit(title);
            }
        })
        .await
        .context("crawl failed")?;

    if cli.json {
        println!("{}", render_json(&report)?);
    } else if !cli.quiet {
        print_summary(&report, &config.crawl.target);
    }

    Ok(())
}

/// Cancels the crawl at the next hop when Ctrl-C is pressed
fn watch_for_interrupt(cancel: CancelFlag) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, stopping after the current fetch");
            cancel.cancel();
        }
    });
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("philosophy_crawler=info,warn"),
            1 => EnvFilter::new("philosophy_crawler=debug,info"),
            2 => EnvFilter::new("philosophy_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
