// src/main.rs
// =============================================================================
// Entry point of the conference-harvest CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Build the HTTP fetcher, extractor and progress reporter
// 4. Run the harvest and print a summary
// 5. Exit with the right code (0 = finished, even with skipped talks;
//    1 = fatal: no output directory or no index page)
// =============================================================================

mod archive; // src/archive/ - stage 2, writing talks to disk
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - run configuration
mod error; // src/error.rs - error taxonomy
mod extract; // src/extract/ - HTML -> records
mod fetch; // src/fetch/ - page retrieval
mod harvest; // src/harvest.rs - orchestration
mod model; // src/model.rs - conference/session/talk tree
mod naming; // src/naming.rs - titles and URLs -> path segments
mod progress; // src/progress.rs - progress bar
mod scout; // src/scout/ - stage 1, discovering the tree

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use extract::SiteExtractor;
use fetch::HttpFetcher;
use harvest::{Harvester, RunSummary};
use progress::{BarProgress, Progress, SilentProgress};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v / -q
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?cli, "arguments parsed");

    // Resolving the output root happens before any network activity
    let config = cli.to_config().context("cannot resolve output directory")?;

    let fetcher =
        HttpFetcher::new(config.request_timeout).context("failed to build HTTP client")?;
    let progress: Box<dyn Progress> = if cli.no_progress || cli.json {
        Box::new(SilentProgress)
    } else {
        Box::new(BarProgress::new())
    };

    let harvester = Harvester::new(config, Arc::new(fetcher), Arc::new(SiteExtractor::default()));
    let summary = harvester.run(progress.as_ref()).await?;

    print_summary(&summary, cli.json)
}

fn print_summary(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!("{:<40} {:>8} {:>8} {:>8}", "CONFERENCE", "TALKS", "WRITTEN", "FAILED");
    println!("{}", "=".repeat(67));
    for report in &summary.conferences {
        let title = if report.skipped {
            format!("{} (skipped)", report.title)
        } else {
            report.title.clone()
        };
        println!(
            "{:<40} {:>8} {:>8} {:>8}",
            title, report.planned, report.written, report.failed
        );
    }
    for failure in &summary.discovery_failures {
        println!("{:<40} {:>8}", format!("{} (not discovered)", failure.title), "-");
    }
    println!();

    println!("Summary:");
    println!(
        "   Conferences: {} found, {} discovered, {} skipped",
        summary.conferences_found, summary.conferences_discovered, summary.conferences_skipped
    );
    println!(
        "   Talks: {} written, {} failed, {} total",
        summary.talks_written, summary.talks_failed, summary.talks_planned
    );
    Ok(())
}
