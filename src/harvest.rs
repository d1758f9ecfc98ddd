// src/harvest.rs
// =============================================================================
// Runs the whole harvest:
//
// 1. Make sure the output root exists            (fatal on failure)
// 2. Fetch the index page, list conference stubs  (fatal on failure)
// 3. Discover every conference's sessions/talks   (stage 1, scout)
// 4. Write every talk of every populated conference (stage 2, archive)
//
// Anything that goes wrong after step 2 is logged and recorded in the
// RunSummary; the run itself still succeeds.
// =============================================================================

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{info, warn};

use crate::archive::{ConferenceReport, Materializer};
use crate::config::HarvestConfig;
use crate::error::{HarvestError, Result};
use crate::extract::RecordExtractor;
use crate::fetch::PageFetcher;
use crate::progress::Progress;
use crate::scout::{self, Discovery};

/// Totals for one run, printed at the end (table or JSON)
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub conferences_found: usize,
    pub conferences_discovered: usize,
    pub conferences_skipped: usize,
    pub talks_planned: usize,
    pub talks_written: usize,
    pub talks_failed: usize,
    pub discovery_failures: Vec<DiscoveryFailure>,
    pub conferences: Vec<ConferenceReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryFailure {
    pub title: String,
    pub url: String,
    pub error: String,
}

pub struct Harvester {
    config: HarvestConfig,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
}

impl Harvester {
    pub fn new(
        config: HarvestConfig,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn RecordExtractor>,
    ) -> Self {
        Self {
            config,
            fetcher,
            extractor,
        }
    }

    /// Returns `Err` only for failures that make the run pointless:
    /// an unusable output root or an unreachable index page.
    pub async fn run(&self, progress: &dyn Progress) -> Result<RunSummary> {
        let root = &self.config.output_root;
        tokio::fs::create_dir_all(root)
            .await
            .map_err(|source| HarvestError::CreateDir {
                path: root.clone(),
                source,
            })?;
        info!(root = %root.display(), "output directory ready");

        let index_url = self.config.index_url();
        info!(%index_url, "gathering conference links");
        let index = self.fetcher.fetch(&index_url).await?;
        let stubs = self.extractor.conference_stubs(&index);
        info!(conferences = stubs.len(), "found conferences");

        let mut summary = RunSummary {
            conferences_found: stubs.len(),
            ..RunSummary::default()
        };

        let discoveries = scout::discover(
            stubs,
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            progress,
        )
        .await;

        let mut conferences = Vec::with_capacity(discoveries.len());
        for discovery in discoveries {
            match discovery {
                Discovery::Populated(conference) => conferences.push(conference),
                Discovery::Failed { stub, error } => {
                    summary.discovery_failures.push(DiscoveryFailure {
                        title: stub.title,
                        url: stub.url.to_string(),
                        error: error.to_string(),
                    });
                }
            }
        }
        summary.conferences_discovered = conferences.len();
        summary.talks_planned = conferences.iter().map(|c| c.talk_count()).sum();
        progress.talks_planned(summary.talks_planned);
        info!(
            conferences = summary.conferences_discovered,
            talks = summary.talks_planned,
            "downloading talks"
        );

        let materializer = Materializer::new(
            root.clone(),
            Arc::clone(&self.fetcher),
            Arc::clone(&self.extractor),
            self.config.talk_concurrency,
        );
        let reports: Vec<ConferenceReport> = stream::iter(conferences)
            .map(|conference| materializer.materialize(conference, progress))
            .buffer_unordered(self.config.conference_concurrency.max(1))
            .collect()
            .await;

        for report in &reports {
            if report.skipped {
                summary.conferences_skipped += 1;
            } else if report.failed > 0 {
                warn!(
                    conference = %report.title,
                    failed = report.failed,
                    "conference finished with missing talks"
                );
            }
            summary.talks_written += report.written;
            summary.talks_failed += report.failed;
        }
        summary.conferences = reports;

        progress.finish();
        info!(
            written = summary.talks_written,
            failed = summary.talks_failed,
            "conferences downloaded"
        );
        Ok(summary)
    }
}
