// src/archive/mod.rs
// =============================================================================
// Stage 2: write every talk of a conference to disk.
//
// For one populated conference:
// 1. Derive <year>/<month> from the conference URL and create that directory
// 2. Walk the sessions in page order, creating one directory per session
// 3. Spawn one task per talk: fetch the page, pull out the article text,
//    write <talk-title>.txt into the session directory
// 4. Wait until every talk task of the conference has reported
//
// Talk fetches are bounded by a Semaphore shared across the whole run, so a
// conference with hundreds of talks cannot open hundreds of connections.
//
// A failed talk is logged and counted; its siblings carry on. Directory and
// file names come from titles (not from completion order), so the set of files
// written is the same on every run. Two sessions, or two talks of one session,
// whose titles sanitize to the same segment get -2, -3... in page order.
// =============================================================================

mod download;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use serde::Serialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::error::HarvestError;
use crate::extract::RecordExtractor;
use crate::fetch::PageFetcher;
use crate::model::{Conference, Talk};
use crate::naming::{derive_year_month, path_segment};
use crate::progress::Progress;

pub use download::TalkOutcome;

/// What happened to one conference during materialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConferenceReport {
    pub title: String,
    pub planned: usize,
    pub written: usize,
    pub failed: usize,
    /// The conference directory could not be derived or created
    pub skipped: bool,
    pub failures: Vec<TalkFailure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TalkFailure {
    pub title: String,
    pub url: String,
    pub path: String,
    pub error: String,
}

impl From<&TalkOutcome> for TalkFailure {
    fn from(outcome: &TalkOutcome) -> Self {
        Self {
            title: outcome.title.clone(),
            url: outcome.url.to_string(),
            path: outcome.path.display().to_string(),
            error: outcome
                .result
                .as_ref()
                .err()
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }
}

impl TalkFailure {
    fn new(talk: &Talk, path: &Path, error: &HarvestError) -> Self {
        Self {
            title: talk.title.clone(),
            url: talk.url.to_string(),
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}

impl ConferenceReport {
    fn skipped(conference: &Conference) -> Self {
        let planned = conference.talk_count();
        Self {
            title: conference.title.clone(),
            planned,
            written: 0,
            failed: planned,
            skipped: true,
            failures: Vec::new(),
        }
    }
}

pub struct Materializer {
    root: PathBuf,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
    permits: Arc<Semaphore>,
}

impl Materializer {
    /// `talk_concurrency` is the run-wide cap on talk fetches (at least 1)
    pub fn new(
        root: impl Into<PathBuf>,
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn RecordExtractor>,
        talk_concurrency: usize,
    ) -> Self {
        Self {
            root: root.into(),
            fetcher,
            extractor,
            permits: Arc::new(Semaphore::new(talk_concurrency.max(1))),
        }
    }

    pub async fn materialize(
        &self,
        conference: Conference,
        progress: &dyn Progress,
    ) -> ConferenceReport {
        let conference_dir = match self.conference_dir(&conference).await {
            Ok(dir) => dir,
            Err(error) => {
                warn!(url = %conference.url, title = %conference.title, %error, "skipping conference");
                progress.talks_skipped(conference.talk_count());
                return ConferenceReport::skipped(&conference);
            }
        };

        let mut report = ConferenceReport {
            title: conference.title.clone(),
            planned: conference.talk_count(),
            ..ConferenceReport::default()
        };
        let mut in_flight = FuturesUnordered::new();
        let mut session_names = HashSet::new();

        for session in conference.sessions {
            let session_dir =
                conference_dir.join(unique_segment(&session.title, &mut session_names));
            if let Err(error) = create_dir(&session_dir).await {
                warn!(conference = %conference.title, session = %session.title, %error, "skipping session");
                report.failed += session.talks.len();
                report.failures.extend(
                    session
                        .talks
                        .iter()
                        .map(|talk| TalkFailure::new(talk, &session_dir, &error)),
                );
                progress.talks_skipped(session.talks.len());
                continue;
            }

            let mut file_names = HashSet::new();
            for talk in session.talks {
                let path = session_dir.join(unique_file_name(&talk.title, &mut file_names));
                in_flight.push(download::spawn(
                    talk,
                    path,
                    Arc::clone(&self.fetcher),
                    Arc::clone(&self.extractor),
                    Arc::clone(&self.permits),
                ));
            }
        }

        while let Some(outcome) = in_flight.next().await {
            progress.talk_finished(&outcome);
            if outcome.is_written() {
                report.written += 1;
            } else {
                report.failed += 1;
                report.failures.push(TalkFailure::from(&outcome));
            }
        }

        debug!(
            conference = %report.title,
            written = report.written,
            failed = report.failed,
            "conference done"
        );
        report
    }

    async fn conference_dir(&self, conference: &Conference) -> Result<PathBuf, HarvestError> {
        let (year, month) = derive_year_month(conference.url.as_str())?;
        let dir = self.root.join(year).join(month);
        create_dir(&dir).await?;
        Ok(dir)
    }
}

async fn create_dir(dir: &Path) -> Result<(), HarvestError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| HarvestError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
}

/// `<segment>`, or `<segment>-2`, `-3`... when an earlier sibling already
/// took the name
fn unique_segment(title: &str, taken: &mut HashSet<String>) -> String {
    let base = path_segment(title);
    let mut candidate = base.clone();
    let mut n = 2;
    while !taken.insert(candidate.clone()) {
        candidate = format!("{base}-{n}");
        n += 1;
    }
    candidate
}

fn unique_file_name(title: &str, taken: &mut HashSet<String>) -> String {
    format!("{}.txt", unique_segment(title, taken))
}
