// src/archive/download.rs
// =============================================================================
// One talk: fetch -> article text -> file.
//
// Each talk runs in its own tokio task. The task holds a semaphore permit
// only while it is fetching and parsing; the file write happens after the
// permit is returned.
// =============================================================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{debug, warn};
use url::Url;

use crate::error::HarvestError;
use crate::extract::RecordExtractor;
use crate::fetch::PageFetcher;
use crate::model::Talk;

/// Result of one talk task
#[derive(Debug)]
pub struct TalkOutcome {
    pub title: String,
    pub url: Url,
    pub path: PathBuf,
    pub result: Result<(), HarvestError>,
}

impl TalkOutcome {
    pub fn is_written(&self) -> bool {
        self.result.is_ok()
    }
}

/// Spawns the talk task. The returned future always resolves to an outcome,
/// even if the task panicked.
pub(super) fn spawn(
    talk: Talk,
    path: PathBuf,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
    permits: Arc<Semaphore>,
) -> impl std::future::Future<Output = TalkOutcome> {
    let title = talk.title.clone();
    let url = talk.url.clone();
    let fallback_path = path.clone();

    let handle = tokio::spawn(download_talk(talk, path, fetcher, extractor, permits));

    async move {
        handle.await.unwrap_or_else(|e| TalkOutcome {
            result: Err(HarvestError::Task {
                context: url.to_string(),
                reason: e.to_string(),
            }),
            title,
            url,
            path: fallback_path,
        })
    }
}

async fn download_talk(
    talk: Talk,
    path: PathBuf,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
    permits: Arc<Semaphore>,
) -> TalkOutcome {
    let result = fetch_and_write(
        &talk,
        &path,
        fetcher.as_ref(),
        extractor.as_ref(),
        &permits,
    )
    .await;

    match &result {
        Ok(()) => debug!(
            title = %talk.title,
            author = %talk.author,
            path = %path.display(),
            "talk written"
        ),
        Err(error) => warn!(
            url = %talk.url,
            title = %talk.title,
            path = %path.display(),
            %error,
            "talk skipped"
        ),
    }

    TalkOutcome {
        title: talk.title,
        url: talk.url,
        path,
        result,
    }
}

async fn fetch_and_write(
    talk: &Talk,
    path: &Path,
    fetcher: &dyn PageFetcher,
    extractor: &dyn RecordExtractor,
    permits: &Semaphore,
) -> Result<(), HarvestError> {
    let text = {
        let _permit = permits.acquire().await.map_err(|e| HarvestError::Task {
            context: talk.url.to_string(),
            reason: e.to_string(),
        })?;
        let page = fetcher.fetch(&talk.url).await?;
        extractor.article_text(&page)?
    };

    tokio::fs::write(path, text)
        .await
        .map_err(|source| HarvestError::Write {
            path: path.to_path_buf(),
            source,
        })
}
