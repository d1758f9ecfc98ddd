// src/scout/mod.rs
// =============================================================================
// Stage 1: discover the document tree.
//
// Every conference stub from the index page gets its own task, which fetches
// the conference page and parses its sessions:
//
//   Pending -> Fetching -> Populated | Failed
//
// There is no cap here; there are only a few dozen conferences per index.
// The caller gets back exactly one Discovery per stub it passed in, whatever
// happened to the individual fetches, in completion order (not stub order).
// =============================================================================

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

use crate::error::HarvestError;
use crate::extract::RecordExtractor;
use crate::fetch::PageFetcher;
use crate::model::{Conference, ConferenceStub};
use crate::progress::Progress;

/// Terminal state of one conference's discovery
#[derive(Debug)]
pub enum Discovery {
    Populated(Conference),
    Failed {
        stub: ConferenceStub,
        error: HarvestError,
    },
}

impl Discovery {
    pub fn title(&self) -> &str {
        match self {
            Discovery::Populated(conference) => &conference.title,
            Discovery::Failed { stub, .. } => &stub.title,
        }
    }
}

/// Fans out one task per stub and waits for all of them.
pub async fn discover(
    stubs: Vec<ConferenceStub>,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
    progress: &dyn Progress,
) -> Vec<Discovery> {
    let dispatched = stubs.len();

    let mut in_flight: FuturesUnordered<_> = stubs
        .into_iter()
        .map(|stub| {
            // Kept so a panicked task still reports against its conference
            let fallback = stub.clone();
            let handle = tokio::spawn(scout_conference(
                stub,
                Arc::clone(&fetcher),
                Arc::clone(&extractor),
            ));
            async move {
                handle.await.unwrap_or_else(|e| Discovery::Failed {
                    error: HarvestError::Task {
                        context: fallback.url.to_string(),
                        reason: e.to_string(),
                    },
                    stub: fallback,
                })
            }
        })
        .collect();

    let mut discoveries = Vec::with_capacity(dispatched);
    while let Some(discovery) = in_flight.next().await {
        progress.conference_discovered(&discovery);
        discoveries.push(discovery);
    }

    debug_assert_eq!(discoveries.len(), dispatched);
    discoveries
}

/// Fetches one conference page and attaches its sessions
async fn scout_conference(
    stub: ConferenceStub,
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn RecordExtractor>,
) -> Discovery {
    debug!(url = %stub.url, title = %stub.title, "fetching conference");

    let sessions = match fetcher.fetch(&stub.url).await {
        Ok(page) => extractor.sessions(&page),
        Err(error) => Err(error),
    };

    match sessions {
        Ok(sessions) => {
            debug!(title = %stub.title, sessions = sessions.len(), "conference populated");
            Discovery::Populated(Conference::from_stub(stub, sessions))
        }
        Err(error) => {
            if error.is_structural() {
                warn!(url = %stub.url, title = %stub.title, %error, "conference page layout not recognised");
            } else {
                warn!(url = %stub.url, title = %stub.title, %error, "conference page fetch failed");
            }
            Discovery::Failed { stub, error }
        }
    }
}
