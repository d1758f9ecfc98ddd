// src/extract/conference.rs
// =============================================================================
// Parses a conference page into sessions and talks.
//
// Page shape:
//   div.section-wrapper                      (sessions container)
//     div.section.tile-wrapper               (one per session)
//       span.section__header__title          (session title)
//       a.lumen-tile__link[href]             (one per talk)
//         div.lumen-tile__title > div        (talk title)
//         div.lumen-tile__content            (speaker)
//
// A handful of talk tiles put the title text directly in
// div.lumen-tile__title, so that is tried second.
//
// Missing container or session blocks is a structural failure for the whole
// conference. Missing text inside a tile is not: title and author each fall
// back to "unknown" on their own.
// =============================================================================

use scraper::{ElementRef, Html};
use tracing::{debug, warn};
use url::Url;

use super::text::{first_own_text, full_text};
use super::SELECTORS;
use crate::error::{HarvestError, Result};
use crate::fetch::Page;
use crate::model::{Session, Talk, UNKNOWN};

pub(crate) fn extract_sessions(page: &Page) -> Result<Vec<Session>> {
    let document = Html::parse_document(&page.html);

    let container = document
        .select(&SELECTORS.sessions_container)
        .next()
        .ok_or_else(|| HarvestError::structure(page.url.as_str(), "sessions container"))?;

    let sessions: Vec<Session> = container
        .select(&SELECTORS.session_block)
        .map(|block| extract_session(block, &page.url))
        .collect();

    if sessions.is_empty() {
        return Err(HarvestError::structure(page.url.as_str(), "session blocks"));
    }

    Ok(sessions)
}

fn extract_session(block: ElementRef<'_>, base: &Url) -> Session {
    let title = block
        .select(&SELECTORS.session_title)
        .map(full_text)
        .find(|t| !t.is_empty())
        .unwrap_or_else(|| {
            debug!(page = %base, "session without a title");
            UNKNOWN.to_string()
        });

    let talks = block
        .select(&SELECTORS.talk_link)
        .filter_map(|anchor| extract_talk(anchor, base))
        .collect();

    Session { title, talks }
}

/// Builds a Talk from one talk tile anchor.
///
/// Returns `None` only when the anchor has no usable href; a missing
/// title or author is replaced by "unknown".
pub(crate) fn extract_talk(anchor: ElementRef<'_>, base: &Url) -> Option<Talk> {
    let Some(href) = anchor.value().attr("href") else {
        warn!(page = %base, "skipping talk tile without a link");
        return None;
    };
    let url = match base.join(href) {
        Ok(url) => url,
        Err(e) => {
            warn!(page = %base, href, error = %e, "skipping talk with unresolvable link");
            return None;
        }
    };

    let author = first_own_text(anchor, &[&SELECTORS.talk_author]).unwrap_or_else(|| {
        debug!(%url, "unknown author");
        UNKNOWN.to_string()
    });

    let title = first_own_text(
        anchor,
        &[&SELECTORS.talk_title, &SELECTORS.talk_title_loose],
    )
    .unwrap_or_else(|| {
        debug!(%url, "unknown title");
        UNKNOWN.to_string()
    });

    Some(Talk { title, author, url })
}
