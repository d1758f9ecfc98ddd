// src/extract/index.rs
// =============================================================================
// Finds the conference links on the General Conference index page.
//
// A conference link is an <a class="year-line__link" href="..."> whose href
// contains the conference path marker. Links are returned in document order
// and are NOT deduplicated: the index is mirrored exactly.
// =============================================================================

use tracing::warn;

use super::text::full_text;
use super::SELECTORS;
use crate::fetch::Page;
use crate::model::ConferenceStub;

pub(crate) fn extract_conference_stubs(index: &Page, marker: &str) -> Vec<ConferenceStub> {
    let document = scraper::Html::parse_document(&index.html);
    let mut stubs = Vec::new();

    for anchor in document.select(&SELECTORS.year_link) {
        // The selector guarantees an href
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains(marker) {
            continue;
        }

        // Relative hrefs resolve against the index page's own URL
        match index.url.join(href) {
            Ok(url) => stubs.push(ConferenceStub {
                url,
                title: full_text(anchor),
            }),
            Err(e) => warn!(href, error = %e, "skipping unresolvable conference link"),
        }
    }

    stubs
}
