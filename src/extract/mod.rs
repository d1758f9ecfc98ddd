// src/extract/mod.rs
// =============================================================================
// Turns fetched pages into records.
//
// All assumptions about the site's markup live behind `RecordExtractor`.
// The pipeline never looks at HTML itself, so a layout change means a new
// extractor, not a new pipeline.
//
// Submodules:
// - index: conference links on the index page
// - conference: sessions and talk tiles on a conference page
// - article: readable text of a talk page
// - text: small helpers for pulling text out of elements
//
// scraper's `Html` is not Send, so every function here parses and finishes
// synchronously; nothing holds a parsed document across an await.
// =============================================================================

mod article;
mod conference;
mod index;
mod text;

use std::sync::LazyLock;

use scraper::Selector;

use crate::error::Result;
use crate::fetch::Page;
use crate::model::{ConferenceStub, Session};

/// Page-to-record functions, one per kind of page the crawl visits
pub trait RecordExtractor: Send + Sync {
    /// Conference links on the index page, in document order
    fn conference_stubs(&self, index: &Page) -> Vec<ConferenceStub>;

    /// Sessions (each with its talks) on a conference page, in document order.
    ///
    /// Fails only when the sessions container or the session blocks are
    /// missing altogether.
    fn sessions(&self, conference: &Page) -> Result<Vec<Session>>;

    /// Visible text of the talk page's article
    fn article_text(&self, talk: &Page) -> Result<String>;
}

/// Extractor for the churchofjesuschrist.org General Conference pages
#[derive(Debug, Clone)]
pub struct SiteExtractor {
    /// Only index links whose href contains this are conferences
    conference_marker: String,
}

impl SiteExtractor {
    pub fn new(conference_marker: impl Into<String>) -> Self {
        Self {
            conference_marker: conference_marker.into(),
        }
    }
}

impl Default for SiteExtractor {
    fn default() -> Self {
        Self::new(crate::config::CONFERENCE_MARKER)
    }
}

impl RecordExtractor for SiteExtractor {
    fn conference_stubs(&self, index: &Page) -> Vec<ConferenceStub> {
        index::extract_conference_stubs(index, &self.conference_marker)
    }

    fn sessions(&self, conference: &Page) -> Result<Vec<Session>> {
        conference::extract_sessions(conference)
    }

    fn article_text(&self, talk: &Page) -> Result<String> {
        article::extract_article_text(talk)
    }
}

/// Compiled CSS selectors for the site's markup
pub(crate) struct Selectors {
    pub year_link: Selector,
    pub sessions_container: Selector,
    pub session_block: Selector,
    pub session_title: Selector,
    pub talk_link: Selector,
    pub talk_author: Selector,
    pub talk_title: Selector,
    pub talk_title_loose: Selector,
    pub article: Selector,
}

// The selector strings are constants, so a parse failure is a programming
// error caught by the first test that touches SELECTORS.
fn css(selector: &'static str) -> Selector {
    Selector::parse(selector).unwrap_or_else(|e| panic!("invalid selector {selector:?}: {e:?}"))
}

pub(crate) static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| Selectors {
    year_link: css("a[href].year-line__link"),
    sessions_container: css("div.section-wrapper"),
    session_block: css("div.section.tile-wrapper"),
    session_title: css("span.section__header__title"),
    talk_link: css("a.lumen-tile__link"),
    talk_author: css("div.lumen-tile__content"),
    talk_title: css("div.lumen-tile__title > div"),
    talk_title_loose: css("div.lumen-tile__title"),
    article: css("article"),
});
