// src/testing.rs
// Test doubles and HTML fixtures shared by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use url::Url;

use crate::archive::TalkOutcome;
use crate::error::{HarvestError, Result};
use crate::fetch::{Page, PageFetcher};
use crate::model::ConferenceStub;
use crate::progress::Progress;
use crate::scout::Discovery;

/// Serves canned pages by exact URL; unknown URLs get a 404
#[derive(Debug, Default)]
pub(crate) struct StaticFetcher {
    pages: HashMap<String, std::result::Result<String, u16>>,
    hits: AtomicUsize,
}

impl StaticFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(html.into()));
        self
    }

    pub(crate) fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page> {
        self.hits.fetch_add(1, Ordering::SeqCst);
        match self.pages.get(url.as_str()) {
            Some(Ok(html)) => Ok(Page::new(url.clone(), html.clone())),
            Some(Err(status)) => Err(HarvestError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(HarvestError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct CountingProgress {
    conferences: AtomicUsize,
    planned: AtomicUsize,
    talks_ok: AtomicUsize,
    talks_failed: AtomicUsize,
}

impl CountingProgress {
    pub(crate) fn conferences(&self) -> usize {
        self.conferences.load(Ordering::SeqCst)
    }

    pub(crate) fn planned(&self) -> usize {
        self.planned.load(Ordering::SeqCst)
    }

    pub(crate) fn talks_ok(&self) -> usize {
        self.talks_ok.load(Ordering::SeqCst)
    }

    pub(crate) fn talks_failed(&self) -> usize {
        self.talks_failed.load(Ordering::SeqCst)
    }
}

impl Progress for CountingProgress {
    fn conference_discovered(&self, _outcome: &Discovery) {
        self.conferences.fetch_add(1, Ordering::SeqCst);
    }

    fn talks_planned(&self, total: usize) {
        self.planned.store(total, Ordering::SeqCst);
    }

    fn talk_finished(&self, outcome: &TalkOutcome) {
        if outcome.is_written() {
            self.talks_ok.fetch_add(1, Ordering::SeqCst);
        } else {
            self.talks_failed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn talks_skipped(&self, count: usize) {
        self.talks_failed.fetch_add(count, Ordering::SeqCst);
    }
}

pub(crate) fn stub(url: &str, title: &str) -> ConferenceStub {
    ConferenceStub {
        url: Url::parse(url).unwrap(),
        title: title.to_string(),
    }
}

/// Index page linking to each (href, title)
pub(crate) fn index_html(links: &[(&str, &str)]) -> String {
    let anchors: String = links
        .iter()
        .map(|(href, title)| format!(r#"<a class="year-line__link" href="{href}">{title}</a>"#))
        .collect();
    format!(r#"<html><body><section><div class="section-wrapper">{anchors}</div></section></body></html>"#)
}

/// Conference page with sessions of (session title, [(talk title, href)])
pub(crate) fn conference_html(sessions: &[(&str, Vec<(&str, &str)>)]) -> String {
    let blocks: String = sessions
        .iter()
        .map(|(title, talks)| {
            let tiles: String = talks
                .iter()
                .map(|(talk, href)| {
                    format!(
                        r#"<a class="lumen-tile__link" href="{href}"><div class="lumen-tile__title"><div>{talk}</div></div><div class="lumen-tile__content">Speaker of {talk}</div></a>"#
                    )
                })
                .collect();
            format!(
                r#"<div class="section tile-wrapper"><span class="section__header__title">{title}</span>{tiles}</div>"#
            )
        })
        .collect();
    format!(r#"<html><body><div class="section-wrapper">{blocks}</div></body></html>"#)
}

pub(crate) fn talk_html(body: &str) -> String {
    format!("<html><body><nav>Menu</nav><article><p>{body}</p></article></body></html>")
}
