// src/extract/article.rs
// =============================================================================
// Pulls the readable text out of a talk page.
//
// The talk lives in the page's first <article>. We walk it and keep only text
// a reader would see: script/style content is dropped, whitespace inside text
// collapses the way a browser renders it, and block elements and <br> end a
// line. Lines are trimmed and empty ones dropped.
// =============================================================================

use scraper::{ElementRef, Html};

use super::SELECTORS;
use crate::error::{HarvestError, Result};
use crate::fetch::Page;

const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

const BLOCKS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "ol", "p",
    "pre", "section", "table", "tr", "ul", "caption",
];

/// Table cells share a line but never run together
const CELLS: &[&str] = &["td", "th"];

pub(crate) fn extract_article_text(page: &Page) -> Result<String> {
    let document = Html::parse_document(&page.html);
    let article = document
        .select(&SELECTORS.article)
        .next()
        .ok_or_else(|| HarvestError::structure(page.url.as_str(), "article"))?;

    let mut raw = String::new();
    push_visible_text(article, &mut raw);
    Ok(tidy_lines(&raw))
}

fn push_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            push_collapsed(text, out);
            continue;
        }

        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if HIDDEN.contains(&name) {
            continue;
        }
        if name == "br" {
            out.push('\n');
            continue;
        }

        push_visible_text(child, out);
        if BLOCKS.contains(&name) {
            out.push('\n');
        } else if CELLS.contains(&name) && !out.ends_with([' ', '\n']) {
            out.push(' ');
        }
    }
}

fn push_collapsed(text: &str, out: &mut String) {
    for c in text.chars() {
        if !c.is_whitespace() {
            out.push(c);
        } else if !out.is_empty() && !out.ends_with([' ', '\n']) {
            out.push(' ');
        }
    }
}

fn tidy_lines(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        text.push_str(line);
        text.push('\n');
    }
    text
}
