// src/naming.rs
// =============================================================================
// Turns titles and conference URLs into path segments.
//
// Output layout:
//   <root>/<year>/<month>/<session-title>/<talk-title>.txt
//
// Every function here is pure: same input, same output, no I/O.
// =============================================================================

use url::Url;

use crate::error::{HarvestError, Result};

/// Used when a title sanitizes down to nothing
pub const UNTITLED: &str = "untitled";

/// Maps free text to a lowercase, dash-separated path segment.
///
/// Anything outside `[A-Za-z0-9 ]` becomes a space, runs of spaces become a
/// single dash, and leading/trailing dashes are dropped.
///
/// Example:
///   "Elder Jeffrey R. Holland" -> "elder-jeffrey-r-holland"
pub fn sanitize(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .to_ascii_lowercase()
}

/// Like `sanitize`, but never returns an empty segment
pub fn path_segment(title: &str) -> String {
    let segment = sanitize(title);
    if segment.is_empty() {
        UNTITLED.to_string()
    } else {
        segment
    }
}

/// Takes the last two path segments of a conference URL as (year, month).
///
/// No check is made that they look like dates; success only means two
/// segments were there to take.
pub fn derive_year_month(url: &str) -> Result<(String, String)> {
    let not_decomposable = || HarvestError::PathDecode {
        url: url.to_string(),
    };

    let parsed = Url::parse(url).map_err(|_| not_decomposable())?;
    let segments: Vec<&str> = parsed
        .path_segments()
        .ok_or_else(not_decomposable)?
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [.., year, month] => Ok((year.to_string(), month.to_string())),
        _ => Err(not_decomposable()),
    }
}
