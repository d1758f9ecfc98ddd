// src/error.rs
// =============================================================================
// Error types shared by every stage of the harvest.
//
// Only two kinds of failure stop a run:
// - the environment is unusable (no home directory, output root not creatable)
// - the conference index page cannot be fetched
//
// Everything else is caught at the task that produced it, logged, and the
// affected conference / session / talk is left out of the output tree.
// Missing optional text (talk title, author) is not an error at all; it is
// replaced by the "unknown" sentinel where it is extracted.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    /// No output root was given and the home directory could not be found
    #[error("unable to determine the home directory for the default output root")]
    Environment,

    /// A directory could not be created
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Transport-level failure (DNS, connect, timeout, body read)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Markup the page is known to need is missing entirely
    #[error("page {url} has no {missing}; the page layout may have changed")]
    Structure { url: String, missing: &'static str },

    /// The conference URL does not end in /<year>/<month>
    #[error("cannot derive year and month from {url}")]
    PathDecode { url: String },

    /// A talk file could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A spawned task panicked or was cancelled before reporting
    #[error("task for {context} did not complete: {reason}")]
    Task { context: String, reason: String },
}

impl HarvestError {
    pub fn request(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Request {
            url: url.into(),
            source,
        }
    }

    pub fn structure(url: impl Into<String>, missing: &'static str) -> Self {
        Self::Structure {
            url: url.into(),
            missing,
        }
    }

    /// True for failures that mean the page shape changed, as opposed to a
    /// network or filesystem problem.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structure { .. })
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
