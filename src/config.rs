// src/config.rs
// =============================================================================
// Run configuration.
//
// There is no config file: everything comes from command-line flags (see
// cli.rs) and ends up in a HarvestConfig that the Harvester owns.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{HarvestError, Result};

pub const DEFAULT_SITE: &str = "https://www.churchofjesuschrist.org";
pub const DEFAULT_LANGUAGE: &str = "eng";
/// Index links containing this path fragment are conferences
pub const CONFERENCE_MARKER: &str = "/general-conference/";
/// Directory under $HOME used when no output root is given
pub const DEFAULT_OUTPUT_DIR: &str = "conferences";

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Site origin, e.g. https://www.churchofjesuschrist.org
    pub site: Url,
    /// Locale code passed as ?lang= on the index page
    pub language: String,
    pub output_root: PathBuf,
    /// Talk fetches allowed in flight across the whole run
    pub talk_concurrency: usize,
    /// Conferences materialized at the same time
    pub conference_concurrency: usize,
    pub request_timeout: Duration,
}

impl HarvestConfig {
    pub fn new(site: Url, output_root: PathBuf) -> Self {
        Self {
            site,
            language: DEFAULT_LANGUAGE.to_string(),
            output_root,
            talk_concurrency: 16,
            conference_concurrency: 2,
            request_timeout: Duration::from_secs(30),
        }
    }

    /// `<site>/general-conference/conferences?lang=<language>`
    pub fn index_url(&self) -> Url {
        let mut url = self.site.clone();
        url.set_path("/general-conference/conferences");
        url.query_pairs_mut()
            .clear()
            .append_pair("lang", &self.language);
        url
    }
}

/// Uses `explicit` when given, otherwise `$HOME/conferences`
pub fn resolve_output_root(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => dirs::home_dir()
            .map(|home| home.join(DEFAULT_OUTPUT_DIR))
            .ok_or(HarvestError::Environment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_url_carries_language() {
        let mut config = HarvestConfig::new(
            Url::parse(DEFAULT_SITE).unwrap(),
            PathBuf::from("/tmp/out"),
        );
        assert_eq!(
            config.index_url().as_str(),
            "https://www.churchofjesuschrist.org/general-conference/conferences?lang=eng"
        );

        config.language = "spa".to_string();
        assert!(config.index_url().as_str().ends_with("?lang=spa"));
    }

    #[test]
    fn test_index_url_replaces_site_path() {
        let config = HarvestConfig::new(
            Url::parse("http://127.0.0.1:8080/some/path?x=1").unwrap(),
            PathBuf::from("out"),
        );
        assert_eq!(
            config.index_url().as_str(),
            "http://127.0.0.1:8080/general-conference/conferences?lang=eng"
        );
    }

    #[test]
    fn test_explicit_output_root_wins() {
        let root = resolve_output_root(Some(PathBuf::from("/data/talks"))).unwrap();
        assert_eq!(root, PathBuf::from("/data/talks"));
    }
}
