// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Every flag has a default, so running the binary with no arguments harvests
// the English index into ~/conferences.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::config::{self, HarvestConfig, DEFAULT_LANGUAGE, DEFAULT_SITE};
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(
    name = "conference-harvest",
    version,
    about = "Download every General Conference talk as a plain text file",
    long_about = "conference-harvest reads the General Conference index, discovers every \
                  conference, session and talk, and writes each talk's text to \
                  <output>/<year>/<month>/<session>/<talk>.txt"
)]
pub struct Cli {
    /// Directory to write talks into [default: ~/conferences]
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Language code for the index page (e.g. eng, spa, por)
    #[arg(long, default_value = DEFAULT_LANGUAGE)]
    pub lang: String,

    /// Site to crawl
    #[arg(long, default_value = DEFAULT_SITE)]
    pub site: Url,

    /// Maximum number of talk pages fetched at the same time
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
    pub talk_concurrency: u16,

    /// Number of conferences written at the same time
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u16).range(1..))]
    pub conference_concurrency: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default log level when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Resolves the output root (home directory lookup may fail) and builds
    /// the run configuration
    pub fn to_config(&self) -> Result<HarvestConfig> {
        let output_root = config::resolve_output_root(self.output.clone())?;
        let mut config = HarvestConfig::new(self.site.clone(), output_root);
        config.language = self.lang.clone();
        config.talk_concurrency = usize::from(self.talk_concurrency);
        config.conference_concurrency = usize::from(self.conference_concurrency);
        config.request_timeout = Duration::from_secs(self.timeout);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["conference-harvest", "--output", "/tmp/talks"]).unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.output_root, PathBuf::from("/tmp/talks"));
        assert_eq!(config.language, "eng");
        assert_eq!(config.talk_concurrency, 16);
        assert_eq!(config.conference_concurrency, 2);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "conference-harvest",
            "-o",
            "out",
            "--lang",
            "spa",
            "--site",
            "http://localhost:9000",
            "--talk-concurrency",
            "4",
            "-vv",
            "--json",
        ])
        .unwrap();
        let config = cli.to_config().unwrap();
        assert_eq!(config.language, "spa");
        assert_eq!(config.talk_concurrency, 4);
        assert_eq!(
            config.index_url().as_str(),
            "http://localhost:9000/general-conference/conferences?lang=spa"
        );
        assert!(cli.json);
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(Cli::try_parse_from(["conference-harvest", "--talk-concurrency", "0"]).is_err());
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["conference-harvest", "-q", "-v"]).is_err());
    }
}
