// src/progress.rs
// =============================================================================
// Progress reporting.
//
// The harvester is handed a `Progress` and calls it at fixed points:
// - once per conference stub when its discovery finishes (either way)
// - once with the total number of talks before downloads start
// - once per talk when it is written or fails
// - with a count when talks are skipped without being attempted
//
// BarProgress draws an indicatif bar; SilentProgress is for --no-progress,
// JSON output and tests.
// =============================================================================

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::archive::TalkOutcome;
use crate::scout::Discovery;

pub trait Progress: Send + Sync {
    fn conference_discovered(&self, _outcome: &Discovery) {}

    fn talks_planned(&self, _total: usize) {}

    fn talk_finished(&self, _outcome: &TalkOutcome) {}

    /// Talks that will never be attempted because their conference or
    /// session directory is unusable
    fn talks_skipped(&self, _count: usize) {}

    /// Called once at the end of the run
    fn finish(&self) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgress;

impl Progress for SilentProgress {}

/// Spinner while discovering, then a bar over every talk
pub struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("Gathering conferences...");
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }
}

impl Default for BarProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for BarProgress {
    fn conference_discovered(&self, outcome: &Discovery) {
        self.bar
            .set_message(format!("Scouted {}", outcome.title()));
    }

    fn talks_planned(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_style(
            ProgressStyle::with_template("{bar:60} {pos}/{len} talks ({eta}) {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        self.bar.set_message("");
    }

    fn talk_finished(&self, outcome: &TalkOutcome) {
        self.bar.set_message(outcome.title.clone());
        self.bar.inc(1);
    }

    fn talks_skipped(&self, count: usize) {
        self.bar.inc(count as u64);
    }

    fn finish(&self) {
        self.bar.finish_with_message("done");
    }
}
