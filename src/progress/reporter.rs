//! Phase progress reporter
//!
//! Uses an indicatif spinner for the currently running phase and persists
//! a completion line when the phase finishes. Disabled in quiet mode by
//! pointing the spinner at a hidden draw target.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Progress reporter for the sequential diagnostic phases
pub struct PhaseProgress {
    spinner: ProgressBar,
}

impl PhaseProgress {
    /// Create an active progress reporter
    pub fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        Self { spinner }
    }

    /// Create a disabled progress reporter (for quiet mode)
    pub fn disabled() -> Self {
        let reporter = Self::new();
        reporter.spinner.set_draw_target(ProgressDrawTarget::hidden());
        reporter
    }

    /// Announce the phase that is starting
    pub fn begin(&self, what: &str) {
        self.spinner.set_message(what.to_string());
    }

    /// Persist a completion line for the finished phase
    pub fn done(&self, note: &str) {
        self.spinner.println(format!("[ok] {}", note));
    }

    /// Clear the spinner at the end of the run
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl Default for PhaseProgress {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_accepts_updates() {
        let progress = PhaseProgress::disabled();
        progress.begin("probing");
        progress.done("probed");
        progress.finish();
    }
}
