// Stage progress reporting
//
// Each pipeline stage runs under a spinner status line with a live elapsed
// display. The handle is scoped to the stage: finishing or dropping it
// clears the line, so a spinner cannot outlive the stage it belongs to.

use std::future::Future;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use crate::error::Result;

/// Braille-dot animation frames; the trailing empty string is the final frame
const TICK_FRAMES: &[&str] = &["⢿", "⣻", "⣽", "⣾", "⣷", "⣯", "⣟", "⡿", ""];

/// Redraw interval for the status line
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Scoped spinner handle for one pipeline stage.
pub struct StageProgress {
    bar: ProgressBar,
    started: Instant,
}

impl StageProgress {
    /// Start a spinner labelled with `message`.
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(TICK_FRAMES)
                .template("{msg} {spinner} ({elapsed})")
                .unwrap(),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);

        Self {
            bar,
            started: Instant::now(),
        }
    }

    /// Stop the spinner, clear its line and return the stage duration.
    pub fn finish(self) -> Duration {
        self.bar.finish_and_clear();
        self.started.elapsed()
    }
}

impl Drop for StageProgress {
    fn drop(&mut self) {
        // Covers early returns and unwinds
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

/// Run one pipeline stage under a spinner and log its elapsed time.
pub async fn run_stage<T>(label: &str, stage: impl Future<Output = Result<T>>) -> Result<T> {
    let progress = StageProgress::start(label);
    let result = stage.await;
    let elapsed = progress.finish();

    if result.is_ok() {
        info!("{} completed in {:.1}s", label, elapsed.as_secs_f64());
    }

    result
}
