//! Progress indicators for long-running operations

use indicatif::{ProgressBar as IndicatifProgressBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// Spinner shown while an indeterminate operation runs.
///
/// Cleared when dropped. Hidden when stderr is not a terminal.
pub struct Spinner {
    inner: IndicatifProgressBar,
}

impl Spinner {
    pub fn new(message: &str) -> Self {
        let pb = IndicatifProgressBar::new_spinner();
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            IndicatifStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| IndicatifStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        Self { inner: pb }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.inner.finish_and_clear();
    }
}
