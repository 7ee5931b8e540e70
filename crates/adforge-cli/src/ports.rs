//! Terminal implementations of the export ports.

use std::io::{self, BufRead, Write};

use adforge_output::{ConfirmPort, NotifyPort};
use indicatif::{ProgressBar, ProgressStyle};

const BAR_TEMPLATE: &str = "{spinner} {msg} [{bar:30}] {pos}/{len}";

/// Asks on stderr and reads the answer from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm {
    assume_yes: bool,
}

impl TerminalConfirm {
    /// With `assume_yes` every prompt is accepted without asking.
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl ConfirmPort for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            tracing::info!("Confirmed without prompting: {message}");
            return true;
        }
        eprint!("{message} [y/N] ");
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => parse_answer(&answer),
            Err(e) => {
                tracing::warn!("Could not read confirmation: {e}");
                false
            }
        }
    }
}

/// Only an explicit yes counts.
pub fn parse_answer(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Progress bar on stderr, messages on stdout.
///
/// The bar stays undrawn until the first progress update, so it never
/// interleaves with a confirmation prompt.
pub struct ProgressNotifier {
    bar: ProgressBar,
    label: String,
}

impl ProgressNotifier {
    pub fn new(label: &str) -> Self {
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        Self {
            bar: ProgressBar::new(0).with_style(style),
            label: label.to_string(),
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl NotifyPort for ProgressNotifier {
    fn notify(&self, message: &str) {
        self.bar.suspend(|| println!("{message}"));
    }

    fn progress(&self, done: u64, total: u64) {
        if self.bar.length() != Some(total) {
            self.bar.set_length(total);
            self.bar.set_message(self.label.clone());
        }
        self.bar.set_position(done);
    }
}
