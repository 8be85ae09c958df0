//! Spinners shown while a remote call is pending.

use color_print::cformat;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Spinner {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            bar.set_style(style);
        }
        bar.set_message(message.into());
        bar.enable_steady_tick(Duration::from_millis(100));
        Spinner { bar }
    }

    pub fn succeed(self, message: impl AsRef<str>) {
        self.bar
            .finish_with_message(cformat!("<green>✔</green> {}", message.as_ref()));
    }

    pub fn fail(self, message: impl AsRef<str>) {
        self.bar
            .finish_with_message(cformat!("<red>✖</red> {}", message.as_ref()));
    }

    /// Removes the spinner line, e.g. before showing a prompt.
    pub fn clear(self) {
        self.bar.finish_and_clear();
    }
}
