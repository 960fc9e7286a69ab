//! Terminal presentation
//!
//! This module handles:
//! - Stage progress for the clone pipeline (spinners on stderr)
//! - Keeping spinners out of the way while a question is on screen
//! - The boxed success summary ([`display`])
//!
//! The pipeline reports progress through the [`ProgressReporter`] trait;
//! [`SilentProgressReporter`] is used when stderr is not a terminal.

pub mod display;

use std::cell::RefCell;
use std::time::Duration;

use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

use crate::error::Result;
use crate::pipeline::Stage;
use crate::prompt::Prompter;

const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "✔"];

/// Receives stage progress from the pipeline
pub trait ProgressReporter {
    fn stage_started(&self, stage: Stage);

    fn stage_finished(&self, stage: Stage);

    fn stage_failed(&self, stage: Stage);
}

/// One spinner per running stage
///
/// Interactive stages get no spinner; their questions are the progress.
#[derive(Default)]
pub struct SpinnerReporter {
    multi: MultiProgress,
    current: RefCell<Option<ProgressBar>>,
}

impl SpinnerReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle used by [`SuspendingPrompter`] to hide spinners during prompts
    pub fn multi(&self) -> MultiProgress {
        self.multi.clone()
    }

    fn spinner(&self, message: &'static str) -> ProgressBar {
        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(SPINNER_TICKS);

        let bar = self.multi.add(ProgressBar::new_spinner());
        bar.set_style(spinner_style);
        bar.set_message(message);
        bar.enable_steady_tick(Duration::from_millis(100));
        bar
    }
}

impl ProgressReporter for SpinnerReporter {
    fn stage_started(&self, stage: Stage) {
        if stage == Stage::Provision {
            return;
        }
        let bar = self.spinner(stage.label());
        if let Some(previous) = self.current.replace(Some(bar)) {
            previous.finish_and_clear();
        }
    }

    fn stage_finished(&self, stage: Stage) {
        match self.current.take() {
            Some(bar) => bar.finish_with_message(stage.done_label()),
            None => {
                let _ = self
                    .multi
                    .println(format!("{} {}", style("✔").green(), stage.done_label()));
            }
        }
    }

    fn stage_failed(&self, stage: Stage) {
        if let Some(bar) = self.current.take() {
            bar.abandon_with_message(format!("{} {}", style("✖").red(), stage.label()));
        }
    }
}

/// No-op reporter for runs without a terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgressReporter;

impl ProgressReporter for SilentProgressReporter {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage) {}

    fn stage_failed(&self, _stage: Stage) {}
}

/// Prompter that hides running spinners while a question is asked
pub struct SuspendingPrompter<'a> {
    inner: &'a dyn Prompter,
    multi: MultiProgress,
}

impl<'a> SuspendingPrompter<'a> {
    pub fn new(inner: &'a dyn Prompter, multi: MultiProgress) -> Self {
        Self { inner, multi }
    }
}

impl Prompter for SuspendingPrompter<'_> {
    fn text(&self, message: &str, default: Option<&str>) -> Result<String> {
        self.multi.suspend(|| self.inner.text(message, default))
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        self.multi.suspend(|| self.inner.confirm(message, default))
    }

    fn password(&self, message: &str) -> Result<String> {
        self.multi.suspend(|| self.inner.password(message))
    }

    fn select(&self, message: &str, options: &[String]) -> Result<usize> {
        self.multi.suspend(|| self.inner.select(message, options))
    }
}
