//! Interactive questions
//!
//! Every stage that needs the user (credentials, environment settings,
//! snapshot selection) goes through [`Prompter`] so tests can script the
//! answers.

use inquire::{Confirm, InquireError, Password, Select, Text};

use crate::error::{Result, WpenvError};

pub trait Prompter {
    /// Free-form answer; `default` is returned on an empty answer
    fn text(&self, message: &str, default: Option<&str>) -> Result<String>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool>;

    /// Hidden input, no confirmation
    fn password(&self, message: &str) -> Result<String>;

    /// Index of the chosen option
    fn select(&self, message: &str, options: &[String]) -> Result<usize>;
}

/// Terminal prompts backed by `inquire`
#[derive(Debug, Default, Clone, Copy)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn text(&self, message: &str, default: Option<&str>) -> Result<String> {
        let mut question = Text::new(message);
        if let Some(default) = default {
            question = question.with_default(default);
        }
        question.prompt().map_err(|e| prompt_error(e, message))
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool> {
        Confirm::new(message)
            .with_default(default)
            .prompt()
            .map_err(|e| prompt_error(e, message))
    }

    fn password(&self, message: &str) -> Result<String> {
        Password::new(message)
            .without_confirmation()
            .prompt()
            .map_err(|e| prompt_error(e, message))
    }

    fn select(&self, message: &str, options: &[String]) -> Result<usize> {
        Select::new(message, options.to_vec())
            .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
            .raw_prompt()
            .map(|choice| choice.index)
            .map_err(|e| prompt_error(e, message))
    }
}

/// Keep the question in the cancellation so the user sees where they stopped
fn prompt_error(err: InquireError, message: &str) -> WpenvError {
    match WpenvError::from(err) {
        WpenvError::Cancelled { .. } => WpenvError::Cancelled {
            operation: message.trim_end_matches('?').to_string(),
        },
        other => other,
    }
}
