//! Interactive prompts.
//!
//! Handlers talk to the terminal through [`Prompter`] so they can run under
//! tests with scripted answers. [`InquirePrompter`] is the terminal implementation.

use inquire::{Confirm, InquireError, MultiSelect, Text};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("the prompt was cancelled")]
    Cancelled,
    #[error("prompt failed: {0}")]
    Failed(String),
}

impl From<InquireError> for PromptError {
    fn from(error: InquireError) -> Self {
        match error {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Cancelled
            }
            other => PromptError::Failed(other.to_string()),
        }
    }
}

pub trait Prompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError>;

    fn text(&mut self, message: &str, help: Option<&str>) -> Result<String, PromptError>;

    /// Returns the indexes of the chosen options.
    fn multi_select(&mut self, message: &str, options: &[String]) -> Result<Vec<usize>, PromptError>;
}

#[derive(Debug, Default)]
pub struct InquirePrompter;

impl Prompter for InquirePrompter {
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        Ok(Confirm::new(message).with_default(default).prompt()?)
    }

    fn text(&mut self, message: &str, help: Option<&str>) -> Result<String, PromptError> {
        let mut prompt = Text::new(message);
        if let Some(help) = help {
            prompt = prompt.with_help_message(help);
        }
        Ok(prompt.prompt()?)
    }

    fn multi_select(&mut self, message: &str, options: &[String]) -> Result<Vec<usize>, PromptError> {
        let selected = MultiSelect::new(message, options.to_vec())
            .with_help_message("Space to toggle, enter to confirm")
            .raw_prompt()?;
        Ok(selected.into_iter().map(|option| option.index).collect())
    }
}
