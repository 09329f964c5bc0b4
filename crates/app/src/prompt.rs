//! Confirmation prompts for destructive actions.

use mockall::automock;

/// A yes/no question put to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Short heading.
    pub title: String,

    /// The question itself.
    pub message: String,
}

impl Prompt {
    /// Build a prompt.
    #[must_use]
    pub fn new(title: &str, message: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// The user's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Abort; nothing changes.
    Cancel,

    /// Go ahead.
    Confirm,
}

/// Something that can ask the user to confirm.
#[automock]
pub trait Confirm: Send + Sync {
    /// Ask and wait for an answer.
    fn confirm(&self, prompt: &Prompt) -> Decision;
}

/// Confirms everything; used for `--yes`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &Prompt) -> Decision {
        Decision::Confirm
    }
}
