//! New-todo input field.

use crate::error::StoreError;
use crate::store::TodoStore;
use crate::transport::Transport;

/// True when `text`, once trimmed, has at least one ASCII letter or digit.
pub fn is_valid_body(text: &str) -> bool {
    text.trim().chars().any(|c| c.is_ascii_alphanumeric())
}

/// What happened when the user pressed submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Submit was disabled; nothing was sent.
    Ignored,
    /// A create request was sent with this outcome.
    Sent(Result<(), StoreError>),
}

#[derive(Debug, Clone, Default)]
pub struct TodoInput {
    text: String,
}

impl TodoInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn can_submit(&self) -> bool {
        is_valid_body(&self.text)
    }

    /// Create a todo from the trimmed text. The field is cleared whether or
    /// not the request succeeds.
    pub async fn submit<T: Transport>(&mut self, store: &TodoStore<T>) -> Submission {
        if !self.can_submit() {
            return Submission::Ignored;
        }
        let outcome = store.create(self.text.trim(), false).await;
        self.text.clear();
        Submission::Sent(outcome)
    }
}
