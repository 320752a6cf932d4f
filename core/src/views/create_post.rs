//! Modal form for publishing a new post.
//!
//! The dialog owns only form state. The mutation itself is finished by the
//! owning `UserPostsView`, which holds the post cache the result is merged
//! into.

use thiserror::Error;

use crate::types::NewPost;

/// Client-side form validation failure. Never reaches the network layer.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
}

#[derive(Debug, Clone, Default)]
pub struct CreatePostDialog {
    open: bool,
    submitting: bool,
    title: String,
    body: String,
}

impl CreatePostDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Cancel. Ignored while a submission is in flight.
    pub fn close(&mut self) {
        if !self.submitting {
            self.open = false;
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if !self.submitting {
            self.title = title.into();
        }
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        if !self.submitting {
            self.body = body.into();
        }
    }

    /// Validate and produce the payload. Both fields must be non-blank after
    /// trimming; the payload carries them as typed.
    pub fn validate(&self, user_id: &str) -> Result<NewPost, ValidationError> {
        if self.title.trim().is_empty() || self.body.trim().is_empty() {
            return Err(ValidationError::MissingFields);
        }
        Ok(NewPost {
            title: self.title.clone(),
            body: self.body.clone(),
            user_id: user_id.to_string(),
        })
    }

    pub(crate) fn begin_submit(&mut self) {
        self.submitting = true;
    }

    pub(crate) fn submit_succeeded(&mut self) {
        *self = Self::default();
    }

    pub(crate) fn submit_failed(&mut self) {
        self.submitting = false;
    }
}
