//! Render-agnostic screen controllers.
//!
//! Each controller starts in [`PageState::Loading`], awaits its facade calls
//! and ends in `Ready` or `Missing`. Failures are logged and queued as
//! [`Notification`]s for the shell to display.

mod analyzer;
mod clinician_home;
mod generator;
mod login;
mod patient_detail;
mod patient_home;
mod task_player;

pub use analyzer::*;
pub use clinician_home::*;
pub use generator::*;
pub use login::*;
pub use patient_detail::*;
pub use patient_home::*;
pub use task_player::*;

use thiserror::Error;

use crate::api::ApiError;
use crate::session::SessionError;
use crate::store::StoreError;

/// Screen errors.
#[derive(Error, Debug)]
pub enum PageError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub type PageResult<T> = Result<T, PageError>;

/// Load state of a screen.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Ready(T),
    /// A required record does not exist
    Missing,
}

impl<T> Default for PageState<T> {
    fn default() -> Self {
        PageState::Loading
    }
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, PageState::Missing)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(view) => Some(view),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            PageState::Ready(view) => Some(view),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }
}

/// Notifications raised by a screen and not yet shown.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notifications {
    pending: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.pending.push(notification);
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.pending.last()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return everything queued, oldest first.
    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}
