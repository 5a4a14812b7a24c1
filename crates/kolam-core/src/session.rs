//! The signed-in user, passed explicitly to screens.

use thiserror::Error;
use tracing::info;

use crate::models::{AuthUser, UserRole};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Requires {required} role, signed in as {actual}")]
    Forbidden {
        required: &'static str,
        actual: &'static str,
    },
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Holds at most one user. Not persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    user: Option<AuthUser>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, user: AuthUser) {
        info!(user_id = %user.id, role = user.role.as_str(), "Session started");
        self.user = Some(user);
    }

    /// Clear the user. Returns the user that was signed in, if any.
    pub fn logout(&mut self) -> Option<AuthUser> {
        let previous = self.user.take();
        if let Some(user) = &previous {
            info!(user_id = %user.id, "Session ended");
        }
        previous
    }

    pub fn user(&self) -> Option<&AuthUser> {
        self.user.as_ref()
    }

    pub fn role(&self) -> Option<UserRole> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn require_user(&self) -> SessionResult<&AuthUser> {
        self.user.as_ref().ok_or(SessionError::NotAuthenticated)
    }

    pub fn require_role(&self, role: UserRole) -> SessionResult<&AuthUser> {
        let user = self.require_user()?;
        if user.role == role {
            Ok(user)
        } else {
            Err(SessionError::Forbidden {
                required: role.as_str(),
                actual: user.role.as_str(),
            })
        }
    }
}
