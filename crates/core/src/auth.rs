use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult};

/// Admin information persisted in the authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    username: String,
}

impl AdminIdentity {
    /// Creates an admin identity for an authenticated username.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    /// Returns the authenticated username.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }
}

/// Pre-authenticated signal telling a service whether the caller may mutate data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationAccess {
    /// Caller holds an authenticated admin session.
    Granted,
    /// Caller is anonymous.
    Denied,
}

impl MutationAccess {
    /// Derives access from an optional session identity.
    #[must_use]
    pub fn from_identity(identity: Option<&AdminIdentity>) -> Self {
        match identity {
            Some(_) => Self::Granted,
            None => Self::Denied,
        }
    }

    /// Returns whether mutation is permitted.
    #[must_use]
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }

    /// Fails with [`AppError::Unauthorized`] unless access was granted.
    pub fn require(self) -> AppResult<()> {
        if self.is_granted() {
            return Ok(());
        }

        Err(AppError::Unauthorized("auth required".to_owned()))
    }
}
