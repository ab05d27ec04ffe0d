//! Administrator authentication for the single configured operator account.
//!
//! The configured password is hashed once at startup; login attempts are
//! verified against that hash and report failures generically.

use std::sync::Arc;

use companyrating_core::{AdminIdentity, AppError, AppResult};
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Password hashing port. Implementations live in infrastructure.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password using Argon2id.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    /// Must run in constant time regardless of validity.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Authentication outcome
// ---------------------------------------------------------------------------

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Credentials matched. A session can be established.
    Authenticated(AdminIdentity),
    /// Unknown username or wrong password.
    Failed,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Verifies administrator credentials.
#[derive(Clone)]
pub struct AdminAuthService {
    username: String,
    password_hash: String,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AdminAuthService {
    /// Creates the service, hashing the configured password.
    pub fn new(
        username: impl Into<String>,
        password: &str,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> AppResult<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(AppError::Validation(
                "admin username must not be empty".to_owned(),
            ));
        }
        if password.is_empty() {
            return Err(AppError::Validation(
                "admin password must not be empty".to_owned(),
            ));
        }

        let password_hash = password_hasher.hash_password(password)?;

        Ok(Self {
            username,
            password_hash,
            password_hasher,
        })
    }

    /// Authenticates a login attempt.
    ///
    /// Returns `AuthOutcome::Failed` for an unknown username and a wrong
    /// password alike.
    pub fn login(&self, username: &str, password: &str) -> AppResult<AuthOutcome> {
        if username != self.username {
            // Hash anyway so unknown usernames cost the same as wrong passwords.
            let _ = self.password_hasher.hash_password(password);
            warn!("admin login rejected");
            return Ok(AuthOutcome::Failed);
        }

        if !self
            .password_hasher
            .verify_password(password, &self.password_hash)?
        {
            warn!("admin login rejected");
            return Ok(AuthOutcome::Failed);
        }

        info!(username = %self.username, "admin logged in");
        Ok(AuthOutcome::Authenticated(AdminIdentity::new(
            self.username.clone(),
        )))
    }
}
