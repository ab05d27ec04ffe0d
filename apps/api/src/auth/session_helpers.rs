use companyrating_core::{AdminIdentity, AppError};
use tower_sessions::Session;

use super::SESSION_ADMIN_KEY;

/// Reads the admin identity stored by a successful login, if any.
pub async fn session_identity(session: &Session) -> Result<Option<AdminIdentity>, AppError> {
    session
        .get::<AdminIdentity>(SESSION_ADMIN_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))
}
