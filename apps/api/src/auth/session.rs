use axum::Json;
use axum::extract::State;
use companyrating_application::AuthOutcome;
use companyrating_core::AppError;
use tower_sessions::Session;

use crate::dto::{AdminUserResponse, LoginRequest, LoginResponse, SessionResponse, SuccessResponse};
use crate::error::ApiResult;
use crate::state::AppState;

use super::SESSION_ADMIN_KEY;
use super::session_helpers::session_identity;

/// POST /api/login - Start an admin session.
pub async fn login_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let outcome = state
        .admin_auth_service
        .login(payload.username.as_str(), payload.password.as_str())?;

    let AuthOutcome::Authenticated(identity) = outcome else {
        return Err(AppError::Unauthorized("invalid credentials".to_owned()).into());
    };

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_ADMIN_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    Ok(Json(LoginResponse {
        success: true,
        user: AdminUserResponse::from(&identity),
    }))
}

/// POST /api/logout - End the current session.
pub async fn logout_handler(session: Session) -> ApiResult<Json<SuccessResponse>> {
    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/me - Report whether the caller holds an admin session.
pub async fn me_handler(session: Session) -> ApiResult<Json<SessionResponse>> {
    let identity = session_identity(&session).await?;

    Ok(Json(SessionResponse {
        authenticated: identity.is_some(),
        user: identity.as_ref().map(AdminUserResponse::from),
    }))
}
