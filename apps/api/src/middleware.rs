use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use companyrating_core::{AppError, MutationAccess};
use tower_sessions::Session;
use url::form_urlencoded;

use crate::auth::session_identity;
use crate::error::ApiResult;

/// Pages served from the public directory only to an authenticated admin.
const ADMIN_PAGES: [&str; 2] = ["/admin.html", "/add.html"];

/// Rejects the request unless an admin session exists; exposes the identity as an extension.
pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session_identity(&session)
        .await?
        .ok_or_else(|| AppError::Unauthorized("auth required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Attaches the caller's [`MutationAccess`] so services can enforce it.
pub async fn resolve_mutation_access(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session_identity(&session).await?;

    request
        .extensions_mut()
        .insert(MutationAccess::from_identity(identity.as_ref()));
    Ok(next.run(request).await)
}

/// Redirects anonymous visitors of admin pages to the login page.
pub async fn gate_admin_pages(session: Session, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !ADMIN_PAGES.contains(&path.as_str()) {
        return next.run(request).await;
    }

    match session_identity(&session).await {
        Ok(Some(_)) => next.run(request).await,
        Ok(None) => Redirect::to(&login_location(&path)).into_response(),
        Err(error) => crate::error::ApiError(error).into_response(),
    }
}

fn login_location(next: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("next", next)
        .finish();
    format!("/login.html?{query}")
}
