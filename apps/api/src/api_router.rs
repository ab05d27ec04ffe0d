use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use companyrating_core::AppError;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::handlers::upload::MAX_VIDEO_BYTES;
use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

#[cfg(test)]
mod tests;

/// Filesystem roots served alongside the API.
#[derive(Debug, Clone, Copy)]
pub struct StaticDirs<'a> {
    pub public_dir: &'a Path,
    pub upload_dir: &'a Path,
}

pub fn build_router<Store>(
    app_state: AppState,
    frontend_url: Option<&str>,
    static_dirs: StaticDirs<'_>,
    session_layer: SessionManagerLayer<Store>,
) -> Result<Router, AppError>
where
    Store: SessionStore + Clone,
{
    let session_routes = Router::new()
        .route(
            "/api/update",
            post(handlers::ratings::upsert_rating_handler),
        )
        .route(
            "/api/delete",
            post(handlers::ratings::delete_ratings_handler),
        )
        .route(
            "/api/ratings-visibility",
            get(handlers::visibility::get_visibility_handler)
                .put(handlers::visibility::set_visibility_handler),
        )
        .route_layer(from_fn(middleware::resolve_mutation_access));

    let admin_routes = Router::new()
        .route(
            "/api/upload-video",
            post(handlers::upload::upload_video_handler)
                .layer(DefaultBodyLimit::max(MAX_VIDEO_BYTES)),
        )
        .route_layer(from_fn(middleware::require_auth));

    let router = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/companies",
            get(handlers::ratings::list_ratings_handler),
        )
        .route("/api/company", get(handlers::ratings::get_rating_handler))
        .route("/api/login", post(auth::login_handler))
        .route("/api/logout", post(auth::logout_handler))
        .route("/api/me", get(auth::me_handler))
        .route(
            "/ws",
            get(handlers::visibility::visibility_socket_handler),
        )
        .merge(session_routes)
        .merge(admin_routes)
        .nest_service("/uploads", ServeDir::new(static_dirs.upload_dir))
        .fallback_service(ServeDir::new(static_dirs.public_dir))
        .layer(from_fn(middleware::gate_admin_pages))
        .layer(TraceLayer::new_for_http());

    let router = match frontend_url {
        Some(frontend_url) => router.layer(cors::build_cors_layer(frontend_url)?),
        None => router,
    };

    Ok(router.layer(session_layer).with_state(app_state))
}
