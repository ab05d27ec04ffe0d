//! Company rating API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;
mod visibility;

use axum::Router;
use companyrating_core::AppError;
use tracing::info;

use crate::api_config::{ApiConfig, StoreBackend, init_tracing};
use crate::api_router::{StaticDirs, build_router};
use crate::api_services::{
    build_app_state, build_memory_session_layer, build_postgres_session_layer,
    connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;
    let static_dirs = StaticDirs {
        public_dir: config.public_dir.as_path(),
        upload_dir: config.upload_dir.as_path(),
    };

    let app: Router = match &config.store_backend {
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = connect_and_migrate(database_url, *max_connections).await?;
            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            let session_layer =
                build_postgres_session_layer(pool.clone(), config.cookie_secure).await?;
            let app_state = build_app_state(Some(pool), &config)?;
            build_router(
                app_state,
                config.frontend_url.as_deref(),
                static_dirs,
                session_layer,
            )?
        }
        StoreBackend::Memory => {
            info!("using in-memory rating store; records are lost on restart");
            let app_state = build_app_state(None, &config)?;
            build_router(
                app_state,
                config.frontend_url.as_deref(),
                static_dirs,
                build_memory_session_layer(config.cookie_secure),
            )?
        }
    };

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "companyrating-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
