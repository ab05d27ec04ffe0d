use std::sync::Arc;

use companyrating_application::{AdminAuthService, RatingRepository, RatingService};
use companyrating_core::AppError;
use companyrating_infrastructure::{
    Argon2PasswordHasher, InMemoryRatingRepository, PostgresRatingRepository,
};
use sqlx::PgPool;

use crate::api_config::ApiConfig;
use crate::state::{AppState, UploadSettings};
use crate::visibility::RatingsVisibility;

/// Wires services for the configured backend. `pool` is `None` for the in-memory store.
pub fn build_app_state(pool: Option<PgPool>, config: &ApiConfig) -> Result<AppState, AppError> {
    let repository: Arc<dyn RatingRepository> = match pool.clone() {
        Some(pool) => Arc::new(PostgresRatingRepository::new(pool)),
        None => Arc::new(InMemoryRatingRepository::new()),
    };

    let admin_auth_service = AdminAuthService::new(
        config.admin_user.clone(),
        config.admin_password.as_str(),
        Arc::new(Argon2PasswordHasher::new()),
    )?;

    Ok(AppState {
        rating_service: RatingService::new(repository),
        admin_auth_service,
        visibility: RatingsVisibility::new(),
        uploads: UploadSettings::new(config.upload_dir.clone()),
        postgres_pool: pool,
    })
}
