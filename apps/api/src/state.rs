use std::path::{Path, PathBuf};
use std::sync::Arc;

use companyrating_application::{AdminAuthService, RatingService};
use sqlx::PgPool;

use crate::visibility::RatingsVisibility;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub rating_service: RatingService,
    pub admin_auth_service: AdminAuthService,
    pub visibility: RatingsVisibility,
    pub uploads: UploadSettings,
    pub postgres_pool: Option<PgPool>,
}

/// Destination for uploaded videos.
#[derive(Debug, Clone)]
pub struct UploadSettings {
    directory: Arc<PathBuf>,
}

impl UploadSettings {
    pub fn new(directory: PathBuf) -> Self {
        Self {
            directory: Arc::new(directory),
        }
    }

    pub fn directory(&self) -> &Path {
        self.directory.as_path()
    }
}
