use std::sync::Arc;

use companyrating_core::AppError;
use tracing::error;

use crate::rating_ports::RatingRepository;

mod delete;
mod read;
mod upsert;


/// Application service for listing, reading, upserting and deleting rating records.
#[derive(Clone)]
pub struct RatingService {
    repository: Arc<dyn RatingRepository>,
}

impl RatingService {
    /// Creates a new rating service.
    #[must_use]
    pub fn new(repository: Arc<dyn RatingRepository>) -> Self {
        Self { repository }
    }
}

fn log_store_failure(operation: &'static str, error: &AppError) {
    if matches!(error, AppError::Unavailable(_) | AppError::Internal(_)) {
        error!(operation, error = %error, "rating store operation failed");
    }
}
