use companyrating_core::AppResult;
use companyrating_domain::{RatingKey, RatingRecord};

use crate::rating_ports::RatingListQuery;

use super::*;

impl RatingService {
    /// Lists records for a clamped, allow-listed query.
    pub async fn list_ratings(&self, query: RatingListQuery) -> AppResult<Vec<RatingRecord>> {
        self.repository
            .find(&query)
            .await
            .inspect_err(|error| log_store_failure("list", error))
    }

    /// Returns one record by its exact composite key.
    pub async fn get_rating(&self, name: &str, subcompany: &str) -> AppResult<RatingRecord> {
        if name.is_empty() || subcompany.is_empty() {
            return Err(AppError::Validation(
                "name and subcompany are required".to_owned(),
            ));
        }

        let key = RatingKey::new(name, subcompany)?;
        self.repository
            .find_one(&key)
            .await
            .inspect_err(|error| log_store_failure("get", error))?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "rating for '{}' / '{}' does not exist",
                    key.name(),
                    key.subcompany()
                ))
            })
    }
}
