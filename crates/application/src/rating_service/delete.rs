use companyrating_core::{AppResult, MutationAccess};
use tracing::info;

use crate::rating_ports::{DeleteRatingsOutcome, DeleteRatingsRequest};

use super::*;

impl RatingService {
    /// Deletes one (name, subcompany) pair or cascades over every subcompany of a name.
    ///
    /// Both comparisons ignore case and must match the whole stored value. A single-pair
    /// delete removes at most one record.
    pub async fn delete_ratings(
        &self,
        access: MutationAccess,
        request: DeleteRatingsRequest,
    ) -> AppResult<DeleteRatingsOutcome> {
        access.require()?;

        if request.name().trim().is_empty() {
            return Err(AppError::Validation("name is required".to_owned()));
        }

        let deleted_count = match &request {
            DeleteRatingsRequest::Single { name, subcompany } => {
                self.repository
                    .delete_one_by_name_and_subcompany_ignoring_case(name, subcompany)
                    .await
            }
            DeleteRatingsRequest::Cascade { name } => {
                self.repository.delete_by_name_ignoring_case(name).await
            }
        }
        .inspect_err(|error| log_store_failure("delete", error))?;

        if deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "no ratings matched '{}'",
                request.name()
            )));
        }

        info!(
            name = request.name(),
            cascade = matches!(request, DeleteRatingsRequest::Cascade { .. }),
            deleted_count,
            "deleted ratings"
        );

        Ok(DeleteRatingsOutcome { deleted_count })
    }
}
