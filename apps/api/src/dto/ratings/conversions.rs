use companyrating_application::{
    DeleteRatingsRequest, OriginalKey, RatingFieldsInput, RatingListQuery, UpsertRatingRequest,
};
use companyrating_core::AppResult;
use companyrating_domain::RatingRecord;

use super::types::{DeleteRatingsPayload, RatingListParams, RatingResponse, UpsertRatingPayload};
use crate::dto::common::coerce_text;

impl From<RatingRecord> for RatingResponse {
    fn from(value: RatingRecord) -> Self {
        Self {
            record_id: value.record_id().to_string(),
            name: value.name().to_owned(),
            subcompany: value.subcompany().to_owned(),
            rating: value.rating().value(),
            video: value.video().unwrap_or_default().to_owned(),
            created_at: value.created_at().to_rfc3339(),
            updated_at: value.updated_at().to_rfc3339(),
        }
    }
}

impl From<RatingListParams> for RatingListQuery {
    fn from(value: RatingListParams) -> Self {
        Self::from_request(
            value.limit.as_deref(),
            value.sort.as_deref(),
            value.order.as_deref(),
            value.name.as_deref(),
        )
    }
}

impl UpsertRatingPayload {
    /// Coerces loosely typed JSON into an upsert request.
    pub fn into_request(self) -> AppResult<UpsertRatingRequest> {
        let fields = RatingFieldsInput {
            name: coerce_text("name", self.name)?,
            subcompany: coerce_text("subcompany", self.subcompany)?,
            rating: self.rating.filter(|rating| !rating.is_null()),
            video: coerce_text("video", self.video)?,
        };
        let original = OriginalKey {
            name: coerce_text("originalName", self.original_name)?,
            subcompany: coerce_text("originalSubcompany", self.original_subcompany)?,
        };

        Ok(UpsertRatingRequest::new(fields, original))
    }
}

impl DeleteRatingsPayload {
    /// Classifies the payload as a single or cascading delete.
    pub fn into_request(self) -> AppResult<DeleteRatingsRequest> {
        let name = coerce_text("name", self.name)?.unwrap_or_default();
        let subcompany = coerce_text("subcompany", self.subcompany)?;

        Ok(DeleteRatingsRequest::from_request(
            name.as_str(),
            subcompany.as_deref(),
        ))
    }
}
