use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

/// Query parameters for the company listing. Values stay raw text so invalid input
/// falls back to defaults instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct RatingListParams {
    pub limit: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub name: Option<String>,
}

/// Query parameters for a single company lookup.
#[derive(Debug, Default, Deserialize)]
pub struct RatingLookupParams {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subcompany: String,
}

/// API representation of a rating record.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/rating-response.ts"
)]
pub struct RatingResponse {
    pub record_id: String,
    pub name: String,
    pub subcompany: String,
    pub rating: f64,
    pub video: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Incoming payload for create, update and rename.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upsert-rating-payload.ts"
)]
#[serde(rename_all = "camelCase")]
pub struct UpsertRatingPayload {
    #[ts(type = "string | number | null")]
    pub name: Option<Value>,
    #[ts(type = "string | number | null")]
    pub subcompany: Option<Value>,
    #[ts(type = "number | null")]
    pub rating: Option<Value>,
    #[ts(type = "string | null")]
    pub video: Option<Value>,
    #[serde(alias = "original_name")]
    #[ts(type = "string | number | null")]
    pub original_name: Option<Value>,
    #[serde(alias = "original_subcompany")]
    #[ts(type = "string | number | null")]
    pub original_subcompany: Option<Value>,
}

/// Saved record acknowledgement.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upsert-rating-response.ts"
)]
pub struct UpsertRatingResponse {
    pub success: bool,
    pub company: RatingResponse,
}

/// Incoming payload for single or cascading delete.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-ratings-payload.ts"
)]
pub struct DeleteRatingsPayload {
    #[ts(type = "string | number | null")]
    pub name: Option<Value>,
    #[ts(type = "string | number | null")]
    pub subcompany: Option<Value>,
}

/// Delete outcome. A miss is reported with `success: false` and a zero count.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/delete-ratings-response.ts"
)]
pub struct DeleteRatingsResponse {
    pub success: bool,
    #[ts(type = "number")]
    pub deleted_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub message: Option<String>,
}

/// Stored video location.
#[derive(Debug, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/upload-video-response.ts"
)]
pub struct UploadVideoResponse {
    pub success: bool,
    pub video_path: String,
}
