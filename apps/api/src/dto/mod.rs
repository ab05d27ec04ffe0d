mod auth;
mod common;
mod ratings;
mod visibility;

pub use auth::{AdminUserResponse, LoginRequest, LoginResponse, SessionResponse};
pub use common::{HealthDependencyStatus, HealthResponse, SuccessResponse};
pub use ratings::{
    DeleteRatingsPayload, DeleteRatingsResponse, RatingListParams, RatingLookupParams,
    RatingResponse, UploadVideoResponse, UpsertRatingPayload, UpsertRatingResponse,
};
pub use visibility::{RatingsVisibilityPayload, VisibilityMessage};
