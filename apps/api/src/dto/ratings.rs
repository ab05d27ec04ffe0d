mod conversions;
mod types;

pub use types::{
    DeleteRatingsPayload, DeleteRatingsResponse, RatingListParams, RatingLookupParams,
    RatingResponse, UploadVideoResponse, UpsertRatingPayload, UpsertRatingResponse,
};
