mod inputs;
mod repository;

pub use inputs::{
    DeleteRatingsOutcome, DeleteRatingsRequest, OriginalKey, RatingFieldsInput,
    UpsertRatingRequest,
};
pub use repository::{RatingFilter, RatingListQuery, RatingRepository};
