//! Application services and ports.

#![forbid(unsafe_code)]

mod admin_auth_service;
mod rating_ports;
mod rating_service;

pub use admin_auth_service::{AdminAuthService, AuthOutcome, PasswordHasher};
pub use rating_ports::{
    DeleteRatingsOutcome, DeleteRatingsRequest, OriginalKey, RatingFieldsInput, RatingFilter,
    RatingListQuery, RatingRepository, UpsertRatingRequest,
};
pub use rating_service::RatingService;
