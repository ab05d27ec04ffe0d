//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod listing;
mod rating;

pub use listing::{ListLimit, RatingSort, RatingSortField, SortDirection};
pub use rating::{
    MAX_RATING, MIN_RATING, RatingAmount, RatingFields, RatingKey, RatingRecord, eq_ignore_case,
};
