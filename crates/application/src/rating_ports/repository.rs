use async_trait::async_trait;

use companyrating_core::AppResult;
use companyrating_domain::{
    ListLimit, RatingFields, RatingKey, RatingRecord, RatingSort, eq_ignore_case,
};

/// Record selection applied before sorting and limiting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RatingFilter {
    /// Every live record.
    #[default]
    All,
    /// Records whose name matches ignoring case.
    NameIgnoringCase(String),
}

impl RatingFilter {
    /// Builds a filter from an optional requested name. Blank names select everything.
    #[must_use]
    pub fn from_request(name: Option<&str>) -> Self {
        match name.map(str::trim).filter(|value| !value.is_empty()) {
            Some(value) => Self::NameIgnoringCase(value.to_owned()),
            None => Self::All,
        }
    }

    /// Returns whether the record is selected.
    #[must_use]
    pub fn matches(&self, record: &RatingRecord) -> bool {
        match self {
            Self::All => true,
            Self::NameIgnoringCase(name) => eq_ignore_case(record.name(), name),
        }
    }
}

/// Bounded, sorted listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingListQuery {
    /// Record selection.
    pub filter: RatingFilter,
    /// Allow-listed sort order.
    pub sort: RatingSort,
    /// Clamped result size.
    pub limit: ListLimit,
}

impl RatingListQuery {
    /// Resolves raw list parameters, silently falling back to defaults on invalid values.
    #[must_use]
    pub fn from_request(
        limit: Option<&str>,
        sort: Option<&str>,
        order: Option<&str>,
        name: Option<&str>,
    ) -> Self {
        Self {
            filter: RatingFilter::from_request(name),
            sort: RatingSort::from_request(sort, order),
            limit: ListLimit::from_request(limit),
        }
    }
}

/// Persistent record store enforcing composite-key uniqueness.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Lists up to `query.limit` records matching the filter, in sort order.
    async fn find(&self, query: &RatingListQuery) -> AppResult<Vec<RatingRecord>>;

    /// Returns the record with exactly this composite key.
    async fn find_one(&self, key: &RatingKey) -> AppResult<Option<RatingRecord>>;

    /// Overwrites the record located by `lookup`, or creates one when none exists.
    ///
    /// Fails with `AppError::Conflict` when `fields` carries an identity owned by
    /// a different record. Nothing is written on failure.
    async fn upsert(&self, lookup: &RatingKey, fields: RatingFields) -> AppResult<RatingRecord>;

    /// Deletes every record whose name matches ignoring case. Returns the deleted count.
    async fn delete_by_name_ignoring_case(&self, name: &str) -> AppResult<u64>;

    /// Deletes at most one record whose name and subcompany both match ignoring case,
    /// the oldest when several case variants exist. Returns the deleted count.
    async fn delete_one_by_name_and_subcompany_ignoring_case(
        &self,
        name: &str,
        subcompany: &str,
    ) -> AppResult<u64>;
}
