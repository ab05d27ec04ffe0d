use chrono::{DateTime, Utc};
use companyrating_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lowest accepted rating amount.
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating amount.
pub const MAX_RATING: f64 = 5000.0;

/// Compares two texts for equality ignoring letter case, over the whole value.
#[must_use]
pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    left == right || left.to_lowercase() == right.to_lowercase()
}

/// Rating amount constrained to the closed range `[0, 5000]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RatingAmount(f64);

impl RatingAmount {
    /// Creates a validated rating amount.
    pub fn new(value: f64) -> AppResult<Self> {
        if !value.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&value) {
            return Err(AppError::Validation(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING}, got {value}"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the raw amount.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Composite identity of a rating record.
///
/// Equality is case-sensitive; [`RatingKey::matches_ignoring_case`] is the
/// anchored case-insensitive comparison used by bulk deletes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RatingKey {
    name: NonEmptyString,
    subcompany: NonEmptyString,
}

impl RatingKey {
    /// Creates a validated composite key.
    pub fn new(name: impl Into<String>, subcompany: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            name: NonEmptyString::for_field("name", name)?,
            subcompany: NonEmptyString::for_field("subcompany", subcompany)?,
        })
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the subcompany name.
    #[must_use]
    pub fn subcompany(&self) -> &str {
        self.subcompany.as_str()
    }

    /// Returns whether both parts match the given texts ignoring case.
    #[must_use]
    pub fn matches_ignoring_case(&self, name: &str, subcompany: &str) -> bool {
        eq_ignore_case(self.name(), name) && eq_ignore_case(self.subcompany(), subcompany)
    }
}

/// Validated values written by an upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingFields {
    key: RatingKey,
    rating: RatingAmount,
    video: Option<String>,
}

impl RatingFields {
    /// Creates a validated field set. Blank video references are treated as absent.
    pub fn new(key: RatingKey, rating: RatingAmount, video: Option<String>) -> Self {
        let video = video.and_then(|value| {
            let trimmed = value.trim().to_owned();
            (!trimmed.is_empty()).then_some(trimmed)
        });

        Self { key, rating, video }
    }

    /// Returns the identity being written.
    #[must_use]
    pub fn key(&self) -> &RatingKey {
        &self.key
    }

    /// Returns the rating amount.
    #[must_use]
    pub fn rating(&self) -> RatingAmount {
        self.rating
    }

    /// Returns the optional video reference.
    #[must_use]
    pub fn video(&self) -> Option<&str> {
        self.video.as_deref()
    }
}

/// Persisted rating entry for one (company, subcompany) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingRecord {
    record_id: Uuid,
    fields: RatingFields,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl RatingRecord {
    /// Creates a brand-new record.
    #[must_use]
    pub fn create(record_id: Uuid, fields: RatingFields, now: DateTime<Utc>) -> Self {
        Self {
            record_id,
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a record from persisted state.
    #[must_use]
    pub fn from_parts(
        record_id: Uuid,
        fields: RatingFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            record_id,
            fields,
            created_at,
            updated_at,
        }
    }

    /// Overwrites every mutable field, keeping the record id and creation time.
    #[must_use]
    pub fn overwritten_with(self, fields: RatingFields, now: DateTime<Utc>) -> Self {
        Self {
            fields,
            updated_at: now,
            ..self
        }
    }

    /// Returns the stable record identifier.
    #[must_use]
    pub fn record_id(&self) -> Uuid {
        self.record_id
    }

    /// Returns the composite identity.
    #[must_use]
    pub fn key(&self) -> &RatingKey {
        self.fields.key()
    }

    /// Returns the company name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.fields.key().name()
    }

    /// Returns the subcompany name.
    #[must_use]
    pub fn subcompany(&self) -> &str {
        self.fields.key().subcompany()
    }

    /// Returns the rating amount.
    #[must_use]
    pub fn rating(&self) -> RatingAmount {
        self.fields.rating()
    }

    /// Returns the optional video reference.
    #[must_use]
    pub fn video(&self) -> Option<&str> {
        self.fields.video()
    }

    /// Returns the written field set.
    #[must_use]
    pub fn fields(&self) -> &RatingFields {
        &self.fields
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last write timestamp.
    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use proptest::prelude::*;
    use uuid::Uuid;

    use super::{RatingAmount, RatingFields, RatingKey, RatingRecord, eq_ignore_case};

    fn fields(name: &str, subcompany: &str, rating: f64) -> RatingFields {
        RatingFields::new(
            RatingKey::new(name, subcompany).unwrap_or_else(|_| unreachable!()),
            RatingAmount::new(rating).unwrap_or_else(|_| unreachable!()),
            None,
        )
    }

    #[test]
    fn rating_accepts_inclusive_bounds() {
        assert!(RatingAmount::new(0.0).is_ok());
        assert!(RatingAmount::new(5000.0).is_ok());
    }

    #[test]
    fn rating_rejects_out_of_range_values() {
        assert!(RatingAmount::new(-1.0).is_err());
        assert!(RatingAmount::new(5001.0).is_err());
        assert!(RatingAmount::new(f64::NAN).is_err());
    }

    #[test]
    fn key_requires_both_parts() {
        assert!(RatingKey::new("", "East").is_err());
        assert!(RatingKey::new("Acme", " ").is_err());
    }

    #[test]
    fn key_equality_is_case_sensitive() {
        let upper = RatingKey::new("ACME", "East").unwrap_or_else(|_| unreachable!());
        let lower = RatingKey::new("acme", "East").unwrap_or_else(|_| unreachable!());
        assert_ne!(upper, lower);
        assert!(upper.matches_ignoring_case("acme", "EAST"));
    }

    #[test]
    fn case_insensitive_match_is_anchored() {
        assert!(!eq_ignore_case("Acme Corp", "acme"));
        assert!(!eq_ignore_case("acme", "Acme Corp"));
        assert!(eq_ignore_case("a.c*me", "A.C*ME"));
    }

    #[test]
    fn blank_video_is_absent() {
        let fields = RatingFields::new(
            RatingKey::new("Acme", "East").unwrap_or_else(|_| unreachable!()),
            RatingAmount::new(10.0).unwrap_or_else(|_| unreachable!()),
            Some("  ".to_owned()),
        );
        assert_eq!(fields.video(), None);
    }

    #[test]
    fn overwrite_keeps_identity_metadata() {
        let created = Utc::now();
        let record_id = Uuid::new_v4();
        let record = RatingRecord::create(record_id, fields("Acme", "East", 10.0), created);

        let later = created + Duration::seconds(5);
        let renamed = record.overwritten_with(fields("Acme", "North", 20.0), later);

        assert_eq!(renamed.record_id(), record_id);
        assert_eq!(renamed.created_at(), created);
        assert_eq!(renamed.updated_at(), later);
        assert_eq!(renamed.subcompany(), "North");
        assert_eq!(renamed.rating().value(), 20.0);
    }

    proptest! {
        #[test]
        fn case_fold_is_symmetric(left in "[a-zA-Z .*+?]{0,12}", right in "[a-zA-Z .*+?]{0,12}") {
            prop_assert_eq!(eq_ignore_case(&left, &right), eq_ignore_case(&right, &left));
        }

        #[test]
        fn case_fold_matches_own_uppercase(value in "[a-zA-Z0-9 ]{1,16}") {
            prop_assert!(eq_ignore_case(&value, &value.to_uppercase()));
        }

        #[test]
        fn rating_range_is_enforced(value in -10_000.0f64..10_000.0) {
            let accepted = RatingAmount::new(value).is_ok();
            prop_assert_eq!(accepted, (0.0..=5000.0).contains(&value));
        }
    }
}
