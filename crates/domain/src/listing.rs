use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::RatingRecord;

/// Allow-listed record fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingSortField {
    /// Company name.
    Name,
    /// Subcompany name.
    Subcompany,
    /// Rating amount.
    Rating,
}

impl RatingSortField {
    /// Parses an allow-listed field name. Anything else yields `None`.
    #[must_use]
    pub fn parse_allowed(value: &str) -> Option<Self> {
        match value {
            "name" => Some(Self::Name),
            "subcompany" => Some(Self::Subcompany),
            "rating" => Some(Self::Rating),
            _ => None,
        }
    }

    /// Returns the stable field name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Subcompany => "subcompany",
            Self::Rating => "rating",
        }
    }
}

/// Sort direction for the chosen sort field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Parses a requested order; only `desc` selects descending.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// Returns the SQL keyword for this direction.
    #[must_use]
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Listing order: an optional primary field followed by name then subcompany ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSort {
    field: Option<RatingSortField>,
    direction: SortDirection,
}

impl RatingSort {
    /// Creates a sort with an explicit primary field.
    #[must_use]
    pub fn by(field: RatingSortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Resolves raw request parameters. Unknown fields fall back to the default sort.
    #[must_use]
    pub fn from_request(sort: Option<&str>, order: Option<&str>) -> Self {
        match sort.and_then(RatingSortField::parse_allowed) {
            Some(field) => Self::by(field, SortDirection::parse(order)),
            None => Self::default(),
        }
    }

    /// Returns the primary sort field, if any.
    #[must_use]
    pub fn field(&self) -> Option<RatingSortField> {
        self.field
    }

    /// Returns the primary sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Orders two records.
    #[must_use]
    pub fn compare(&self, left: &RatingRecord, right: &RatingRecord) -> Ordering {
        let primary = match self.field {
            Some(RatingSortField::Name) => left.name().cmp(right.name()),
            Some(RatingSortField::Subcompany) => left.subcompany().cmp(right.subcompany()),
            Some(RatingSortField::Rating) => left
                .rating()
                .value()
                .total_cmp(&right.rating().value()),
            None => Ordering::Equal,
        };

        self.direction
            .apply(primary)
            .then_with(|| left.name().cmp(right.name()))
            .then_with(|| left.subcompany().cmp(right.subcompany()))
    }
}

/// Maximum number of records returned by one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListLimit(usize);

impl ListLimit {
    /// Limit applied when none or an invalid one is requested.
    pub const DEFAULT: usize = 20;
    /// Upper bound applied regardless of the request.
    pub const MAX: usize = 200;

    /// Clamps a numeric request: non-positive values use the default, large ones are capped.
    #[must_use]
    pub fn new(requested: i64) -> Self {
        if requested <= 0 {
            return Self(Self::DEFAULT);
        }

        Self(usize::try_from(requested).map_or(Self::MAX, |value| value.min(Self::MAX)))
    }

    /// Parses the leading integer of a raw request value (`"15abc"` is 15).
    #[must_use]
    pub fn from_request(raw: Option<&str>) -> Self {
        raw.and_then(parse_integer_prefix)
            .map_or(Self(Self::DEFAULT), Self::new)
    }

    /// Returns the effective limit.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

fn parse_integer_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits_end = unsigned
        .find(|character: char| !character.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if digits_end == 0 {
        return None;
    }

    let magnitude = unsigned[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}
