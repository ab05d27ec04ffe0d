use serde_json::Value;

/// Optional values carried by an upsert request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingFieldsInput {
    /// Company name to write.
    pub name: Option<String>,
    /// Subcompany name to write.
    pub subcompany: Option<String>,
    /// Raw rating value; must be a JSON number when present.
    pub rating: Option<Value>,
    /// Video reference to write.
    pub video: Option<String>,
}

impl RatingFieldsInput {
    /// Returns the name when present and non-empty.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        non_empty(self.name.as_deref())
    }

    /// Returns the subcompany when present and non-empty.
    #[must_use]
    pub fn subcompany(&self) -> Option<&str> {
        non_empty(self.subcompany.as_deref())
    }

    /// Returns the video reference when present and non-empty.
    #[must_use]
    pub fn video(&self) -> Option<&str> {
        non_empty(self.video.as_deref())
    }

    /// Returns whether at least one field was supplied.
    #[must_use]
    pub fn has_any(&self) -> bool {
        self.name().is_some()
            || self.subcompany().is_some()
            || self.rating.is_some()
            || self.video().is_some()
    }
}

/// Identity the caller wants to rename away from. Missing parts fall back to the new values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginalKey {
    /// Previous company name.
    pub name: Option<String>,
    /// Previous subcompany name.
    pub subcompany: Option<String>,
}

/// Upsert request, resolved to a single lookup key before touching the store.
#[derive(Debug, Clone, PartialEq)]
pub enum UpsertRatingRequest {
    /// Create or overwrite the record identified by the new fields.
    Plain {
        /// Values to write.
        fields: RatingFieldsInput,
    },
    /// Overwrite the record identified by `original`, possibly changing its identity.
    Rename {
        /// Identity to look up.
        original: OriginalKey,
        /// Values to write.
        fields: RatingFieldsInput,
    },
}

impl UpsertRatingRequest {
    /// Builds a request, treating blank original parts as absent.
    #[must_use]
    pub fn new(fields: RatingFieldsInput, original: OriginalKey) -> Self {
        let original = OriginalKey {
            name: non_blank(original.name.as_deref()).map(ToOwned::to_owned),
            subcompany: non_blank(original.subcompany.as_deref()).map(ToOwned::to_owned),
        };

        if original.name.is_none() && original.subcompany.is_none() {
            return Self::Plain { fields };
        }

        Self::Rename { original, fields }
    }

    /// Returns the values to write.
    #[must_use]
    pub fn fields(&self) -> &RatingFieldsInput {
        match self {
            Self::Plain { fields } | Self::Rename { fields, .. } => fields,
        }
    }

    /// Returns the lookup key parts: each original part, else the new value.
    #[must_use]
    pub fn lookup_parts(&self) -> (Option<&str>, Option<&str>) {
        match self {
            Self::Plain { fields } => (fields.name(), fields.subcompany()),
            Self::Rename { original, fields } => (
                original.name.as_deref().or_else(|| fields.name()),
                original.subcompany.as_deref().or_else(|| fields.subcompany()),
            ),
        }
    }
}

/// Delete request scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteRatingsRequest {
    /// Remove the records matching one (name, subcompany) pair ignoring case.
    Single {
        /// Company name.
        name: String,
        /// Subcompany name.
        subcompany: String,
    },
    /// Remove every record sharing the name ignoring case.
    Cascade {
        /// Company name.
        name: String,
    },
}

impl DeleteRatingsRequest {
    /// Classifies raw request values. A missing or blank subcompany cascades.
    #[must_use]
    pub fn from_request(name: &str, subcompany: Option<&str>) -> Self {
        let name = name.trim().to_owned();
        match subcompany.map(str::trim).filter(|value| !value.is_empty()) {
            Some(subcompany) => Self::Single {
                name,
                subcompany: subcompany.to_owned(),
            },
            None => Self::Cascade { name },
        }
    }

    /// Returns the requested company name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Single { name, .. } | Self::Cascade { name } => name.as_str(),
        }
    }
}

/// Successful delete result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteRatingsOutcome {
    /// Number of removed records.
    pub deleted_count: u64,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::{DeleteRatingsRequest, OriginalKey, RatingFieldsInput, UpsertRatingRequest};

    fn fields(name: &str, subcompany: &str) -> RatingFieldsInput {
        RatingFieldsInput {
            name: Some(name.to_owned()),
            subcompany: Some(subcompany.to_owned()),
            rating: Some(serde_json::json!(10)),
            video: None,
        }
    }

    #[test]
    fn blank_originals_build_plain_request() {
        let request = UpsertRatingRequest::new(
            fields("Acme", "East"),
            OriginalKey {
                name: Some(String::new()),
                subcompany: None,
            },
        );
        assert!(matches!(request, UpsertRatingRequest::Plain { .. }));
        assert_eq!(request.lookup_parts(), (Some("Acme"), Some("East")));
    }

    #[test]
    fn whitespace_originals_fall_back_to_new_values() {
        let request = UpsertRatingRequest::new(
            fields("Acme", "East"),
            OriginalKey {
                name: Some("   ".to_owned()),
                subcompany: Some("\t".to_owned()),
            },
        );
        assert!(matches!(request, UpsertRatingRequest::Plain { .. }));
        assert_eq!(request.lookup_parts(), (Some("Acme"), Some("East")));
    }

    #[test]
    fn partial_original_falls_back_per_part() {
        let request = UpsertRatingRequest::new(
            fields("Acme", "North"),
            OriginalKey {
                name: None,
                subcompany: Some("East".to_owned()),
            },
        );
        assert!(matches!(request, UpsertRatingRequest::Rename { .. }));
        assert_eq!(request.lookup_parts(), (Some("Acme"), Some("East")));
    }

    #[test]
    fn empty_strings_do_not_count_as_fields() {
        let input = RatingFieldsInput {
            name: Some(String::new()),
            subcompany: None,
            rating: None,
            video: Some(String::new()),
        };
        assert!(!input.has_any());
    }

    #[test]
    fn blank_subcompany_cascades() {
        assert_eq!(
            DeleteRatingsRequest::from_request(" Acme ", Some("   ")),
            DeleteRatingsRequest::Cascade {
                name: "Acme".to_owned()
            }
        );
        assert_eq!(
            DeleteRatingsRequest::from_request("Acme", None),
            DeleteRatingsRequest::Cascade {
                name: "Acme".to_owned()
            }
        );
        assert_eq!(
            DeleteRatingsRequest::from_request("Acme", Some(" East ")),
            DeleteRatingsRequest::Single {
                name: "Acme".to_owned(),
                subcompany: "East".to_owned()
            }
        );
    }
}
