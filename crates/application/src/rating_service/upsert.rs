use companyrating_core::{AppResult, MutationAccess};
use companyrating_domain::{RatingAmount, RatingFields, RatingKey, RatingRecord};
use tracing::{info, warn};

use crate::rating_ports::{RatingFieldsInput, UpsertRatingRequest};

use super::*;

impl RatingService {
    /// Creates or overwrites a record, optionally renaming it.
    ///
    /// Every input check runs before the store is touched. The lookup key is the
    /// original identity when one was given; if that record does not exist the
    /// new identity is tried, and a new record is created when neither exists.
    pub async fn upsert_rating(
        &self,
        access: MutationAccess,
        request: UpsertRatingRequest,
    ) -> AppResult<RatingRecord> {
        access.require()?;

        let fields = validated_fields(request.fields())?;
        let lookup = match request.lookup_parts() {
            (Some(name), Some(subcompany)) => RatingKey::new(name, subcompany)?,
            _ => fields.key().clone(),
        };

        let existing = self.locate(&lookup, fields.key()).await?;
        let lookup = existing
            .as_ref()
            .map_or_else(|| fields.key().clone(), |record| record.key().clone());

        let renamed = existing
            .as_ref()
            .is_some_and(|record| record.key() != fields.key());
        let target = fields.key().clone();

        let record = self
            .repository
            .upsert(&lookup, fields)
            .await
            .inspect_err(|error| {
                if matches!(error, AppError::Conflict(_)) {
                    warn!(
                        name = target.name(),
                        subcompany = target.subcompany(),
                        "rating upsert rejected: target identity already exists"
                    );
                }
                log_store_failure("upsert", error);
            })?;

        info!(
            record_id = %record.record_id(),
            name = record.name(),
            subcompany = record.subcompany(),
            created = existing.is_none(),
            renamed,
            "saved rating"
        );

        Ok(record)
    }

    async fn locate(
        &self,
        lookup: &RatingKey,
        target: &RatingKey,
    ) -> AppResult<Option<RatingRecord>> {
        let found = self
            .repository
            .find_one(lookup)
            .await
            .inspect_err(|error| log_store_failure("upsert lookup", error))?;
        if found.is_some() || lookup == target {
            return Ok(found);
        }

        self.repository
            .find_one(target)
            .await
            .inspect_err(|error| log_store_failure("upsert lookup", error))
    }
}

fn validated_fields(input: &RatingFieldsInput) -> AppResult<RatingFields> {
    let rating = input
        .rating
        .as_ref()
        .map(|value| {
            value
                .as_f64()
                .ok_or_else(|| {
                    AppError::Validation(
                        "rating must be a number between 0 and 5000 if provided".to_owned(),
                    )
                })
                .and_then(RatingAmount::new)
        })
        .transpose()?;

    if !input.has_any() {
        return Err(AppError::Validation(
            "at least one field must be provided".to_owned(),
        ));
    }

    let name = input
        .name()
        .ok_or_else(|| AppError::Validation("name is required".to_owned()))?;
    let subcompany = input
        .subcompany()
        .ok_or_else(|| AppError::Validation("subcompany is required".to_owned()))?;
    let rating = rating.ok_or_else(|| AppError::Validation("rating is required".to_owned()))?;

    Ok(RatingFields::new(
        RatingKey::new(name, subcompany)?,
        rating,
        input.video().map(ToOwned::to_owned),
    ))
}
