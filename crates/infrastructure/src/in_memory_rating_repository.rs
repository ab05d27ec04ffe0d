use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use companyrating_application::{RatingListQuery, RatingRepository};
use companyrating_core::{AppError, AppResult};
use companyrating_domain::{RatingFields, RatingKey, RatingRecord, eq_ignore_case};
use tokio::sync::RwLock;
use uuid::Uuid;


/// In-memory rating repository for local runs and tests.
///
/// Every upsert runs under one write lock, so check-then-write sequences never interleave.
/// Two concurrent first-time upserts of the same key therefore apply one after the other:
/// the second overwrites the record the first created. The PostgreSQL repository instead
/// lets the unique constraint decide and reports `AppError::Conflict` to the loser.
#[derive(Debug, Default)]
pub struct InMemoryRatingRepository {
    records: RwLock<HashMap<Uuid, RatingRecord>>,
}

impl InMemoryRatingRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

fn id_for_key(records: &HashMap<Uuid, RatingRecord>, key: &RatingKey) -> Option<Uuid> {
    records
        .values()
        .find(|record| record.key() == key)
        .map(RatingRecord::record_id)
}

async fn delete_where(
    records: &RwLock<HashMap<Uuid, RatingRecord>>,
    predicate: impl Fn(&RatingRecord) -> bool,
) -> u64 {
    let mut records = records.write().await;
    let before = records.len();
    records.retain(|_, record| !predicate(record));
    (before - records.len()) as u64
}

#[async_trait]
impl RatingRepository for InMemoryRatingRepository {
    async fn find(&self, query: &RatingListQuery) -> AppResult<Vec<RatingRecord>> {
        let records = self.records.read().await;

        let mut values: Vec<RatingRecord> = records
            .values()
            .filter(|record| query.filter.matches(record))
            .cloned()
            .collect();
        values.sort_by(|left, right| query.sort.compare(left, right));
        values.truncate(query.limit.value());

        Ok(values)
    }

    async fn find_one(&self, key: &RatingKey) -> AppResult<Option<RatingRecord>> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|record| record.key() == key)
            .cloned())
    }

    async fn upsert(&self, lookup: &RatingKey, fields: RatingFields) -> AppResult<RatingRecord> {
        let mut records = self.records.write().await;
        let now = Utc::now();

        let located = id_for_key(&records, lookup);
        let owner = id_for_key(&records, fields.key());
        if owner.is_some() && owner != located {
            return Err(AppError::Conflict(format!(
                "rating for '{}' / '{}' already exists",
                fields.key().name(),
                fields.key().subcompany()
            )));
        }

        let record = match located.and_then(|record_id| records.remove(&record_id)) {
            Some(existing) => existing.overwritten_with(fields, now),
            None => RatingRecord::create(Uuid::new_v4(), fields, now),
        };
        records.insert(record.record_id(), record.clone());

        Ok(record)
    }

    async fn delete_by_name_ignoring_case(&self, name: &str) -> AppResult<u64> {
        Ok(delete_where(&self.records, |record| eq_ignore_case(record.name(), name)).await)
    }

    async fn delete_one_by_name_and_subcompany_ignoring_case(
        &self,
        name: &str,
        subcompany: &str,
    ) -> AppResult<u64> {
        let mut records = self.records.write().await;
        let oldest = records
            .values()
            .filter(|record| record.key().matches_ignoring_case(name, subcompany))
            .min_by_key(|record| (record.created_at(), record.record_id()))
            .map(RatingRecord::record_id);

        Ok(oldest
            .and_then(|record_id| records.remove(&record_id))
            .map_or(0, |_| 1))
    }
}
