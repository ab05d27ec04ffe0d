use async_trait::async_trait;
use chrono::{DateTime, Utc};
use companyrating_application::{RatingFilter, RatingListQuery, RatingRepository};
use companyrating_core::{AppError, AppResult};
use companyrating_domain::{
    RatingAmount, RatingFields, RatingKey, RatingRecord, RatingSortField,
};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder, Transaction};
use tracing::warn;
use uuid::Uuid;


/// PostgreSQL-backed rating repository.
#[derive(Clone)]
pub struct PostgresRatingRepository {
    pool: PgPool,
}

impl PostgresRatingRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RatingRecordRow {
    id: Uuid,
    name: String,
    subcompany: String,
    rating: f64,
    video: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RatingRecordRow> for RatingRecord {
    type Error = AppError;

    fn try_from(row: RatingRecordRow) -> Result<Self, Self::Error> {
        let fields = RatingFields::new(
            RatingKey::new(row.name, row.subcompany)?,
            RatingAmount::new(row.rating)?,
            Some(row.video),
        );

        Ok(Self::from_parts(
            row.id,
            fields,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// Maps a driver error, separating an unreachable store from other failures.
fn store_error(context: &str, error: sqlx::Error) -> AppError {
    match error {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => AppError::Unavailable(format!("{context}: {error}")),
        error => AppError::Internal(format!("{context}: {error}")),
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return true;
    }

    false
}

fn write_error(fields: &RatingFields, context: &str, error: sqlx::Error) -> AppError {
    if is_unique_violation(&error) {
        warn!(
            name = fields.key().name(),
            subcompany = fields.key().subcompany(),
            "unique constraint rejected rating write"
        );
        return AppError::Conflict(format!(
            "rating for '{}' / '{}' already exists",
            fields.key().name(),
            fields.key().subcompany()
        ));
    }

    store_error(context, error)
}

async fn lock_by_key(
    transaction: &mut Transaction<'_, Postgres>,
    key: &RatingKey,
) -> AppResult<Option<Uuid>> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM rating_records
        WHERE name = $1 AND subcompany = $2
        FOR UPDATE
        "#,
    )
    .bind(key.name())
    .bind(key.subcompany())
    .fetch_optional(&mut **transaction)
    .await
    .map_err(|error| store_error("failed to lock rating record", error))
}

async fn update_record(
    transaction: &mut Transaction<'_, Postgres>,
    record_id: Uuid,
    fields: &RatingFields,
) -> AppResult<RatingRecordRow> {
    sqlx::query_as::<_, RatingRecordRow>(
        r#"
        UPDATE rating_records
        SET name = $2, subcompany = $3, rating = $4, video = $5, updated_at = now()
        WHERE id = $1
        RETURNING id, name, subcompany, rating, video, created_at, updated_at
        "#,
    )
    .bind(record_id)
    .bind(fields.key().name())
    .bind(fields.key().subcompany())
    .bind(fields.rating().value())
    .bind(fields.video().unwrap_or_default())
    .fetch_one(&mut **transaction)
    .await
    .map_err(|error| write_error(fields, "failed to update rating record", error))
}

async fn insert_record(
    transaction: &mut Transaction<'_, Postgres>,
    fields: &RatingFields,
) -> AppResult<RatingRecordRow> {
    sqlx::query_as::<_, RatingRecordRow>(
        r#"
        INSERT INTO rating_records (id, name, subcompany, rating, video, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, now(), now())
        RETURNING id, name, subcompany, rating, video, created_at, updated_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(fields.key().name())
    .bind(fields.key().subcompany())
    .bind(fields.rating().value())
    .bind(fields.video().unwrap_or_default())
    .fetch_one(&mut **transaction)
    .await
    .map_err(|error| write_error(fields, "failed to insert rating record", error))
}

#[async_trait]
impl RatingRepository for PostgresRatingRepository {
    async fn find(&self, query: &RatingListQuery) -> AppResult<Vec<RatingRecord>> {
        let limit = i64::try_from(query.limit.value()).map_err(|error| {
            AppError::Validation(format!("invalid rating list limit: {error}"))
        })?;

        let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT id, name, subcompany, rating, video, created_at, updated_at FROM rating_records",
        );

        if let RatingFilter::NameIgnoringCase(name) = &query.filter {
            builder.push(" WHERE lower(name) = lower(");
            builder.push_bind(name.as_str());
            builder.push(")");
        }

        builder.push(" ORDER BY ");
        if let Some(field) = query.sort.field() {
            builder.push(field.as_str());
            if field != RatingSortField::Rating {
                builder.push(r#" COLLATE "C""#);
            }
            builder.push(" ");
            builder.push(query.sort.direction().as_sql());
            builder.push(", ");
        }
        builder.push(r#"name COLLATE "C" ASC, subcompany COLLATE "C" ASC LIMIT "#);
        builder.push_bind(limit);

        let rows = builder
            .build_query_as::<RatingRecordRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| store_error("failed to list rating records", error))?;

        rows.into_iter().map(RatingRecord::try_from).collect()
    }

    async fn find_one(&self, key: &RatingKey) -> AppResult<Option<RatingRecord>> {
        let row = sqlx::query_as::<_, RatingRecordRow>(
            r#"
            SELECT id, name, subcompany, rating, video, created_at, updated_at
            FROM rating_records
            WHERE name = $1 AND subcompany = $2
            "#,
        )
        .bind(key.name())
        .bind(key.subcompany())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| store_error("failed to find rating record", error))?;

        row.map(RatingRecord::try_from).transpose()
    }

    async fn upsert(&self, lookup: &RatingKey, fields: RatingFields) -> AppResult<RatingRecord> {
        let mut transaction = self
            .pool
            .begin()
            .await
            .map_err(|error| store_error("failed to begin transaction", error))?;

        let row = match lock_by_key(&mut transaction, lookup).await? {
            Some(record_id) => update_record(&mut transaction, record_id, &fields).await?,
            None => insert_record(&mut transaction, &fields).await?,
        };

        transaction
            .commit()
            .await
            .map_err(|error| write_error(&fields, "failed to commit transaction", error))?;

        RatingRecord::try_from(row)
    }

    async fn delete_by_name_ignoring_case(&self, name: &str) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM rating_records
            WHERE lower(name) = lower($1)
            "#,
        )
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|error| store_error("failed to delete rating records", error))?;

        Ok(result.rows_affected())
    }

    async fn delete_one_by_name_and_subcompany_ignoring_case(
        &self,
        name: &str,
        subcompany: &str,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM rating_records
            WHERE id = (
                SELECT id
                FROM rating_records
                WHERE lower(name) = lower($1) AND lower(subcompany) = lower($2)
                ORDER BY created_at, id
                LIMIT 1
            )
            "#,
        )
        .bind(name)
        .bind(subcompany)
        .execute(&self.pool)
        .await
        .map_err(|error| store_error("failed to delete rating record", error))?;

        Ok(result.rows_affected())
    }
}
