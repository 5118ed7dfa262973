//! Disaster repository for database operations.

use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use uuid::Uuid;

use domain::models::disaster::{
    BulkUpdateOutcome, Disaster, DisasterFilter, DisasterPatch, NearParams, NewDisaster,
};

use crate::entities::DisasterEntity;
use crate::geometry::{in_bounds, radius_meters};
use crate::metrics::QueryTimer;
use crate::store::{DisasterStore, ListParams, StoreError};

/// Column projection shared by every SELECT/RETURNING clause.
///
/// The stored geography is read back as nullable lat/lng doubles; entity
/// mapping substitutes the sentinel point when either is NULL.
const DISASTER_COLUMNS: &str = r#"
    id, type,
    ST_Y(location::geometry) as latitude,
    ST_X(location::geometry) as longitude,
    date, description, status, created_at, updated_at
"#;

/// PostGIS-backed repository for disaster records.
#[derive(Clone)]
pub struct DisasterRepository {
    pool: PgPool,
}

impl DisasterRepository {
    /// Creates a new DisasterRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl DisasterStore for DisasterRepository {
    async fn create(&self, input: NewDisaster) -> Result<Disaster, StoreError> {
        if input.kind.trim().is_empty() {
            return Err(StoreError::Validation("type must not be blank".to_string()));
        }

        let timer = QueryTimer::new("insert_disaster");

        let entity = sqlx::query_as::<_, DisasterEntity>(&format!(
            r#"
            INSERT INTO disasters (type, location, date, description, status)
            VALUES (
                $1,
                ST_SetSRID(ST_MakePoint($2, $3), 4326)::geography,
                $4, $5, $6
            )
            RETURNING {DISASTER_COLUMNS}
            "#,
        ))
        .bind(&input.kind)
        .bind(input.location.longitude()) // MakePoint takes (x=lon, y=lat)
        .bind(input.location.latitude())
        .bind(input.date)
        .bind(&input.description)
        .bind(input.status.as_str())
        .fetch_one(&self.pool)
        .await;

        timer.record();
        Ok(entity?.into())
    }

    async fn list(&self, params: ListParams) -> Result<Vec<Disaster>, StoreError> {
        let timer = QueryTimer::new("list_disasters");

        let entities = sqlx::query_as::<_, DisasterEntity>(&format!(
            r#"
            SELECT {DISASTER_COLUMNS}
            FROM disasters
            WHERE ($1::text IS NULL OR type = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            ORDER BY created_at DESC
            OFFSET $5
            LIMIT $6
            "#,
        ))
        .bind(&params.filter.kind)
        .bind(params.filter.status.map(|s| s.as_str()))
        .bind(params.filter.date_from)
        .bind(params.filter.date_to)
        .bind(params.skip.max(0))
        .bind(params.limit)
        .fetch_all(&self.pool)
        .await;

        timer.record();
        Ok(entities?.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &DisasterFilter) -> Result<i64, StoreError> {
        let timer = QueryTimer::new("count_disasters");

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM disasters
            WHERE ($1::text IS NULL OR type = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::date IS NULL OR date >= $3)
              AND ($4::date IS NULL OR date <= $4)
            "#,
        )
        .bind(&filter.kind)
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.date_from)
        .bind(filter.date_to)
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok(count)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Disaster>, StoreError> {
        let timer = QueryTimer::new("find_disaster_by_id");

        let entity = sqlx::query_as::<_, DisasterEntity>(&format!(
            r#"
            SELECT {DISASTER_COLUMNS}
            FROM disasters
            WHERE id = $1
            "#,
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        Ok(entity?.map(Into::into))
    }

    async fn update(
        &self,
        id: Uuid,
        patch: DisasterPatch,
    ) -> Result<Option<Disaster>, StoreError> {
        // Nothing to apply; current state, updated_at untouched.
        if patch.is_empty() {
            return self.get_by_id(id).await;
        }

        let timer = QueryTimer::new("update_disaster");

        let (lng, lat) = match &patch.location {
            Some(point) => (Some(point.longitude()), Some(point.latitude())),
            None => (None, None),
        };

        let entity = sqlx::query_as::<_, DisasterEntity>(&format!(
            r#"
            UPDATE disasters SET
                type = COALESCE($2, type),
                location = CASE
                    WHEN $3::double precision IS NOT NULL AND $4::double precision IS NOT NULL
                    THEN ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography
                    ELSE location
                END,
                date = COALESCE($5, date),
                description = COALESCE($6, description),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {DISASTER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(&patch.kind)
        .bind(lng)
        .bind(lat)
        .bind(patch.date)
        .bind(&patch.description)
        .bind(patch.status.map(|s| s.as_str()))
        .fetch_optional(&self.pool)
        .await;

        timer.record();
        Ok(entity?.map(Into::into))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let timer = QueryTimer::new("delete_disaster");

        let result = sqlx::query("DELETE FROM disasters WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await;

        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    async fn bulk_insert(&self, items: Vec<NewDisaster>) -> Result<Vec<Disaster>, StoreError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let timer = QueryTimer::new("bulk_insert_disasters");

        // One multi-row INSERT rather than N sequential writes.
        let mut builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("INSERT INTO disasters (type, location, date, description, status) ");
        builder.push_values(items.iter(), |mut row, item| {
            row.push_bind(&item.kind);
            row.push("ST_SetSRID(ST_MakePoint(");
            row.push_bind_unseparated(item.location.longitude());
            row.push_unseparated(", ");
            row.push_bind_unseparated(item.location.latitude());
            row.push_unseparated("), 4326)::geography");
            row.push_bind(item.date);
            row.push_bind(&item.description);
            row.push_bind(item.status.as_str());
        });
        builder.push(format!(" RETURNING {DISASTER_COLUMNS}"));

        let entities = builder
            .build_query_as::<DisasterEntity>()
            .fetch_all(&self.pool)
            .await;

        timer.record();
        Ok(entities?.into_iter().map(Into::into).collect())
    }

    async fn bulk_update(
        &self,
        items: Vec<(Uuid, DisasterPatch)>,
    ) -> Result<BulkUpdateOutcome, StoreError> {
        if items.is_empty() {
            return Ok(BulkUpdateOutcome::default());
        }

        let timer = QueryTimer::new("bulk_update_disasters");
        let mut tx = self.pool.begin().await?;

        let mut outcome = BulkUpdateOutcome::default();
        for (id, patch) in &items {
            outcome.matched_count += 1;
            if patch.is_empty() {
                continue;
            }

            let (lng, lat) = match &patch.location {
                Some(point) => (Some(point.longitude()), Some(point.latitude())),
                None => (None, None),
            };

            let result = sqlx::query(
                r#"
                UPDATE disasters SET
                    type = COALESCE($2, type),
                    location = CASE
                        WHEN $3::double precision IS NOT NULL AND $4::double precision IS NOT NULL
                        THEN ST_SetSRID(ST_MakePoint($3, $4), 4326)::geography
                        ELSE location
                    END,
                    date = COALESCE($5, date),
                    description = COALESCE($6, description),
                    status = COALESCE($7, status),
                    updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(id)
            .bind(&patch.kind)
            .bind(lng)
            .bind(lat)
            .bind(patch.date)
            .bind(&patch.description)
            .bind(patch.status.map(|s| s.as_str()))
            .execute(&mut *tx)
            .await?;

            outcome.modified_count += result.rows_affected() as i64;
        }

        tx.commit().await?;
        timer.record();
        Ok(outcome)
    }

    async fn find_near(&self, params: NearParams) -> Result<Vec<Disaster>, StoreError> {
        // Out-of-bounds or non-finite coordinates cannot match anything.
        if !in_bounds(params.lat, params.lng) || !params.distance_km.is_finite() {
            return Ok(Vec::new());
        }

        let timer = QueryTimer::new("find_disasters_near");

        let entities = sqlx::query_as::<_, DisasterEntity>(&format!(
            r#"
            SELECT {DISASTER_COLUMNS}
            FROM disasters
            WHERE ST_DWithin(
                location,
                ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography,
                $3
            )
            ORDER BY ST_Distance(
                location,
                ST_SetSRID(ST_MakePoint($1, $2), 4326)::geography
            ) ASC
            "#,
        ))
        .bind(params.lng)
        .bind(params.lat)
        .bind(radius_meters(params.distance_km))
        .fetch_all(&self.pool)
        .await;

        timer.record();
        Ok(entities?.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // connect_lazy never opens a connection; good enough for paths that
    // return before touching the pool.
    fn lazy_repo() -> DisasterRepository {
        let pool = PgPool::connect_lazy("postgres://localhost/unused").unwrap();
        DisasterRepository::new(pool)
    }

    #[tokio::test]
    async fn test_bulk_insert_empty_is_a_noop() {
        let repo = lazy_repo();
        let result = repo.bulk_insert(Vec::new()).await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_bulk_update_empty_is_a_noop() {
        let repo = lazy_repo();
        let outcome = repo.bulk_update(Vec::new()).await.unwrap();
        assert_eq!(outcome, BulkUpdateOutcome::default());
    }

    #[tokio::test]
    async fn test_find_near_out_of_bounds_returns_empty() {
        let repo = lazy_repo();

        let result = repo
            .find_near(NearParams {
                lat: 91.0,
                lng: 0.0,
                distance_km: 10.0,
            })
            .await
            .unwrap();
        assert!(result.is_empty());

        let result = repo
            .find_near(NearParams {
                lat: 0.0,
                lng: f64::NAN,
                distance_km: 10.0,
            })
            .await
            .unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_type() {
        let repo = lazy_repo();
        let input = NewDisaster {
            kind: "   ".to_string(),
            location: domain::GeoPoint::new(0.0, 0.0),
            date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            description: None,
            status: domain::DisasterStatus::Active,
        };

        let err = repo.create(input).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
