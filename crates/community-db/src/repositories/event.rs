//! PostgreSQL implementation of EventRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::Event;
use community_core::error::DomainError;
use community_core::traits::{EventFilter, EventRepository, RepoResult, SortOrder};

use crate::models::EventModel;

use super::error::{map_db_error, map_unique_violation};

const SELECT_EVENTS_ASC: &str = r#"
    SELECT id, external_id, starts_at, canceled
    FROM events
    WHERE ($1 = FALSE OR starts_at > $3)
      AND ($2 = FALSE OR starts_at <= $3)
      AND ($4 = TRUE OR canceled = FALSE)
    ORDER BY starts_at ASC, external_id ASC
"#;

const SELECT_EVENTS_DESC: &str = r#"
    SELECT id, external_id, starts_at, canceled
    FROM events
    WHERE ($1 = FALSE OR starts_at > $3)
      AND ($2 = FALSE OR starts_at <= $3)
      AND ($4 = TRUE OR canceled = FALSE)
    ORDER BY starts_at DESC, external_id DESC
"#;

/// PostgreSQL implementation of EventRepository
#[derive(Clone)]
pub struct PgEventRepository {
    pool: PgPool,
}

impl PgEventRepository {
    /// Create a new PgEventRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    #[instrument(skip(self))]
    async fn find_all(
        &self,
        filter: EventFilter,
        as_of: DateTime<Utc>,
        order: SortOrder,
    ) -> RepoResult<Vec<Event>> {
        let sql = match order {
            SortOrder::Ascending => SELECT_EVENTS_ASC,
            SortOrder::Descending => SELECT_EVENTS_DESC,
        };

        let results = sqlx::query_as::<_, EventModel>(sql)
            .bind(filter.upcoming_only)
            .bind(filter.past_only)
            .bind(as_of)
            .bind(filter.include_canceled)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Event::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_external_id(&self, external_id: &str) -> RepoResult<Option<Event>> {
        let result = sqlx::query_as::<_, EventModel>(
            r#"
            SELECT id, external_id, starts_at, canceled
            FROM events
            WHERE external_id = $1
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Event::from))
    }

    #[instrument(skip(self, event), fields(external_id = %event.external_id))]
    async fn create(&self, event: &Event) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO events (id, external_id, starts_at, canceled)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(event.id.into_inner())
        .bind(&event.external_id)
        .bind(event.starts_at)
        .bind(event.canceled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::InvalidData(format!("event already exists: {}", event.external_id))
            })
        })?;

        Ok(())
    }
}
