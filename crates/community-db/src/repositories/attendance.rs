//! PostgreSQL implementation of AttendanceRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::{Attendance, AttendanceStatus};
use community_core::traits::{AttendanceRepository, RepoResult};
use community_core::value_objects::MemberId;

use crate::models::AttendanceModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AttendanceRepository
#[derive(Clone)]
pub struct PgAttendanceRepository {
    pool: PgPool,
}

impl PgAttendanceRepository {
    /// Create a new PgAttendanceRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PgAttendanceRepository {
    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<Attendance>> {
        let results = sqlx::query_as::<_, AttendanceModel>(
            r#"
            SELECT member_id, event_external_id, status, checked_in_at
            FROM attendances
            WHERE member_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Attendance::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find(
        &self,
        member_id: MemberId,
        event_external_id: &str,
    ) -> RepoResult<Option<Attendance>> {
        let result = sqlx::query_as::<_, AttendanceModel>(
            r#"
            SELECT member_id, event_external_id, status, checked_in_at
            FROM attendances
            WHERE member_id = $1 AND event_external_id = $2
            "#,
        )
        .bind(member_id.into_inner())
        .bind(event_external_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Attendance::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn checked_in_count_by_member(&self, member_id: MemberId) -> RepoResult<u32> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM attendances
            WHERE member_id = $1 AND status = $2 AND checked_in_at IS NOT NULL
            "#,
        )
        .bind(member_id.into_inner())
        .bind(AttendanceStatus::CheckedIn.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    #[instrument(skip(self))]
    async fn register(&self, member_id: MemberId, event_external_id: &str) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendances (member_id, event_external_id, status, checked_in_at)
            VALUES ($1, $2, $3, NULL)
            ON CONFLICT (member_id, event_external_id) DO NOTHING
            "#,
        )
        .bind(member_id.into_inner())
        .bind(event_external_id)
        .bind(AttendanceStatus::Registered.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }

    #[instrument(skip(self))]
    async fn check_in(
        &self,
        member_id: MemberId,
        event_external_id: &str,
        at: DateTime<Utc>,
    ) -> RepoResult<bool> {
        // The WHERE on the conflict branch leaves an existing check-in untouched,
        // so a concurrent duplicate affects zero rows instead of failing.
        let result = sqlx::query(
            r#"
            INSERT INTO attendances (member_id, event_external_id, status, checked_in_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (member_id, event_external_id)
            DO UPDATE SET status = EXCLUDED.status, checked_in_at = EXCLUDED.checked_in_at
            WHERE attendances.status <> EXCLUDED.status OR attendances.checked_in_at IS NULL
            "#,
        )
        .bind(member_id.into_inner())
        .bind(event_external_id)
        .bind(AttendanceStatus::CheckedIn.as_str())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() == 1)
    }
}
