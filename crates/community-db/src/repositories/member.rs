//! PostgreSQL implementation of MemberRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::Member;
use community_core::error::DomainError;
use community_core::traits::{MemberRepository, RepoResult};
use community_core::value_objects::MemberId;

use crate::mappers::streak_to_db;
use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of MemberRepository
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    /// Create a new PgMemberRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r#"
            SELECT id, email, streak_count, is_admin, created_at, updated_at
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Member::from))
    }

    #[instrument(skip(self))]
    async fn list_ids(&self) -> RepoResult<Vec<MemberId>> {
        let ids = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            SELECT id FROM members ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids.into_iter().map(MemberId::from_uuid).collect())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO members (id, email, streak_count, is_admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(member.id.into_inner())
        .bind(&member.email)
        .bind(streak_to_db(member.streak_count))
        .bind(member.is_admin)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::InvalidData(format!("member already exists: {}", member.email))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn set_streak_count(&self, id: MemberId, count: u32) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE members
            SET streak_count = $2,
                updated_at = CASE WHEN streak_count = $2 THEN updated_at ELSE NOW() END
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .bind(streak_to_db(count))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(id));
        }

        Ok(())
    }
}
