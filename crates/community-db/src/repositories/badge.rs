//! PostgreSQL implementation of BadgeRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use community_core::entities::{Badge, MemberBadge};
use community_core::error::DomainError;
use community_core::traits::{BadgeRepository, RepoResult};
use community_core::value_objects::{BadgeId, MemberBadgeId, MemberId};

use crate::models::{BadgeModel, MemberBadgeModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of BadgeRepository
#[derive(Clone)]
pub struct PgBadgeRepository {
    pool: PgPool,
}

impl PgBadgeRepository {
    /// Create a new PgBadgeRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BadgeRepository for PgBadgeRepository {
    #[instrument(skip(self))]
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Badge>> {
        let result = sqlx::query_as::<_, BadgeModel>(
            r#"
            SELECT id, name, icon, criteria FROM badges WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Badge::from))
    }

    #[instrument(skip(self))]
    async fn find_by_names(&self, names: &[&str]) -> RepoResult<Vec<Badge>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let names: Vec<String> = names.iter().map(|n| (*n).to_string()).collect();
        let results = sqlx::query_as::<_, BadgeModel>(
            r#"
            SELECT id, name, icon, criteria FROM badges WHERE name = ANY($1)
            "#,
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Badge::from).collect())
    }

    #[instrument(skip(self))]
    async fn has_badge(&self, member_id: MemberId, badge_id: BadgeId) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM member_badges WHERE member_id = $1 AND badge_id = $2)
            "#,
        )
        .bind(member_id.into_inner())
        .bind(badge_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(exists)
    }

    #[instrument(skip(self))]
    async fn find_by_member(&self, member_id: MemberId) -> RepoResult<Vec<MemberBadge>> {
        let results = sqlx::query_as::<_, MemberBadgeModel>(
            r#"
            SELECT id, member_id, badge_id, awarded_at
            FROM member_badges
            WHERE member_id = $1
            ORDER BY awarded_at
            "#,
        )
        .bind(member_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(MemberBadge::from).collect())
    }

    #[instrument(skip(self))]
    async fn grant(
        &self,
        member_id: MemberId,
        badge_id: BadgeId,
    ) -> RepoResult<Option<MemberBadge>> {
        let result = sqlx::query_as::<_, MemberBadgeModel>(
            r#"
            INSERT INTO member_badges (id, member_id, badge_id, awarded_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (member_id, badge_id) DO NOTHING
            RETURNING id, member_id, badge_id, awarded_at
            "#,
        )
        .bind(MemberBadgeId::new_v4().into_inner())
        .bind(member_id.into_inner())
        .bind(badge_id.into_inner())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return DomainError::InvalidData(format!(
                        "grant references unknown member {member_id} or badge {badge_id}"
                    ));
                }
            }
            map_db_error(e)
        })?;

        Ok(result.map(MemberBadge::from))
    }

    #[instrument(skip(self, badge), fields(name = %badge.name))]
    async fn create(&self, badge: &Badge) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO badges (id, name, icon, criteria)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(badge.id.into_inner())
        .bind(&badge.name)
        .bind(&badge.icon)
        .bind(&badge.criteria)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::DuplicateBadgeName(badge.name.clone())))?;

        Ok(())
    }
}
