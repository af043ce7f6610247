//! # community-db
//!
//! Storage adapters implementing the repository traits defined in
//! `community-core`.
//!
//! ## Overview
//!
//! - PostgreSQL connection pool and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repository implementations
//! - [`MemoryStore`], a concurrent in-memory implementation of every
//!   repository trait, used as a fixture and for local runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use community_common::AppConfig;
//! use community_db::{create_pool, PgMemberRepository};
//! use community_core::MemberRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env()?;
//!     let pool = create_pool(&config.database).await?;
//!     let members = PgMemberRepository::new(pool);
//!     let ids = members.list_ids().await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{
    PgAttendanceRepository, PgBadgeRepository, PgEventRepository, PgMemberRepository,
};
