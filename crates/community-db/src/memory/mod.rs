//! In-memory storage
//!
//! [`MemoryStore`] implements every repository trait on top of `DashMap`s.
//! Uniqueness per (member, event) and per (member, badge) goes through the
//! map's entry API, so concurrent duplicate writes behave like the
//! PostgreSQL `ON CONFLICT` paths: the loser is a no-op.

mod store;

pub use store::MemoryStore;
