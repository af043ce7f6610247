//! Entity to model mappers
//!
//! - `From<Model> for Entity` (or `TryFrom` where stored text must be parsed)
//! - `streak_to_db`: clamp a streak into the signed column type

mod attendance;
mod badge;
mod event;
mod member;

pub use member::streak_to_db;
