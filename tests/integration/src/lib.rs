//! Integration test utilities for the community core
//!
//! This crate provides an in-memory community harness for end-to-end tests
//! of the check-in, streak and badge flow.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
