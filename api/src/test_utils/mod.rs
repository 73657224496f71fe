//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! The in-memory query client evaluates filters the way the backend does
//! (string comparison, `eq` and `in`) and records every call, so tests can
//! assert which lookups a resolution issued as well as what it returned.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
