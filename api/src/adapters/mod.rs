//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod postgrest;

pub use postgrest::PostgrestClient;
