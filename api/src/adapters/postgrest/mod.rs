//! PostgREST adapters
//!
//! Implementations of the query and session ports against the hosted
//! backend's REST (`/rest/v1`) and auth (`/auth/v1`) endpoints.

pub mod client;
pub mod query_string;

pub use client::PostgrestClient;
