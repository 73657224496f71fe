//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod query;
pub mod session;

pub use query::{Collection, Filter, Query, QueryClient};
pub use session::SessionVerifier;
