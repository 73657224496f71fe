//! Domain layer
//!
//! Contains pure business logic with no external dependencies.
//! - `entities`: Domain models representing posts, tags and users
//! - `image`: Normalization of the duck-typed post image field
//! - `ports`: Trait definitions for external dependencies

pub mod entities;
pub mod image;
pub mod ports;
