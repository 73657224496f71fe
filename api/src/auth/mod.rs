//! Authentication
//!
//! Bearer-token session middleware backed by the hosted auth service.

pub mod session;

pub use session::session_middleware;
