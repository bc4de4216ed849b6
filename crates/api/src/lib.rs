//! Tomohigara site server library.
//!
//! Serves the locale-prefixed bug-report pages (as JSON page contexts), the
//! message dictionaries and a health check. Exposed as a library so the
//! binary and the integration tests build the exact same router.

pub mod config;
pub mod dictionaries;
pub mod error;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
