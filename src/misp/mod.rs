//! MISP client layer
//!
//! Provides configuration loading, connection handling, and query
//! execution against a MISP instance, behind a trait for testability.

pub mod client;
pub mod config;
pub mod query;
pub mod traits;

pub use client::{Connection, Matches};
pub use config::MispConfig;
pub use query::{Query, QueryParameters};
pub use traits::MispSearch;
