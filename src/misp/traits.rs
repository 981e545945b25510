//! Trait definitions for MISP operations
//!
//! These traits abstract over the HTTP client to enable testing with mocks.

use crate::error::MispError;
use crate::misp::client::Matches;
use crate::misp::query::Query;

/// Trait for executing searches against a MISP instance
///
/// This trait abstracts the search operation, allowing for mock
/// implementations in tests while using a real connection in production.
pub trait MispSearch {
    /// Execute a search and return the matching records
    ///
    /// The call blocks until the server answers or fails. The returned
    /// sequence is finite, forward-only, and yields zero or more records
    /// in server order.
    fn search(&self, query: &Query) -> Result<Matches, MispError>;
}
