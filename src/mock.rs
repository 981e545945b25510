//! Mock implementations for testing
//!
//! Provides a mock MISP search client for unit testing without a live
//! instance.

use crate::error::MispError;
use crate::misp::client::Matches;
use crate::misp::query::Query;
use crate::misp::traits::MispSearch;

use serde_json::Value;
use std::sync::Mutex;

/// Mock MISP client for testing
///
/// Returns canned results (or a forced error) and records the last query
/// it was asked to run.
#[derive(Debug, Default)]
pub struct MockMispClient {
    results: Vec<Value>,
    failure: Option<String>,
    last_query: Mutex<Option<Query>>,
}

impl MockMispClient {
    /// Create a mock returning zero matches
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the records every search returns
    pub fn with_results(mut self, results: Vec<Value>) -> Self {
        self.results = results;
        self
    }

    /// Builder: make every search fail with the given message
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// The query passed to the most recent search call
    pub fn last_query(&self) -> Option<Query> {
        self.last_query.lock().unwrap().clone()
    }
}

impl MispSearch for MockMispClient {
    fn search(&self, query: &Query) -> Result<Matches, MispError> {
        *self.last_query.lock().unwrap() = Some(query.clone());

        if let Some(message) = &self.failure {
            return Err(MispError::Response {
                url: "mock://misp".to_string(),
                message: message.clone(),
            });
        }

        Ok(Matches::from_records(self.results.clone()))
    }
}
