//! Query types for MISP searches
//!
//! Attribute and event searches accept the same parameter set but hit
//! different REST endpoints and come back in different response shapes,
//! so the parameters are tagged with the search kind.

use serde::Serialize;

/// Filter parameters accepted by both attribute and event searches
///
/// All fields are optional free-form strings; unset fields are omitted
/// from the request body so empty filters are never transmitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryParameters {
    /// Value to search for (IP, hash, domain, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Attribute type filter (e.g. "ip-dst", "md5")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Category filter (e.g. "Network activity")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Organisation filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    /// Tags filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    /// Start date, YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// End date, YYYY-MM-DD
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    /// Time window relative to now (e.g. "5d", "12h")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,

    /// Event ID filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventid: Option<String>,
}

/// A search query tagged with the kind of record it targets
///
/// Constructed only after mode validation, so a query is always exactly
/// one of the two kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Search for attributes (atomic indicators)
    Attribute(QueryParameters),
    /// Search for events (grouped indicators with context)
    Event(QueryParameters),
}

impl Query {
    /// REST endpoint path for this query kind
    pub fn endpoint(&self) -> &'static str {
        match self {
            Query::Attribute(_) => "/attributes/restSearch/json",
            Query::Event(_) => "/events/restSearch/json",
        }
    }

    /// Short name of the query kind, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Query::Attribute(_) => "attribute",
            Query::Event(_) => "event",
        }
    }

    /// The filter parameters carried by this query
    pub fn parameters(&self) -> &QueryParameters {
        match self {
            Query::Attribute(params) | Query::Event(params) => params,
        }
    }
}
