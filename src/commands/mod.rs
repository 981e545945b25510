//! Command handlers
//!
//! The search command is the only one; version and completions are
//! handled directly in main.

pub mod search;

pub use search::run_search;
