//! Search command implementation
//!
//! Validates the parsed flags, loads the configuration, and executes the
//! search against the MISP instance. Validation runs in a fixed order and
//! the first failing check wins; nothing is loaded and no connection is
//! opened until every check has passed.

use crate::cli::args::Cli;
use crate::cli::output::write_matches;
use crate::error::{Result, UsageError};
use crate::misp::config::default_config_path;
use crate::misp::{Connection, MispConfig, MispSearch, Query, QueryParameters};

use regex::Regex;
use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

static MISP_DATE: OnceLock<Regex> = OnceLock::new();

fn misp_date_re() -> &'static Regex {
    MISP_DATE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap())
}

/// A validated search request: the query plus the config file to use
#[derive(Debug)]
pub struct SearchRequest {
    pub query: Query,
    pub config_path: PathBuf,
}

/// Execute the search command
pub fn run_search(cli: &Cli) -> Result<()> {
    let request = build_request(cli)?;

    let config = MispConfig::load(&request.config_path)?;
    let connection = Connection::from_config(&config)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    execute(&connection, &request.query, &mut handle)
}

/// Run a validated query through a search implementation and write NDJSON
pub fn execute<C, W>(client: &C, query: &Query, writer: &mut W) -> Result<()>
where
    C: MispSearch,
    W: io::Write,
{
    let matches = client.search(query)?;
    write_matches(writer, matches)
}

/// Validate flags and build the search request
///
/// Check order: search mode exclusivity, config file existence, from
/// date shape, to date shape. An empty date string counts as unset.
pub fn build_request(cli: &Cli) -> std::result::Result<SearchRequest, UsageError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(default_config_path);

    match (cli.attributes, cli.events) {
        (false, false) => return Err(UsageError::NoSearchMode),
        (true, true) => return Err(UsageError::BothSearchModes),
        _ => {}
    }

    if !config_path.is_file() {
        return Err(UsageError::ConfigNotFound(
            config_path.display().to_string(),
        ));
    }

    validate_date("from", cli.from.as_deref())?;
    validate_date("to", cli.to.as_deref())?;

    let params = QueryParameters {
        value: cli.value.clone(),
        type_: cli.type_.clone(),
        category: cli.category.clone(),
        org: cli.org.clone(),
        tags: cli.tags.clone(),
        from: cli.from.clone(),
        to: cli.to.clone(),
        last: cli.last.clone(),
        eventid: cli.eventid.clone(),
    };

    let query = if cli.attributes {
        Query::Attribute(params)
    } else {
        Query::Event(params)
    };

    Ok(SearchRequest { query, config_path })
}

fn validate_date(
    param: &'static str,
    value: Option<&str>,
) -> std::result::Result<(), UsageError> {
    match value {
        Some(date) if !date.is_empty() && !misp_date_re().is_match(date) => {
            Err(UsageError::InvalidDate {
                param,
                value: date.to_string(),
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::mock::MockMispClient;
    use clap::Parser;
    use serde_json::json;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn config_fixture() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Proto": "https", "Host": "misp.example.com", "APIKey": "k", "APIURL": ""}}"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_no_mode_rejected() {
        let cli = parse(&["mispq", "-v", "8.8.8.8"]);
        assert_eq!(build_request(&cli).unwrap_err(), UsageError::NoSearchMode);
    }

    #[test]
    fn test_both_modes_rejected() {
        let cli = parse(&["mispq", "-a", "-e"]);
        assert_eq!(
            build_request(&cli).unwrap_err(),
            UsageError::BothSearchModes
        );
    }

    #[test]
    fn test_mode_check_precedes_config_check() {
        // Both modes and a missing config file: the mode error wins.
        let cli = parse(&["mispq", "-a", "-e", "-c", "/nonexistent/config.json"]);
        assert_eq!(
            build_request(&cli).unwrap_err(),
            UsageError::BothSearchModes
        );
    }

    #[test]
    fn test_missing_config_names_path() {
        let cli = parse(&["mispq", "-a", "-c", "/nonexistent/config.json"]);
        match build_request(&cli).unwrap_err() {
            UsageError::ConfigNotFound(path) => {
                assert!(path.contains("/nonexistent/config.json"));
            }
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_from_date_rejected() {
        let config = config_fixture();
        for bad in ["2020/01/01", "abcd-ef-gh", "2020-1-1", "20200101"] {
            let cli = parse(&[
                "mispq",
                "-a",
                "-c",
                config.path().to_str().unwrap(),
                "--from",
                bad,
            ]);
            assert!(
                matches!(
                    build_request(&cli),
                    Err(UsageError::InvalidDate { param: "from", .. })
                ),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_invalid_to_date_rejected() {
        let config = config_fixture();
        let cli = parse(&[
            "mispq",
            "-a",
            "-c",
            config.path().to_str().unwrap(),
            "--to",
            "not-a-date",
        ]);
        assert!(matches!(
            build_request(&cli),
            Err(UsageError::InvalidDate { param: "to", .. })
        ));
    }

    #[test]
    fn test_empty_date_not_validated() {
        let config = config_fixture();
        let cli = parse(&[
            "mispq",
            "-a",
            "-c",
            config.path().to_str().unwrap(),
            "--from",
            "",
        ]);
        assert!(build_request(&cli).is_ok());
    }

    #[test]
    fn test_valid_request_builds_attribute_query() {
        let config = config_fixture();
        let cli = parse(&[
            "mispq",
            "-a",
            "-c",
            config.path().to_str().unwrap(),
            "-v",
            "8.8.8.8",
            "--from",
            "2020-01-01",
        ]);
        let request = build_request(&cli).unwrap();
        match request.query {
            Query::Attribute(params) => {
                assert_eq!(params.value.as_deref(), Some("8.8.8.8"));
                assert_eq!(params.from.as_deref(), Some("2020-01-01"));
            }
            Query::Event(_) => panic!("expected attribute query"),
        }
    }

    #[test]
    fn test_valid_request_builds_event_query() {
        let config = config_fixture();
        let cli = parse(&[
            "mispq",
            "-e",
            "-c",
            config.path().to_str().unwrap(),
            "--eventid",
            "42",
        ]);
        let request = build_request(&cli).unwrap();
        assert!(matches!(request.query, Query::Event(_)));
    }

    #[test]
    fn test_execute_zero_matches_empty_output() {
        let client = MockMispClient::new();
        let query = Query::Attribute(QueryParameters::default());
        let mut buf = Vec::new();

        execute(&client, &query, &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn test_execute_writes_one_line_per_match() {
        let client = MockMispClient::new().with_results(vec![
            json!({"value": "8.8.8.8"}),
            json!({"value": "1.2.3.4"}),
        ]);
        let query = Query::Attribute(QueryParameters::default());
        let mut buf = Vec::new();

        execute(&client, &query, &mut buf).unwrap();

        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(lines[0]).unwrap()["value"],
            "8.8.8.8"
        );
    }

    #[test]
    fn test_execute_records_dispatched_query() {
        let client = MockMispClient::new();
        let query = Query::Event(QueryParameters {
            eventid: Some("42".to_string()),
            ..Default::default()
        });
        let mut buf = Vec::new();

        execute(&client, &query, &mut buf).unwrap();

        let seen = client.last_query().unwrap();
        assert_eq!(seen.endpoint(), "/events/restSearch/json");
        assert_eq!(seen.parameters().eventid.as_deref(), Some("42"));
    }

    #[test]
    fn test_execute_propagates_search_error() {
        let client = MockMispClient::new().with_failure("connection refused");
        let query = Query::Attribute(QueryParameters::default());
        let mut buf = Vec::new();

        let err = execute(&client, &query, &mut buf).unwrap_err();
        assert!(matches!(err, AppError::Misp(_)));
        assert!(buf.is_empty());
    }
}
