//! Output writing for search results
//!
//! Matches are printed as newline-delimited JSON, one document per line,
//! in the order the server yielded them. A record that fails to serialize
//! aborts the whole run; there is no per-record skipping.

use crate::error::Result;

use serde_json::Value;
use std::io::Write;

/// Write each match as one JSON line
///
/// Already-written lines are flushed before an error is returned.
pub fn write_matches<W, I>(writer: &mut W, matches: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = Value>,
{
    for record in matches {
        let line = match serde_json::to_string(&record) {
            Ok(line) => line,
            Err(e) => {
                writer.flush()?;
                return Err(e.into());
            }
        };
        writeln!(writer, "{}", line)?;
    }

    writer.flush()?;
    Ok(())
}
