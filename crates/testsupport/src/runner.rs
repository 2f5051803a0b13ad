//! Run a multi-line script of statements and render the output the same
//! way the REPL would, for tests that assert on exact session transcripts.

use common::pretty::format_row;
use database::{Database, Error};
use executor::ExecuteOutcome;

/// Run every non-blank, non-comment line of `script` against `db` and
/// return the concatenated output, one line per printed value plus an
/// `Executed.`/error line per statement.
pub fn run_script(db: &mut Database, script: &str) -> String {
    let mut output = String::new();
    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match db.execute(line) {
            Ok(ExecuteOutcome::Selected(rows)) => {
                for row in &rows {
                    output.push_str(&format_row(row));
                    output.push('\n');
                }
                output.push_str("Executed.\n");
            }
            Ok(ExecuteOutcome::Inserted)
            | Ok(ExecuteOutcome::Updated(_))
            | Ok(ExecuteOutcome::Deleted(_)) => output.push_str("Executed.\n"),
            Err(Error::Fatal(err)) => panic!("fatal error running script line {line:?}: {err}"),
            Err(err) => {
                output.push_str(&err.to_string());
                output.push('\n');
            }
        }
    }
    output
}
