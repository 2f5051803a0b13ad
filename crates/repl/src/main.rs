//! Interactive driver: reads lines from stdin, dispatches `.`-prefixed meta
//! commands, and otherwise hands the line to the database and prints its
//! outcome the way a `db >` session is expected to read.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use common::pretty::format_row;
use database::{Database, Error};
use executor::ExecuteOutcome;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Parser, Debug)]
#[command(name = "db-repl", about = "Single-user REPL for the row-store database")]
struct Args {
    /// Schema file describing every table to open.
    schema_file: PathBuf,

    /// Directory holding each table's data file.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut db = Database::open(&args.schema_file, &args.data_dir)?;

    let mut rl = DefaultEditor::new()?;
    loop {
        match rl.readline("db > ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if !process_line(&mut db, &line) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Internal error: {err}");
                break;
            }
        }
    }

    db.close()?;
    Ok(())
}

/// Run one line. Returns `false` when the session should end.
fn process_line(db: &mut Database, line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() {
        return true;
    }

    if line.starts_with('.') {
        return process_meta_command(line);
    }

    match db.execute(line) {
        Ok(outcome) => print_outcome(outcome),
        Err(Error::Fatal(err)) => {
            eprintln!("Internal error: {err}");
            return false;
        }
        Err(err) => println!("{err}"),
    }
    true
}

/// Returns `false` for `.exit`, which triggers a clean shutdown.
fn process_meta_command(line: &str) -> bool {
    if line == ".exit" {
        return false;
    }
    println!("Unrecognized command '{line}'");
    true
}

fn print_outcome(outcome: ExecuteOutcome) {
    match outcome {
        ExecuteOutcome::Selected(rows) => {
            for row in &rows {
                println!("{}", format_row(row));
            }
        }
        ExecuteOutcome::Inserted | ExecuteOutcome::Updated(_) | ExecuteOutcome::Deleted(_) => {}
    }
    println!("Executed.");
}
