use thiserror::Error;

/// Prepare-time failure, with a `Display` that is exactly the line the
/// REPL prints, no wrapping, no prefix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Syntax error.")]
    Syntax,
    #[error("Unrecognized keyword at start of '{0}'.")]
    UnknownStatement(String),
    #[error("Table not found.")]
    UnknownTable,
    #[error("String is too long.")]
    StringTooLong,
    #[error("ID must be positive.")]
    NegativeId,
    #[error("Internal error.")]
    Internal,
}
