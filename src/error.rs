//! Error type shared by the statement processor, the row store and the REPL.
//!
//! The `Display` output of every user-facing variant is exactly the line the
//! REPL prints for it.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // ========== Parse Errors ==========
    #[error("Syntax error. Could not parse statement.")]
    Syntax,

    #[error("Unrecognized keyword at start of '{0}'.")]
    UnrecognizedStatement(String),

    // ========== Validation Errors ==========
    #[error("ID must be positive.")]
    NegativeId,

    #[error("String is too long.")]
    StringTooLong,

    // ========== Storage Errors ==========
    #[error("Error: Table full.")]
    TableFull,

    // ========== Meta-command Errors ==========
    #[error("Unrecognized command '{0}'")]
    UnrecognizedCommand(String),

    // ========== I/O Errors ==========
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the REPL can report this error and keep reading lines.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
