//! Error taxonomy shared across the workspace.
//!
//! Provides a unified error type covering connection state, statement
//! execution, row access, resource loading, and migration failures.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Operation attempted on a session that is no longer live.
    #[error("connection is closed")]
    ConnectionClosed,

    /// The driver failed to establish a session.
    #[error("unable to connect to database: {0}")]
    Connect(String),

    /// The server rejected a statement. For script statements `line` is the
    /// 1-based source line of the failing statement; `code` is the server
    /// error code when one was reported.
    #[error("error executing '{statement}'{}: {message}", .line.map(|l| format!(" (line {l})")).unwrap_or_default())]
    Statement {
        /// The offending statement text.
        statement: String,
        /// 1-based source line within a script, when applicable.
        line: Option<usize>,
        /// Server error code, when the driver reported one.
        code: Option<u16>,
        /// Driver/server message.
        message: String,
    },

    /// Row lookup for a column that is not part of the result.
    #[error("row does not contain column: {0}")]
    MissingColumn(String),

    /// A stored value could not be parsed as the requested type.
    #[error("cannot read column '{column}' as {expected}: {value:?}")]
    TypeCoercion {
        /// The column whose value failed to parse.
        column: String,
        /// The requested Rust type.
        expected: &'static str,
        /// The raw stored value.
        value: String,
    },

    /// A named script resource failed to load.
    #[error("unable to load script resource: {0}")]
    ResourceNotFound(String),

    /// An upgrade step reported failure or returned an error.
    #[error("unable to upgrade database from v{previous} to v{required}")]
    UpgradeFailed {
        /// The version the database was at when the step was attempted.
        previous: u32,
        /// The version the step was meant to reach.
        required: u32,
    },

    /// File I/O failure while loading a script.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatabaseError {
    /// Builds a [`Statement`](Self::Statement) error with no script context.
    pub fn statement(statement: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Statement {
            statement: statement.into(),
            line: None,
            code: None,
            message: message.into(),
        }
    }

    /// Returns the server error code, if this is a statement error that
    /// carries one.
    pub fn server_code(&self) -> Option<u16> {
        match self {
            Self::Statement { code, .. } => *code,
            _ => None,
        }
    }
}

/// Convenience alias for results with [`DatabaseError`].
pub type Result<T> = std::result::Result<T, DatabaseError>;
