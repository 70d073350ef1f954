//! Multi-statement SQL script execution with redefinable delimiters.
//!
//! Administrative scripts routinely carry stored-routine bodies whose text
//! contains the `;` terminator, so the terminator itself must be
//! redefinable from inside the script:
//!
//! ```sql
//! DELIMITER //
//! CREATE PROCEDURE bump()
//! BEGIN
//!     UPDATE counters SET n = n + 1;
//! END //
//! DELIMITER ;
//! ```
//!
//! Parsing is a single line-oriented pass ([`parse_script`]) producing
//! [`ScriptStatement`]s; [`ScriptRunner`] executes them against any
//! [`Connection`] with configurable transaction and error discipline.

use std::sync::LazyLock;

use bedrock_core::{Connection, DatabaseError, Result};
use regex::Regex;
use tracing::{debug, error, warn};

const DEFAULT_DELIMITER: &str = ";";

// Ignores surrounding whitespace, tolerates a leading `--` comment marker,
// and allows an optional equals sign: `DELIMITER //`, `--delimiter=$$`, ...
static DELIMITER_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(--)?\s*delimiter\s*=?\s*(\S+)\s*.*$")
        .expect("static regex must compile")
});

/// One delimiter-terminated, comment-stripped statement from a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStatement {
    /// Statement text with the terminating delimiter stripped.
    pub text: String,
    /// 1-based line number of the line that terminated the statement.
    pub line_number: usize,
}

/// Splits a script into statements using the default `;` delimiter.
///
/// Blank lines and `//` or `--` comment lines are skipped. A line matching
/// the delimiter-redefinition directive changes the active terminator for
/// all following lines (and always switches back to end-of-line matching).
/// Unterminated trailing content becomes a final statement; a script that
/// ends on a directive produces nothing for that position.
///
/// # Examples
///
/// ```
/// use bedrock_mysql::parse_script;
///
/// let statements = parse_script("CREATE TABLE a (id INT);\nDROP TABLE a;\n");
/// assert_eq!(statements.len(), 2);
/// assert_eq!(statements[0].text, "CREATE TABLE a (id INT)");
/// ```
pub fn parse_script(script: &str) -> Vec<ScriptStatement> {
    parse_script_with(script, DEFAULT_DELIMITER, false)
}

/// Splits a script starting from an explicit delimiter state.
///
/// With `full_line_delimiter` set, a statement ends only on a line that
/// consists of exactly the delimiter, rather than one that ends with it.
pub fn parse_script_with(
    script: &str,
    delimiter: &str,
    full_line_delimiter: bool,
) -> Vec<ScriptStatement> {
    let mut delimiter = delimiter.to_string();
    let mut full_line_delimiter = full_line_delimiter;
    let mut statements = Vec::new();
    let mut buffer = String::new();
    let mut line_number = 0;

    for line in script.lines() {
        line_number += 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }
        if let Some(captures) = DELIMITER_DIRECTIVE.captures(trimmed) {
            delimiter = captures[2].to_string();
            full_line_delimiter = false;
            continue;
        }
        if trimmed.starts_with("--") {
            continue;
        }

        let terminated = if full_line_delimiter {
            trimmed == delimiter
        } else {
            trimmed.ends_with(&delimiter)
        };

        if terminated {
            // Keep everything up to the final delimiter occurrence.
            if let Some(cut) = line.rfind(&delimiter) {
                buffer.push_str(&line[..cut]);
            }
            push_statement(&mut statements, &mut buffer, line_number);
        } else {
            buffer.push_str(line);
            buffer.push('\n');
        }
    }

    push_statement(&mut statements, &mut buffer, line_number);
    statements
}

fn push_statement(statements: &mut Vec<ScriptStatement>, buffer: &mut String, line_number: usize) {
    let text = buffer.trim().to_string();
    buffer.clear();
    if !text.is_empty() {
        statements.push(ScriptStatement { text, line_number });
    }
}

/// Executes parsed scripts against a [`Connection`].
///
/// The runner toggles the session's auto-commit mode to `auto_commit` for
/// the duration of the run and restores the prior mode on every exit path.
/// When auto-commit is off, one commit is issued after a clean run and a
/// rollback on the way out covers whatever was not committed. A failing
/// statement either aborts the script (`stop_on_error`) or is logged and
/// skipped.
///
/// # Examples
///
/// ```no_run
/// use bedrock_mysql::{MysqlConnection, ScriptRunner};
///
/// # fn demo(conn: &mut MysqlConnection) -> bedrock_core::Result<()> {
/// let runner = ScriptRunner::new(false, true);
/// runner.run(conn, "CREATE TABLE a (id INT);\nCREATE TABLE b (id INT);\n")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScriptRunner {
    auto_commit: bool,
    stop_on_error: bool,
}

impl ScriptRunner {
    /// Creates a runner with the given transaction and error discipline.
    pub fn new(auto_commit: bool, stop_on_error: bool) -> Self {
        Self {
            auto_commit,
            stop_on_error,
        }
    }

    /// Parses and executes `script` on `conn`.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Statement`] carrying the failing statement
    /// text and its 1-based source line when a statement fails and
    /// `stop_on_error` is set, or when transaction control itself fails.
    pub fn run<C: Connection>(&self, conn: &mut C, script: &str) -> Result<()> {
        let statements = parse_script(script);

        let original_auto_commit = conn.is_auto_commit()?;
        if original_auto_commit != self.auto_commit {
            conn.set_auto_commit(self.auto_commit)?;
        }

        let result = self.execute_all(conn, &statements);

        // Unconditional cleanup: after a clean run the rollback covers an
        // already-empty transaction, so its own failure never overrides the
        // script outcome, and the session mode is always restored.
        if !self.auto_commit {
            if let Err(failure) = conn.rollback() {
                warn!(%failure, "rollback after script run failed");
            }
        }
        if original_auto_commit != self.auto_commit {
            if let Err(failure) = conn.set_auto_commit(original_auto_commit) {
                warn!(%failure, "failed to restore auto-commit mode");
            }
        }

        result
    }

    fn execute_all<C: Connection>(
        &self,
        conn: &mut C,
        statements: &[ScriptStatement],
    ) -> Result<()> {
        for statement in statements {
            debug!(line = statement.line_number, "executing script statement");
            if let Err(failure) = conn.execute_raw(&statement.text) {
                let (code, message) = match &failure {
                    DatabaseError::Statement { code, message, .. } => (*code, message.clone()),
                    other => (None, other.to_string()),
                };
                error!(
                    line = statement.line_number,
                    statement = %statement.text,
                    %message,
                    "script statement failed"
                );
                if self.stop_on_error {
                    return Err(DatabaseError::Statement {
                        statement: statement.text.clone(),
                        line: Some(statement.line_number),
                        code,
                        message,
                    });
                }
            }
        }

        if !self.auto_commit {
            conn.commit()?;
        }
        Ok(())
    }
}
