//! The connection abstraction every higher layer is written against.
//!
//! [`Connection`] models one live database session. Exclusivity is
//! enforced by `&mut self` receivers: a given instance serves at most one
//! logical operation at a time, checked at compile time rather than with a
//! runtime lock. Concurrent callers use distinct instances; no
//! cross-connection coordination is provided.
//!
//! Execution results are returned per call as an [`ExecResult`] instead of
//! being parked in per-connection mutable state, so two callers can never
//! observe each other's counters.

use crate::error::Result;
use crate::query::Query;
use crate::row::Row;

/// Outcome of one `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    /// The auto-generated identifier of the last inserted row, when the
    /// statement generated one.
    pub last_insert_id: Option<u64>,
    /// Rows affected by the statement. For `INSERT IGNORE`, collided rows
    /// are not counted.
    pub rows_affected: u64,
}

/// One live database session.
///
/// All operations block the calling thread until the server round-trip
/// completes. Every method fails with
/// [`DatabaseError::ConnectionClosed`](crate::DatabaseError::ConnectionClosed)
/// once the session has been closed.
pub trait Connection {
    /// Executes a non-parameterized statement (schema changes, grants).
    fn execute_ddl(&mut self, sql: &str) -> Result<()>;

    /// Executes a parameterized statement, binding each parameter by its
    /// kind, and reports the generated id and affected-row count.
    fn execute(&mut self, query: &Query) -> Result<ExecResult>;

    /// Executes a parameterized read and materializes every result tuple
    /// before returning. An empty result set yields an empty vector; no
    /// server-side cursor stays open past the call.
    fn query(&mut self, query: &Query) -> Result<Vec<Row>>;

    /// Executes one raw script statement.
    fn execute_raw(&mut self, sql: &str) -> Result<()>;

    /// Reports whether the session currently auto-commits each statement.
    fn is_auto_commit(&mut self) -> Result<bool>;

    /// Sets the session auto-commit mode.
    fn set_auto_commit(&mut self, enabled: bool) -> Result<()>;

    /// Commits the open transaction.
    fn commit(&mut self) -> Result<()>;

    /// Rolls back the open transaction.
    fn rollback(&mut self) -> Result<()>;

    /// Releases the underlying session. Closing an already-closed
    /// connection is a no-op.
    fn close(&mut self) -> Result<()>;
}
