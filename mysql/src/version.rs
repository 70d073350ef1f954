//! Schema version bookkeeping in the `metadata` table.
//!
//! The table is append-only: one row per completed bootstrap/upgrade step,
//! with the current version defined as the most recently inserted row.
//! Only the migration orchestrator writes here; upgrade callbacks must
//! never record their own rows.

use std::time::{SystemTime, UNIX_EPOCH};

use bedrock_core::{Connection, DatabaseError, Query, Result};

/// `metadata` does not exist yet: the database has never been bootstrapped.
const ER_NO_SUCH_TABLE: u16 = 1146;

const VERSION_QUERY: &str = "SELECT version FROM metadata ORDER BY id DESC LIMIT 1";

/// Reads the current schema version.
///
/// Returns 0 when the metadata table holds no rows or does not exist —
/// the two genuinely-uninitialized states. Every other failure (connection
/// trouble, permission errors) propagates rather than masquerading as a
/// fresh database, so a transient outage can never re-trigger bootstrap.
pub fn current_version<C: Connection>(conn: &mut C) -> Result<u32> {
    let rows = match conn.query(&Query::new(VERSION_QUERY)) {
        Ok(rows) => rows,
        Err(error) if error.server_code() == Some(ER_NO_SUCH_TABLE) => return Ok(0),
        Err(error) => return Err(error),
    };

    match rows.first() {
        None => Ok(0),
        Some(row) => {
            let version = row.get_i64("version")?.unwrap_or(0);
            u32::try_from(version).map_err(|_| DatabaseError::TypeCoercion {
                column: "version".to_string(),
                expected: "u32",
                value: version.to_string(),
            })
        }
    }
}

/// Appends one completed-step row with the current time in epoch seconds.
pub fn record_version<C: Connection>(conn: &mut C, version: u32) -> Result<()> {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    conn.execute(
        &Query::new("INSERT INTO metadata (version, timestamp) VALUES (?, ?)")
            .bind(version)
            .bind(timestamp),
    )?;
    Ok(())
}
