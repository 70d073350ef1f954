//! MySQL backend for the bedrock database layer.
//!
//! Wraps a synchronous MySQL connection behind the [`bedrock_core::Connection`]
//! trait and layers the administrative tooling on top: delimiter-aware
//! script execution, schema version tracking, incremental migrations, and
//! account provisioning.
//!
//! # Example
//!
//! ```no_run
//! use bedrock_core::{Connection, DatabaseProperties, Query};
//! use bedrock_mysql::{Initializer, MysqlDatabase};
//!
//! # fn demo() -> bedrock_core::Result<()> {
//! let properties = DatabaseProperties {
//!     schema: "app".to_string(),
//!     ..DatabaseProperties::default()
//! };
//! let database = MysqlDatabase::new(&properties);
//!
//! let mut conn = database.connect()?;
//! Initializer::new()
//!     .with_init_script("schema/init.sql")
//!     .initialize(&mut conn)?;
//!
//! let rows = conn.query(&Query::new("SELECT id FROM widgets WHERE name = ?").bind("gear"))?;
//! # Ok(())
//! # }
//! ```

mod connection;
mod convert;
mod initializer;
mod provision;
mod script;
mod version;

#[cfg(test)]
mod test_util;

pub use connection::{MysqlConnection, MysqlDatabase};
pub use initializer::{Initializer, UpgradeHandler, UpgradeUnsupported};
pub use provision::{initialize_schema, maintenance_credentials};
pub use script::{parse_script, parse_script_with, ScriptRunner, ScriptStatement};
pub use version::{current_version, record_version};
