//! Migration orchestration: bootstrap a fresh database, then walk an
//! existing one forward a single version at a time.
//!
//! A fresh database (version 0) gets the embedded bootstrap script, which
//! creates the `metadata` table and seeds version 1, followed by an
//! optional caller-supplied initial-schema script. An out-of-date database
//! gets the caller's [`UpgradeHandler`] invoked once per version
//! increment, with a version row recorded after each successful step.
//!
//! # Example
//!
//! ```no_run
//! use bedrock_mysql::{Initializer, MysqlConnection};
//!
//! # fn demo(conn: &mut MysqlConnection) -> bedrock_core::Result<()> {
//! let mut initializer = Initializer::new()
//!     .with_init_script("schema/init.sql")
//!     .with_required_version(3)
//!     .with_upgrade_handler(|_conn: &mut MysqlConnection, _previous: u32, _required: u32| {
//!         // Apply the single step previous -> required here.
//!         Ok(true)
//!     });
//! initializer.initialize(conn)?;
//! # Ok(())
//! # }
//! ```

use std::fs;
use std::path::PathBuf;

use bedrock_core::{Connection, DatabaseError, Result};
use tracing::info;

use crate::script::ScriptRunner;
use crate::version;

/// Creates the `metadata` table and seeds version 1.
const BOOTSTRAP_SCRIPT: &str = include_str!("../queries/metadata_init.sql");

/// Applies one schema upgrade step.
///
/// Invoked once per single-version increment as `(previous, previous + 1)`
/// — never skipping a version, even when the target is several versions
/// ahead. Implementations must be idempotent (a crash between an applied
/// step and its version row means the step runs again on the next start)
/// and must not insert `metadata` rows themselves; the orchestrator records
/// each completed step.
pub trait UpgradeHandler<C: Connection> {
    /// Returns `Ok(true)` when the step was applied, `Ok(false)` to report
    /// a clean failure, or an error for anything else. Both failure forms
    /// abort the migration; already-applied steps remain applied.
    fn on_upgrade(&mut self, conn: &mut C, previous: u32, required: u32) -> Result<bool>;
}

impl<C: Connection, F> UpgradeHandler<C> for F
where
    F: FnMut(&mut C, u32, u32) -> Result<bool>,
{
    fn on_upgrade(&mut self, conn: &mut C, previous: u32, required: u32) -> Result<bool> {
        self(conn, previous, required)
    }
}

/// Placeholder handler for bootstrap-only deployments; fails every step.
pub struct UpgradeUnsupported;

impl<C: Connection> UpgradeHandler<C> for UpgradeUnsupported {
    fn on_upgrade(&mut self, _conn: &mut C, previous: u32, required: u32) -> Result<bool> {
        let _ = (previous, required);
        Ok(false)
    }
}

/// Drives bootstrap and incremental upgrades against one connection.
pub struct Initializer<H> {
    init_script: Option<PathBuf>,
    required_version: Option<u32>,
    upgrade_handler: H,
}

impl Initializer<UpgradeUnsupported> {
    /// Creates a bootstrap-only initializer: no initial-schema script, no
    /// upgrade target.
    pub fn new() -> Self {
        Self {
            init_script: None,
            required_version: None,
            upgrade_handler: UpgradeUnsupported,
        }
    }
}

impl Default for Initializer<UpgradeUnsupported> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Initializer<H> {
    /// Adds an initial-schema script, run once right after bootstrap.
    #[must_use]
    pub fn with_init_script(mut self, path: impl Into<PathBuf>) -> Self {
        self.init_script = Some(path.into());
        self
    }

    /// Sets the version the database must reach.
    #[must_use]
    pub fn with_required_version(mut self, required_version: u32) -> Self {
        self.required_version = Some(required_version);
        self
    }

    /// Replaces the upgrade handler.
    #[must_use]
    pub fn with_upgrade_handler<H2>(self, upgrade_handler: H2) -> Initializer<H2> {
        Initializer {
            init_script: self.init_script,
            required_version: self.required_version,
            upgrade_handler,
        }
    }

    /// Brings the database to the required version.
    ///
    /// Idempotent: a database that is already current is left untouched.
    ///
    /// # Errors
    ///
    /// * [`DatabaseError::ResourceNotFound`] if the initial-schema script
    ///   cannot be loaded.
    /// * [`DatabaseError::UpgradeFailed`] if the handler reports a clean
    ///   failure; handler errors propagate as-is. Either way the migration
    ///   stops and completed steps stay recorded.
    /// * [`DatabaseError::Statement`] if bootstrap or version bookkeeping
    ///   fails.
    pub fn initialize<C: Connection>(&mut self, conn: &mut C) -> Result<()>
    where
        H: UpgradeHandler<C>,
    {
        if version::current_version(conn)? < 1 {
            info!("bootstrapping migration metadata");
            let runner = ScriptRunner::new(false, true);
            runner.run(conn, BOOTSTRAP_SCRIPT)?;

            if let Some(path) = &self.init_script {
                let script = fs::read_to_string(path)
                    .map_err(|_| DatabaseError::ResourceNotFound(path.display().to_string()))?;
                info!(script = %path.display(), "running initial schema script");
                runner.run(conn, &script)?;
            }
        }

        let mut current = version::current_version(conn)?;
        if let Some(required) = self.required_version {
            while current < required {
                let next = current + 1;
                info!(from = current, to = next, "applying upgrade step");
                let applied = self.upgrade_handler.on_upgrade(conn, current, next)?;
                if !applied {
                    return Err(DatabaseError::UpgradeFailed {
                        previous: current,
                        required: next,
                    });
                }
                version::record_version(conn, next)?;
                current = next;
            }
        }
        Ok(())
    }
}
