//! Schema and account provisioning with least privilege.
//!
//! Run once per deployment with a root session: creates the schema, a
//! full-privilege maintenance account scoped to it, and a restricted
//! application account. The maintenance credentials are *derived*, never
//! chosen — username `{schema}_maintenance`, password the lower-hex
//! SHA-256 of the root password — so re-running provisioning (or a second
//! process reconnecting later) always lands on the same account.
//!
//! Usernames and passwords are always parameter-bound; the only
//! interpolated value is the backtick-quoted schema identifier, which is
//! operator-supplied configuration rather than user data.

use bedrock_core::{Connection, Credentials, DatabaseProperties, Query, Result};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

/// `CREATE USER` for a name that already exists.
const ER_CANNOT_USER: u16 = 1396;

fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

/// Derives the maintenance credentials for a deployment.
///
/// Pure and deterministic: the same schema and root password always yield
/// the same pair, which is what lets a caller reconnect as the maintenance
/// user without re-running provisioning.
///
/// # Examples
///
/// ```
/// use bedrock_core::DatabaseProperties;
/// use bedrock_mysql::maintenance_credentials;
///
/// let properties = DatabaseProperties {
///     schema: "inventory".into(),
///     root_password: "hunter2".into(),
///     ..DatabaseProperties::default()
/// };
/// let credentials = maintenance_credentials(&properties);
/// assert_eq!(credentials.username, "inventory_maintenance");
/// assert_eq!(credentials.password.len(), 64);
/// ```
pub fn maintenance_credentials(properties: &DatabaseProperties) -> Credentials {
    Credentials::new(
        format!("{}_maintenance", properties.schema),
        hash_password(&properties.root_password),
    )
}

/// Creates the schema and both accounts, then reloads privileges.
///
/// Idempotent in intent: the schema is created with `IF NOT EXISTS`, and a
/// pre-existing account with the same name is tolerated (logged at `warn`
/// and left untouched, including its password). The grant statements run
/// either way. Every other failure is fatal.
///
/// # Errors
///
/// Returns [`DatabaseError::Statement`](bedrock_core::DatabaseError::Statement)
/// if the server rejects any provisioning statement.
pub fn initialize_schema<C: Connection>(
    conn: &mut C,
    properties: &DatabaseProperties,
) -> Result<()> {
    let maintenance = maintenance_credentials(properties);
    let application = properties.credentials();
    let schema = &properties.schema;

    info!(%schema, "provisioning schema and accounts");
    conn.execute_ddl(&format!("CREATE DATABASE IF NOT EXISTS `{schema}`"))?;

    create_user(conn, &maintenance)?;
    conn.execute(
        &Query::new(format!("GRANT ALL PRIVILEGES ON `{schema}`.* TO ?"))
            .bind(&maintenance.username),
    )?;

    create_user(conn, &application)?;
    conn.execute(
        &Query::new(format!(
            "GRANT SELECT, INSERT, DELETE, UPDATE, EXECUTE ON `{schema}`.* TO ?"
        ))
        .bind(&application.username),
    )?;

    conn.execute(&Query::new("FLUSH PRIVILEGES"))?;
    Ok(())
}

fn create_user<C: Connection>(conn: &mut C, credentials: &Credentials) -> Result<()> {
    let result = conn.execute(
        &Query::new("CREATE USER ? IDENTIFIED BY ?")
            .bind(&credentials.username)
            .bind(&credentials.password),
    );
    match result {
        Ok(_) => Ok(()),
        Err(error) if error.server_code() == Some(ER_CANNOT_USER) => {
            warn!(username = %credentials.username, "user already exists; leaving it untouched");
            Ok(())
        }
        Err(error) => Err(error),
    }
}
