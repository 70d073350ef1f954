//! Connection settings and account credentials.
//!
//! [`DatabaseProperties`] is the caller-owned configuration bundle for one
//! database deployment: where the server lives, which schema to use, and
//! the root and application account secrets. It derives serde traits so a
//! caller can load it from whatever configuration format it already uses.

use serde::{Deserialize, Serialize};

/// A username/password pair. Immutable value type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account name.
    pub username: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates a credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Configuration for one database deployment.
///
/// # Examples
///
/// ```
/// use bedrock_core::DatabaseProperties;
///
/// let properties = DatabaseProperties {
///     schema: "inventory".into(),
///     root_password: "hunter2".into(),
///     username: "inventory_app".into(),
///     password: "app-secret".into(),
///     ..DatabaseProperties::default()
/// };
/// assert_eq!(properties.hostname, "localhost");
/// assert_eq!(properties.credentials().username, "inventory_app");
/// assert_eq!(properties.root_credentials().username, "root");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseProperties {
    /// Server hostname or address.
    pub hostname: String,
    /// Server TCP port.
    pub port: u16,
    /// Schema (database) name.
    pub schema: String,
    /// Password of the `root` account, used only for provisioning.
    pub root_password: String,
    /// Application account name.
    pub username: String,
    /// Application account password.
    pub password: String,
}

impl Default for DatabaseProperties {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            port: 3306,
            schema: String::new(),
            root_password: String::new(),
            username: String::new(),
            password: String::new(),
        }
    }
}

impl DatabaseProperties {
    /// The application account credentials.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.username, &self.password)
    }

    /// The root account credentials.
    pub fn root_credentials(&self) -> Credentials {
        Credentials::new("root", &self.root_password)
    }
}
