//! Driver-backed sessions.
//!
//! [`MysqlConnection`] owns one live server session and implements the
//! [`Connection`] trait. The session is dropped exactly once: either on
//! [`close`](Connection::close) or when the value goes out of scope,
//! whichever comes first. Closing twice is a no-op; any operation after
//! close fails with [`DatabaseError::ConnectionClosed`].
//!
//! [`MysqlDatabase`] turns [`DatabaseProperties`] into sessions for the
//! three account roles the provisioning flow uses: root, maintenance, and
//! the application user.

use bedrock_core::{
    Connection, Credentials, DatabaseError, DatabaseProperties, ExecResult, Query, Result, Row,
};
use mysql::prelude::Queryable;
use mysql::{Conn, Opts, OptsBuilder};

use crate::convert;
use crate::provision;

fn driver_error(statement: &str, error: mysql::Error) -> DatabaseError {
    let code = match &error {
        mysql::Error::MySqlError(server_error) => Some(server_error.code),
        _ => None,
    };
    DatabaseError::Statement {
        statement: statement.to_string(),
        line: None,
        code,
        message: error.to_string(),
    }
}

/// One live MySQL session.
///
/// `&mut self` receivers serialize operations per instance; callers that
/// need concurrency open distinct connections.
pub struct MysqlConnection {
    conn: Option<Conn>,
}

impl MysqlConnection {
    /// Opens a session with the given driver options.
    pub fn connect(opts: impl Into<Opts>) -> Result<Self> {
        let conn =
            Conn::new(opts.into()).map_err(|error| DatabaseError::Connect(error.to_string()))?;
        Ok(Self { conn: Some(conn) })
    }

    fn conn(&mut self) -> Result<&mut Conn> {
        self.conn.as_mut().ok_or(DatabaseError::ConnectionClosed)
    }
}

impl Connection for MysqlConnection {
    fn execute_ddl(&mut self, sql: &str) -> Result<()> {
        self.conn()?
            .query_drop(sql)
            .map_err(|error| driver_error(sql, error))
    }

    fn execute(&mut self, query: &Query) -> Result<ExecResult> {
        let conn = self.conn()?;
        let params = convert::params_to_driver(&query.params);
        let result = conn
            .exec_iter(query.text.as_str(), params)
            .map_err(|error| driver_error(&query.text, error))?;
        Ok(ExecResult {
            last_insert_id: result.last_insert_id(),
            rows_affected: result.affected_rows(),
        })
    }

    fn query(&mut self, query: &Query) -> Result<Vec<Row>> {
        let conn = self.conn()?;
        let params = convert::params_to_driver(&query.params);
        let rows: Vec<mysql::Row> = conn
            .exec(query.text.as_str(), params)
            .map_err(|error| driver_error(&query.text, error))?;
        Ok(rows.iter().map(convert::row_from_driver).collect())
    }

    fn execute_raw(&mut self, sql: &str) -> Result<()> {
        self.conn()?
            .query_drop(sql)
            .map_err(|error| driver_error(sql, error))
    }

    fn is_auto_commit(&mut self) -> Result<bool> {
        let sql = "SELECT @@autocommit";
        let value: Option<i64> = self
            .conn()?
            .query_first(sql)
            .map_err(|error| driver_error(sql, error))?;
        Ok(value.unwrap_or(1) != 0)
    }

    fn set_auto_commit(&mut self, enabled: bool) -> Result<()> {
        let sql = if enabled {
            "SET autocommit = 1"
        } else {
            "SET autocommit = 0"
        };
        self.execute_raw(sql)
    }

    fn commit(&mut self) -> Result<()> {
        self.execute_raw("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.execute_raw("ROLLBACK")
    }

    fn close(&mut self) -> Result<()> {
        // Dropping the driver connection closes the socket.
        self.conn.take();
        Ok(())
    }
}

/// Session factory for one configured deployment.
///
/// # Examples
///
/// ```no_run
/// use bedrock_core::DatabaseProperties;
/// use bedrock_mysql::MysqlDatabase;
///
/// let properties = DatabaseProperties {
///     schema: "inventory".into(),
///     root_password: "hunter2".into(),
///     username: "inventory_app".into(),
///     password: "app-secret".into(),
///     ..DatabaseProperties::default()
/// };
///
/// let database = MysqlDatabase::new(&properties);
/// let mut root = database.connect_root().unwrap();
/// ```
pub struct MysqlDatabase {
    properties: DatabaseProperties,
}

impl MysqlDatabase {
    /// Creates a factory for the given deployment.
    pub fn new(properties: &DatabaseProperties) -> Self {
        Self {
            properties: properties.clone(),
        }
    }

    fn opts(&self, credentials: &Credentials, schema: Option<&str>) -> Opts {
        OptsBuilder::new()
            .ip_or_hostname(Some(self.properties.hostname.clone()))
            .tcp_port(self.properties.port)
            .user(Some(credentials.username.clone()))
            .pass(Some(credentials.password.clone()))
            .db_name(schema.map(str::to_string))
            .into()
    }

    /// Opens a root session with no schema selected, for provisioning.
    pub fn connect_root(&self) -> Result<MysqlConnection> {
        MysqlConnection::connect(self.opts(&self.properties.root_credentials(), None))
    }

    /// Opens a session as the derived maintenance user, for migrations.
    pub fn connect_maintenance(&self) -> Result<MysqlConnection> {
        let credentials = provision::maintenance_credentials(&self.properties);
        MysqlConnection::connect(self.opts(&credentials, Some(&self.properties.schema)))
    }

    /// Opens a session as the application user.
    pub fn connect(&self) -> Result<MysqlConnection> {
        MysqlConnection::connect(self.opts(&self.properties.credentials(), Some(&self.properties.schema)))
    }
}
