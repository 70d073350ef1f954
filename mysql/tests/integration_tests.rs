//! Public API tests for the script parser and credential derivation,
//! plus driver-level tests that need a live server.
//!
//! The `#[ignore]` tests expect a MySQL server on `localhost:3306` with a
//! root password taken from `MYSQL_ROOT_PASSWORD` (empty when unset); run
//! them with `cargo test -- --ignored`.

use bedrock_core::{Connection, DatabaseProperties, Query};
use bedrock_mysql::{maintenance_credentials, parse_script, parse_script_with, MysqlConnection, MysqlDatabase};

#[test]
fn test_parse_script_splits_a_realistic_schema_script() {
    let script = "\
-- Initial schema.
CREATE TABLE accounts (
    id INT UNSIGNED AUTO_INCREMENT,
    email VARCHAR(255) NOT NULL,
    PRIMARY KEY (id)
) ENGINE=InnoDB;

CREATE INDEX accounts_email ON accounts (email);

DELIMITER //
CREATE TRIGGER accounts_audit AFTER INSERT ON accounts
FOR EACH ROW
BEGIN
    INSERT INTO audit_log (account_id) VALUES (NEW.id);
END //
DELIMITER ;

INSERT INTO accounts (email) VALUES ('first@example.com');
";
    let statements = parse_script(script);
    assert_eq!(statements.len(), 4);
    assert!(statements[0].text.starts_with("CREATE TABLE accounts"));
    assert!(statements[1].text.starts_with("CREATE INDEX"));
    assert!(statements[2].text.contains("INSERT INTO audit_log (account_id) VALUES (NEW.id);"));
    assert!(statements[2].text.ends_with("END"));
    assert!(statements[3].text.starts_with("INSERT INTO accounts"));
}

#[test]
fn test_parse_script_reports_terminating_lines() {
    let statements = parse_script("SELECT 1;\n\nSELECT\n  2;\n");
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].line_number, 1);
    assert_eq!(statements[1].line_number, 4);
}

#[test]
fn test_parse_script_with_initial_custom_delimiter() {
    let statements = parse_script_with("SELECT 1 $$\nSELECT 2 $$\n", "$$", false);
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0].text, "SELECT 1");
}

fn root_connection() -> MysqlConnection {
    let properties = DatabaseProperties {
        root_password: std::env::var("MYSQL_ROOT_PASSWORD").unwrap_or_default(),
        ..DatabaseProperties::default()
    };
    MysqlDatabase::new(&properties)
        .connect_root()
        .expect("live MySQL server on localhost:3306")
}

#[test]
#[ignore = "needs a live MySQL server"]
fn test_insert_ignore_counts_only_inserted_rows() {
    let mut conn = root_connection();
    conn.execute_ddl("CREATE DATABASE IF NOT EXISTS bedrock_test").unwrap();
    conn.execute_ddl("DROP TABLE IF EXISTS bedrock_test.items").unwrap();
    conn.execute_ddl(
        "CREATE TABLE bedrock_test.items (id INT UNSIGNED NOT NULL, PRIMARY KEY (id))",
    )
    .unwrap();
    conn.execute(&Query::new("INSERT INTO bedrock_test.items (id) VALUES (?)").bind(2u32))
        .unwrap();

    // One of the three rows collides with the existing key.
    let result = conn
        .execute(
            &Query::new("INSERT IGNORE INTO bedrock_test.items (id) VALUES (?), (?), (?)")
                .bind(1u32)
                .bind(2u32)
                .bind(3u32),
        )
        .unwrap();
    assert_eq!(result.rows_affected, 2);
}

#[test]
#[ignore = "needs a live MySQL server"]
fn test_null_blob_reads_back_as_null() {
    let mut conn = root_connection();
    conn.execute_ddl("CREATE DATABASE IF NOT EXISTS bedrock_test").unwrap();
    conn.execute_ddl("DROP TABLE IF EXISTS bedrock_test.blobs").unwrap();
    conn.execute_ddl(
        "CREATE TABLE bedrock_test.blobs \
         (id INT UNSIGNED NOT NULL AUTO_INCREMENT, data BLOB NULL, PRIMARY KEY (id))",
    )
    .unwrap();

    let result = conn
        .execute(&Query::new("INSERT INTO bedrock_test.blobs (data) VALUES (?)").bind(None::<Vec<u8>>))
        .unwrap();
    assert_eq!(result.rows_affected, 1);
    let id = result.last_insert_id.expect("insert generates an id");

    let rows = conn
        .query(&Query::new("SELECT data FROM bedrock_test.blobs WHERE id = ?").bind(id))
        .unwrap();
    assert_eq!(rows.len(), 1);
    // Stored NULL, not an empty byte sequence.
    assert_eq!(rows[0].get_bytes("data").unwrap(), None);
}

#[test]
fn test_maintenance_credentials_follow_the_schema() {
    let properties = DatabaseProperties {
        schema: "warehouse".into(),
        root_password: "hunter2".into(),
        ..DatabaseProperties::default()
    };
    let credentials = maintenance_credentials(&properties);
    assert_eq!(credentials.username, "warehouse_maintenance");
    assert_eq!(
        credentials.password,
        "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7"
    );
}
