//! Scripted connection double for exercising the higher layers without a
//! live server: records every call in order, serves canned query results,
//! and injects statement failures on demand.

use std::collections::VecDeque;

use bedrock_core::{Connection, DatabaseError, ExecResult, Param, Query, Result, Row};

/// One recorded operation.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Ddl(String),
    Execute(String, Vec<Param>),
    Query(String),
    Raw(String),
    IsAutoCommit,
    SetAutoCommit(bool),
    Commit,
    Rollback,
    Close,
}

struct Failure {
    needle: String,
    code: Option<u16>,
    message: String,
}

pub(crate) struct FakeConnection {
    pub calls: Vec<Call>,
    pub auto_commit: bool,
    pub closed: bool,
    /// Responses for `query`, consumed front to back; an exhausted queue
    /// answers with an empty result set.
    pub query_results: VecDeque<Result<Vec<Row>>>,
    /// Responses for `execute`, consumed front to back.
    pub exec_results: VecDeque<ExecResult>,
    failures: Vec<Failure>,
}

impl FakeConnection {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            auto_commit: true,
            closed: false,
            query_results: VecDeque::new(),
            exec_results: VecDeque::new(),
            failures: Vec::new(),
        }
    }

    /// Makes every statement containing `needle` fail with the given server
    /// code and message.
    pub fn fail_on(&mut self, needle: &str, code: Option<u16>, message: &str) {
        self.failures.push(Failure {
            needle: needle.to_string(),
            code,
            message: message.to_string(),
        });
    }

    /// Queues a canned response for the next `query` call.
    pub fn push_query_result(&mut self, result: Result<Vec<Row>>) {
        self.query_results.push_back(result);
    }

    /// Queues a one-column, one-row result named `version`.
    pub fn push_version_row(&mut self, version: u32) {
        self.push_query_result(Ok(vec![Row::new(vec![(
            "version".to_string(),
            Some(version.to_string()),
        )])]));
    }

    /// Statements executed through `execute_raw`, in order.
    pub fn raw_statements(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Raw(sql) => Some(sql.clone()),
                _ => None,
            })
            .collect()
    }

    fn check_failure(&self, sql: &str) -> Result<()> {
        for failure in &self.failures {
            if sql.contains(&failure.needle) {
                return Err(DatabaseError::Statement {
                    statement: sql.to_string(),
                    line: None,
                    code: failure.code,
                    message: failure.message.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(DatabaseError::ConnectionClosed);
        }
        Ok(())
    }
}

impl Connection for FakeConnection {
    fn execute_ddl(&mut self, sql: &str) -> Result<()> {
        self.check_open()?;
        self.calls.push(Call::Ddl(sql.to_string()));
        self.check_failure(sql)
    }

    fn execute(&mut self, query: &Query) -> Result<ExecResult> {
        self.check_open()?;
        self.calls
            .push(Call::Execute(query.text.clone(), query.params.clone()));
        self.check_failure(&query.text)?;
        Ok(self.exec_results.pop_front().unwrap_or_default())
    }

    fn query(&mut self, query: &Query) -> Result<Vec<Row>> {
        self.check_open()?;
        self.calls.push(Call::Query(query.text.clone()));
        self.check_failure(&query.text)?;
        self.query_results.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn execute_raw(&mut self, sql: &str) -> Result<()> {
        self.check_open()?;
        self.calls.push(Call::Raw(sql.to_string()));
        self.check_failure(sql)
    }

    fn is_auto_commit(&mut self) -> Result<bool> {
        self.check_open()?;
        self.calls.push(Call::IsAutoCommit);
        Ok(self.auto_commit)
    }

    fn set_auto_commit(&mut self, enabled: bool) -> Result<()> {
        self.check_open()?;
        self.calls.push(Call::SetAutoCommit(enabled));
        self.auto_commit = enabled;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.check_open()?;
        self.calls.push(Call::Commit);
        self.check_failure("COMMIT")
    }

    fn rollback(&mut self) -> Result<()> {
        self.check_open()?;
        self.calls.push(Call::Rollback);
        self.check_failure("ROLLBACK")
    }

    fn close(&mut self) -> Result<()> {
        self.calls.push(Call::Close);
        self.closed = true;
        Ok(())
    }
}

mod tests {
    use super::*;

    #[test]
    fn test_execute_serves_scripted_results_in_order() {
        let mut conn = FakeConnection::new();
        conn.exec_results.push_back(ExecResult {
            last_insert_id: Some(7),
            rows_affected: 2,
        });

        // The first call sees the queued outcome, the way a real driver
        // reports an INSERT IGNORE batch with one collided row.
        let result = conn
            .execute(&Query::new("INSERT IGNORE INTO items (id) VALUES (?), (?), (?)"))
            .unwrap();
        assert_eq!(result.rows_affected, 2);
        assert_eq!(result.last_insert_id, Some(7));

        // An exhausted queue reports nothing generated, nothing affected.
        let result = conn.execute(&Query::new("DELETE FROM items")).unwrap();
        assert_eq!(result, ExecResult::default());
    }
}
