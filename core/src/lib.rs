//! Core types for parameter-safe relational access.
//!
//! This crate defines the driver-independent foundation the rest of the
//! workspace builds on:
//!
//! - [`Param`] / [`ParamKind`] — strongly-tagged positional parameters
//!   (text, boolean, raw binary, stringly fallback).
//! - [`Query`] — statement text with `?` placeholders plus bound parameters.
//! - [`Row`] — an ordered, case-insensitive view over one result tuple with
//!   typed accessors.
//! - [`Connection`] — the one-session abstraction executing DDL,
//!   parameterized statements, reads, and raw script statements, with
//!   per-call [`ExecResult`]s.
//! - [`DatabaseProperties`] / [`Credentials`] — caller-owned deployment
//!   configuration.
//! - [`DatabaseError`] — the unified error taxonomy.
//!
//! # Example
//!
//! ```
//! use bedrock_core::{Query, Row};
//!
//! let insert = Query::new("INSERT INTO events (name, payload) VALUES (?, ?)")
//!     .bind("startup")
//!     .bind(vec![0xDEu8, 0xAD]);
//! assert_eq!(insert.params.len(), 2);
//!
//! let row = Row::new(vec![("VERSION".to_string(), Some("3".to_string()))]);
//! assert_eq!(row.get_i32("version").unwrap(), Some(3));
//! ```

mod connection;
mod error;
mod param;
mod properties;
mod query;
mod row;

pub use connection::{Connection, ExecResult};
pub use error::{DatabaseError, Result};
pub use param::{Param, ParamKind};
pub use properties::{Credentials, DatabaseProperties};
pub use query::Query;
pub use row::Row;
