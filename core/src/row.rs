//! Materialized result rows with typed, case-insensitive column access.
//!
//! A [`Row`] is produced once per result tuple at read time and never
//! re-synced with the database. Values are stored once, in a canonical
//! textual form decoded byte-for-byte (Latin-1) from the wire so that
//! binary columns fetched through the text path round-trip exactly.
//!
//! Typed accessors parse the stored text on demand. A SQL `NULL` yields
//! `Ok(None)` from every accessor; an absent column yields
//! [`DatabaseError::MissingColumn`]; a value that does not parse as the
//! requested type yields [`DatabaseError::TypeCoercion`].

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{DatabaseError, Result};

/// One result tuple, with ordered columns and case-insensitive lookup.
///
/// # Examples
///
/// ```
/// use bedrock_core::Row;
///
/// let row = Row::new(vec![
///     ("Id".to_string(), Some("7".to_string())),
///     ("Name".to_string(), Some("widget".to_string())),
///     ("Data".to_string(), None),
/// ]);
///
/// assert_eq!(row.get_i64("ID").unwrap(), Some(7));
/// assert_eq!(row.get_string("name").unwrap().as_deref(), Some("widget"));
/// assert_eq!(row.get_bytes("data").unwrap(), None);
/// assert!(row.get_i64("missing").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    names: Vec<String>,
    values: Vec<Option<String>>,
    index: HashMap<String, usize>,
}

impl Row {
    /// Builds a row from `(column name, canonical text value)` pairs in
    /// query order. Column case is preserved for display; lookups are
    /// case-insensitive. When a name repeats, the later column wins for
    /// lookups.
    pub fn new(columns: Vec<(String, Option<String>)>) -> Self {
        let mut names = Vec::with_capacity(columns.len());
        let mut values = Vec::with_capacity(columns.len());
        let mut index = HashMap::with_capacity(columns.len());

        for (position, (name, value)) in columns.into_iter().enumerate() {
            index.insert(name.to_lowercase(), position);
            names.push(name);
            values.push(value);
        }

        Self {
            names,
            values,
            index,
        }
    }

    /// Column names in query order, with original case.
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn raw(&self, column: &str) -> Result<Option<&str>> {
        let position = self
            .index
            .get(&column.to_lowercase())
            .ok_or_else(|| DatabaseError::MissingColumn(column.to_string()))?;
        Ok(self.values[*position].as_deref())
    }

    fn parse<T: FromStr>(&self, column: &str, expected: &'static str) -> Result<Option<T>> {
        match self.raw(column)? {
            None => Ok(None),
            Some(value) => value.trim().parse().map(Some).map_err(|_| {
                DatabaseError::TypeCoercion {
                    column: column.to_string(),
                    expected,
                    value: value.to_string(),
                }
            }),
        }
    }

    /// The value as text.
    pub fn get_string(&self, column: &str) -> Result<Option<String>> {
        Ok(self.raw(column)?.map(str::to_string))
    }

    /// The value parsed as an `i32`.
    pub fn get_i32(&self, column: &str) -> Result<Option<i32>> {
        self.parse(column, "i32")
    }

    /// The value parsed as an `i64`.
    pub fn get_i64(&self, column: &str) -> Result<Option<i64>> {
        self.parse(column, "i64")
    }

    /// The value parsed as an `f32`.
    pub fn get_f32(&self, column: &str) -> Result<Option<f32>> {
        self.parse(column, "f32")
    }

    /// The value parsed as an `f64`.
    pub fn get_f64(&self, column: &str) -> Result<Option<f64>> {
        self.parse(column, "f64")
    }

    /// The value as a boolean. Accepts integer forms (non-zero is true) and
    /// case-insensitive `true`/`false`, which covers both `TINYINT(1)`
    /// columns and boolean expressions rendered as text.
    pub fn get_bool(&self, column: &str) -> Result<Option<bool>> {
        match self.raw(column)? {
            None => Ok(None),
            Some(value) => {
                let trimmed = value.trim();
                if let Ok(number) = trimmed.parse::<i64>() {
                    return Ok(Some(number != 0));
                }
                match trimmed.to_lowercase().as_str() {
                    "true" => Ok(Some(true)),
                    "false" => Ok(Some(false)),
                    _ => Err(DatabaseError::TypeCoercion {
                        column: column.to_string(),
                        expected: "bool",
                        value: value.to_string(),
                    }),
                }
            }
        }
    }

    /// The value re-encoded as raw bytes.
    ///
    /// The canonical text was decoded one byte per character, so encoding
    /// each character back to a single byte reproduces the stored bytes
    /// exactly. Characters outside the single-byte range (only possible for
    /// rows built from already-decoded text) become `?`.
    pub fn get_bytes(&self, column: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.raw(column)?.map(|value| {
            value
                .chars()
                .map(|c| {
                    let code = c as u32;
                    if code <= 0xFF { code as u8 } else { b'?' }
                })
                .collect()
        }))
    }
}
