//! Parameterized queries.
//!
//! A [`Query`] pairs statement text using `?` placeholders with an ordered
//! list of [`Param`]s consumed left to right. The placeholder count and the
//! parameter count must match; a mismatch is a caller error surfaced by the
//! server when the statement is prepared.

use crate::param::Param;

/// A parameterized SQL statement.
///
/// # Examples
///
/// ```
/// use bedrock_core::Query;
///
/// let query = Query::new("INSERT INTO items (name, data, active) VALUES (?, ?, ?)")
///     .bind("widget")
///     .bind(vec![0u8, 1, 2])
///     .bind(true);
/// assert_eq!(query.params.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Statement text with `?` placeholders.
    pub text: String,
    /// Positional parameters, consumed left to right.
    pub params: Vec<Param>,
}

impl Query {
    /// Creates a query with no parameters bound yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Appends one positional parameter.
    #[must_use]
    pub fn bind(mut self, param: impl Into<Param>) -> Self {
        self.params.push(param.into());
        self
    }
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
