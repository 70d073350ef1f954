//! Typed statement parameters.
//!
//! A [`Param`] carries a value together with the binding kind the execution
//! layer must use for it: text, boolean, raw binary, or the stringly
//! fallback for everything else. Each variant holds an `Option` so SQL
//! `NULL` can be bound with the correct type tag.

/// The binding kind of a [`Param`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Bound as text.
    Str,
    /// Bound as a boolean.
    Bool,
    /// Bound as raw binary, never passed through a character set.
    Bytes,
    /// Anything else, coerced to its string form and bound as text.
    Other,
}

/// A positional statement parameter with an explicit binding kind.
///
/// Constructed per statement invocation (usually through the `From` impls
/// and [`Query::bind`](crate::Query::bind)) and consumed immediately.
///
/// # Examples
///
/// ```
/// use bedrock_core::{Param, ParamKind};
///
/// assert_eq!(Param::from("abc").kind(), ParamKind::Str);
/// assert_eq!(Param::from(true).kind(), ParamKind::Bool);
/// assert_eq!(Param::from(vec![0u8, 1]).kind(), ParamKind::Bytes);
/// assert_eq!(Param::from(42i64).kind(), ParamKind::Other);
///
/// // A null blob keeps its binding kind.
/// let null_bytes = Param::from(None::<Vec<u8>>);
/// assert_eq!(null_bytes.kind(), ParamKind::Bytes);
/// assert!(null_bytes.is_null());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A text value.
    Str(Option<String>),
    /// A boolean value.
    Bool(Option<bool>),
    /// A raw byte sequence.
    Bytes(Option<Vec<u8>>),
    /// An opaque value already coerced to its string form.
    Other(Option<String>),
}

impl Param {
    /// Returns the binding kind of this parameter.
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Str(_) => ParamKind::Str,
            Self::Bool(_) => ParamKind::Bool,
            Self::Bytes(_) => ParamKind::Bytes,
            Self::Other(_) => ParamKind::Other,
        }
    }

    /// Returns `true` if the parameter carries SQL `NULL`.
    pub fn is_null(&self) -> bool {
        match self {
            Self::Str(v) => v.is_none(),
            Self::Bool(v) => v.is_none(),
            Self::Bytes(v) => v.is_none(),
            Self::Other(v) => v.is_none(),
        }
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Str(Some(value.to_string()))
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Self::Str(Some(value))
    }
}

impl From<&String> for Param {
    fn from(value: &String) -> Self {
        Self::Str(Some(value.clone()))
    }
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Self::Bool(Some(value))
    }
}

impl From<Vec<u8>> for Param {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(Some(value))
    }
}

impl From<&[u8]> for Param {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(Some(value.to_vec()))
    }
}

impl From<Option<String>> for Param {
    fn from(value: Option<String>) -> Self {
        Self::Str(value)
    }
}

impl From<Option<&str>> for Param {
    fn from(value: Option<&str>) -> Self {
        Self::Str(value.map(str::to_string))
    }
}

impl From<Option<Vec<u8>>> for Param {
    fn from(value: Option<Vec<u8>>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Option<bool>> for Param {
    fn from(value: Option<bool>) -> Self {
        Self::Bool(value)
    }
}

macro_rules! param_from_display {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(value: $t) -> Self {
                    Self::Other(Some(value.to_string()))
                }
            }
        )*
    };
}

param_from_display!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
