//! Conversions between core types and the driver's wire types.
//!
//! Parameters are bound by their declared kind: byte sequences as raw
//! binary, booleans as integers (the server's boolean representation),
//! text and the stringly fallback as text, and `None` as SQL `NULL`.
//!
//! Result values travel the other way into the canonical textual form the
//! [`Row`] accessors parse. Byte columns are decoded one byte per
//! character (Latin-1) so `get_bytes` reproduces them exactly.

use bedrock_core::{Param, Row};
use mysql::{Params, Value};

/// Maps bound parameters to driver params. An empty list becomes
/// [`Params::Empty`] so statements without placeholders prepare cleanly.
pub(crate) fn params_to_driver(params: &[Param]) -> Params {
    if params.is_empty() {
        return Params::Empty;
    }
    Params::Positional(params.iter().map(param_to_value).collect())
}

fn param_to_value(param: &Param) -> Value {
    match param {
        Param::Str(Some(text)) | Param::Other(Some(text)) => {
            Value::Bytes(text.clone().into_bytes())
        }
        Param::Bool(Some(flag)) => Value::Int(i64::from(*flag)),
        Param::Bytes(Some(bytes)) => Value::Bytes(bytes.clone()),
        Param::Str(None) | Param::Bool(None) | Param::Bytes(None) | Param::Other(None) => {
            Value::NULL
        }
    }
}

/// Materializes one driver row into a [`Row`], preserving column order and
/// case while decoding values to canonical text.
pub(crate) fn row_from_driver(row: &mysql::Row) -> Row {
    let columns = row.columns_ref();
    let mut pairs = Vec::with_capacity(columns.len());
    for (position, column) in columns.iter().enumerate() {
        let name = column.name_str().to_string();
        let value = row.as_ref(position).and_then(value_to_text);
        pairs.push((name, value));
    }
    Row::new(pairs)
}

fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(bytes.iter().map(|&b| b as char).collect()),
        Value::Int(v) => Some(v.to_string()),
        Value::UInt(v) => Some(v.to_string()),
        Value::Float(v) => Some(v.to_string()),
        Value::Double(v) => Some(v.to_string()),
        Value::Date(year, month, day, hour, minute, second, micros) => {
            if *micros == 0 {
                Some(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            } else {
                Some(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}.{micros:06}"
                ))
            }
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if *negative { "-" } else { "" };
            let total_hours = *days * 24 + u32::from(*hours);
            if *micros == 0 {
                Some(format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}"))
            } else {
                Some(format!(
                    "{sign}{total_hours:02}:{minutes:02}:{seconds:02}.{micros:06}"
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_params_bind_as_bytes() {
        assert_eq!(
            param_to_value(&Param::from("abc")),
            Value::Bytes(b"abc".to_vec())
        );
        assert_eq!(
            param_to_value(&Param::from(42i64)),
            Value::Bytes(b"42".to_vec())
        );
    }

    #[test]
    fn test_bool_params_bind_as_integers() {
        assert_eq!(param_to_value(&Param::from(true)), Value::Int(1));
        assert_eq!(param_to_value(&Param::from(false)), Value::Int(0));
    }

    #[test]
    fn test_null_params_bind_as_null() {
        assert_eq!(param_to_value(&Param::Bytes(None)), Value::NULL);
        assert_eq!(param_to_value(&Param::Str(None)), Value::NULL);
    }

    #[test]
    fn test_empty_param_list() {
        assert!(matches!(params_to_driver(&[]), Params::Empty));
    }

    #[test]
    fn test_value_to_text_scalar_forms() {
        assert_eq!(value_to_text(&Value::NULL), None);
        assert_eq!(value_to_text(&Value::Int(-7)).as_deref(), Some("-7"));
        assert_eq!(value_to_text(&Value::UInt(7)).as_deref(), Some("7"));
        assert_eq!(value_to_text(&Value::Double(2.5)).as_deref(), Some("2.5"));
    }

    #[test]
    fn test_value_to_text_preserves_bytes() {
        let text = value_to_text(&Value::Bytes(vec![0x00, 0x80, 0xFF])).unwrap();
        let bytes: Vec<u8> = text.chars().map(|c| c as u32 as u8).collect();
        assert_eq!(bytes, vec![0x00, 0x80, 0xFF]);
    }

    #[test]
    fn test_value_to_text_datetime() {
        assert_eq!(
            value_to_text(&Value::Date(2024, 1, 15, 10, 30, 0, 0)).as_deref(),
            Some("2024-01-15 10:30:00")
        );
        assert_eq!(
            value_to_text(&Value::Date(2024, 1, 15, 10, 30, 0, 250_000)).as_deref(),
            Some("2024-01-15 10:30:00.250000")
        );
    }
}
