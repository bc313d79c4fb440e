//! Coercion of stored JSON values to the types the accessors hand out.
//!
//! Every stored value is a [`serde_json::Value`]. A typed read converts it
//! with the rules below; `None` means the value has no sensible
//! representation in the requested type and the caller's default is used.
//!
//! | stored           | `String`               | `u32`                          | `bool`                        |
//! |------------------|------------------------|--------------------------------|-------------------------------|
//! | string           | itself                 | trimmed decimal parse, else 0  | see [`parse_bool`], else none |
//! | unsigned integer | decimal text           | value if it fits, else none    | `!= 0`                        |
//! | negative integer | decimal text           | none                           | `!= 0`                        |
//! | float            | shortest text          | truncated if in range, else none | `!= 0.0`                    |
//! | bool             | `"true"` / `"false"`   | 1 / 0                          | itself                        |
//! | null             | `""`                   | 0                              | `false`                       |
//! | array / object   | none                   | none                           | none                          |

use serde_json::Value;

/// Conversion from a stored JSON value into an accessor type.
pub trait FromConfigValue: Sized {
    /// Converts `value`, or returns `None` when the caller's default applies.
    fn from_config_value(value: &Value) -> Option<Self>;
}

impl FromConfigValue for String {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Null => Some(String::new()),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FromConfigValue for u32 {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.trim().parse().unwrap_or(0)),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    u32::try_from(u).ok()
                } else if n.is_i64() {
                    None
                } else {
                    n.as_f64()
                        .filter(|f| f.is_finite() && *f >= 0.0 && *f <= f64::from(u32::MAX))
                        .map(|f| f as u32)
                }
            }
            Value::Bool(b) => Some(u32::from(*b)),
            Value::Null => Some(0),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

impl FromConfigValue for bool {
    fn from_config_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Some(u != 0)
                } else if let Some(i) = n.as_i64() {
                    Some(i != 0)
                } else {
                    n.as_f64().map(|f| f != 0.0)
                }
            }
            Value::String(s) => parse_bool(s),
            Value::Null => Some(false),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Parses the textual boolean spellings accepted from string values.
///
/// Matching is case-insensitive and ignores surrounding whitespace. The empty
/// string reads as `false`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

/// Returns the JSON type name of a value, for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn as_string(v: Value) -> Option<String> {
        String::from_config_value(&v)
    }

    fn as_u32(v: Value) -> Option<u32> {
        u32::from_config_value(&v)
    }

    fn as_bool(v: Value) -> Option<bool> {
        bool::from_config_value(&v)
    }

    #[test]
    fn string_from_scalars() {
        assert_eq!(as_string(json!("radio")), Some("radio".to_string()));
        assert_eq!(as_string(json!(80)), Some("80".to_string()));
        assert_eq!(as_string(json!(-3)), Some("-3".to_string()));
        assert_eq!(as_string(json!(1.5)), Some("1.5".to_string()));
        assert_eq!(as_string(json!(true)), Some("true".to_string()));
        assert_eq!(as_string(Value::Null), Some(String::new()));
    }

    #[test]
    fn string_from_containers_uses_default() {
        assert_eq!(as_string(json!([1, 2])), None);
        assert_eq!(as_string(json!({"a": 1})), None);
    }

    #[test]
    fn u32_from_numbers() {
        assert_eq!(as_u32(json!(80)), Some(80));
        assert_eq!(as_u32(json!(u32::MAX)), Some(u32::MAX));
        assert_eq!(as_u32(json!(u64::from(u32::MAX) + 1)), None);
        assert_eq!(as_u32(json!(-1)), None);
        assert_eq!(as_u32(json!(7.9)), Some(7));
        assert_eq!(as_u32(json!(-0.5)), None);
        assert_eq!(as_u32(json!(1e12)), None);
    }

    #[test]
    fn u32_from_strings() {
        assert_eq!(as_u32(json!("42")), Some(42));
        assert_eq!(as_u32(json!(" 42 ")), Some(42));
        assert_eq!(as_u32(json!("loud")), Some(0));
        assert_eq!(as_u32(json!("")), Some(0));
    }

    #[test]
    fn u32_from_bool_and_null() {
        assert_eq!(as_u32(json!(true)), Some(1));
        assert_eq!(as_u32(json!(false)), Some(0));
        assert_eq!(as_u32(Value::Null), Some(0));
        assert_eq!(as_u32(json!({})), None);
    }

    #[test]
    fn bool_from_numbers() {
        assert_eq!(as_bool(json!(0)), Some(false));
        assert_eq!(as_bool(json!(5)), Some(true));
        assert_eq!(as_bool(json!(-5)), Some(true));
        assert_eq!(as_bool(json!(0.0)), Some(false));
        assert_eq!(as_bool(json!(0.1)), Some(true));
    }

    #[test]
    fn bool_from_strings() {
        assert_eq!(as_bool(json!("TRUE")), Some(true));
        assert_eq!(as_bool(json!(" yes ")), Some(true));
        assert_eq!(as_bool(json!("on")), Some(true));
        assert_eq!(as_bool(json!("Off")), Some(false));
        assert_eq!(as_bool(json!("")), Some(false));
        assert_eq!(as_bool(json!("maybe")), None);
    }

    #[test]
    fn bool_from_null_and_containers() {
        assert_eq!(as_bool(Value::Null), Some(false));
        assert_eq!(as_bool(json!([])), None);
    }

    #[test]
    fn type_names() {
        assert_eq!(type_name(&json!([])), "array");
        assert_eq!(type_name(&json!("x")), "string");
    }
}
