//! Ready-made validators.
//!
//! A validator turns the raw string a source produced into the field's final
//! [`Value`]. Any `Fn(String) -> Result<Value, BoxError>` works; the functions
//! here cover the common cases and can be passed straight to
//! [`BindingOptions::validate`](crate::BindingOptions::validate).

use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::error::BoxError;

/// Shared validator handle stored inside binding options.
pub type Validator = Arc<dyn Fn(String) -> Result<Value, BoxError> + Send + Sync>;

/// Keep the raw value as a string. This is the default.
pub fn identity(raw: String) -> Result<Value, BoxError> {
    Ok(Value::String(raw))
}

/// Type the raw value heuristically: bool, then integer, then float, then string.
///
/// `true`/`false` match case-insensitively. A float is only produced when the
/// text contains a `.`, so `NaN` and `inf` stay strings.
pub fn typed(raw: String) -> Result<Value, BoxError> {
    if raw.eq_ignore_ascii_case("true") {
        return Ok(Value::Bool(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return Ok(Value::Bool(false));
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Ok(Value::from(i));
    }
    if raw.contains('.')
        && let Ok(f) = raw.parse::<f64>()
        && let Some(n) = serde_json::Number::from_f64(f)
    {
        return Ok(Value::Number(n));
    }
    Ok(Value::String(raw))
}

/// Reject blank values.
pub fn non_empty(raw: String) -> Result<Value, BoxError> {
    if raw.trim().is_empty() {
        return Err("value is empty".into());
    }
    Ok(Value::String(raw))
}

/// Build a validator that parses the raw value as `T`.
///
/// ```ignore
/// BindingOptions::new().validate(validate::parse::<u16>())
/// ```
pub fn parse<T>() -> impl Fn(String) -> Result<Value, BoxError> + Send + Sync + 'static
where
    T: FromStr + Serialize,
    T::Err: Display,
{
    |raw: String| -> Result<Value, BoxError> {
        let parsed = raw
            .parse::<T>()
            .map_err(|e| -> BoxError { format!("cannot parse {raw:?}: {e}").into() })?;
        Ok(serde_json::to_value(parsed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identity_wraps_string() {
        assert_eq!(identity("x".into()).unwrap(), json!("x"));
    }

    #[test]
    fn typed_bool_case_insensitive() {
        assert_eq!(typed("TRUE".into()).unwrap(), json!(true));
        assert_eq!(typed("false".into()).unwrap(), json!(false));
    }

    #[test]
    fn typed_integer() {
        assert_eq!(typed("8080".into()).unwrap(), json!(8080));
        assert_eq!(typed("-5".into()).unwrap(), json!(-5));
    }

    #[test]
    fn typed_float_needs_a_dot() {
        assert_eq!(typed("1.5".into()).unwrap(), json!(1.5));
        assert_eq!(typed("inf".into()).unwrap(), json!("inf"));
        assert_eq!(typed("NaN".into()).unwrap(), json!("NaN"));
    }

    #[test]
    fn typed_string_fallback() {
        assert_eq!(typed("hello world".into()).unwrap(), json!("hello world"));
    }

    #[test]
    fn non_empty_rejects_blank() {
        assert!(non_empty("   ".into()).is_err());
        assert_eq!(non_empty("ok".into()).unwrap(), json!("ok"));
    }

    #[test]
    fn parse_success() {
        let port = parse::<u16>();
        assert_eq!(port("3000".into()).unwrap(), json!(3000));
    }

    #[test]
    fn parse_failure_mentions_input() {
        let port = parse::<u16>();
        let err = port("abc".into()).unwrap_err();
        assert!(err.to_string().contains("abc"));
    }
}
