//! Best-effort JSON rendering of values for diagnostics.
//!
//! Output follows `JSON.stringify(value, null, ' ')`: one-space indentation,
//! integral numbers without a fraction, non-finite numbers as `null`,
//! functions and symbols dropped from records and nulled inside arrays.
//! Rendering never fails loudly; values nested deeper than
//! [`MAX_RENDER_DEPTH`] yield `None` and the caller leaves the rendering out.

use chrono::SecondsFormat;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::ser::{PrettyFormatter, Serializer as JsonSerializer};

use crate::Value;

/// Deepest array/record nesting that will be rendered.
pub const MAX_RENDER_DEPTH: usize = 128;

/// Renders `value` as indented JSON, or `None` if it cannot be rendered.
///
/// A top-level `undefined`, function, or symbol renders as `undefined`, the
/// same text string interpolation would produce.
///
/// # Examples
///
/// ```
/// use prop_types_core::{Function, Record, Value, render_json};
///
/// assert_eq!(render_json(&Value::from(1)).as_deref(), Some("1"));
/// assert_eq!(render_json(&Value::Undefined).as_deref(), Some("undefined"));
///
/// let record = Record::new().with("a", 1).with("f", Function::noop("f"));
/// assert_eq!(render_json(&Value::from(record)).as_deref(), Some("{\n \"a\": 1\n}"));
/// ```
pub fn render_json(value: &Value) -> Option<String> {
    if !is_renderable(value) {
        return Some("undefined".to_string());
    }
    if exceeds_depth(value, 0) {
        return None;
    }

    let mut buf = Vec::new();
    let mut serializer =
        JsonSerializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b" "));
    Json(value).serialize(&mut serializer).ok()?;
    String::from_utf8(buf).ok()
}

/// Functions, symbols and `undefined` have no JSON form.
fn is_renderable(value: &Value) -> bool {
    !matches!(value, Value::Undefined | Value::Function(_) | Value::Symbol(_))
}

fn exceeds_depth(value: &Value, depth: usize) -> bool {
    match value {
        Value::Array(items) => {
            depth >= MAX_RENDER_DEPTH || items.iter().any(|item| exceeds_depth(item, depth + 1))
        }
        Value::Object(record) => {
            depth >= MAX_RENDER_DEPTH
                || record.iter().any(|(_, field)| exceeds_depth(field, depth + 1))
        }
        _ => false,
    }
}

/// JSON view of a [`Value`]. Unrenderable array items become `null`,
/// unrenderable record fields are skipped.
struct Json<'a>(&'a Value);

impl Serialize for Json<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Undefined | Value::Null | Value::Function(_) | Value::Symbol(_) => {
                serializer.serialize_unit()
            }
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serialize_number(*n, serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(date) => {
                serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::Element(_) => serializer.serialize_map(Some(0))?.end(),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Json(item))?;
                }
                seq.end()
            }
            Value::Object(record) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, field) in record.iter().filter(|(_, field)| is_renderable(field)) {
                    map.serialize_entry(key, &Json(field))?;
                }
                map.end()
            }
        }
    }
}

/// Integral numbers below 1e21 are written out in full, as `JSON.stringify`
/// does; non-finite numbers become `null`.
fn serialize_number<S: Serializer>(n: f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !n.is_finite() {
        serializer.serialize_unit()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        serializer.serialize_i128(n as i128)
    } else {
        serializer.serialize_f64(n)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{Element, Record, Symbol};

    #[test]
    fn test_render_array_uses_one_space_indent() {
        let value = Value::from(vec![Value::from(1), Value::from("a")]);
        assert_eq!(render_json(&value).unwrap(), "[\n 1,\n \"a\"\n]");
    }

    #[test]
    fn test_render_nulls_unrenderable_array_items() {
        let value = Value::from(vec![Value::Undefined, Value::from(Symbol::new("s"))]);
        assert_eq!(render_json(&value).unwrap(), "[\n null,\n null\n]");
    }

    #[test]
    fn test_render_non_finite_numbers_as_null() {
        assert_eq!(render_json(&Value::from(f64::NAN)).unwrap(), "null");
        assert_eq!(render_json(&Value::from(f64::INFINITY)).unwrap(), "null");
        assert_eq!(render_json(&Value::from(2.5)).unwrap(), "2.5");
    }

    #[test]
    fn test_render_large_integers_in_full() {
        assert_eq!(render_json(&Value::from(1e20)).unwrap(), "100000000000000000000");
        assert_eq!(render_json(&Value::from(-(2f64.powi(60)))).unwrap(), "-1152921504606846976");
        assert_eq!(render_json(&Value::from(-0.0)).unwrap(), "0");
    }

    #[test]
    fn test_render_dates_and_elements() {
        let date = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(
            render_json(&Value::from(date)).unwrap(),
            "\"2024-01-15T10:30:00.000Z\""
        );
        assert_eq!(render_json(&Value::from(Element::new("div"))).unwrap(), "{}");
    }

    #[test]
    fn test_render_instances_as_their_fields() {
        let value = Value::from(Record::instance("User").with("id", 1));
        assert_eq!(render_json(&value).unwrap(), "{\n \"id\": 1\n}");
    }

    #[test]
    fn test_render_gives_up_past_depth_limit() {
        let mut value = Value::from(1);
        for _ in 0..=MAX_RENDER_DEPTH {
            value = Value::from(vec![value]);
        }
        assert_eq!(render_json(&value), None);
    }
}
