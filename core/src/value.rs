//! Dynamic values validated against descriptors.
//!
//! [`Value`] is an owned, tree-shaped model of the data a host hands to the
//! validator: primitives, arrays, plain records, class instances, functions,
//! symbols, dates and element nodes. Objects expose their fields through the
//! [`PropertyLookup`] capability, which is all the interface and shape rules
//! need to know about them.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Shared `undefined`, returned by lookups that find nothing.
pub(crate) static UNDEFINED: Value = Value::Undefined;

/// A dynamic value under validation.
///
/// Equality is strict: primitives compare by value, arrays and records
/// compare deeply, and [`Symbol`] / [`Function`] compare by identity.
///
/// # Examples
///
/// ```
/// use prop_types_core::{Record, Value};
///
/// let user = Value::from(Record::new().with("name", "ada").with("age", 36));
/// assert_eq!(user.type_of(), "object");
/// assert!(user.as_lookup().is_some());
/// assert!(Value::from(vec![Value::from(1)]).as_lookup().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absent value (the default).
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number (always `f64`).
    Number(f64),
    /// String.
    String(String),
    /// Unique symbol.
    Symbol(Symbol),
    /// Callable value.
    Function(Function),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Ordered list.
    Array(Vec<Value>),
    /// Plain record or class instance.
    Object(Record),
    /// Element node.
    Element(Element),
}

impl Value {
    /// Returns the type tag used in diagnostics.
    ///
    /// Plain records are `"object"`, records carrying a class name are
    /// `"instance"`.
    pub fn type_of(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Function(_) => "function",
            Self::Date(_) => "date",
            Self::Array(_) => "array",
            Self::Object(record) if record.is_instance() => "instance",
            Self::Object(_) => "object",
            Self::Element(_) => "element",
        }
    }

    /// Returns `true` for [`Value::Undefined`].
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// Returns the value's property lookup when it is object-like.
    ///
    /// Both plain records and class instances support lookup; arrays,
    /// primitives, `null` and `undefined` do not.
    pub fn as_lookup(&self) -> Option<&dyn PropertyLookup> {
        match self {
            Self::Object(record) => Some(record),
            _ => None,
        }
    }

    /// Returns the record when this is a plain record (not an instance).
    pub fn as_plain_record(&self) -> Option<&Record> {
        match self {
            Self::Object(record) if !record.is_instance() => Some(record),
            _ => None,
        }
    }

    /// Returns the items when this is an array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }
}

/// Renders the way string coercion would, used for enum listings.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => f.write_str("undefined"),
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::String(s) => f.write_str(s),
            Self::Symbol(symbol) => write!(f, "Symbol({})", symbol.description()),
            Self::Function(function) => write!(f, "function {}", function.name()),
            Self::Date(date) => f.write_str(&date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            Self::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !matches!(item, Self::Undefined | Self::Null) {
                        write!(f, "{item}")?;
                    }
                }
                Ok(())
            }
            Self::Object(_) => f.write_str("[object Object]"),
            Self::Element(element) => write!(f, "<{}>", element.tag()),
        }
    }
}

/// Formats integral numbers without a fractional part.
fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        (if n > 0.0 { "Infinity" } else { "-Infinity" }).to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i128)
    } else {
        format!("{n}")
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(items)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Object(record)
    }
}

impl From<Symbol> for Value {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Element> for Value {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(fields) => Self::Object(Record {
                class: None,
                fields: fields.into_iter().map(|(k, v)| (k, Self::from(v))).collect(),
            }),
        }
    }
}

/// Deserializes through `serde_json::Value`, so any self-describing format
/// (JSON, YAML) produces primitives, arrays and plain records.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Self::from)
    }
}

/// Capability of looking up properties by string key.
///
/// Implemented by [`Record`]; hosts with their own object types can
/// implement it to validate them with [`validate_props`](crate::validate_props).
pub trait PropertyLookup {
    /// Returns the property stored under `key`, if any.
    fn property(&self, key: &str) -> Option<&Value>;

    /// Returns the names of all own properties, in insertion order.
    fn property_names(&self) -> Vec<&str>;
}

/// Ordered field map, optionally tagged with the class it is an instance of.
///
/// # Examples
///
/// ```
/// use prop_types_core::{PropertyLookup, Record, Value};
///
/// let point = Record::instance("Point").with("x", 1).with("y", 2);
/// assert!(point.is_instance());
/// assert_eq!(point.property("x"), Some(&Value::from(1)));
/// assert_eq!(point.property_names(), vec!["x", "y"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    class: Option<String>,
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Creates an empty plain record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty instance of `class`.
    pub fn instance(class: impl Into<String>) -> Self {
        Self {
            class: Some(class.into()),
            fields: IndexMap::new(),
        }
    }

    /// Adds a field and returns the record.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts or replaces a field, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Returns the field stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Class name for instances, `None` for plain records.
    pub fn class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Returns `true` if this record is a class instance.
    pub fn is_instance(&self) -> bool {
        self.class.is_some()
    }

    /// Iterates fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl PropertyLookup for Record {
    fn property(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn property_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}

/// Looks up a dotted path such as `a.b.c` through nested objects.
///
/// Returns `None` when any segment is missing, when an intermediate value is
/// not object-like, or when the final value is `undefined`.
///
/// # Examples
///
/// ```
/// use prop_types_core::{Record, Value, get_path};
///
/// let config = Record::new().with("server", Record::new().with("port", 8080));
/// assert_eq!(get_path(&config, "server.port"), Some(&Value::from(8080)));
/// assert_eq!(get_path(&config, "server.host"), None);
/// assert_eq!(get_path(&config, "server.port.value"), None);
/// ```
pub fn get_path<'a, L>(lookup: &'a L, path: &str) -> Option<&'a Value>
where
    L: PropertyLookup + ?Sized,
{
    let mut segments = path.split('.');
    let mut current = lookup.property(segments.next()?)?;
    for segment in segments {
        current = current.as_lookup()?.property(segment)?;
    }
    Some(current).filter(|value| !value.is_undefined())
}

/// Unique symbol; two symbols are equal only if one is a clone of the other.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// Creates a fresh symbol with a description.
    pub fn new(description: &str) -> Self {
        Self(Arc::from(description))
    }

    /// Description given at creation.
    pub fn description(&self) -> &str {
        &self.0
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

type Callable = dyn Fn(&[Value]) -> Value + Send + Sync;

/// Callable value; equality is identity of the underlying closure.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    call: Arc<Callable>,
}

impl Function {
    /// Wraps a closure.
    pub fn new<F>(name: &str, call: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            call: Arc::new(call),
        }
    }

    /// A function that ignores its arguments and returns `undefined`.
    pub fn noop(name: &str) -> Self {
        Self::new(name, |_| Value::Undefined)
    }

    /// Function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.call)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name)
    }
}

/// Element node, identified by its tag name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
}

impl Element {
    /// Creates an element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// Tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_compare_by_identity() {
        let a = Symbol::new("id");
        let b = Symbol::new("id");
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_functions_compare_by_identity() {
        let f = Function::noop("f");
        assert_eq!(Value::from(f.clone()), Value::from(f));
        assert_ne!(Function::noop("g"), Function::noop("g"));
    }

    #[test]
    fn test_type_of_distinguishes_instances() {
        assert_eq!(Value::from(Record::new()).type_of(), "object");
        assert_eq!(Value::from(Record::instance("User")).type_of(), "instance");
        assert_eq!(Value::Null.type_of(), "null");
    }

    #[test]
    fn test_get_path_treats_stored_undefined_as_missing() {
        let record = Record::new().with("a", Value::Undefined);
        assert_eq!(get_path(&record, "a"), None);
    }

    #[test]
    fn test_get_path_walks_instances() {
        let record = Record::new().with("owner", Record::instance("User").with("id", 7));
        assert_eq!(get_path(&record, "owner.id"), Some(&Value::from(7)));
    }

    #[test]
    fn test_from_json_builds_plain_records() {
        let value = Value::from(serde_json::json!({"a": [1, "b", null], "c": true}));
        let record = value.as_plain_record().unwrap();
        assert_eq!(
            record.get("a"),
            Some(&Value::from(vec![
                Value::from(1),
                Value::from("b"),
                Value::Null
            ]))
        );
        assert_eq!(record.get("c"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_display_matches_string_coercion() {
        assert_eq!(Value::from(3).to_string(), "3");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(
            Value::from(vec![Value::from(1), Value::Null, Value::from("x")]).to_string(),
            "1,,x"
        );
        assert_eq!(Value::from(Record::new()).to_string(), "[object Object]");
    }
}
