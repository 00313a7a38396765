//! Type descriptors: the declarative side of validation.
//!
//! A [`Descriptor`] states what one property must look like: its
//! [`TypeName`], whether it is required, whether it may change after
//! creation, its default, and the type-specific constraints used by the
//! composite rules (element type, nested property map, allowed values,
//! alternative types, class name, custom predicate).
//!
//! Descriptors are built in code with the constructor helpers or loaded from
//! YAML/JSON schema files (see [`schema_from_yaml_str`](crate::schema_from_yaml_str)).

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::Value;

/// Ordered mapping of property name to descriptor.
pub type Schema = IndexMap<String, Descriptor>;

/// Name of a validation rule.
///
/// Built-in rules are enum variants so they are checked at compile time;
/// [`TypeName::Named`] covers rules, aliases and schemas registered at
/// runtime.
///
/// # Examples
///
/// ```
/// use prop_types_core::TypeName;
///
/// assert_eq!(TypeName::from("arrayOf"), TypeName::ArrayOf);
/// assert_eq!(TypeName::OneOfType.to_string(), "oneOfType");
/// assert_eq!(TypeName::from("user"), TypeName::Named("user".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeName {
    Any,
    Array,
    ArrayOf,
    Bool,
    Custom,
    Date,
    Element,
    Func,
    Iface,
    InstanceOf,
    Null,
    Number,
    Object,
    ObjectOf,
    /// Enumeration of allowed literal values.
    OneOf,
    /// Union of alternative descriptors.
    OneOfType,
    Shape,
    String,
    Symbol,
    /// Runtime-registered rule, alias, or schema.
    Named(String),
}

impl TypeName {
    /// Every built-in type, in registration order.
    pub const BUILTINS: [TypeName; 19] = [
        Self::Any,
        Self::Array,
        Self::ArrayOf,
        Self::Bool,
        Self::Custom,
        Self::Date,
        Self::Element,
        Self::Func,
        Self::Iface,
        Self::InstanceOf,
        Self::Null,
        Self::Number,
        Self::Object,
        Self::ObjectOf,
        Self::OneOf,
        Self::OneOfType,
        Self::Shape,
        Self::String,
        Self::Symbol,
    ];

    /// Name as written in descriptors.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => "any",
            Self::Array => "array",
            Self::ArrayOf => "arrayOf",
            Self::Bool => "bool",
            Self::Custom => "custom",
            Self::Date => "date",
            Self::Element => "element",
            Self::Func => "func",
            Self::Iface => "iface",
            Self::InstanceOf => "instanceOf",
            Self::Null => "null",
            Self::Number => "number",
            Self::Object => "object",
            Self::ObjectOf => "objectOf",
            Self::OneOf => "oneOf",
            Self::OneOfType => "oneOfType",
            Self::Shape => "shape",
            Self::String => "string",
            Self::Symbol => "symbol",
            Self::Named(name) => name,
        }
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::BUILTINS
            .iter()
            .find(|builtin| builtin.as_str() == name)
            .cloned()
            .unwrap_or_else(|| Self::Named(name.to_string()))
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        match name {
            TypeName::Named(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custom validation predicate; equality is identity.
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value) -> bool + Send + Sync>);

impl Predicate {
    /// Wraps a closure.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(predicate))
    }

    /// Evaluates the predicate.
    pub fn test(&self, value: &Value) -> bool {
        (self.0)(value)
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(..)")
    }
}

fn default_updatable() -> bool {
    true
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Declarative description of one property.
///
/// Use a constructor such as [`Descriptor::string`] or [`Descriptor::iface`],
/// then chain [`required`](Descriptor::required),
/// [`with_default`](Descriptor::with_default) or
/// [`not_updatable`](Descriptor::not_updatable).
///
/// # Examples
///
/// ```
/// use prop_types_core::{Descriptor, TypeName, Value};
///
/// let name = Descriptor::string().required();
/// assert!(name.required);
/// assert_eq!(name.type_name, TypeName::String);
///
/// let tags = Descriptor::array_of(Descriptor::string()).with_default(Value::Array(vec![]));
/// assert_eq!(tags.expected_type(), "arrayOf(string)");
///
/// let user = Descriptor::iface([
///     ("id", Descriptor::number().required()),
///     ("email", Descriptor::string()),
/// ]);
/// assert_eq!(user.type_defs.as_ref().map(|defs| defs.len()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Descriptor {
    /// Rule used to validate the value.
    #[serde(rename = "type")]
    pub type_name: TypeName,
    /// Whether an `undefined` value is a failure.
    #[serde(default)]
    pub required: bool,
    /// Whether the value may change once set.
    #[serde(default = "default_updatable")]
    pub updatable: bool,
    /// Value to assign when the property is absent.
    #[serde(default, rename = "default", deserialize_with = "present")]
    pub default_value: Option<Value>,
    /// Item descriptor for `arrayOf` and `objectOf`.
    #[serde(default, rename = "typeDef")]
    pub element_type: Option<Box<Descriptor>>,
    /// Nested property descriptors for `iface` and `shape`.
    #[serde(default)]
    pub type_defs: Option<Schema>,
    /// Allowed literals for `oneOf`.
    #[serde(default)]
    pub values: Vec<Value>,
    /// Alternatives for `oneOfType`, tried in order.
    #[serde(default)]
    pub validators: Vec<Descriptor>,
    /// Class name for `instanceOf`.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Predicate for `custom`.
    #[serde(skip)]
    pub custom_validator: Option<Predicate>,
}

impl Descriptor {
    /// Creates a descriptor with no constraints beyond its type.
    pub fn new(type_name: impl Into<TypeName>) -> Self {
        Self {
            type_name: type_name.into(),
            required: false,
            updatable: true,
            default_value: None,
            element_type: None,
            type_defs: None,
            values: Vec::new(),
            validators: Vec::new(),
            class_name: None,
            custom_validator: None,
        }
    }

    pub fn any() -> Self {
        Self::new(TypeName::Any)
    }

    pub fn array() -> Self {
        Self::new(TypeName::Array)
    }

    pub fn bool() -> Self {
        Self::new(TypeName::Bool)
    }

    pub fn date() -> Self {
        Self::new(TypeName::Date)
    }

    pub fn element() -> Self {
        Self::new(TypeName::Element)
    }

    pub fn func() -> Self {
        Self::new(TypeName::Func)
    }

    pub fn null() -> Self {
        Self::new(TypeName::Null)
    }

    pub fn number() -> Self {
        Self::new(TypeName::Number)
    }

    pub fn object() -> Self {
        Self::new(TypeName::Object)
    }

    pub fn string() -> Self {
        Self::new(TypeName::String)
    }

    pub fn symbol() -> Self {
        Self::new(TypeName::Symbol)
    }

    /// Array whose every item matches `element`.
    pub fn array_of(element: Descriptor) -> Self {
        Self {
            element_type: Some(Box::new(element)),
            ..Self::new(TypeName::ArrayOf)
        }
    }

    /// Plain record whose every field matches `element`.
    pub fn object_of(element: Descriptor) -> Self {
        Self {
            element_type: Some(Box::new(element)),
            ..Self::new(TypeName::ObjectOf)
        }
    }

    /// Object-like value (plain or instance) satisfying `type_defs`; extra
    /// properties are allowed.
    pub fn iface<I, K>(type_defs: I) -> Self
    where
        I: IntoIterator<Item = (K, Descriptor)>,
        K: Into<String>,
    {
        Self {
            type_defs: Some(collect_defs(type_defs)),
            ..Self::new(TypeName::Iface)
        }
    }

    /// Plain record satisfying `type_defs` with no extra properties.
    pub fn shape<I, K>(type_defs: I) -> Self
    where
        I: IntoIterator<Item = (K, Descriptor)>,
        K: Into<String>,
    {
        Self {
            type_defs: Some(collect_defs(type_defs)),
            ..Self::new(TypeName::Shape)
        }
    }

    /// Instance of the class named `class_name`.
    pub fn instance_of(class_name: impl Into<String>) -> Self {
        Self {
            class_name: Some(class_name.into()),
            ..Self::new(TypeName::InstanceOf)
        }
    }

    /// Strictly equal to one of `values`.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
            ..Self::new(TypeName::OneOf)
        }
    }

    /// Accepted by at least one of `validators`.
    pub fn one_of_type(validators: impl IntoIterator<Item = Descriptor>) -> Self {
        Self {
            validators: validators.into_iter().collect(),
            ..Self::new(TypeName::OneOfType)
        }
    }

    /// Accepted when `predicate` returns `true`.
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            custom_validator: Some(Predicate::new(predicate)),
            ..Self::new(TypeName::Custom)
        }
    }

    /// Refers to a runtime-registered rule, alias or schema.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(TypeName::Named(name.into()))
    }

    /// Marks the property as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Marks the property as fixed after creation.
    pub fn not_updatable(mut self) -> Self {
        self.updatable = false;
        self
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Human-readable expected type, e.g. `arrayOf(string)`.
    pub fn expected_type(&self) -> String {
        match (&self.type_name, &self.element_type) {
            (TypeName::ArrayOf | TypeName::ObjectOf, Some(element)) => {
                format!("{}({})", self.type_name, element.expected_type())
            }
            (name, _) => name.to_string(),
        }
    }
}

fn collect_defs<I, K>(type_defs: I) -> Schema
where
    I: IntoIterator<Item = (K, Descriptor)>,
    K: Into<String>,
{
    type_defs
        .into_iter()
        .map(|(key, def)| (key.into(), def))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name_round_trips_builtin_names() {
        for builtin in TypeName::BUILTINS {
            assert_eq!(TypeName::from(builtin.as_str()), builtin);
        }
    }

    #[test]
    fn test_deserialize_nested_descriptor() {
        let yaml = r#"
type: iface
required: true
typeDefs:
  name:
    type: string
    required: true
  tags:
    type: arrayOf
    typeDef:
      type: string
  size:
    type: oneOf
    values: [small, large]
    default: small
"#;
        let descriptor: Descriptor = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(descriptor.type_name, TypeName::Iface);
        assert!(descriptor.required);
        let defs = descriptor.type_defs.unwrap();
        assert_eq!(
            defs.keys().collect::<Vec<_>>(),
            vec!["name", "tags", "size"]
        );
        assert_eq!(defs["tags"].expected_type(), "arrayOf(string)");
        assert_eq!(defs["size"].default_value, Some(Value::from("small")));
        assert!(defs["size"].updatable);
    }

    #[test]
    fn test_deserialize_keeps_explicit_null_default() {
        let descriptor: Descriptor =
            serde_json::from_str(r#"{"type":"null","default":null}"#).unwrap();
        assert_eq!(descriptor.default_value, Some(Value::Null));
    }

    #[test]
    fn test_deserialize_rejects_unknown_keys() {
        let result: Result<Descriptor, _> =
            serde_json::from_str(r#"{"type":"string","requird":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_descriptors_compare_by_predicate_identity() {
        let a = Descriptor::custom(|_| true);
        assert_eq!(a, a.clone());
        assert_ne!(a, Descriptor::custom(|_| true));
    }
}
