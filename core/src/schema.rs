//! Schema files: loading property declarations and checking them against a
//! registry before any value is validated.
//!
//! # Example YAML
//!
//! ```yaml
//! title:
//!   type: string
//!   required: true
//! size:
//!   type: oneOf
//!   values: [small, large]
//!   default: small
//! author:
//!   type: iface
//!   typeDefs:
//!     name: { type: string, required: true }
//! ```

use std::path::Path;

use crate::error::{PropTypeError, Result};
use crate::{Descriptor, Registry, Schema, TypeName};

/// Parses a schema from YAML text.
///
/// # Examples
///
/// ```
/// use prop_types_core::{TypeName, schema_from_yaml_str};
///
/// let schema = schema_from_yaml_str("title: { type: string, required: true }").unwrap();
/// assert_eq!(schema["title"].type_name, TypeName::String);
/// assert!(schema["title"].required);
/// ```
pub fn schema_from_yaml_str(yaml: &str) -> Result<Schema> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parses a schema from JSON text.
pub fn schema_from_json_str(json: &str) -> Result<Schema> {
    Ok(serde_json::from_str(json)?)
}

/// Loads a schema file; `.json` files are read as JSON, anything else as YAML.
///
/// # Errors
///
/// I/O and parse errors.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => schema_from_json_str(&text),
        _ => schema_from_yaml_str(&text),
    }
}

/// Verifies that every descriptor in `schema` can be dispatched.
///
/// Checks that each type resolves in `registry` and that composite types
/// carry the configuration their rules need.
///
/// # Errors
///
/// [`PropTypeError::UnknownType`] / [`PropTypeError::AliasCycle`] for
/// unresolvable types, [`PropTypeError::InvalidDescriptor`] for missing or
/// empty type-specific configuration.
///
/// # Examples
///
/// ```
/// use prop_types_core::*;
///
/// let schema = schema_from_yaml_str("tags: { type: arrayOf }").unwrap();
/// let err = check_schema(Registry::global(), &schema).unwrap_err();
/// assert_eq!(err.to_string(), "invalid descriptor at tags: arrayOf requires typeDef");
/// ```
pub fn check_schema(registry: &Registry, schema: &Schema) -> Result<()> {
    for (name, descriptor) in schema {
        check_descriptor(registry, name, descriptor)?;
    }
    Ok(())
}

fn check_descriptor(registry: &Registry, path: &str, descriptor: &Descriptor) -> Result<()> {
    let resolved = registry.resolve_type(&descriptor.type_name)?;

    let invalid = |reason: &str| PropTypeError::InvalidDescriptor {
        path: path.to_string(),
        reason: format!("{} {reason}", descriptor.type_name),
    };

    match resolved {
        TypeName::Iface | TypeName::Shape => match &descriptor.type_defs {
            None => return Err(invalid("requires typeDefs")),
            Some(defs) if defs.is_empty() => {
                return Err(invalid("requires non-empty typeDefs"));
            }
            Some(_) => {}
        },
        TypeName::ArrayOf | TypeName::ObjectOf if descriptor.element_type.is_none() => {
            return Err(invalid("requires typeDef"));
        }
        TypeName::InstanceOf if descriptor.class_name.is_none() => {
            return Err(invalid("requires className"));
        }
        TypeName::OneOf if descriptor.values.is_empty() => {
            return Err(invalid("requires values"));
        }
        TypeName::OneOfType if descriptor.validators.is_empty() => {
            return Err(invalid("requires validators"));
        }
        TypeName::Custom if descriptor.custom_validator.is_none() => {
            return Err(invalid("requires a validator function"));
        }
        _ => {}
    }

    if let Some(defs) = &descriptor.type_defs {
        for (key, def) in defs {
            check_descriptor(registry, &format!("{path}.{key}"), def)?;
        }
    }
    if let Some(element) = &descriptor.element_type {
        check_descriptor(registry, &format!("{path}[]"), element)?;
    }
    for alternative in &descriptor.validators {
        check_descriptor(registry, path, alternative)?;
    }
    Ok(())
}
