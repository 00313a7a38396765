//! The validator registry: type name to validation rule.
//!
//! A [`Registry`] owns every rule a validation run can dispatch to. Built-in
//! rules are installed by [`Registry::with_builtins`]; hosts add their own
//! rules, aliases of existing types, and named schemas (which may refer to
//! themselves, e.g. linked lists or trees).
//!
//! Registration happens up front. Once validation starts the registry is
//! only read, so a shared process-wide instance ([`Registry::global`]) needs
//! no locking.
//!
//! # Examples
//!
//! ```
//! use prop_types_core::*;
//!
//! let mut registry = Registry::with_builtins();
//! registry.register_alias("text", TypeName::String);
//! registry.register_schema(
//!     "point",
//!     Descriptor::iface([
//!         ("x", Descriptor::number().required()),
//!         ("y", Descriptor::number().required()),
//!     ]),
//! );
//!
//! let sink = MemorySink::new();
//! let validator = Validator::new(&registry, &sink);
//! let ctx = Context::new("chart");
//! let point = Value::from(Record::new().with("x", 1).with("y", 2));
//!
//! assert!(validator.validate(&ctx, "origin", &point, &Descriptor::named("point")).unwrap());
//! let label = Value::from("hi");
//! assert!(validator.validate(&ctx, "label", &label, &Descriptor::named("text")).unwrap());
//! assert!(matches!(
//!     validator.validate(&ctx, "x", &Value::from(1), &Descriptor::named("nope")),
//!     Err(PropTypeError::UnknownType(_))
//! ));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;

use crate::error::{PropTypeError, Result};
use crate::rules;
use crate::validate::{Check, Session};
use crate::{Descriptor, TypeName};

/// A validation rule.
///
/// Receives the running [`Session`] (for recursion and reporting) and the
/// [`Check`] to perform; returns whether the value passed.
pub type Rule = Arc<dyn Fn(&mut Session<'_>, Check<'_>) -> Result<bool> + Send + Sync>;

#[derive(Clone)]
enum Entry {
    Rule(Rule),
    Alias(TypeName),
}

/// Mapping from [`TypeName`] to [`Rule`].
#[derive(Clone, Default)]
pub struct Registry {
    entries: HashMap<TypeName, Entry>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding every built-in rule.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        rules::register_builtins(&mut registry);
        registry
    }

    /// Process-wide registry of built-in rules.
    pub fn global() -> &'static Registry {
        static GLOBAL: OnceLock<Registry> = OnceLock::new();
        GLOBAL.get_or_init(Registry::with_builtins)
    }

    /// Adds or replaces the rule for `name`. Last registration wins.
    pub fn register<F>(&mut self, name: impl Into<TypeName>, rule: F)
    where
        F: Fn(&mut Session<'_>, Check<'_>) -> Result<bool> + Send + Sync + 'static,
    {
        self.insert(name.into(), Entry::Rule(Arc::new(rule)));
    }

    /// Makes `name` resolve to whatever `target` resolves to.
    pub fn register_alias(&mut self, name: impl Into<TypeName>, target: impl Into<TypeName>) {
        self.insert(name.into(), Entry::Alias(target.into()));
    }

    /// Registers `name` as a reusable schema.
    ///
    /// Values checked against `name` are validated against `descriptor`.
    /// The descriptor may refer back to `name` as long as each reference sits
    /// below a property of the value; a reference at the same property path
    /// is reported as [`PropTypeError::DescriptorCycle`].
    pub fn register_schema(&mut self, name: impl Into<String>, descriptor: Descriptor) {
        let name = TypeName::Named(name.into());
        let descriptor = Arc::new(descriptor);
        let frame = name.clone();
        self.register(name, move |session: &mut Session<'_>, check: Check<'_>| {
            session.enter_named(&frame, check.path)?;
            let result = session.check(Check {
                descriptor: &*descriptor,
                ..check
            });
            session.leave_named();
            result
        });
    }

    /// Returns the rule for `name`, following aliases.
    ///
    /// # Errors
    ///
    /// As for [`Registry::resolve_type`].
    pub fn resolve(&self, name: &TypeName) -> Result<&Rule> {
        match self.entries.get(self.resolve_type(name)?) {
            Some(Entry::Rule(rule)) => Ok(rule),
            _ => Err(PropTypeError::UnknownType(name.to_string())),
        }
    }

    /// Follows aliases from `name` to the type that owns a rule.
    ///
    /// # Errors
    ///
    /// [`PropTypeError::UnknownType`] if nothing is registered under `name`
    /// (or under an alias target), [`PropTypeError::AliasCycle`] if aliases
    /// loop.
    ///
    /// # Examples
    ///
    /// ```
    /// use prop_types_core::{Registry, TypeName};
    ///
    /// let mut registry = Registry::with_builtins();
    /// registry.register_alias("props", TypeName::Iface);
    /// registry.register_alias("attrs", "props");
    /// assert_eq!(registry.resolve_type(&TypeName::from("attrs")).unwrap(), &TypeName::Iface);
    /// ```
    pub fn resolve_type<'a>(&'a self, name: &'a TypeName) -> Result<&'a TypeName> {
        let mut current = name;
        let mut seen: Vec<&TypeName> = Vec::new();
        loop {
            match self.entries.get(current) {
                Some(Entry::Rule(_)) => return Ok(current),
                Some(Entry::Alias(target)) => {
                    if seen.contains(&current) {
                        return Err(PropTypeError::AliasCycle(name.to_string()));
                    }
                    seen.push(current);
                    current = target;
                }
                None => return Err(PropTypeError::UnknownType(current.to_string())),
            }
        }
    }

    /// Returns `true` if `name` is registered (as a rule or alias).
    pub fn contains(&self, name: &TypeName) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, name: TypeName, entry: Entry) {
        if self.entries.insert(name.clone(), entry).is_some() {
            debug!(type_name = %name, "Replaced registered property type");
        }
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.entries.keys().map(TypeName::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Context, MemorySink, Record, Validator, Value};

    #[test]
    fn test_builtins_cover_every_type_name() {
        let registry = Registry::with_builtins();
        for builtin in TypeName::BUILTINS {
            assert!(registry.resolve(&builtin).is_ok(), "missing {builtin}");
        }
        assert_eq!(registry.len(), TypeName::BUILTINS.len());
    }

    #[test]
    fn test_resolve_unknown_type_fails() {
        let registry = Registry::new();
        let err = registry.resolve(&TypeName::String).err().unwrap();
        assert!(matches!(err, PropTypeError::UnknownType(name) if name == "string"));
    }

    #[test]
    fn test_alias_cycle_is_reported() {
        let mut registry = Registry::new();
        registry.register_alias("a", "b");
        registry.register_alias("b", "a");
        let err = registry.resolve(&TypeName::from("a")).err().unwrap();
        assert!(matches!(err, PropTypeError::AliasCycle(_)));
        assert!(err.is_configuration());
    }

    #[test]
    fn test_resolve_type_follows_alias_chain() {
        let mut registry = Registry::with_builtins();
        registry.register_alias("list", TypeName::ArrayOf);
        registry.register_alias("items", "list");
        assert_eq!(registry.resolve_type(&TypeName::from("items")).unwrap(), &TypeName::ArrayOf);
        assert_eq!(registry.resolve_type(&TypeName::String).unwrap(), &TypeName::String);

        let mut dangling = Registry::new();
        dangling.register_alias("text", TypeName::String);
        let err = dangling.resolve_type(&TypeName::from("text")).unwrap_err();
        assert!(matches!(err, PropTypeError::UnknownType(name) if name == "string"));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = Registry::with_builtins();
        registry.register(TypeName::String, |_: &mut Session<'_>, _: Check<'_>| Ok(true));
        let sink = MemorySink::new();
        let validator = Validator::new(&registry, &sink);
        assert!(validator
            .validate(&Context::new("c"), "p", &Value::from(1), &Descriptor::string())
            .unwrap());
    }

    #[test]
    fn test_recursive_schema_validates_linked_list() {
        let mut registry = Registry::with_builtins();
        registry.register_schema(
            "node",
            Descriptor::iface([
                ("value", Descriptor::number().required()),
                ("next", Descriptor::named("node")),
            ]),
        );
        let list = Record::new()
            .with("value", 1)
            .with("next", Record::new().with("value", 2).with("next", Record::new()));
        let sink = MemorySink::new();
        let validator = Validator::new(&registry, &sink);
        let valid = validator
            .validate(&Context::new("list"), "head", &Value::from(list), &Descriptor::named("node"))
            .unwrap();
        assert!(!valid);
        assert_eq!(
            sink.messages()[0],
            "Property head.next.next is missing required property value"
        );
    }

    #[test]
    fn test_self_referencing_schema_is_a_cycle() {
        let mut registry = Registry::with_builtins();
        registry.register_schema("loop", Descriptor::named("loop"));
        let sink = MemorySink::new();
        let validator = Validator::new(&registry, &sink);
        let err = validator
            .validate(&Context::new("c"), "p", &Value::from(1), &Descriptor::named("loop"))
            .unwrap_err();
        assert!(matches!(err, PropTypeError::DescriptorCycle(path) if path == "p"));
    }
}
