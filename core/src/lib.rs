//! Runtime validation of property shapes against declarative descriptors.
//!
//! This crate checks dynamic [`Value`]s against [`Descriptor`]s:
//!
//! - [`Descriptor`]: what one property must look like (type, requiredness,
//!   default, nested constraints).
//! - [`Registry`]: the rules each [`TypeName`] dispatches to: primitives,
//!   `arrayOf`/`objectOf`, `oneOf` (enumeration), `oneOfType` (union),
//!   `shape`/`iface` (nested property maps), `custom` predicates, plus
//!   runtime-registered rules, aliases and recursive named schemas.
//! - [`Sink`]: where diagnostics go. [`TracingSink`] logs through `tracing`,
//!   [`MemorySink`] records them; under [`OnFailure::Throw`] the sink raises
//!   [`PropTypeError::Failed`] instead.
//!
//! Hosts call [`validate`] (or [`Validator::validate`]) per property, or
//! [`validate_props`] for every declared property of an object, and use
//! [`defaults_for`] and [`validate_update`] around creation and mutation.
//!
//! # Example
//!
//! ```
//! use prop_types_core::*;
//!
//! let user = Descriptor::iface([
//!     ("name", Descriptor::string().required()),
//!     ("tags", Descriptor::array_of(Descriptor::string())),
//! ]);
//!
//! let sink = MemorySink::new();
//! let validator = Validator::new(Registry::global(), &sink);
//! let ctx = Context::new("profile");
//!
//! let good = Value::from(Record::new().with("name", "ada"));
//! assert!(validator.validate(&ctx, "user", &good, &user).unwrap());
//!
//! let bad = Value::from(Record::new().with("tags", vec![Value::from(1)]));
//! assert!(!validator.validate(&ctx, "user", &bad, &user).unwrap());
//! assert_eq!(sink.messages()[0], "Property user is missing required property name");
//! assert_eq!(sink.messages()[1], "Expected property user.tags[0] to be a string");
//! ```

mod config;
mod descriptor;
mod error;
mod props;
mod registry;
mod render;
mod rules;
mod schema;
mod sink;
mod validate;
mod value;

pub use config::Settings;
pub use descriptor::{Descriptor, Predicate, Schema, TypeName};
pub use error::{PropTypeError, Result};
pub use props::{PropsReport, defaults_for, validate_props, validate_update};
pub use registry::{Registry, Rule};
pub use render::{MAX_RENDER_DEPTH, render_json};
pub use schema::{check_schema, load_schema, schema_from_json_str, schema_from_yaml_str};
pub use sink::{Context, Diagnostic, MemorySink, OnFailure, Sink, TracingSink};
pub use validate::{Check, Session, ValidationOptions, Validator, validate};
pub use value::{Element, Function, PropertyLookup, Record, Symbol, Value, get_path};
