//! Whole-object helpers for hosts: validate every declared property, work
//! out which defaults apply, and check property updates.
//!
//! These never mutate the object. Hosts decide when to call them (creation,
//! each tracked change) and how to apply computed defaults.

use tracing::debug;

use crate::error::Result;
use crate::value::UNDEFINED;
use crate::{
    Context, Descriptor, OnFailure, PropertyLookup, Schema, Settings, Validator, Value, get_path,
};

/// Outcome of [`validate_props`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropsReport {
    /// Declared properties that failed, in declaration order.
    pub failed: Vec<String>,
}

impl PropsReport {
    /// Returns `true` if every declared property passed.
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Validates every property declared in `schema` on `object`.
///
/// Properties are read with dotted-path lookup; when a property is absent
/// and `settings.spread_property` names a record on the object, the property
/// is read from that record instead. Every property is checked even after a
/// failure.
///
/// Failures are raised when either the validator's options or
/// `settings.throw_errors` ask for it.
///
/// # Errors
///
/// Configuration errors, and [`PropTypeError::Failed`](crate::PropTypeError::Failed)
/// for the first failure when raising is enabled.
///
/// # Examples
///
/// ```
/// use prop_types_core::*;
///
/// let yaml = "title: { type: string, required: true }\ncount: { type: number }";
/// let schema = schema_from_yaml_str(yaml).unwrap();
/// let object = Record::new().with("count", "many");
/// let sink = MemorySink::new();
/// let validator = Validator::new(Registry::global(), &sink);
///
/// let settings = Settings::default();
/// let ctx = Context::new("post");
/// let report = validate_props(&validator, &ctx, &object, &schema, &settings).unwrap();
/// assert_eq!(report.failed, vec!["title", "count"]);
/// ```
pub fn validate_props(
    validator: &Validator<'_>,
    ctx: &Context,
    object: &dyn PropertyLookup,
    schema: &Schema,
    settings: &Settings,
) -> Result<PropsReport> {
    let validator = with_settings(validator, settings);
    let mut report = PropsReport::default();
    for (name, descriptor) in schema {
        let value = read_property(object, name, settings.spread_property.as_deref());
        if !validator.validate(ctx, name, value, descriptor)? {
            report.failed.push(name.clone());
        }
    }
    debug!(
        context = %ctx,
        declared = schema.len(),
        failed = report.failed.len(),
        "Validated declared properties"
    );
    Ok(report)
}

/// `validator` with its failure policy escalated by `settings.throw_errors`.
fn with_settings<'r>(validator: &Validator<'r>, settings: &Settings) -> Validator<'r> {
    let mut options = validator.options();
    if settings.throw_errors {
        options.on_failure = OnFailure::Throw;
    }
    validator.with_options(options)
}

fn read_property<'a>(
    object: &'a dyn PropertyLookup,
    name: &str,
    spread: Option<&str>,
) -> &'a Value {
    get_path(object, name)
        .or_else(|| {
            let options = object.property(spread?)?.as_lookup()?;
            get_path(options, name)
        })
        .unwrap_or(&UNDEFINED)
}

/// Returns the defaults to assign: `(name, default)` for each declared
/// property that is currently `undefined` and has a default.
///
/// # Examples
///
/// ```
/// use prop_types_core::*;
///
/// let schema: Schema = [
///     ("size".to_string(), Descriptor::string().with_default("small")),
///     ("title".to_string(), Descriptor::string().with_default("Untitled")),
///     ("tags".to_string(), Descriptor::array()),
/// ]
/// .into_iter()
/// .collect();
/// let object = Record::new().with("title", "Hello");
///
/// assert_eq!(defaults_for(&object, &schema), vec![("size".to_string(), Value::from("small"))]);
/// ```
pub fn defaults_for(object: &dyn PropertyLookup, schema: &Schema) -> Vec<(String, Value)> {
    schema
        .iter()
        .filter(|(name, _)| get_path(object, name).is_none())
        .filter_map(|(name, descriptor)| {
            descriptor
                .default_value
                .as_ref()
                .map(|default| (name.clone(), default.clone()))
        })
        .collect()
}

/// Checks a change of property `name` from `old` to `new`.
///
/// A property declared not updatable fails with
/// `Property {name} should not be updated` whenever the value changes.
/// Otherwise the new value is validated when `settings.validate_on_update`
/// is set, and accepted when it is not. As with [`validate_props`],
/// `settings.throw_errors` turns failures into errors.
///
/// # Errors
///
/// As for [`Validator::validate`].
pub fn validate_update(
    validator: &Validator<'_>,
    ctx: &Context,
    name: &str,
    old: &Value,
    new: &Value,
    descriptor: &Descriptor,
    settings: &Settings,
) -> Result<bool> {
    let validator = with_settings(validator, settings);
    if !descriptor.updatable && old != new {
        validator.report(ctx, &format!("Property {name} should not be updated"))?;
        return Ok(false);
    }
    if !settings.validate_on_update {
        return Ok(true);
    }
    validator.validate(ctx, name, new, descriptor)
}
