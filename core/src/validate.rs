//! Validation entry points and the per-run session.
//!
//! [`validate`] is the single function a host calls for a declared property:
//! it applies required/optional semantics to `undefined` values and
//! dispatches everything else to the rule registered for the descriptor's
//! type. Rules recurse through [`Session::check`], which keeps the registry,
//! sink and failure policy for the whole run, plus the frames used to detect
//! descriptor cycles.

use crate::error::{PropTypeError, Result};
use crate::{Context, Descriptor, OnFailure, Registry, Sink, TracingSink, TypeName, Value};

/// Logging and escalation switches for a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Report failures to the sink at all.
    pub log_errors: bool,
    /// What the sink does with reported failures.
    pub on_failure: OnFailure,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            log_errors: true,
            on_failure: OnFailure::Log,
        }
    }
}

/// One value to check against one descriptor.
#[derive(Debug, Clone, Copy)]
pub struct Check<'a> {
    /// Owning object, for diagnostics.
    pub ctx: &'a Context,
    /// Dotted/indexed path of the value, e.g. `user.tags[2]`.
    pub path: &'a str,
    /// Value under test.
    pub value: &'a Value,
    /// Descriptor it must satisfy.
    pub descriptor: &'a Descriptor,
    /// Whether failures found by this check are reported.
    pub log_errors: bool,
}

/// State shared by every rule invoked during one validation run.
pub struct Session<'r> {
    registry: &'r Registry,
    sink: &'r dyn Sink,
    on_failure: OnFailure,
    named: Vec<(TypeName, String)>,
}

impl<'r> Session<'r> {
    pub fn new(registry: &'r Registry, sink: &'r dyn Sink, on_failure: OnFailure) -> Self {
        Self {
            registry,
            sink,
            on_failure,
            named: Vec::new(),
        }
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    pub fn on_failure(&self) -> OnFailure {
        self.on_failure
    }

    /// Dispatches `check` to the rule registered for its descriptor's type.
    ///
    /// # Errors
    ///
    /// Configuration errors from resolution, cycle detection, and any
    /// [`PropTypeError::Failed`] raised by the sink.
    pub fn check(&mut self, check: Check<'_>) -> Result<bool> {
        let registry = self.registry;
        let rule = registry.resolve(&check.descriptor.type_name)?;
        rule(self, check)
    }

    /// Reports a data failure (when the check logs) and returns `Ok(false)`.
    pub fn fail(&self, check: &Check<'_>, message: &str) -> Result<bool> {
        if check.log_errors {
            self.sink.warn(check.ctx, message, self.on_failure)?;
        }
        Ok(false)
    }

    /// Reports a schema-authoring problem and returns `Ok(false)`.
    ///
    /// Always logged, never raised, regardless of the check's logging flag or
    /// the session's policy.
    pub fn misconfigured(&self, check: &Check<'_>, message: &str) -> Result<bool> {
        self.sink.warn(check.ctx, message, OnFailure::Log)?;
        Ok(false)
    }

    pub(crate) fn enter_named(&mut self, name: &TypeName, path: &str) -> Result<()> {
        if self.named.iter().any(|(n, p)| n == name && p == path) {
            return Err(PropTypeError::DescriptorCycle(path.to_string()));
        }
        self.named.push((name.clone(), path.to_string()));
        Ok(())
    }

    pub(crate) fn leave_named(&mut self) {
        self.named.pop();
    }
}

/// Validates one property value against its descriptor.
///
/// An `undefined` value passes when the descriptor is not required and fails
/// with `Missing required property {path}` when it is. Any other value is
/// handed to the rule for the descriptor's type.
///
/// # Errors
///
/// [`PropTypeError::UnknownType`] and the other configuration errors when
/// the descriptor cannot be dispatched; [`PropTypeError::Failed`] when the
/// value fails and `options.on_failure` is [`OnFailure::Throw`].
///
/// # Examples
///
/// ```
/// use prop_types_core::*;
///
/// let sink = MemorySink::new();
/// let ctx = Context::new("widget");
/// let options = ValidationOptions::default();
/// let required = Descriptor::func().required();
///
/// let registry = Registry::global();
/// let missing = Value::Undefined;
///
/// let ok = validate(registry, &sink, &ctx, "bar", &missing, &Descriptor::func(), options);
/// assert!(ok.unwrap());
///
/// let ok = validate(registry, &sink, &ctx, "bar", &missing, &required, options);
/// assert!(!ok.unwrap());
/// assert_eq!(sink.messages(), vec!["Missing required property bar"]);
/// ```
pub fn validate(
    registry: &Registry,
    sink: &dyn Sink,
    ctx: &Context,
    path: &str,
    value: &Value,
    descriptor: &Descriptor,
    options: ValidationOptions,
) -> Result<bool> {
    if value.is_undefined() {
        if !descriptor.required {
            return Ok(true);
        }
        if options.log_errors {
            sink.warn(
                ctx,
                &format!("Missing required property {path}"),
                options.on_failure,
            )?;
        }
        return Ok(false);
    }

    let mut session = Session::new(registry, sink, options.on_failure);
    session.check(Check {
        ctx,
        path,
        value,
        descriptor,
        log_errors: options.log_errors,
    })
}

/// A registry and sink bundled with the options to validate with.
///
/// # Examples
///
/// ```
/// use prop_types_core::*;
///
/// let validator = Validator::global();
/// let ctx = Context::new("widget");
/// assert!(validator.validate(&ctx, "count", &Value::from(3), &Descriptor::number()).unwrap());
/// assert!(!validator.validate(&ctx, "count", &Value::from("3"), &Descriptor::number()).unwrap());
/// ```
#[derive(Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r Registry,
    sink: &'r dyn Sink,
    options: ValidationOptions,
}

impl Validator<'static> {
    /// Validator over [`Registry::global`] reporting to [`TracingSink`].
    pub fn global() -> Self {
        static SINK: TracingSink = TracingSink;
        Self::new(Registry::global(), &SINK)
    }
}

impl<'r> Validator<'r> {
    pub fn new(registry: &'r Registry, sink: &'r dyn Sink) -> Self {
        Self {
            registry,
            sink,
            options: ValidationOptions::default(),
        }
    }

    /// Replaces the options.
    pub fn with_options(mut self, options: ValidationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ValidationOptions {
        self.options
    }

    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// See [`validate`].
    pub fn validate(
        &self,
        ctx: &Context,
        path: &str,
        value: &Value,
        descriptor: &Descriptor,
    ) -> Result<bool> {
        validate(
            self.registry,
            self.sink,
            ctx,
            path,
            value,
            descriptor,
            self.options,
        )
    }

    /// Reports `message` under this validator's options.
    pub fn report(&self, ctx: &Context, message: &str) -> Result<()> {
        if self.options.log_errors {
            self.sink.warn(ctx, message, self.options.on_failure)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MemorySink, Record};

    fn ctx() -> Context {
        Context::new("foo")
    }

    #[test]
    fn test_optional_undefined_never_reaches_sink() {
        let sink = MemorySink::new();
        let validator = Validator::new(Registry::global(), &sink);
        for builtin in TypeName::BUILTINS {
            let descriptor = Descriptor::new(builtin);
            assert!(validator.validate(&ctx(), "bar", &Value::Undefined, &descriptor).unwrap());
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_required_func_missing() {
        let sink = MemorySink::new();
        let validator = Validator::new(Registry::global(), &sink);
        let descriptor = Descriptor::func().required();
        assert!(!validator.validate(&ctx(), "bar", &Value::Undefined, &descriptor).unwrap());
        assert_eq!(sink.messages(), vec!["Missing required property bar"]);
    }

    #[test]
    fn test_required_func_given_number() {
        let sink = MemorySink::new();
        let validator = Validator::new(Registry::global(), &sink);
        let descriptor = Descriptor::func().required();
        assert!(!validator.validate(&ctx(), "bar", &Value::from(1), &descriptor).unwrap());
        assert_eq!(sink.messages(), vec!["Expected property bar to be a function"]);
    }

    #[test]
    fn test_throw_policy_raises_message() {
        let sink = MemorySink::new();
        let validator = Validator::new(Registry::global(), &sink).with_options(ValidationOptions {
            log_errors: true,
            on_failure: OnFailure::Throw,
        });
        let err = validator
            .validate(&ctx(), "bar", &Value::from(1), &Descriptor::func())
            .unwrap_err();
        assert!(matches!(
            err,
            PropTypeError::Failed(ref m) if m == "Expected property bar to be a function"
        ));
    }

    #[test]
    fn test_silent_options_skip_sink() {
        let sink = MemorySink::new();
        let validator = Validator::new(Registry::global(), &sink).with_options(ValidationOptions {
            log_errors: false,
            on_failure: OnFailure::Throw,
        });
        assert!(!validator.validate(&ctx(), "bar", &Value::from(1), &Descriptor::func()).unwrap());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_type_fails_the_run() {
        let sink = MemorySink::new();
        let validator = Validator::new(Registry::global(), &sink);
        let descriptor = Descriptor::iface([("a", Descriptor::named("missing"))]);
        let value = Value::from(Record::new().with("a", 1));
        let err = validator.validate(&ctx(), "bar", &value, &descriptor).unwrap_err();
        assert!(matches!(err, PropTypeError::UnknownType(ref name) if name == "missing"));
    }
}
