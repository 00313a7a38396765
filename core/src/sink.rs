//! Diagnostic sinks: where validation failures go.
//!
//! The validator never formats log output or picks a destination. It calls
//! [`Sink::warn`] with the owning [`Context`], the message, and the active
//! [`OnFailure`] policy; the sink either records the message and returns
//! `Ok(())`, or raises [`PropTypeError::Failed`] carrying the message.

use std::cell::RefCell;
use std::fmt;

use tracing::warn;

use crate::error::{PropTypeError, Result};

/// Identity of the object being validated, carried into diagnostics.
///
/// # Examples
///
/// ```
/// use prop_types_core::Context;
///
/// let ctx = Context::new("user-card");
/// assert_eq!(ctx.name(), "user-card");
/// assert_eq!(ctx.to_string(), "user-card");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    name: String,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// What to do once a failure has been diagnosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnFailure {
    /// Log the message and keep going (the default).
    #[default]
    Log,
    /// Raise [`PropTypeError::Failed`] with the message.
    Throw,
}

impl OnFailure {
    /// Maps the boolean `throwErrors` switch onto a policy.
    pub fn from_throw_errors(throw_errors: bool) -> Self {
        if throw_errors { Self::Throw } else { Self::Log }
    }

    /// Raises for [`OnFailure::Throw`], does nothing otherwise.
    pub fn escalate(self, message: &str) -> Result<()> {
        match self {
            Self::Log => Ok(()),
            Self::Throw => Err(PropTypeError::Failed(message.to_string())),
        }
    }
}

/// Receiver of validation diagnostics.
pub trait Sink {
    /// Reports `message` for `ctx`.
    ///
    /// # Errors
    ///
    /// Returns [`PropTypeError::Failed`] carrying `message` when `on_failure`
    /// is [`OnFailure::Throw`].
    fn warn(&self, ctx: &Context, message: &str, on_failure: OnFailure) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &S {
    fn warn(&self, ctx: &Context, message: &str, on_failure: OnFailure) -> Result<()> {
        (**self).warn(ctx, message, on_failure)
    }
}

/// Sink that emits `tracing` warnings. Raising replaces logging.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl Sink for TracingSink {
    fn warn(&self, ctx: &Context, message: &str, on_failure: OnFailure) -> Result<()> {
        if on_failure == OnFailure::Log {
            warn!(context = %ctx, "{message}");
        }
        on_failure.escalate(message)
    }
}

/// One recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the context that produced it.
    pub context: String,
    /// Message text.
    pub message: String,
    /// Policy in effect when it was reported.
    pub on_failure: OnFailure,
}

/// Sink that keeps every diagnostic in memory, then applies the policy.
///
/// # Examples
///
/// ```
/// use prop_types_core::{Context, MemorySink, OnFailure, Sink};
///
/// let sink = MemorySink::new();
/// sink.warn(&Context::new("form"), "first", OnFailure::Log).unwrap();
/// assert!(sink.warn(&Context::new("form"), "second", OnFailure::Throw).is_err());
/// assert_eq!(sink.messages(), vec!["first", "second"]);
/// ```
#[derive(Debug, Default)]
pub struct MemorySink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded diagnostics, oldest first.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Recorded messages, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics
            .borrow()
            .iter()
            .map(|d| d.message.clone())
            .collect()
    }

    /// Returns `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

impl Sink for MemorySink {
    fn warn(&self, ctx: &Context, message: &str, on_failure: OnFailure) -> Result<()> {
        self.diagnostics.borrow_mut().push(Diagnostic {
            context: ctx.name().to_string(),
            message: message.to_string(),
            on_failure,
        });
        on_failure.escalate(message)
    }
}
