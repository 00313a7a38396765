//! Error types for descriptor registration, validation, and loading.
//!
//! Configuration problems (unknown types, alias or descriptor cycles,
//! malformed schema files) and validation failures raised under
//! [`OnFailure::Throw`](crate::OnFailure::Throw) share one error type so hosts
//! can propagate both with `?`.

use thiserror::Error;

/// Errors that can occur while registering, loading, or validating.
#[derive(Debug, Error)]
pub enum PropTypeError {
    /// A descriptor names a type that has no rule in the registry.
    #[error("unknown property type: {0}")]
    UnknownType(String),

    /// Alias registrations loop back onto themselves.
    #[error("alias cycle detected while resolving type: {0}")]
    AliasCycle(String),

    /// A named type re-entered itself without descending into the value.
    #[error("descriptor cycle detected at property path: {0}")]
    DescriptorCycle(String),

    /// A schema declaration is structurally unusable.
    #[error("invalid descriptor at {path}: {reason}")]
    InvalidDescriptor {
        /// Property path of the offending descriptor.
        path: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A value failed validation and the failure policy asked to raise.
    ///
    /// Carries the diagnostic message verbatim.
    #[error("{0}")]
    Failed(String),

    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl PropTypeError {
    /// Returns `true` for errors caused by schema authoring rather than data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownType(_)
                | Self::AliasCycle(_)
                | Self::DescriptorCycle(_)
                | Self::InvalidDescriptor { .. }
        )
    }
}

/// Convenience alias for results with [`PropTypeError`].
pub type Result<T> = std::result::Result<T, PropTypeError>;
