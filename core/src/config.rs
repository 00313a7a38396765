//! Installation-level settings.
//!
//! Controls how failures escalate, whether updates are re-validated, and
//! where spread options live on host objects. Loaded from YAML; every key is
//! optional.
//!
//! # Example YAML
//!
//! ```yaml
//! throwErrors: false
//! validateOnUpdate: true
//! spreadProperty: options
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::{OnFailure, ValidationOptions};

/// Validation settings for a host installation.
///
/// # Examples
///
/// ```
/// use prop_types_core::{OnFailure, Settings};
///
/// let settings = Settings::from_yaml_str("throwErrors: true").unwrap();
/// assert_eq!(settings.on_failure(), OnFailure::Throw);
/// assert!(settings.validate_on_update);
/// assert_eq!(settings.spread_property, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Raise failures instead of logging them.
    pub throw_errors: bool,
    /// Re-validate properties when they change.
    pub validate_on_update: bool,
    /// Property holding a record of options that are read as if they were
    /// declared on the object itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_property: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            throw_errors: false,
            validate_on_update: true,
            spread_property: None,
        }
    }
}

impl Settings {
    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::PropTypeError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::PropTypeError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let settings = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(settings)
    }

    /// Parses settings from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Saves the settings as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::PropTypeError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::PropTypeError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn on_failure(&self) -> OnFailure {
        OnFailure::from_throw_errors(self.throw_errors)
    }

    /// Options for validators built from these settings. Logging is on.
    pub fn options(&self) -> ValidationOptions {
        ValidationOptions {
            log_errors: true,
            on_failure: self.on_failure(),
        }
    }
}
