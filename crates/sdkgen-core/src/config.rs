//! Generation run configuration.
//!
//! Everything that changes how a document is turned into IR is passed in
//! explicitly through [`GenerationConfig`]; nothing is read from ambient
//! global state, so two builds with equal configs produce equal output.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::GenerationConfig;
//!
//! let config = GenerationConfig::default();
//! assert!(!config.qa_mode);
//! assert_eq!(config.max_depth, 32);
//!
//! let qa = GenerationConfig::builder().qa_mode(true).build();
//! assert!(qa.qa_mode);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default bound on attribute/sub-resource nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration for one generation run.
///
/// # Examples
///
/// ```
/// use sdkgen_core::GenerationConfig;
///
/// let config = GenerationConfig {
///     strict_extensions: true,
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Expose hidden, bulk and internal nodes.
    ///
    /// Used for internal-only generation passes.
    /// Default: false
    pub qa_mode: bool,

    /// Maximum nesting depth for attributes and sub-resources.
    ///
    /// Exceeding it aborts the build.
    /// Default: 32
    pub max_depth: usize,

    /// Reject unrecognized `x-` keys and wrongly typed values.
    ///
    /// When off, such keys are logged and fall back to their defaults.
    /// Default: false
    pub strict_extensions: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            qa_mode: false,
            max_depth: DEFAULT_MAX_DEPTH,
            strict_extensions: false,
        }
    }
}

impl GenerationConfig {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::GenerationConfig;
    ///
    /// let config = GenerationConfig::builder()
    ///     .max_depth(8)
    ///     .strict_extensions(true)
    ///     .build();
    ///
    /// assert_eq!(config.max_depth, 8);
    /// assert!(config.strict_extensions);
    /// ```
    #[must_use]
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder::new()
    }

    /// Parses a configuration from TOML.
    ///
    /// Missing keys take their defaults. The result is validated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the TOML is malformed or the values
    /// fail validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::GenerationConfig;
    ///
    /// let config = GenerationConfig::from_toml_str("qa_mode = true").unwrap();
    /// assert!(config.qa_mode);
    /// assert_eq!(config.max_depth, 32);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("Failed to parse configuration: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `max_depth` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::GenerationConfig;
    ///
    /// let mut invalid = GenerationConfig::default();
    /// invalid.max_depth = 0;
    /// assert!(invalid.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::ConfigError {
                message: "max_depth must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug, Clone, Default)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    /// Creates a builder seeded with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets QA mode.
    #[must_use]
    pub const fn qa_mode(mut self, enabled: bool) -> Self {
        self.config.qa_mode = enabled;
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Sets strict extension decoding.
    #[must_use]
    pub const fn strict_extensions(mut self, strict: bool) -> Self {
        self.config.strict_extensions = strict;
        self
    }

    /// Finishes the builder.
    #[must_use]
    pub fn build(self) -> GenerationConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GenerationConfig::default();
        assert!(!config.qa_mode);
        assert!(!config.strict_extensions);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GenerationConfig::builder()
            .qa_mode(true)
            .max_depth(4)
            .strict_extensions(true)
            .build();
        assert!(config.qa_mode);
        assert_eq!(config.max_depth, 4);
        assert!(config.strict_extensions);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let config = GenerationConfig::builder().max_depth(0).build();
        let err = config.validate().unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_from_toml_partial() {
        let config = GenerationConfig::from_toml_str("strict_extensions = true\n").unwrap();
        assert!(config.strict_extensions);
        assert!(!config.qa_mode);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_from_toml_invalid_depth() {
        assert!(GenerationConfig::from_toml_str("max_depth = 0").is_err());
    }

    #[test]
    fn test_from_toml_malformed() {
        let err = GenerationConfig::from_toml_str("qa_mode = ").unwrap_err();
        assert!(err.is_config_error());
    }
}
