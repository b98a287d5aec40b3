//! Error types for SDK generation.
//!
//! One hierarchy covers the whole pipeline. Construction errors (a document
//! that breaks the minimum extension contract, reference cycles, duplicate
//! resource ids) are raised while the IR is built, before any shaping or
//! rendering starts. Rendering failures use their own variant so callers can
//! tell the two apart.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{Error, Result};
//!
//! fn require_method_name(operation: &str, name: Option<&str>) -> Result<String> {
//!     name.map(str::to_string).ok_or_else(|| Error::MissingExtension {
//!         location: operation.to_string(),
//!         key: "x-cb-operation-method-name",
//!     })
//! }
//!
//! let err = require_method_name("create_customer", None).unwrap_err();
//! assert!(err.is_construction_error());
//! ```

use thiserror::Error;

/// Main error type for SDK generation.
#[derive(Error, Debug)]
pub enum Error {
    /// A required extension key is absent.
    ///
    /// Every operation must carry a method-name extension; this is the
    /// minimum contract an authored document has to satisfy.
    #[error("Missing required extension '{key}' on {location}")]
    MissingExtension {
        /// Operation or schema the key was expected on
        location: String,
        /// Registry name of the missing key
        key: &'static str,
    },

    /// An operation carries no vendor extensions at all.
    #[error("Operation {operation} has no vendor extensions")]
    MissingExtensions {
        /// Operation identifier (operationId or method + path)
        operation: String,
    },

    /// An `x-` key outside the registry was found while strict mode is on.
    #[error("Unrecognized extension '{key}' on {location}")]
    UnknownExtension {
        /// Node carrying the key
        location: String,
        /// The unrecognized key
        key: String,
    },

    /// A registry key carries a value of the wrong type while strict mode is on.
    #[error("Extension '{key}' on {location} must be {expected}")]
    InvalidExtensionValue {
        /// Node carrying the key
        location: String,
        /// Registry name of the key
        key: &'static str,
        /// Human-readable expected kind
        expected: &'static str,
    },

    /// A `$ref` does not point at a known component schema.
    #[error("Unresolved schema reference: {reference}")]
    UnresolvedReference {
        /// The reference string as written in the document
        reference: String,
    },

    /// A `$ref` chain re-enters a schema that is already being expanded.
    #[error("Cyclic schema reference: {chain}")]
    CyclicReference {
        /// The offending chain, joined with ` -> `
        chain: String,
    },

    /// Attribute or sub-resource nesting went deeper than the configured bound.
    #[error("Nesting deeper than {limit} levels at {location}")]
    DepthLimitExceeded {
        /// Configured maximum depth
        limit: usize,
        /// Attribute path where the bound was hit
        location: String,
    },

    /// Two resource schemas declare the same resource id.
    #[error("Duplicate resource id '{id}'")]
    DuplicateResourceId {
        /// The repeated id
        id: String,
    },

    /// The document could not be parsed.
    #[error("Document parse error: {message}")]
    DocumentParse {
        /// Description of the parse failure
        message: String,
        /// Underlying serde error
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration is invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Template registration or rendering failed.
    #[error("Render error: {message}")]
    RenderError {
        /// Description of the rendering failure
        message: String,
    },
}

impl Error {
    /// Returns `true` for errors raised while building the IR.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Error;
    ///
    /// let err = Error::DuplicateResourceId { id: "customer".to_string() };
    /// assert!(err.is_construction_error());
    ///
    /// let err = Error::RenderError { message: "bad template".to_string() };
    /// assert!(!err.is_construction_error());
    /// ```
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::MissingExtension { .. }
                | Self::MissingExtensions { .. }
                | Self::UnknownExtension { .. }
                | Self::InvalidExtensionValue { .. }
                | Self::UnresolvedReference { .. }
                | Self::CyclicReference { .. }
                | Self::DepthLimitExceeded { .. }
                | Self::DuplicateResourceId { .. }
        )
    }

    /// Returns `true` if this error comes from `$ref` handling or nesting bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::Error;
    ///
    /// let err = Error::CyclicReference { chain: "A -> B -> A".to_string() };
    /// assert!(err.is_reference_error());
    /// ```
    #[must_use]
    pub const fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedReference { .. }
                | Self::CyclicReference { .. }
                | Self::DepthLimitExceeded { .. }
        )
    }

    /// Returns `true` if this is a configuration error.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a rendering error.
    #[must_use]
    pub const fn is_render_error(&self) -> bool {
        matches!(self, Self::RenderError { .. })
    }
}

/// Result type alias used throughout the generator.
pub type Result<T> = std::result::Result<T, Error>;
