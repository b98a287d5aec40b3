//! Version resolution.
//!
//! Derives the API-version / product-catalog-version pair a run generates
//! for from document-level extensions. Resolution never fails: absent or
//! unrecognized values fall back to the newest pair.
//!
//! # Examples
//!
//! ```
//! use sdkgen_core::{ApiVersion, Extensions, ProductCatalogVersion, Version};
//!
//! let version = Version::resolve(&Extensions::default());
//! assert_eq!(version.api, ApiVersion::V2);
//! assert_eq!(version.product_catalog, ProductCatalogVersion::PC2);
//! ```

use crate::extension::Extensions;
use serde::Serialize;
use std::fmt;

/// API version a run generates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ApiVersion {
    /// Legacy API
    V1,
    /// Current API
    V2,
}

impl ApiVersion {
    /// Lower-case tag, e.g. `v2`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }
}

/// Product catalog version a run generates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProductCatalogVersion {
    /// Catalog 1.0 (plans and addons)
    PC1,
    /// Catalog 2.0 (items and item prices)
    PC2,
}

impl ProductCatalogVersion {
    /// Maps a catalog tag (`1` or `2`) to a version.
    #[must_use]
    pub const fn from_tag(tag: i64) -> Option<Self> {
        match tag {
            1 => Some(Self::PC1),
            2 => Some(Self::PC2),
            _ => None,
        }
    }

    /// Lower-case tag, e.g. `pc2`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PC1 => "pc1",
            Self::PC2 => "pc2",
        }
    }
}

/// Resolved version pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Version {
    /// API version
    pub api: ApiVersion,
    /// Product catalog version
    pub product_catalog: ProductCatalogVersion,
}

impl Default for Version {
    fn default() -> Self {
        Self {
            api: ApiVersion::V2,
            product_catalog: ProductCatalogVersion::PC2,
        }
    }
}

impl Version {
    /// Resolves the version from decoded document-level extensions.
    ///
    /// API version `1` means `{V1, PC1}`. API version `2` stays on `PC2`
    /// unless the catalog version is `1`. Anything else is `{V2, PC2}`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sdkgen_core::{ApiVersion, Extensions, ProductCatalogVersion, Version};
    ///
    /// let ext = Extensions {
    ///     api_version: Some(2),
    ///     product_catalog_version: Some(1),
    ///     ..Default::default()
    /// };
    /// let version = Version::resolve(&ext);
    /// assert_eq!(version.api, ApiVersion::V2);
    /// assert_eq!(version.product_catalog, ProductCatalogVersion::PC1);
    /// ```
    #[must_use]
    pub fn resolve(document: &Extensions) -> Self {
        match document.api_version {
            Some(1) => Self {
                api: ApiVersion::V1,
                product_catalog: ProductCatalogVersion::PC1,
            },
            Some(2) if document.product_catalog_version == Some(1) => Self {
                api: ApiVersion::V2,
                product_catalog: ProductCatalogVersion::PC1,
            },
            Some(2) | None => Self::default(),
            Some(other) => {
                tracing::warn!(api_version = other, "Unrecognized API version, using V2");
                Self::default()
            }
        }
    }

    /// Whether a resource with the given catalog tag belongs to this version.
    ///
    /// Untagged resources always match. Unknown tags never match.
    #[must_use]
    pub fn includes_catalog(&self, tag: Option<i64>) -> bool {
        match tag {
            None => true,
            Some(tag) => ProductCatalogVersion::from_tag(tag) == Some(self.product_catalog),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?}", self.api, self.product_catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ext(api: Option<i64>, catalog: Option<i64>) -> Extensions {
        Extensions {
            api_version: api,
            product_catalog_version: catalog,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_is_latest() {
        assert_eq!(Version::resolve(&ext(None, None)), Version::default());
        assert_eq!(Version::resolve(&ext(None, Some(1))), Version::default());
    }

    #[test]
    fn test_v1_forces_pc1() {
        let version = Version::resolve(&ext(Some(1), Some(2)));
        assert_eq!(version.api, ApiVersion::V1);
        assert_eq!(version.product_catalog, ProductCatalogVersion::PC1);
    }

    #[test]
    fn test_v2_catalog_downgrade() {
        let version = Version::resolve(&ext(Some(2), Some(1)));
        assert_eq!(version.api, ApiVersion::V2);
        assert_eq!(version.product_catalog, ProductCatalogVersion::PC1);

        let version = Version::resolve(&ext(Some(2), Some(2)));
        assert_eq!(version.product_catalog, ProductCatalogVersion::PC2);
    }

    #[test]
    fn test_unknown_api_version_defaults() {
        assert_eq!(Version::resolve(&ext(Some(7), None)), Version::default());
    }

    #[test]
    fn test_includes_catalog() {
        let version = Version::default();
        assert!(version.includes_catalog(None));
        assert!(version.includes_catalog(Some(2)));
        assert!(!version.includes_catalog(Some(1)));
        assert!(!version.includes_catalog(Some(9)));
    }

    #[test]
    fn test_display() {
        assert_eq!(Version::default().to_string(), "V2/PC2");
    }
}
