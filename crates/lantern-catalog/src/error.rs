//! Catalog error types.

use thiserror::Error;

/// Errors produced while building or querying the tool catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The requested tool is not in the catalog
    #[error("tool not found: {tool_id}")]
    NotFound {
        /// The unrecognized tool identifier
        tool_id: String,
    },

    /// Two descriptors share the same identifier
    #[error("duplicate tool ID: {tool_id}")]
    Duplicate {
        /// The duplicated tool identifier
        tool_id: String,
    },

    /// A descriptor failed validation
    #[error("invalid descriptor for {tool_id}: {reason}")]
    ValidationError {
        /// The offending tool identifier
        tool_id: String,
        /// Why validation failed
        reason: String,
    },

    /// A catalog TOML document failed to parse
    #[error("failed to parse catalog TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// An identifier in a catalog document is malformed
    #[error(transparent)]
    Core(#[from] lantern_core::CoreError),
}

/// Result type alias using `CatalogError`.
pub type Result<T> = std::result::Result<T, CatalogError>;
