//! Lantern Core - Foundation crate for the Lantern investigation engine.
//!
//! This crate provides the shared types, query validation, error
//! foundations, and configuration that all other Lantern crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Core error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes and enums (`ToolId`, `ProviderId`, `InvestigationId`, `QueryKind`, `Timestamp`)
//! - [`validate`] - Per-kind syntactic query validation
//!
//! # Example
//!
//! ```rust
//! use lantern_core::{validate_query, QueryKind, ValidatedQuery};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let query = validate_query(QueryKind::Domain, "https://www.example.com/path")?;
//! assert_eq!(query, ValidatedQuery::Domain("example.com".to_string()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;
pub mod validate;

// Re-export commonly used types
pub use config::{AppConfig, DispatchConfig, SimulationConfig};
pub use error::{ConfigError, ConfigResult, CoreError};
pub use types::{InvestigationId, ProviderId, QueryKind, Timestamp, ToolId};
pub use validate::{validate_query, ValidatedQuery, ValidationError};
