//! Lantern Catalog - Static tool descriptor catalog.
//!
//! This crate defines the immutable tool catalog the investigation engine
//! dispatches against. Descriptors declare a tool's input kind, its report
//! shape, its entitlement gate, and the ordered provider binding.
//!
//! The catalog is loaded once at process start (builtin set or TOML) and
//! shared read-only; there is no mutation API.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod catalog;
pub mod descriptor;
pub mod error;

// Re-export commonly used types
pub use catalog::ToolCatalog;
pub use descriptor::{ReportKind, ToolCategory, ToolDescriptor};
pub use error::{CatalogError, Result};
