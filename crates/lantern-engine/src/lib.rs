//! Lantern Engine - Investigation orchestration for the Lantern workspace.
//!
//! This crate ties the catalog, validator and providers together: the
//! [`DispatchCoordinator`] accepts submissions, fans them out to the
//! tool's bound providers, normalizes whatever comes back, and records
//! every lifecycle transition in the [`InvestigationLedger`].
//!
//! # Modules
//!
//! - [`coordinator`] - Submission, dispatch and cancellation
//! - [`ledger`] - Investigation records and lifecycle states
//! - [`normalize`] - Raw findings to stable result payloads
//! - [`entitlement`] - Premium tool gating
//! - [`error`] - Submission errors
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use lantern_catalog::ToolCatalog;
//! use lantern_core::AppConfig;
//! use lantern_engine::{AllowAll, DispatchCoordinator, InvestigationLedger};
//! use lantern_providers::simulated_registry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # let runtime = tokio::runtime::Runtime::new()?;
//! # runtime.block_on(async {
//! let config = AppConfig::default();
//! let coordinator = DispatchCoordinator::new(
//!     Arc::new(ToolCatalog::builtin()),
//!     simulated_registry(&config.simulation),
//!     Arc::new(InvestigationLedger::new()),
//!     Arc::new(AllowAll),
//!     &config.dispatch,
//! );
//!
//! let tool_id = lantern_core::ToolId::new("username")?;
//! let id = coordinator.submit("local", &tool_id, "octocat")?;
//! println!("accepted: {id}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # })
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod coordinator;
pub mod entitlement;
pub mod error;
pub mod ledger;
pub mod normalize;

// Re-export commonly used types
pub use coordinator::DispatchCoordinator;
pub use entitlement::{AllowAll, EntitlementCheck, StaticEntitlements};
pub use error::SubmitError;
pub use ledger::{
    FailureReason, InvestigationLedger, InvestigationRecord, InvestigationState, LedgerError,
    ProviderNote,
};
pub use normalize::{
    normalize, NormalizeError, OpenPort, PlatformEntry, ResultPayload, ThreatFlags,
};
