//! Lantern Providers - The provider adapter boundary.
//!
//! This crate defines the uniform interface over intelligence sources: the
//! [`Provider`] trait, the raw [`Finding`] payloads, the per-provider
//! error taxonomy, a registry, and the simulated provider set that stands
//! in for real WHOIS/DNS, breach-database, geolocation, and handle-search
//! backends.
//!
//! Orchestration never talks to a concrete source type; it resolves
//! providers through the registry and invokes them through the trait, so
//! real network-backed implementations are drop-in replacements.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod finding;
pub mod provider;
pub mod simulated;

// Re-export commonly used types
pub use error::{ProviderError, Result};
pub use finding::{
    DnsRecords, DomainFootprint, DorkCategory, DorkEntry, DorkSet, Finding, MailboxIntel,
    MxRecord, NetworkIntel, PlatformHit, PlatformScan, PortObservation, PortStatus,
    RegistrationIntel, RiskLevel, SocialPresence, SslInfo, Technology,
};
pub use provider::{Provider, ProviderRegistry};
pub use simulated::simulated_registry;
