//! Provider error taxonomy.
//!
//! Every kind is a non-fatal per-provider failure from the coordinator's
//! point of view: it is absorbed into the aggregation policy and recorded
//! as a diagnostic, never surfaced raw to the submitter.

use lantern_core::ProviderId;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single provider invocation.
#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    /// The call exceeded the per-provider timeout
    #[error("provider {provider_id} timed out")]
    Timeout {
        /// The provider that timed out
        provider_id: ProviderId,
    },

    /// The upstream source could not be reached
    #[error("upstream unavailable for provider {provider_id}: {reason}")]
    UpstreamUnavailable {
        /// The provider whose upstream is unavailable
        provider_id: ProviderId,
        /// Upstream-supplied or transport-level detail
        reason: String,
    },

    /// The upstream source rejected the request (e.g., malformed input for
    /// that source)
    #[error("upstream rejected request for provider {provider_id}: {reason}")]
    UpstreamRejected {
        /// The provider whose upstream rejected the request
        provider_id: ProviderId,
        /// Why the request was rejected
        reason: String,
    },

    /// The upstream source is rate limiting this client
    #[error("provider {provider_id} rate limited, retry after {retry_after:?}")]
    RateLimited {
        /// The rate-limited provider
        provider_id: ProviderId,
        /// Suggested wait before retrying
        retry_after: Duration,
    },

    /// The cancel signal fired mid-call and the provider returned promptly
    #[error("provider {provider_id} call was cancelled")]
    Cancelled {
        /// The cancelled provider
        provider_id: ProviderId,
    },

    /// No provider with this ID is registered
    #[error("provider not found: {provider_id}")]
    NotFound {
        /// The unrecognized provider identifier
        provider_id: String,
    },
}

impl ProviderError {
    /// Short stable tag for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "timeout",
            Self::UpstreamUnavailable { .. } => "upstream-unavailable",
            Self::UpstreamRejected { .. } => "upstream-rejected",
            Self::RateLimited { .. } => "rate-limited",
            Self::Cancelled { .. } => "cancelled",
            Self::NotFound { .. } => "not-found",
        }
    }
}

/// Result type alias using `ProviderError`.
pub type Result<T> = std::result::Result<T, ProviderError>;
