//! Simulated provider implementations.
//!
//! These stand in for real WHOIS/DNS, breach-database, geolocation and
//! handle-search backends: same interface, same response shapes, but the
//! data is generated locally. Each provider draws from its own RNG,
//! seedable through [`SimulationConfig`] so tests are reproducible, and
//! sleeps a short simulated upstream latency that the cancel token can
//! interrupt.

mod breach_index;
mod dork_forge;
mod domain_recon;
mod geo_probe;
mod handle_search;
mod stub;
mod whois_registry;

pub use breach_index::BreachIndex;
pub use domain_recon::DomainRecon;
pub use dork_forge::DorkForge;
pub use geo_probe::GeoProbe;
pub use handle_search::HandleSearch;
pub use stub::StubAnalyst;
pub use whois_registry::WhoisRegistry;

use crate::error::{ProviderError, Result};
use crate::provider::ProviderRegistry;
use lantern_core::{ProviderId, SimulationConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Build the default simulated provider set.
#[must_use]
pub fn simulated_registry(config: &SimulationConfig) -> ProviderRegistry {
    let mut registry = ProviderRegistry::new();

    registry.insert(Arc::new(HandleSearch::new(config)));
    registry.insert(Arc::new(BreachIndex::new(config)));
    registry.insert(Arc::new(GeoProbe::new(config)));
    registry.insert(Arc::new(WhoisRegistry::new(config)));
    registry.insert(Arc::new(DomainRecon::new(config)));
    registry.insert(Arc::new(DorkForge::new()));

    // Sources the original toolbox lists but has no real lookup for yet
    for id in [
        "carrier-lookup",
        "metadata-extract",
        "reverse-image-search",
        "paste-scan",
    ] {
        registry.insert(Arc::new(StubAnalyst::new(id, config)));
    }

    registry
}

/// Shared simulation context: seeding and latency behavior.
#[derive(Debug, Clone)]
pub(crate) struct SimContext {
    seed: Option<u64>,
    min_latency: Duration,
    max_latency: Duration,
}

impl SimContext {
    pub(crate) fn from_config(config: &SimulationConfig) -> Self {
        Self {
            seed: config.seed,
            min_latency: Duration::from_millis(config.min_latency_ms),
            max_latency: Duration::from_millis(config.max_latency_ms),
        }
    }

    /// Per-call RNG. With a configured seed the stream is a pure function
    /// of seed plus query salt, so identical calls repeat exactly.
    pub(crate) fn rng(&self, salt: &str) -> StdRng {
        match self.seed {
            Some(seed) => {
                let mut hasher = DefaultHasher::new();
                salt.hash(&mut hasher);
                StdRng::seed_from_u64(seed ^ hasher.finish())
            }
            None => StdRng::from_entropy(),
        }
    }

    /// Sleep a simulated upstream latency, returning `Cancelled` promptly
    /// if the cancel token fires first.
    pub(crate) async fn latency(
        &self,
        rng: &mut StdRng,
        cancel: &CancellationToken,
        provider_id: &ProviderId,
    ) -> Result<()> {
        let wait = if self.max_latency > self.min_latency {
            let millis = rng.gen_range(self.min_latency.as_millis()..=self.max_latency.as_millis());
            Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX))
        } else {
            self.min_latency
        };

        tokio::select! {
            () = cancel.cancelled() => Err(ProviderError::Cancelled {
                provider_id: provider_id.clone(),
            }),
            () = tokio::time::sleep(wait) => Ok(()),
        }
    }
}

#[cfg(test)]
pub(crate) fn fast_sim(seed: u64) -> SimulationConfig {
    SimulationConfig {
        seed: Some(seed),
        min_latency_ms: 0,
        max_latency_ms: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let ctx = SimContext::from_config(&fast_sim(7));
        let a: u64 = ctx.rng("octocat").gen();
        let b: u64 = ctx.rng("octocat").gen();
        let c: u64 = ctx.rng("different").gen();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_default_registry_contents() {
        let registry = simulated_registry(&SimulationConfig::default());
        assert_eq!(registry.len(), 10);

        for id in [
            "handle-search",
            "breach-index",
            "geo-probe",
            "whois-registry",
            "domain-recon",
            "dork-forge",
            "carrier-lookup",
            "metadata-extract",
            "reverse-image-search",
            "paste-scan",
        ] {
            let provider_id = ProviderId::new(id).expect("valid provider ID");
            assert!(registry.contains(&provider_id), "missing provider: {id}");
        }
    }

    #[tokio::test]
    async fn test_latency_respects_cancellation() {
        let ctx = SimContext {
            seed: Some(1),
            min_latency: Duration::from_secs(60),
            max_latency: Duration::from_secs(60),
        };
        let provider_id = ProviderId::new("geo-probe").expect("valid provider ID");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut rng = ctx.rng("salt");
        let result = ctx.latency(&mut rng, &cancel, &provider_id).await;
        assert!(matches!(result, Err(ProviderError::Cancelled { .. })));
    }
}
