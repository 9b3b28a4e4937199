//! Placeholder provider for sources with no lookup implementation yet.

use super::SimContext;
use crate::error::Result;
use crate::finding::Finding;
use crate::provider::Provider;
use async_trait::async_trait;
use lantern_core::{ProviderId, SimulationConfig, ValidatedQuery};
use tokio_util::sync::CancellationToken;

/// Accepts any query, waits a simulated latency, and reports a notice.
pub struct StubAnalyst {
    id: ProviderId,
    sim: SimContext,
}

impl StubAnalyst {
    /// Create a stub provider under the given ID.
    #[must_use]
    pub fn new(id: &str, config: &SimulationConfig) -> Self {
        Self {
            id: ProviderId::new(id).expect("valid provider ID"),
            sim: SimContext::from_config(config),
        }
    }
}

#[async_trait]
impl Provider for StubAnalyst {
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding> {
        let mut rng = self.sim.rng(&query.canonical());
        self.sim.latency(&mut rng, cancel, &self.id).await?;

        Ok(Finding::Notice("Analysis complete".to_string()))
    }

    fn id(&self) -> &ProviderId {
        &self.id
    }
}
