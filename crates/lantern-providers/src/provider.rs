//! Provider trait and registry.
//!
//! A provider wraps one external or simulated intelligence source behind a
//! uniform interface, so deterministic test doubles and real network-backed
//! implementations are interchangeable without touching orchestration.

use crate::error::{ProviderError, Result};
use crate::finding::Finding;
use async_trait::async_trait;
use lantern_core::{ProviderId, ValidatedQuery};
use std::collections::HashMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Uniform interface over one intelligence source.
///
/// Implementations must be thread-safe (`Send + Sync`), must honor the
/// cancel token by returning promptly rather than running to completion,
/// and must not mutate shared state: an invocation is a pure function of
/// the query plus the provider's own external call.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Look up the query against this source.
    ///
    /// # Errors
    /// Returns a [`ProviderError`] on timeout, upstream failure, rejection,
    /// rate limiting, or cancellation. The coordinator treats every kind
    /// uniformly as a non-fatal per-provider failure.
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding>;

    /// The unique identifier for this provider.
    fn id(&self) -> &ProviderId;
}

/// Immutable-after-construction map of provider implementations.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, Arc<dyn Provider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own ID, replacing any previous entry.
    pub fn insert(&mut self, provider: Arc<dyn Provider>) {
        let provider_id = provider.id().clone();
        debug!(provider_id = %provider_id, "registered provider");
        self.providers.insert(provider_id, provider);
    }

    /// Get a provider by ID.
    ///
    /// # Errors
    /// Returns [`ProviderError::NotFound`] if no provider is registered
    /// under the ID.
    pub fn get(&self, provider_id: &ProviderId) -> Result<Arc<dyn Provider>> {
        self.providers
            .get(provider_id)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound {
                provider_id: provider_id.to_string(),
            })
    }

    /// Check if a provider is registered.
    #[must_use]
    pub fn contains(&self, provider_id: &ProviderId) -> bool {
        self.providers.contains_key(provider_id)
    }

    /// All registered provider IDs.
    #[must_use]
    pub fn ids(&self) -> Vec<ProviderId> {
        self.providers.keys().cloned().collect()
    }

    /// The number of registered providers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider {
        id: ProviderId,
    }

    #[async_trait]
    impl Provider for EchoProvider {
        async fn invoke(
            &self,
            query: &ValidatedQuery,
            _cancel: &CancellationToken,
        ) -> Result<Finding> {
            Ok(Finding::Notice(query.canonical()))
        }

        fn id(&self) -> &ProviderId {
            &self.id
        }
    }

    #[tokio::test]
    async fn test_registry_lookup() {
        let mut registry = ProviderRegistry::new();
        let id = ProviderId::new("echo").expect("valid provider ID");
        registry.insert(Arc::new(EchoProvider { id: id.clone() }));

        assert!(registry.contains(&id));
        let provider = registry.get(&id).expect("provider registered");

        let query = ValidatedQuery::Target("acme.io".to_string());
        let finding = provider
            .invoke(&query, &CancellationToken::new())
            .await
            .expect("echo succeeds");
        assert_eq!(finding, Finding::Notice("acme.io".to_string()));
    }

    #[tokio::test]
    async fn test_registry_miss() {
        let registry = ProviderRegistry::new();
        let missing = ProviderId::new("absent").expect("valid provider ID");
        assert!(matches!(
            registry.get(&missing),
            Err(ProviderError::NotFound { .. })
        ));
    }
}
