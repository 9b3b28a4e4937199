//! Simulated WHOIS registration lookup.

use super::SimContext;
use crate::error::{ProviderError, Result};
use crate::finding::{Finding, RegistrationIntel};
use crate::provider::Provider;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use lantern_core::{ProviderId, SimulationConfig, ValidatedQuery};
use rand::Rng;
use tokio_util::sync::CancellationToken;

const REGISTRARS: &[&str] = &[
    "GoDaddy LLC",
    "Namecheap Inc.",
    "Google Domains LLC",
    "Network Solutions LLC",
    "Tucows Domains Inc.",
    "MarkMonitor Inc.",
    "Amazon Registrar Inc.",
    "Cloudflare Inc.",
];

const STATUSES: &[&str] = &["clientTransferProhibited", "clientUpdateProhibited"];

/// Simulated registration/WHOIS source.
pub struct WhoisRegistry {
    id: ProviderId,
    sim: SimContext,
}

impl WhoisRegistry {
    /// Create the provider with the given simulation settings.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            id: ProviderId::new("whois-registry").expect("valid provider ID"),
            sim: SimContext::from_config(config),
        }
    }
}

#[async_trait]
impl Provider for WhoisRegistry {
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding> {
        let ValidatedQuery::Domain(domain) = query else {
            return Err(ProviderError::UpstreamRejected {
                provider_id: self.id.clone(),
                reason: "expected a domain query".to_string(),
            });
        };

        let mut rng = self.sim.rng(domain);
        self.sim.latency(&mut rng, cancel, &self.id).await?;

        let today = Utc::now().date_naive();
        let created = today - ChronoDuration::days(rng.gen_range(0..10 * 365));
        let expires = today + ChronoDuration::days(rng.gen_range(1..=2 * 365));
        let updated = today - ChronoDuration::days(rng.gen_range(0..365));

        Ok(Finding::RegistrationIntel(RegistrationIntel {
            domain: domain.clone(),
            registrar: REGISTRARS[rng.gen_range(0..REGISTRARS.len())].to_string(),
            created,
            expires,
            updated,
            statuses: STATUSES.iter().map(|s| (*s).to_string()).collect(),
            nameservers: vec![
                format!("ns1.{domain}"),
                format!("ns2.{domain}"),
                "ns1.cloudflare.com".to_string(),
                "ns2.cloudflare.com".to_string(),
            ],
            contact_emails: vec![
                format!("admin@{domain}"),
                format!("tech@{domain}"),
                format!("hostmaster@{domain}"),
            ],
        }))
    }

    fn id(&self) -> &ProviderId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulated::fast_sim;

    #[tokio::test]
    async fn test_whois_shape() {
        let provider = WhoisRegistry::new(&fast_sim(21));
        let query = ValidatedQuery::Domain("example.com".to_string());
        let finding = provider
            .invoke(&query, &CancellationToken::new())
            .await
            .expect("lookup succeeds");

        let Finding::RegistrationIntel(intel) = finding else {
            panic!("expected registration intel");
        };
        assert_eq!(intel.domain, "example.com");
        assert!(REGISTRARS.contains(&intel.registrar.as_str()));
        assert!(intel.created <= Utc::now().date_naive());
        assert!(intel.expires > Utc::now().date_naive());
        assert_eq!(intel.nameservers[0], "ns1.example.com");
        assert!(intel.contact_emails.contains(&"admin@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_seeded_repeatability() {
        let provider = WhoisRegistry::new(&fast_sim(21));
        let query = ValidatedQuery::Domain("example.com".to_string());

        let first = provider
            .invoke(&query, &CancellationToken::new())
            .await
            .expect("lookup succeeds");
        let second = provider
            .invoke(&query, &CancellationToken::new())
            .await
            .expect("lookup succeeds");
        assert_eq!(first, second);
    }
}
