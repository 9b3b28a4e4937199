//! Simulated breach-database and mailbox validity check.

use super::SimContext;
use crate::error::{ProviderError, Result};
use crate::finding::{Finding, MailboxIntel, SocialPresence};
use crate::provider::Provider;
use async_trait::async_trait;
use lantern_core::{ProviderId, SimulationConfig, ValidatedQuery};
use rand::seq::SliceRandom;
use rand::Rng;
use tokio_util::sync::CancellationToken;

/// Well-known breach corpus names.
const KNOWN_BREACHES: &[&str] = &[
    "Adobe (2013)",
    "LinkedIn (2012)",
    "Dropbox (2012)",
    "Yahoo (2013-2014)",
    "Equifax (2017)",
    "Facebook (2019)",
    "Twitter (2022)",
    "LastPass (2022)",
    "Marriott (2018)",
    "Capital One (2019)",
];

/// Domains of known disposable-mail services.
const DISPOSABLE_DOMAINS: &[&str] = &[
    "10minutemail.com",
    "tempmail.org",
    "guerrillamail.com",
    "mailinator.com",
    "throwaway.email",
];

/// Platforms checked for accounts registered under the local part.
const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("Gravatar", "https://gravatar.com/"),
    ("GitHub", "https://github.com/"),
    ("Google+", "https://plus.google.com/"),
];

/// Simulated breach/validity source.
pub struct BreachIndex {
    id: ProviderId,
    sim: SimContext,
}

impl BreachIndex {
    /// Create the provider with the given simulation settings.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            id: ProviderId::new("breach-index").expect("valid provider ID"),
            sim: SimContext::from_config(config),
        }
    }
}

#[async_trait]
impl Provider for BreachIndex {
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding> {
        let ValidatedQuery::Email { local, domain } = query else {
            return Err(ProviderError::UpstreamRejected {
                provider_id: self.id.clone(),
                reason: "expected an email query".to_string(),
            });
        };

        let mut rng = self.sim.rng(&query.canonical());
        self.sim.latency(&mut rng, cancel, &self.id).await?;

        let disposable = DISPOSABLE_DOMAINS.contains(&domain.as_str());
        let valid = rng.gen_bool(0.9);

        let breach_count = rng.gen_range(0..=5);
        let mut pool: Vec<&str> = KNOWN_BREACHES.to_vec();
        pool.shuffle(&mut rng);
        let breaches = pool
            .into_iter()
            .take(breach_count)
            .map(String::from)
            .collect();

        let social_presence = SOCIAL_PLATFORMS
            .iter()
            .map(|&(platform, base_url)| SocialPresence {
                platform: platform.to_string(),
                found: rng.gen_bool(0.4),
                url: format!("{base_url}{local}"),
            })
            .collect();

        Ok(Finding::MailboxIntel(MailboxIntel {
            valid,
            disposable,
            domain: domain.clone(),
            breaches,
            social_presence,
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

    fn email(local: &str, domain: &str) -> ValidatedQuery {
        ValidatedQuery::Email {
            local: local.to_string(),
            domain: domain.to_string(),
        }
    }

    #[tokio::test]
    async fn test_breach_index_shape() {
        let provider = BreachIndex::new(&fast_sim(3));
        let finding = provider
            .invoke(&email("alice", "example.com"), &CancellationToken::new())
            .await
            .expect("lookup succeeds");

        let Finding::MailboxIntel(intel) = finding else {
            panic!("expected mailbox intel");
        };
        assert_eq!(intel.domain, "example.com");
        assert!(!intel.disposable);
        assert!(intel.breaches.len() <= 5);
        assert!(intel
            .breaches
            .iter()
            .all(|b| KNOWN_BREACHES.contains(&b.as_str())));

        // Account checks use the local part under each platform's base URL
        assert_eq!(intel.social_presence.len(), SOCIAL_PLATFORMS.len());
        let gravatar = &intel.social_presence[0];
        assert_eq!(gravatar.platform, "Gravatar");
        assert_eq!(gravatar.url, "https://gravatar.com/alice");
    }

    #[tokio::test]
    async fn test_disposable_domain_flagged() {
        let provider = BreachIndex::new(&fast_sim(3));
        let finding = provider
            .invoke(
                &email("anyone", "mailinator.com"),
                &CancellationToken::new(),
            )
            .await
            .expect("lookup succeeds");

        let Finding::MailboxIntel(intel) = finding else {
            panic!("expected mailbox intel");
        };
        assert!(intel.disposable);
    }

    #[tokio::test]
    async fn test_seeded_repeatability() {
        let provider = BreachIndex::new(&fast_sim(99));
        let query = email("alice", "example.com");

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
