//! Simulated handle presence search across social platforms.

use super::SimContext;
use crate::error::{ProviderError, Result};
use crate::finding::{Finding, PlatformHit, PlatformScan};
use crate::provider::Provider;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use lantern_core::{ProviderId, SimulationConfig, Timestamp, ValidatedQuery};
use rand::Rng;
use tokio_util::sync::CancellationToken;

/// Platform table: name and profile URL prefix. Platforms without a public
/// profile URL (Discord) are checked but omitted from results.
const PLATFORMS: &[(&str, Option<&str>)] = &[
    ("GitHub", Some("https://github.com/")),
    ("Twitter", Some("https://twitter.com/")),
    ("Instagram", Some("https://instagram.com/")),
    ("LinkedIn", Some("https://linkedin.com/in/")),
    ("Reddit", Some("https://reddit.com/user/")),
    ("YouTube", Some("https://youtube.com/@")),
    ("TikTok", Some("https://tiktok.com/@")),
    ("Discord", None),
    ("Telegram", Some("https://t.me/")),
    ("Steam", Some("https://steamcommunity.com/id/")),
    ("Twitch", Some("https://twitch.tv/")),
    ("Facebook", Some("https://facebook.com/")),
];

/// Simulated identity/handle search source.
pub struct HandleSearch {
    id: ProviderId,
    sim: SimContext,
}

impl HandleSearch {
    /// Create the provider with the given simulation settings.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            id: ProviderId::new("handle-search").expect("valid provider ID"),
            sim: SimContext::from_config(config),
        }
    }
}

#[async_trait]
impl Provider for HandleSearch {
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding> {
        let ValidatedQuery::Username(username) = query else {
            return Err(ProviderError::UpstreamRejected {
                provider_id: self.id.clone(),
                reason: "expected a username query".to_string(),
            });
        };

        let mut rng = self.sim.rng(username);
        self.sim.latency(&mut rng, cancel, &self.id).await?;

        let now = Utc::now();
        let mut platforms = Vec::new();

        for (name, base_url) in PLATFORMS {
            // GitHub has an API behind it and hits more often
            let found = if *name == "GitHub" {
                rng.gen_bool(0.6)
            } else {
                rng.gen_bool(0.5)
            };

            let Some(base_url) = base_url else { continue };

            let profile = if *name == "GitHub" && found {
                Some(serde_json::json!({
                    "followers": rng.gen_range(0..1000),
                    "repos": rng.gen_range(0..50),
                }))
            } else {
                None
            };

            let last_seen = found.then(|| {
                let seconds_ago = rng.gen_range(0..30 * 24 * 60 * 60);
                Timestamp::from_datetime(now - ChronoDuration::seconds(seconds_ago))
            });

            platforms.push(PlatformHit {
                name: (*name).to_string(),
                found,
                url: format!("{base_url}{username}"),
                last_seen,
                profile,
            });
        }

        Ok(Finding::PlatformScan(PlatformScan { platforms }))
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
    async fn test_handle_search_shape() {
        let provider = HandleSearch::new(&fast_sim(11));
        let query = ValidatedQuery::Username("octocat".to_string());
        let finding = provider
            .invoke(&query, &CancellationToken::new())
            .await
            .expect("lookup succeeds");

        let Finding::PlatformScan(scan) = finding else {
            panic!("expected a platform scan");
        };

        // Discord carries no public profile URL and is omitted
        assert_eq!(scan.platforms.len(), PLATFORMS.len() - 1);
        assert!(scan.platforms.iter().all(|p| p.name != "Discord"));

        let github = scan
            .platforms
            .iter()
            .find(|p| p.name == "GitHub")
            .expect("GitHub entry present");
        assert_eq!(github.url, "https://github.com/octocat");
        // Profile data and last-seen only accompany a hit
        if !github.found {
            assert!(github.profile.is_none());
            assert!(github.last_seen.is_none());
        }
    }

    #[tokio::test]
    async fn test_handle_search_rejects_other_queries() {
        let provider = HandleSearch::new(&fast_sim(11));
        let query = ValidatedQuery::Ip("8.8.8.8".to_string());
        let result = provider.invoke(&query, &CancellationToken::new()).await;
        assert!(matches!(
            result,
            Err(ProviderError::UpstreamRejected { .. })
        ));
    }

    #[tokio::test]
    async fn test_handle_search_seeded_repeatability() {
        let provider = HandleSearch::new(&fast_sim(42));
        let query = ValidatedQuery::Username("octocat".to_string());

        let first = provider
            .invoke(&query, &CancellationToken::new())
            .await
            .expect("lookup succeeds");
        let second = provider
            .invoke(&query, &CancellationToken::new())
            .await
            .expect("lookup succeeds");

        // Timestamps differ between calls, but the hit pattern must not
        let hits = |finding: &Finding| -> Vec<bool> {
            let Finding::PlatformScan(scan) = finding else {
                panic!("expected a platform scan");
            };
            scan.platforms.iter().map(|p| p.found).collect()
        };
        assert_eq!(hits(&first), hits(&second));
    }
}
