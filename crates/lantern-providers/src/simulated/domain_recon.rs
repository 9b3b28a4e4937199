//! Simulated subdomain enumeration, technology fingerprinting, TLS
//! inspection, and DNS resolution.

use super::SimContext;
use crate::error::{ProviderError, Result};
use crate::finding::{DnsRecords, DomainFootprint, Finding, MxRecord, SslInfo, Technology};
use crate::provider::Provider;
use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use lantern_core::{ProviderId, SimulationConfig, ValidatedQuery};
use rand::rngs::StdRng;
use rand::Rng;
use tokio_util::sync::CancellationToken;

const COMMON_SUBDOMAINS: &[&str] = &[
    "www", "mail", "ftp", "admin", "api", "blog", "shop", "dev", "staging", "test",
];

/// Technology fingerprint table: name, category, optional version.
const TECHNOLOGIES: &[(&str, &str, Option<&str>)] = &[
    ("Cloudflare", "CDN", None),
    ("Nginx", "Web Server", Some("1.18.0")),
    ("React", "JavaScript Framework", Some("18.2.0")),
    ("Next.js", "Web Framework", Some("13.4.0")),
    ("WordPress", "CMS", Some("6.2")),
    ("Apache", "Web Server", Some("2.4.41")),
    ("PHP", "Programming Language", Some("8.1")),
    ("MySQL", "Database", Some("8.0")),
];

const SSL_GRADES: &[&str] = &["A+", "A", "B", "C"];

const TXT_RECORDS: &[&str] = &[
    "v=spf1 include:_spf.google.com ~all",
    "google-site-verification=abcd1234efgh5678",
];

fn random_ipv4(rng: &mut StdRng) -> String {
    let octets: [u8; 4] = rng.gen();
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

/// Simulated domain footprint source.
pub struct DomainRecon {
    id: ProviderId,
    sim: SimContext,
}

impl DomainRecon {
    /// Create the provider with the given simulation settings.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            id: ProviderId::new("domain-recon").expect("valid provider ID"),
            sim: SimContext::from_config(config),
        }
    }
}

#[async_trait]
impl Provider for DomainRecon {
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding> {
        let ValidatedQuery::Domain(domain) = query else {
            return Err(ProviderError::UpstreamRejected {
                provider_id: self.id.clone(),
                reason: "expected a domain query".to_string(),
            });
        };

        let mut rng = self.sim.rng(domain);
        self.sim.latency(&mut rng, cancel, &self.id).await?;

        let subdomains = COMMON_SUBDOMAINS
            .iter()
            .filter(|_| rng.gen_bool(0.4))
            .map(|sub| format!("{sub}.{domain}"))
            .collect();

        let technologies = TECHNOLOGIES
            .iter()
            .filter(|_| rng.gen_bool(0.4))
            .map(|&(name, category, version)| Technology {
                name: name.to_string(),
                category: category.to_string(),
                version: version.map(String::from),
            })
            .collect();

        let ssl = SslInfo {
            valid: rng.gen_bool(0.9),
            issuer: "Let's Encrypt Authority X3".to_string(),
            expires: Utc::now().date_naive() + ChronoDuration::days(90),
            grade: SSL_GRADES[rng.gen_range(0..SSL_GRADES.len())].to_string(),
        };

        let dns = DnsRecords {
            a: vec![random_ipv4(&mut rng), random_ipv4(&mut rng)],
            aaaa: vec!["2606:4700:3034::ac43:bd8f".to_string()],
            mx: vec![
                MxRecord {
                    priority: 10,
                    exchange: format!("mail.{domain}"),
                },
                MxRecord {
                    priority: 20,
                    exchange: format!("mail2.{domain}"),
                },
            ],
            txt: TXT_RECORDS.iter().map(|s| (*s).to_string()).collect(),
            cname: vec![format!("www.{domain}")],
        };

        Ok(Finding::DomainFootprint(DomainFootprint {
            domain: domain.clone(),
            subdomains,
            technologies,
            ssl,
            dns,
        }))
    }

    fn id(&self) -> &ProviderId {
        &self.id
    }
}
