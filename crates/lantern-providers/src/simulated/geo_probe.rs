//! Simulated IP geolocation, threat detection, and port scan.

use super::SimContext;
use crate::error::{ProviderError, Result};
use crate::finding::{Finding, NetworkIntel, PortObservation, PortStatus};
use crate::provider::Provider;
use async_trait::async_trait;
use lantern_core::{ProviderId, SimulationConfig, ValidatedQuery};
use rand::Rng;
use tokio_util::sync::CancellationToken;

/// Sample geolocations: country, region, city, latitude, longitude, timezone.
const LOCATIONS: &[(&str, &str, &str, f64, f64, &str)] = &[
    ("United States", "California", "San Francisco", 37.7749, -122.4194, "America/Los_Angeles"),
    ("United Kingdom", "England", "London", 51.5074, -0.1278, "Europe/London"),
    ("Germany", "Berlin", "Berlin", 52.5200, 13.4050, "Europe/Berlin"),
    ("Japan", "Tokyo", "Tokyo", 35.6762, 139.6503, "Asia/Tokyo"),
    ("Canada", "Ontario", "Toronto", 43.6532, -79.3832, "America/Toronto"),
    ("Australia", "New South Wales", "Sydney", -33.8688, 151.2093, "Australia/Sydney"),
];

const ISPS: &[&str] = &[
    "Cloudflare Inc.",
    "Amazon Technologies Inc.",
    "Google LLC",
    "Microsoft Corporation",
    "Comcast Cable Communications",
    "Verizon Communications",
    "AT&T Services Inc.",
    "Deutsche Telekom AG",
    "China Telecom",
    "NTT Communications",
];

/// Commonly scanned ports and their services.
const COMMON_PORTS: &[(u16, &str)] = &[
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (25, "SMTP"),
    (53, "DNS"),
    (80, "HTTP"),
    (110, "POP3"),
    (143, "IMAP"),
    (443, "HTTPS"),
    (993, "IMAPS"),
    (995, "POP3S"),
];

/// Simulated geolocation/network-scan source.
pub struct GeoProbe {
    id: ProviderId,
    sim: SimContext,
}

impl GeoProbe {
    /// Create the provider with the given simulation settings.
    #[must_use]
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            id: ProviderId::new("geo-probe").expect("valid provider ID"),
            sim: SimContext::from_config(config),
        }
    }
}

#[async_trait]
impl Provider for GeoProbe {
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding> {
        let ValidatedQuery::Ip(ip) = query else {
            return Err(ProviderError::UpstreamRejected {
                provider_id: self.id.clone(),
                reason: "expected an IP query".to_string(),
            });
        };

        let mut rng = self.sim.rng(ip);
        self.sim.latency(&mut rng, cancel, &self.id).await?;

        let (country, region, city, latitude, longitude, timezone) =
            LOCATIONS[rng.gen_range(0..LOCATIONS.len())];
        let isp = ISPS[rng.gen_range(0..ISPS.len())];

        let ports = COMMON_PORTS
            .iter()
            .map(|&(port, service)| {
                let status = if rng.gen_bool(0.3) {
                    PortStatus::Open
                } else if rng.gen_bool(0.5) {
                    PortStatus::Closed
                } else {
                    PortStatus::Filtered
                };
                PortObservation {
                    port,
                    service: service.to_string(),
                    status,
                }
            })
            .collect();

        Ok(Finding::NetworkIntel(NetworkIntel {
            ip: ip.clone(),
            country: country.to_string(),
            region: region.to_string(),
            city: city.to_string(),
            isp: isp.to_string(),
            org: isp.to_string(),
            asn: format!("AS{}", rng.gen_range(0..65535)),
            latitude,
            longitude,
            timezone: timezone.to_string(),
            vpn: rng.gen_bool(0.2),
            proxy: rng.gen_bool(0.1),
            tor: rng.gen_bool(0.05),
            hosting: rng.gen_bool(0.3),
            ports,
        }))
    }

    fn id(&self) -> &ProviderId {
        &self.id
    }
}
