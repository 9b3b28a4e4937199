//! Result normalization.
//!
//! Takes the raw findings collected from a tool's providers and folds
//! them into the single stable payload shape stored in the ledger.
//! Normalization is a pure function of the tool's report kind and the
//! findings in provider-binding order, so equal inputs always produce
//! byte-identical serialized payloads.

use chrono::NaiveDate;
use lantern_catalog::ReportKind;
use lantern_core::Timestamp;
use lantern_providers::{
    DnsRecords, DorkCategory, DorkEntry, Finding, PortStatus, SocialPresence, SslInfo, Technology,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Normalization failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    /// No finding matched the shape the report kind requires.
    #[error("no usable finding for a {report:?} report")]
    NoUsableFinding {
        /// The report kind that could not be built.
        report: ReportKind,
    },
}

/// The normalized result payload stored on a succeeded investigation.
///
/// The shape is fixed per report kind. Fields a provider did not supply
/// are omitted rather than invented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ResultPayload {
    /// Per-platform handle presence.
    IdentitySearch {
        /// One entry per checked platform, in provider order
        platforms: Vec<PlatformEntry>,
        /// Number of platforms where the handle was found
        total_found: usize,
    },
    /// Mailbox validity and breach exposure.
    BreachCheck {
        /// Whether the mailbox appears deliverable
        valid: bool,
        /// Whether the domain is a known disposable-mail service
        disposable: bool,
        /// The mailbox domain
        domain: String,
        /// Number of breaches the address appears in
        breach_count: usize,
        /// Names of those breaches
        breach_list: Vec<String>,
        /// Accounts registered under the address's local part
        social_presence: Vec<SocialPresence>,
    },
    /// IP geolocation and network intelligence.
    Geolocation {
        /// The looked-up IP address
        ip: String,
        /// Country name
        country: String,
        /// Region or state
        region: String,
        /// City
        city: String,
        /// Internet service provider
        isp: String,
        /// Owning organization
        org: String,
        /// Autonomous system number
        asn: String,
        /// Latitude
        latitude: f64,
        /// Longitude
        longitude: f64,
        /// IANA timezone name
        timezone: String,
        /// Anonymization and hosting flags
        threat: ThreatFlags,
        /// Ports observed open, closed and filtered observations dropped
        open_ports: Vec<OpenPort>,
    },
    /// Domain registration and footprint.
    Registration {
        /// The looked-up domain
        domain: String,
        /// Registrar of record, if the registry provider answered
        #[serde(skip_serializing_if = "Option::is_none")]
        registrar: Option<String>,
        /// Registration date
        #[serde(skip_serializing_if = "Option::is_none")]
        created_at: Option<NaiveDate>,
        /// Expiry date
        #[serde(skip_serializing_if = "Option::is_none")]
        expires_at: Option<NaiveDate>,
        /// Last update date
        #[serde(skip_serializing_if = "Option::is_none")]
        updated_at: Option<NaiveDate>,
        /// EPP status strings
        statuses: Vec<String>,
        /// Authoritative nameservers
        nameservers: Vec<String>,
        /// Registrant contact mailboxes
        contact_emails: Vec<String>,
        /// Discovered subdomains, if the recon provider answered
        subdomains: Vec<String>,
        /// Detected technologies, if the recon provider answered
        technologies: Vec<Technology>,
        /// TLS certificate posture, if the recon provider answered
        #[serde(skip_serializing_if = "Option::is_none")]
        ssl: Option<SslInfo>,
        /// Resolved DNS records, if the recon provider answered
        #[serde(skip_serializing_if = "Option::is_none")]
        dns: Option<DnsRecords>,
    },
    /// Generated search query templates.
    DorkList {
        /// The literal target substituted into the templates
        target: String,
        /// The template category used
        category: DorkCategory,
        /// Generated entries, in template order
        entries: Vec<DorkEntry>,
    },
    /// Plain informational message.
    Notice {
        /// The message text
        message: String,
    },
}

/// One platform in an identity-search payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEntry {
    /// Platform name
    pub name: String,
    /// Whether the handle was found
    pub found: bool,
    /// Profile URL for the handle
    pub url: String,
    /// When the handle was last observed, if found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen_at: Option<Timestamp>,
}

/// Anonymization and hosting flags in a geolocation payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatFlags {
    /// VPN exit detected
    pub vpn: bool,
    /// Open proxy detected
    pub proxy: bool,
    /// Tor exit node detected
    pub tor: bool,
    /// Hosting/datacenter address
    pub hosting: bool,
}

/// One open port in a geolocation payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenPort {
    /// Port number
    pub port: u16,
    /// Well-known service name
    pub service: String,
}

/// Folds `findings` into the payload shape for `report`.
///
/// `findings` must be in provider-binding order with failed providers
/// already removed. Returns [`NormalizeError::NoUsableFinding`] when no
/// finding carries the data the report kind requires.
pub fn normalize(report: ReportKind, findings: &[Finding]) -> Result<ResultPayload, NormalizeError> {
    match report {
        ReportKind::IdentitySearch => normalize_identity_search(findings),
        ReportKind::BreachCheck => normalize_breach_check(findings),
        ReportKind::Geolocation => normalize_geolocation(findings),
        ReportKind::Registration => normalize_registration(findings),
        ReportKind::DorkList => normalize_dork_list(findings),
        ReportKind::Notice => normalize_notice(findings),
    }
}

fn normalize_identity_search(findings: &[Finding]) -> Result<ResultPayload, NormalizeError> {
    let mut platforms = Vec::new();
    for finding in findings {
        if let Finding::PlatformScan(scan) = finding {
            platforms.extend(scan.platforms.iter().map(|hit| PlatformEntry {
                name: hit.name.clone(),
                found: hit.found,
                url: hit.url.clone(),
                last_seen_at: hit.last_seen,
            }));
        }
    }
    if platforms.is_empty() {
        return Err(NormalizeError::NoUsableFinding {
            report: ReportKind::IdentitySearch,
        });
    }
    let total_found = platforms.iter().filter(|entry| entry.found).count();
    Ok(ResultPayload::IdentitySearch {
        platforms,
        total_found,
    })
}

fn normalize_breach_check(findings: &[Finding]) -> Result<ResultPayload, NormalizeError> {
    let intel = findings
        .iter()
        .find_map(|finding| match finding {
            Finding::MailboxIntel(intel) => Some(intel),
            _ => None,
        })
        .ok_or(NormalizeError::NoUsableFinding {
            report: ReportKind::BreachCheck,
        })?;
    Ok(ResultPayload::BreachCheck {
        valid: intel.valid,
        disposable: intel.disposable,
        domain: intel.domain.clone(),
        breach_count: intel.breaches.len(),
        breach_list: intel.breaches.clone(),
        social_presence: intel.social_presence.clone(),
    })
}

fn normalize_geolocation(findings: &[Finding]) -> Result<ResultPayload, NormalizeError> {
    let intel = findings
        .iter()
        .find_map(|finding| match finding {
            Finding::NetworkIntel(intel) => Some(intel),
            _ => None,
        })
        .ok_or(NormalizeError::NoUsableFinding {
            report: ReportKind::Geolocation,
        })?;
    let open_ports = intel
        .ports
        .iter()
        .filter(|observation| observation.status == PortStatus::Open)
        .map(|observation| OpenPort {
            port: observation.port,
            service: observation.service.clone(),
        })
        .collect();
    Ok(ResultPayload::Geolocation {
        ip: intel.ip.clone(),
        country: intel.country.clone(),
        region: intel.region.clone(),
        city: intel.city.clone(),
        isp: intel.isp.clone(),
        org: intel.org.clone(),
        asn: intel.asn.clone(),
        latitude: intel.latitude,
        longitude: intel.longitude,
        timezone: intel.timezone.clone(),
        threat: ThreatFlags {
            vpn: intel.vpn,
            proxy: intel.proxy,
            tor: intel.tor,
            hosting: intel.hosting,
        },
        open_ports,
    })
}

fn normalize_registration(findings: &[Finding]) -> Result<ResultPayload, NormalizeError> {
    let registration = findings.iter().find_map(|finding| match finding {
        Finding::RegistrationIntel(intel) => Some(intel),
        _ => None,
    });
    let footprint = findings.iter().find_map(|finding| match finding {
        Finding::DomainFootprint(footprint) => Some(footprint),
        _ => None,
    });

    let domain = registration
        .map(|intel| intel.domain.clone())
        .or_else(|| footprint.map(|fp| fp.domain.clone()))
        .ok_or(NormalizeError::NoUsableFinding {
            report: ReportKind::Registration,
        })?;

    Ok(ResultPayload::Registration {
        domain,
        registrar: registration.map(|intel| intel.registrar.clone()),
        created_at: registration.map(|intel| intel.created),
        expires_at: registration.map(|intel| intel.expires),
        updated_at: registration.map(|intel| intel.updated),
        statuses: registration.map(|intel| intel.statuses.clone()).unwrap_or_default(),
        nameservers: registration
            .map(|intel| intel.nameservers.clone())
            .unwrap_or_default(),
        contact_emails: registration
            .map(|intel| intel.contact_emails.clone())
            .unwrap_or_default(),
        subdomains: footprint.map(|fp| fp.subdomains.clone()).unwrap_or_default(),
        technologies: footprint
            .map(|fp| fp.technologies.clone())
            .unwrap_or_default(),
        ssl: footprint.map(|fp| fp.ssl.clone()),
        dns: footprint.map(|fp| fp.dns.clone()),
    })
}

fn normalize_dork_list(findings: &[Finding]) -> Result<ResultPayload, NormalizeError> {
    let set = findings
        .iter()
        .find_map(|finding| match finding {
            Finding::DorkSet(set) => Some(set),
            _ => None,
        })
        .ok_or(NormalizeError::NoUsableFinding {
            report: ReportKind::DorkList,
        })?;
    Ok(ResultPayload::DorkList {
        target: set.target.clone(),
        category: set.category,
        entries: set.entries.clone(),
    })
}

fn normalize_notice(findings: &[Finding]) -> Result<ResultPayload, NormalizeError> {
    let message = findings
        .iter()
        .find_map(|finding| match finding {
            Finding::Notice(message) => Some(message.clone()),
            _ => None,
        })
        .ok_or(NormalizeError::NoUsableFinding {
            report: ReportKind::Notice,
        })?;
    Ok(ResultPayload::Notice { message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lantern_providers::{
        DomainFootprint, MailboxIntel, MxRecord, NetworkIntel, PlatformHit, PlatformScan,
        PortObservation, RegistrationIntel,
    };

    fn sample_scan() -> Finding {
        Finding::PlatformScan(PlatformScan {
            platforms: vec![
                PlatformHit {
                    name: "GitHub".into(),
                    found: true,
                    url: "https://github.com/octo".into(),
                    last_seen: None,
                    profile: None,
                },
                PlatformHit {
                    name: "Reddit".into(),
                    found: false,
                    url: "https://reddit.com/user/octo".into(),
                    last_seen: None,
                    profile: None,
                },
            ],
        })
    }

    fn sample_footprint() -> DomainFootprint {
        DomainFootprint {
            domain: "example.com".into(),
            subdomains: vec!["www.example.com".into(), "mail.example.com".into()],
            technologies: vec![],
            ssl: SslInfo {
                valid: true,
                issuer: "Let's Encrypt Authority X3".into(),
                expires: NaiveDate::from_ymd_opt(2026, 11, 27).expect("valid date"),
                grade: "A+".into(),
            },
            dns: DnsRecords {
                a: vec!["93.184.216.34".into()],
                aaaa: vec![],
                mx: vec![MxRecord {
                    priority: 10,
                    exchange: "mail.example.com".into(),
                }],
                txt: vec!["v=spf1 include:_spf.google.com ~all".into()],
                cname: vec!["www.example.com".into()],
            },
        }
    }

    fn sample_network_intel() -> NetworkIntel {
        NetworkIntel {
            ip: "8.8.8.8".into(),
            country: "United States".into(),
            region: "California".into(),
            city: "Mountain View".into(),
            isp: "Google LLC".into(),
            org: "Google Public DNS".into(),
            asn: "AS15169".into(),
            latitude: 37.386,
            longitude: -122.084,
            timezone: "America/Los_Angeles".into(),
            vpn: false,
            proxy: false,
            tor: false,
            hosting: true,
            ports: vec![
                PortObservation {
                    port: 53,
                    service: "DNS".into(),
                    status: PortStatus::Open,
                },
                PortObservation {
                    port: 22,
                    service: "SSH".into(),
                    status: PortStatus::Closed,
                },
                PortObservation {
                    port: 3389,
                    service: "RDP".into(),
                    status: PortStatus::Filtered,
                },
            ],
        }
    }

    #[test]
    fn identity_search_counts_found_platforms() {
        let payload = normalize(ReportKind::IdentitySearch, &[sample_scan()]).expect("normalize");
        match payload {
            ResultPayload::IdentitySearch {
                platforms,
                total_found,
            } => {
                assert_eq!(platforms.len(), 2);
                assert_eq!(total_found, 1);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn breach_check_carries_count_list_and_presence() {
        let finding = Finding::MailboxIntel(MailboxIntel {
            valid: true,
            disposable: false,
            domain: "example.com".into(),
            breaches: vec!["LinkedIn 2021".into(), "Canva 2019".into()],
            social_presence: vec![SocialPresence {
                platform: "Gravatar".into(),
                found: true,
                url: "https://gravatar.com/alice".into(),
            }],
        });
        let payload = normalize(ReportKind::BreachCheck, &[finding]).expect("normalize");
        match payload {
            ResultPayload::BreachCheck {
                breach_count,
                breach_list,
                social_presence,
                ..
            } => {
                assert_eq!(breach_count, 2);
                assert_eq!(breach_list.len(), 2);
                assert_eq!(social_presence.len(), 1);
                assert_eq!(social_presence[0].platform, "Gravatar");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn geolocation_keeps_only_open_ports() {
        let finding = Finding::NetworkIntel(sample_network_intel());
        let payload = normalize(ReportKind::Geolocation, &[finding]).expect("normalize");
        match payload {
            ResultPayload::Geolocation { open_ports, .. } => {
                assert_eq!(open_ports.len(), 1);
                assert_eq!(open_ports[0].port, 53);
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn registration_folds_both_providers() {
        let registration = Finding::RegistrationIntel(RegistrationIntel {
            domain: "example.com".into(),
            registrar: "GoDaddy.com, LLC".into(),
            created: NaiveDate::from_ymd_opt(2015, 3, 9).expect("valid date"),
            expires: NaiveDate::from_ymd_opt(2027, 3, 9).expect("valid date"),
            updated: NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date"),
            statuses: vec!["clientTransferProhibited".into()],
            nameservers: vec!["ns1.example.com".into()],
            contact_emails: vec!["admin@example.com".into()],
        });
        let footprint = Finding::DomainFootprint(sample_footprint());
        let payload =
            normalize(ReportKind::Registration, &[registration, footprint]).expect("normalize");
        match payload {
            ResultPayload::Registration {
                domain,
                registrar,
                subdomains,
                ssl,
                dns,
                ..
            } => {
                assert_eq!(domain, "example.com");
                assert_eq!(registrar.as_deref(), Some("GoDaddy.com, LLC"));
                assert_eq!(subdomains.len(), 2);
                assert_eq!(ssl.expect("ssl present").grade, "A+");
                assert_eq!(dns.expect("dns present").mx[0].exchange, "mail.example.com");
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn registration_tolerates_missing_whois_half() {
        let footprint = Finding::DomainFootprint(sample_footprint());
        let payload = normalize(ReportKind::Registration, &[footprint]).expect("normalize");
        match payload {
            ResultPayload::Registration {
                registrar,
                created_at,
                statuses,
                subdomains,
                ssl,
                ..
            } => {
                assert!(registrar.is_none());
                assert!(created_at.is_none());
                assert!(statuses.is_empty());
                assert_eq!(subdomains.len(), 2);
                assert!(ssl.is_some());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn registration_tolerates_missing_recon_half() {
        let registration = Finding::RegistrationIntel(RegistrationIntel {
            domain: "example.com".into(),
            registrar: "Namecheap Inc.".into(),
            created: NaiveDate::from_ymd_opt(2018, 6, 1).expect("valid date"),
            expires: NaiveDate::from_ymd_opt(2027, 6, 1).expect("valid date"),
            updated: NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date"),
            statuses: vec!["clientTransferProhibited".into()],
            nameservers: vec!["ns1.example.com".into()],
            contact_emails: vec!["admin@example.com".into()],
        });
        let payload = normalize(ReportKind::Registration, &[registration]).expect("normalize");
        match payload {
            ResultPayload::Registration {
                registrar,
                subdomains,
                ssl,
                dns,
                ..
            } => {
                assert_eq!(registrar.as_deref(), Some("Namecheap Inc."));
                assert!(subdomains.is_empty());
                assert!(ssl.is_none());
                assert!(dns.is_none());
            }
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn missing_required_finding_is_an_error() {
        let err = normalize(ReportKind::BreachCheck, &[sample_scan()]).expect_err("must fail");
        assert_eq!(
            err,
            NormalizeError::NoUsableFinding {
                report: ReportKind::BreachCheck,
            }
        );
        assert!(normalize(ReportKind::Notice, &[]).is_err());
    }

    #[test]
    fn equal_inputs_serialize_identically() {
        let findings = vec![Finding::NetworkIntel(sample_network_intel())];
        let first = serde_json::to_string(
            &normalize(ReportKind::Geolocation, &findings).expect("normalize"),
        )
        .expect("serialize");
        let second = serde_json::to_string(
            &normalize(ReportKind::Geolocation, &findings).expect("normalize"),
        )
        .expect("serialize");
        assert_eq!(first, second);
    }
}
