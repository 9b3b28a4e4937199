//! Raw provider findings.
//!
//! A finding is one provider's pre-normalization payload for one
//! investigation. Findings are transient: the result normalizer consumes
//! them and only the normalized payload is stored in the ledger.

use lantern_core::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One provider's raw result, tagged per source family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Finding {
    /// Per-platform handle presence
    PlatformScan(PlatformScan),
    /// Mailbox validity and breach exposure
    MailboxIntel(MailboxIntel),
    /// IP geolocation, network info, threat flags, port observations
    NetworkIntel(NetworkIntel),
    /// WHOIS registration data
    RegistrationIntel(RegistrationIntel),
    /// Subdomain and technology footprint
    DomainFootprint(DomainFootprint),
    /// Deterministic search query templates
    DorkSet(DorkSet),
    /// Plain informational message
    Notice(String),
}

/// Handle presence across a set of platforms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformScan {
    /// One entry per checked platform, in a stable platform-table order
    pub platforms: Vec<PlatformHit>,
}

/// Presence result for a single platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformHit {
    /// Platform name (e.g., "GitHub")
    pub name: String,
    /// Whether the handle was found on this platform
    pub found: bool,
    /// Profile URL for the handle on this platform
    pub url: String,
    /// When the handle was last observed, if found
    pub last_seen: Option<Timestamp>,
    /// Provider-specific extra profile data, if any
    pub profile: Option<serde_json::Value>,
}

/// Mailbox intelligence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailboxIntel {
    /// Whether the mailbox appears deliverable
    pub valid: bool,
    /// Whether the domain is a known disposable-mail service
    pub disposable: bool,
    /// The mailbox domain
    pub domain: String,
    /// Names of breaches the address appears in
    pub breaches: Vec<String>,
    /// Accounts registered under the address's local part, in a stable
    /// platform-table order
    pub social_presence: Vec<SocialPresence>,
}

/// Presence of an address-derived account on one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialPresence {
    /// Platform name (e.g., "Gravatar")
    pub platform: String,
    /// Whether an account was found
    pub found: bool,
    /// Profile URL for the account
    pub url: String,
}

/// Geolocation and network intelligence for one IP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkIntel {
    /// The looked-up IP address
    pub ip: String,
    /// Country name
    pub country: String,
    /// Region or state
    pub region: String,
    /// City
    pub city: String,
    /// Internet service provider
    pub isp: String,
    /// Owning organization
    pub org: String,
    /// Autonomous system number (e.g., "AS13335")
    pub asn: String,
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// IANA timezone name
    pub timezone: String,
    /// VPN exit detected
    pub vpn: bool,
    /// Open proxy detected
    pub proxy: bool,
    /// Tor exit node detected
    pub tor: bool,
    /// Hosting/datacenter address
    pub hosting: bool,
    /// Port scan observations, all statuses
    pub ports: Vec<PortObservation>,
}

/// One scanned port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortObservation {
    /// Port number
    pub port: u16,
    /// Well-known service name for the port
    pub service: String,
    /// Observed status
    pub status: PortStatus,
}

/// Status of a scanned port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortStatus {
    /// The port accepted a connection
    Open,
    /// The port refused the connection
    Closed,
    /// No response (likely firewalled)
    Filtered,
}

/// WHOIS registration data for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationIntel {
    /// The looked-up domain
    pub domain: String,
    /// Registrar of record
    pub registrar: String,
    /// Registration date
    pub created: chrono::NaiveDate,
    /// Expiry date
    pub expires: chrono::NaiveDate,
    /// Last update date
    pub updated: chrono::NaiveDate,
    /// EPP status strings
    pub statuses: Vec<String>,
    /// Authoritative nameservers
    pub nameservers: Vec<String>,
    /// Registrant contact mailboxes
    pub contact_emails: Vec<String>,
}

/// Subdomain, technology, certificate and DNS footprint for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFootprint {
    /// The looked-up domain
    pub domain: String,
    /// Discovered subdomains, fully qualified
    pub subdomains: Vec<String>,
    /// Detected technologies
    pub technologies: Vec<Technology>,
    /// TLS certificate posture
    pub ssl: SslInfo,
    /// Resolved DNS records
    pub dns: DnsRecords,
}

/// TLS certificate posture for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslInfo {
    /// Whether the presented certificate chain validates
    pub valid: bool,
    /// Issuing authority
    pub issuer: String,
    /// Certificate expiry date
    pub expires: chrono::NaiveDate,
    /// Configuration grade (e.g., "A+")
    pub grade: String,
}

/// Resolved DNS records for one domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecords {
    /// IPv4 addresses
    pub a: Vec<String>,
    /// IPv6 addresses
    pub aaaa: Vec<String>,
    /// Mail exchangers, lowest priority first
    pub mx: Vec<MxRecord>,
    /// TXT records
    pub txt: Vec<String>,
    /// CNAME targets
    pub cname: Vec<String>,
}

/// One mail exchanger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MxRecord {
    /// Routing priority, lower is preferred
    pub priority: u16,
    /// Exchanger hostname
    pub exchange: String,
}

/// One detected technology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technology {
    /// Technology name (e.g., "Nginx")
    pub name: String,
    /// Technology category (e.g., "Web Server")
    pub category: String,
    /// Detected version, if known
    pub version: Option<String>,
}

/// A deterministic set of search query templates for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DorkSet {
    /// The literal target substituted into the templates
    pub target: String,
    /// The template category the set was generated from
    pub category: DorkCategory,
    /// Generated entries, in template order
    pub entries: Vec<DorkEntry>,
}

/// One generated search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DorkEntry {
    /// The ready-to-use search query
    pub query: String,
    /// What the query finds
    pub description: String,
    /// Risk level of what the query may expose
    pub risk: RiskLevel,
    /// Human-readable grouping (e.g., "File Discovery")
    pub category: String,
}

/// Risk level of a generated query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Benign discovery
    Low,
    /// May expose internal structure
    Medium,
    /// May expose sensitive data
    High,
}

/// Template categories for query generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DorkCategory {
    /// Broad site discovery
    General,
    /// Exposed sensitive files
    SensitiveFiles,
    /// Login and admin pages
    LoginPages,
    /// Error messages hinting at vulnerabilities
    Vulnerabilities,
    /// Social platform mentions
    SocialMedia,
    /// Office document discovery
    Documents,
}

impl DorkCategory {
    /// The category slug as used in free-text input.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::SensitiveFiles => "sensitive-files",
            Self::LoginPages => "login-pages",
            Self::Vulnerabilities => "vulnerabilities",
            Self::SocialMedia => "social-media",
            Self::Documents => "documents",
        }
    }
}

impl FromStr for DorkCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Self::General),
            "sensitive-files" => Ok(Self::SensitiveFiles),
            "login-pages" => Ok(Self::LoginPages),
            "vulnerabilities" => Ok(Self::Vulnerabilities),
            "social-media" => Ok(Self::SocialMedia),
            "documents" => Ok(Self::Documents),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DorkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
