//! Syntactic query validation.
//!
//! Every raw input is accepted or rejected here before anything is
//! dispatched. Each [`QueryKind`] has its own acceptance rule; on success
//! the normalized value is returned as a [`ValidatedQuery`], on failure a
//! [`ValidationError`] that callers branch on. No partial normalization is
//! ever returned alongside an error.

use crate::types::QueryKind;
use thiserror::Error;

/// Rejection reasons for a submitted query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input was empty after trimming
    #[error("input is required")]
    MissingInput,

    /// The input did not match the syntactic rule for its kind
    #[error("invalid {expected} format")]
    InvalidFormat {
        /// What the input was expected to be (e.g. "domain", "email")
        expected: &'static str,
    },

    /// The referenced tool does not exist in the catalog
    #[error("unknown tool: {tool_id}")]
    UnknownTool {
        /// The unrecognized tool identifier as submitted
        tool_id: String,
    },
}

/// A query that passed syntactic validation, carrying its normalized value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedQuery {
    /// Platform handle, trimmed
    Username(String),
    /// Email address, split at the `@`
    Email {
        /// Local part, as entered
        local: String,
        /// Domain part, normalized to lowercase
        domain: String,
    },
    /// IPv4 or full IPv6 address, as entered
    Ip(String),
    /// Domain with scheme, `www.` prefix, and path stripped
    Domain(String),
    /// Free-text target, trimmed
    Target(String),
}

impl ValidatedQuery {
    /// The canonical string form of the query, used for display and as the
    /// stored record query.
    #[must_use]
    pub fn canonical(&self) -> String {
        match self {
            Self::Username(s) | Self::Ip(s) | Self::Domain(s) | Self::Target(s) => s.clone(),
            Self::Email { local, domain } => format!("{local}@{domain}"),
        }
    }
}

/// Validate a raw input against the rule for the given kind.
///
/// # Errors
/// Returns [`ValidationError::MissingInput`] for empty input and
/// [`ValidationError::InvalidFormat`] when the syntactic rule is not met.
pub fn validate_query(kind: QueryKind, raw: &str) -> Result<ValidatedQuery, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingInput);
    }

    match kind {
        QueryKind::Username => Ok(ValidatedQuery::Username(trimmed.to_string())),
        QueryKind::FreeText => Ok(ValidatedQuery::Target(trimmed.to_string())),
        QueryKind::Email => validate_email(trimmed),
        QueryKind::Ip => validate_ip(trimmed),
        QueryKind::Domain => validate_domain(trimmed),
    }
}

/// Normalize and validate a domain.
///
/// Strips a leading scheme, a leading `www.` prefix, and anything from the
/// first `/` onward, then checks the label structure.
fn validate_domain(input: &str) -> Result<ValidatedQuery, ValidationError> {
    let normalized = normalize_domain(input);

    if is_valid_domain(&normalized) {
        Ok(ValidatedQuery::Domain(normalized))
    } else {
        Err(ValidationError::InvalidFormat { expected: "domain" })
    }
}

fn normalize_domain(input: &str) -> String {
    let mut s = input;

    for scheme in ["https://", "http://"] {
        if let Some(rest) = s.strip_prefix(scheme) {
            s = rest;
            break;
        }
    }

    if let Some(rest) = s.strip_prefix("www.") {
        s = rest;
    }

    let s = s.split('/').next().unwrap_or_default();
    s.to_ascii_lowercase()
}

/// Check domain label structure: two or more dot-separated labels, each
/// 1-63 alphanumeric-or-hyphen characters without edge hyphens, and an
/// alphabetic final label of at least two characters.
fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    for label in &labels {
        if label.is_empty() || label.len() > 63 {
            return false;
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return false;
        }
        if label.starts_with('-') || label.ends_with('-') {
            return false;
        }
    }

    let last = labels[labels.len() - 1];
    last.len() >= 2 && last.chars().all(|c| c.is_ascii_alphabetic())
}

/// Validate an email address: exactly one `@`, non-empty local part, and a
/// domain part passing the domain rule.
fn validate_email(input: &str) -> Result<ValidatedQuery, ValidationError> {
    let mut parts = input.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(ValidationError::InvalidFormat { expected: "email" }),
    };

    if local.is_empty() {
        return Err(ValidationError::InvalidFormat { expected: "email" });
    }

    let domain = domain.to_ascii_lowercase();
    if !is_valid_domain(&domain) {
        return Err(ValidationError::InvalidFormat { expected: "email" });
    }

    Ok(ValidatedQuery::Email {
        local: local.to_string(),
        domain,
    })
}

/// Validate an IP address: IPv4 dotted-quad or full 8-group IPv6 colon-hex.
/// Compressed (`::`) IPv6 is not accepted.
fn validate_ip(input: &str) -> Result<ValidatedQuery, ValidationError> {
    if is_valid_ipv4(input) || is_valid_ipv6(input) {
        Ok(ValidatedQuery::Ip(input.to_string()))
    } else {
        Err(ValidationError::InvalidFormat {
            expected: "IP address",
        })
    }
}

fn is_valid_ipv4(input: &str) -> bool {
    let octets: Vec<&str> = input.split('.').collect();
    if octets.len() != 4 {
        return false;
    }

    octets.iter().all(|octet| {
        !octet.is_empty()
            && octet.len() <= 3
            && octet.chars().all(|c| c.is_ascii_digit())
            && octet.parse::<u16>().is_ok_and(|v| v <= 255)
    })
}

fn is_valid_ipv6(input: &str) -> bool {
    let groups: Vec<&str> = input.split(':').collect();
    if groups.len() != 8 {
        return false;
    }

    groups.iter().all(|group| {
        !group.is_empty() && group.len() <= 4 && group.chars().all(|c| c.is_ascii_hexdigit())
    })
}
