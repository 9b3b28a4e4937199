//! Shared types used across the Lantern workspace.
//!
//! This module defines common newtypes and enums that provide type safety
//! and clear domain modeling.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for tool identifiers with validation.
///
/// Tool IDs must be lowercase alphanumeric with hyphens, 2-50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolId(String);

impl ToolId {
    /// Create a new `ToolId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        validate_slug(&id, "tool ID")?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for provider identifiers with validation.
///
/// Provider IDs use the same slug format as tool IDs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderId(String);

impl ProviderId {
    /// Create a new `ProviderId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        validate_slug(&id, "provider ID")?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validate slug format: lowercase alphanumeric with hyphens, 2-50 chars,
/// no leading or trailing hyphen.
fn validate_slug(id: &str, what: &str) -> Result<(), CoreError> {
    static SLUG_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = SLUG_REGEX
        .get_or_init(|| Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$").expect("valid regex"));

    if id.len() < 2 || id.len() > 50 {
        return Err(CoreError::Validation(format!(
            "invalid {what}: must be 2-50 characters, got {} characters",
            id.len()
        )));
    }

    if regex.is_match(id) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "invalid {what}: must be lowercase alphanumeric with hyphens, got '{id}'"
        )))
    }
}

/// Newtype for investigation identifiers.
///
/// Investigation IDs are UUIDs (v4 format), assigned at record creation
/// and never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvestigationId(String);

impl InvestigationId {
    /// Create a new `InvestigationId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID is not a valid UUID v4.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a new random `InvestigationId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that a string is a valid UUID v4.
    fn validate(id: &str) -> Result<(), CoreError> {
        static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = UUID_REGEX.get_or_init(|| {
            Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
                .expect("valid regex")
        });

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "invalid investigation ID: must be a valid UUID v4, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for InvestigationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The syntactic class of input a tool accepts.
///
/// Every tool descriptor carries a `QueryKind`; the validator selects its
/// acceptance rule from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QueryKind {
    /// Platform username or handle
    Username,
    /// Email address
    Email,
    /// IPv4 or full IPv6 address
    Ip,
    /// Registered domain name
    Domain,
    /// Free-text target (query-generation tools)
    FreeText,
}

impl QueryKind {
    /// Get a human-readable display name for the query kind.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Username => "Username",
            Self::Email => "Email Address",
            Self::Ip => "IP Address",
            Self::Domain => "Domain",
            Self::FreeText => "Target",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Wrapper around `chrono::DateTime<Utc>` for consistent timestamp handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp representing the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Create a timestamp from a `DateTime<Utc>`.
    #[must_use]
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Get the inner `DateTime<Utc>`.
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Parse a timestamp from an RFC3339 string.
    pub fn from_rfc3339(s: &str) -> Result<Self, CoreError> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| CoreError::Validation(format!("invalid timestamp: {e}")))
    }

    /// Format as RFC3339 string.
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339()
    }

    /// Get seconds since Unix epoch.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0.timestamp()
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_id_valid() {
        let valid_ids = vec!["ip", "email", "google-dorks", "reverse-image", "abc"];

        for id in valid_ids {
            assert!(ToolId::new(id).is_ok(), "Failed for: {id}");
        }
    }

    #[test]
    fn test_tool_id_invalid() {
        let too_long = "a".repeat(51);
        let invalid_ids = vec![
            "x",               // Too short
            "Email",           // Uppercase
            "google_dorks",    // Underscore
            "google dorks",    // Space
            "-email",          // Starts with hyphen
            "email-",          // Ends with hyphen
            too_long.as_str(), // Too long
        ];

        for id in invalid_ids {
            assert!(ToolId::new(id).is_err(), "Should fail for: {id}");
        }
    }

    #[test]
    fn test_provider_id_valid() {
        for id in ["handle-search", "breach-index", "geo-probe", "whois-registry"] {
            assert!(ProviderId::new(id).is_ok(), "Failed for: {id}");
        }
    }

    #[test]
    fn test_investigation_id_valid() {
        let id = "550e8400-e29b-41d4-a716-446655440000";
        let inv_id = InvestigationId::new(id).expect("valid investigation ID");
        assert_eq!(inv_id.as_str(), id);
    }

    #[test]
    fn test_investigation_id_invalid() {
        let invalid_ids = vec![
            "not-a-uuid",
            "550e8400-e29b-51d4-a716-446655440000", // Wrong version
            "550e8400-e29b-41d4-x716-446655440000", // Invalid hex
            "",
        ];

        for id in invalid_ids {
            assert!(InvestigationId::new(id).is_err());
        }
    }

    #[test]
    fn test_investigation_id_generate() {
        let id1 = InvestigationId::generate();
        let id2 = InvestigationId::generate();
        assert_ne!(id1, id2); // Should be unique
    }

    #[test]
    fn test_query_kind_serialization() {
        let kind = QueryKind::FreeText;
        let json = serde_json::to_string(&kind).expect("serialize query kind");
        assert_eq!(json, "\"free-text\"");

        let deserialized: QueryKind = serde_json::from_str(&json).expect("deserialize query kind");
        assert_eq!(deserialized, kind);
    }

    #[test]
    fn test_timestamp_rfc3339_roundtrip() {
        let ts = Timestamp::now();
        let s = ts.to_rfc3339();
        let parsed = Timestamp::from_rfc3339(&s).expect("parse RFC3339 timestamp");
        assert_eq!(ts.timestamp(), parsed.timestamp());
    }

    #[test]
    fn test_timestamp_ordering() {
        let ts1 = Timestamp::now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let ts2 = Timestamp::now();
        assert!(ts2 > ts1);
    }
}
