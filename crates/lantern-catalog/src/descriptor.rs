//! Tool descriptor types.
//!
//! A descriptor is a static catalog entry: what a tool is called, what
//! input it accepts, whether it is gated behind elevated access, which
//! providers back it, and what report shape its results take.

use crate::error::{CatalogError, Result};
use lantern_core::{ProviderId, QueryKind, ToolId};
use serde::{Deserialize, Serialize};

/// Static catalog entry for one intelligence tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool identifier (e.g., "username", "google-dorks")
    pub id: ToolId,

    /// Human-readable tool name
    pub title: String,

    /// Short description shown in the catalog
    pub description: String,

    /// Tool category
    pub category: ToolCategory,

    /// The syntactic class of input this tool accepts
    pub query_kind: QueryKind,

    /// The normalized report shape this tool produces
    pub report: ReportKind,

    /// Whether the tool is gated behind an entitlement check
    pub requires_premium: bool,

    /// Ordered provider binding. One entry for simple tools; composite
    /// tools list every provider whose findings are merged.
    pub providers: Vec<ProviderId>,
}

impl ToolDescriptor {
    /// Validate the descriptor for completeness.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(CatalogError::ValidationError {
                tool_id: self.id.to_string(),
                reason: "tool title cannot be empty".to_string(),
            });
        }

        if self.providers.is_empty() {
            return Err(CatalogError::ValidationError {
                tool_id: self.id.to_string(),
                reason: "tool must bind at least one provider".to_string(),
            });
        }

        Ok(())
    }
}

/// Categories of intelligence tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolCategory {
    /// Social platform presence
    Social,
    /// Email and phone intelligence
    Communication,
    /// IP, DNS, and infrastructure
    Network,
    /// File and document analysis
    Files,
    /// Image and media analysis
    Media,
    /// Search query generation
    Search,
    /// Leaked data sources
    Leaks,
}

impl ToolCategory {
    /// Get a human-readable display name.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Social => "Social",
            Self::Communication => "Communication",
            Self::Network => "Network",
            Self::Files => "Files",
            Self::Media => "Media",
            Self::Search => "Search",
            Self::Leaks => "Leaks",
        }
    }
}

/// The normalized payload shape a tool's results take.
///
/// The result normalizer is keyed on this tag; it is the single place each
/// payload variant is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Per-platform presence list with a derived found-count
    IdentitySearch,
    /// Mailbox validity and breach exposure
    BreachCheck,
    /// IP geolocation, network info, threat flags, open ports
    Geolocation,
    /// WHOIS/DNS registration data plus domain footprint
    Registration,
    /// Deterministic search query templates
    DorkList,
    /// Plain informational message
    Notice,
}
