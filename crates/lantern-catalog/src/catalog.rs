//! Immutable tool catalog.
//!
//! The catalog is explicitly constructed once at process start and shared
//! read-only from then on. There is no interior mutability: anything that
//! wants a different tool set builds a new catalog.

use crate::{
    descriptor::{ReportKind, ToolCategory, ToolDescriptor},
    error::{CatalogError, Result},
};
use lantern_core::{ProviderId, QueryKind, ToolId};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::info;

/// Immutable collection of tool descriptors.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    /// Descriptors in stable catalog order (presentation order)
    tools: Vec<ToolDescriptor>,
    /// Index by tool ID into `tools`
    index: HashMap<ToolId, usize>,
}

impl ToolCatalog {
    /// Build a catalog from a list of descriptors.
    ///
    /// Descriptors are validated; duplicate IDs are rejected. The given
    /// order is preserved for presentation.
    ///
    /// # Errors
    /// Returns error on validation failure or duplicate tool IDs.
    pub fn from_descriptors(descriptors: Vec<ToolDescriptor>) -> Result<Self> {
        let mut tools = Vec::with_capacity(descriptors.len());
        let mut index = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            descriptor.validate()?;

            if index.contains_key(&descriptor.id) {
                return Err(CatalogError::Duplicate {
                    tool_id: descriptor.id.to_string(),
                });
            }

            index.insert(descriptor.id.clone(), tools.len());
            tools.push(descriptor);
        }

        info!(count = tools.len(), "constructed tool catalog");

        Ok(Self { tools, index })
    }

    /// Build a catalog from a TOML document of `[[tool]]` tables.
    ///
    /// # Errors
    /// Returns error if the document does not parse or a descriptor is
    /// invalid.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        #[derive(Deserialize)]
        struct CatalogFile {
            #[serde(default)]
            tool: Vec<ToolDescriptor>,
        }

        let file: CatalogFile = toml::from_str(contents)?;
        Self::from_descriptors(file.tool)
    }

    /// The builtin tool set.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_descriptors(builtin_descriptors()).expect("builtin catalog is valid")
    }

    /// Get a tool descriptor by ID.
    ///
    /// # Errors
    /// Returns error if the tool is not in the catalog.
    pub fn get(&self, tool_id: &ToolId) -> Result<&ToolDescriptor> {
        self.index
            .get(tool_id)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| CatalogError::NotFound {
                tool_id: tool_id.to_string(),
            })
    }

    /// Check if a tool exists in the catalog.
    #[must_use]
    pub fn contains(&self, tool_id: &ToolId) -> bool {
        self.index.contains_key(tool_id)
    }

    /// All descriptors in catalog order.
    #[must_use]
    pub fn all(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Descriptors in the given category, in catalog order.
    #[must_use]
    pub fn by_category(&self, category: ToolCategory) -> Vec<&ToolDescriptor> {
        self.tools
            .iter()
            .filter(|tool| tool.category == category)
            .collect()
    }

    /// All tool IDs in catalog order.
    #[must_use]
    pub fn ids(&self) -> Vec<ToolId> {
        self.tools.iter().map(|tool| tool.id.clone()).collect()
    }

    /// The number of tools in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// The builtin descriptors: the tool set of the original dashboard.
fn builtin_descriptors() -> Vec<ToolDescriptor> {
    fn tool(
        id: &str,
        title: &str,
        description: &str,
        category: ToolCategory,
        query_kind: QueryKind,
        report: ReportKind,
        requires_premium: bool,
        providers: &[&str],
    ) -> ToolDescriptor {
        ToolDescriptor {
            id: ToolId::new(id).expect("valid builtin tool ID"),
            title: title.to_string(),
            description: description.to_string(),
            category,
            query_kind,
            report,
            requires_premium,
            providers: providers
                .iter()
                .map(|p| ProviderId::new(*p).expect("valid builtin provider ID"))
                .collect(),
        }
    }

    vec![
        tool(
            "username",
            "Username Lookup",
            "Search for usernames across multiple platforms",
            ToolCategory::Social,
            QueryKind::Username,
            ReportKind::IdentitySearch,
            false,
            &["handle-search"],
        ),
        tool(
            "email",
            "Email Investigation",
            "Check email breaches and validate addresses",
            ToolCategory::Communication,
            QueryKind::Email,
            ReportKind::BreachCheck,
            false,
            &["breach-index"],
        ),
        tool(
            "phone",
            "Phone Number OSINT",
            "Carrier lookup and location estimation",
            ToolCategory::Communication,
            QueryKind::FreeText,
            ReportKind::Notice,
            true,
            &["carrier-lookup"],
        ),
        tool(
            "ip",
            "IP Geolocation",
            "IP address geolocation and network info",
            ToolCategory::Network,
            QueryKind::Ip,
            ReportKind::Geolocation,
            false,
            &["geo-probe"],
        ),
        tool(
            "domain",
            "Domain Analysis",
            "WHOIS lookup and DNS enumeration",
            ToolCategory::Network,
            QueryKind::Domain,
            ReportKind::Registration,
            false,
            &["whois-registry", "domain-recon"],
        ),
        tool(
            "metadata",
            "Metadata Extractor",
            "Extract EXIF and document metadata",
            ToolCategory::Files,
            QueryKind::FreeText,
            ReportKind::Notice,
            true,
            &["metadata-extract"],
        ),
        tool(
            "reverse-image",
            "Reverse Image Search",
            "Find image sources and similar images",
            ToolCategory::Media,
            QueryKind::FreeText,
            ReportKind::Notice,
            true,
            &["reverse-image-search"],
        ),
        tool(
            "google-dorks",
            "Google Dork Generator",
            "Generate advanced search queries",
            ToolCategory::Search,
            QueryKind::FreeText,
            ReportKind::DorkList,
            false,
            &["dork-forge"],
        ),
        tool(
            "pastebin",
            "Pastebin Scanner",
            "Search for leaked data in pastebins",
            ToolCategory::Leaks,
            QueryKind::FreeText,
            ReportKind::Notice,
            true,
            &["paste-scan"],
        ),
    ]
}
