//! Deterministic search query template generation.
//!
//! Unlike the other simulated sources this provider is a pure function of
//! its input: the same target and category always produce the same ordered
//! entry list.

use crate::error::{ProviderError, Result};
use crate::finding::{DorkCategory, DorkEntry, DorkSet, Finding, RiskLevel};
use crate::provider::Provider;
use async_trait::async_trait;
use lantern_core::{ProviderId, ValidatedQuery};
use tokio_util::sync::CancellationToken;

type Template = (&'static str, &'static str, RiskLevel, &'static str);

const GENERAL: &[Template] = &[
    (
        "site:{target}",
        "Find all indexed pages for the target domain",
        RiskLevel::Low,
        "Site Discovery",
    ),
    (
        "site:{target} filetype:pdf",
        "Find PDF files on the target domain",
        RiskLevel::Low,
        "File Discovery",
    ),
    (
        "site:{target} inurl:admin",
        "Find admin panels and administrative pages",
        RiskLevel::Medium,
        "Admin Discovery",
    ),
    (
        "site:{target} intitle:\"index of\"",
        "Find directory listings and exposed directories",
        RiskLevel::Medium,
        "Directory Listing",
    ),
    (
        "\"{target}\" -site:{target}",
        "Find mentions of target on other websites",
        RiskLevel::Low,
        "External Mentions",
    ),
    (
        "inurl:\"{target}\"",
        "Find URLs containing the target name",
        RiskLevel::Low,
        "URL Discovery",
    ),
];

const SENSITIVE_FILES: &[Template] = &[
    (
        "site:{target} filetype:sql",
        "Find SQL database files",
        RiskLevel::High,
        "Database Files",
    ),
    (
        "site:{target} filetype:log",
        "Find log files that may contain sensitive information",
        RiskLevel::High,
        "Log Files",
    ),
    (
        "site:{target} filetype:bak",
        "Find backup files",
        RiskLevel::High,
        "Backup Files",
    ),
    (
        "site:{target} ext:env",
        "Find environment configuration files",
        RiskLevel::High,
        "Config Files",
    ),
];

const LOGIN_PAGES: &[Template] = &[
    (
        "site:{target} inurl:login",
        "Find login pages",
        RiskLevel::Medium,
        "Authentication",
    ),
    (
        "site:{target} intitle:\"login\" OR intitle:\"sign in\"",
        "Find pages with login or sign in titles",
        RiskLevel::Medium,
        "Authentication",
    ),
    (
        "site:{target} inurl:wp-admin",
        "Find WordPress admin panels",
        RiskLevel::Medium,
        "CMS Admin",
    ),
];

const VULNERABILITIES: &[Template] = &[
    (
        "site:{target} \"sql syntax near\" | \"syntax error has occurred\" | \"incorrect syntax near\"",
        "Find potential SQL injection vulnerabilities",
        RiskLevel::High,
        "SQL Injection",
    ),
    (
        "site:{target} \"Warning: mysql_connect()\" | \"Warning: mysql_query()\" | \"Warning: pg_connect()\"",
        "Find database connection errors",
        RiskLevel::High,
        "Database Errors",
    ),
    (
        "site:{target} \"Fatal error\" | \"Warning:\" | \"Parse error\"",
        "Find PHP errors and warnings",
        RiskLevel::Medium,
        "Application Errors",
    ),
];

const SOCIAL_MEDIA: &[Template] = &[
    (
        "\"{target}\" site:linkedin.com",
        "Find LinkedIn profiles related to target",
        RiskLevel::Low,
        "Social Discovery",
    ),
    (
        "\"{target}\" site:twitter.com",
        "Find Twitter mentions of target",
        RiskLevel::Low,
        "Social Discovery",
    ),
    (
        "\"{target}\" site:facebook.com",
        "Find Facebook pages related to target",
        RiskLevel::Low,
        "Social Discovery",
    ),
];

const DOCUMENTS: &[Template] = &[
    (
        "site:{target} filetype:doc OR filetype:docx",
        "Find Word documents",
        RiskLevel::Medium,
        "Document Discovery",
    ),
    (
        "site:{target} filetype:xls OR filetype:xlsx",
        "Find Excel spreadsheets",
        RiskLevel::Medium,
        "Document Discovery",
    ),
    (
        "site:{target} filetype:ppt OR filetype:pptx",
        "Find PowerPoint presentations",
        RiskLevel::Medium,
        "Document Discovery",
    ),
];

fn templates(category: DorkCategory) -> &'static [Template] {
    match category {
        DorkCategory::General => GENERAL,
        DorkCategory::SensitiveFiles => SENSITIVE_FILES,
        DorkCategory::LoginPages => LOGIN_PAGES,
        DorkCategory::Vulnerabilities => VULNERABILITIES,
        DorkCategory::SocialMedia => SOCIAL_MEDIA,
        DorkCategory::Documents => DOCUMENTS,
    }
}

/// Deterministic query-template generation source.
///
/// Free-text input is `target [category]`; the category defaults to
/// `general` and an unknown category slug is rejected upstream-style.
pub struct DorkForge {
    id: ProviderId,
}

impl DorkForge {
    /// Create the provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: ProviderId::new("dork-forge").expect("valid provider ID"),
        }
    }

    fn parse_input(&self, target: &str) -> Result<(String, DorkCategory)> {
        let mut tokens = target.split_whitespace();
        let (first, second, rest) = (tokens.next(), tokens.next(), tokens.next());

        match (first, second, rest) {
            (Some(target), None, None) => Ok((target.to_string(), DorkCategory::General)),
            (Some(target), Some(category), None) => {
                let category =
                    category
                        .parse()
                        .map_err(|()| ProviderError::UpstreamRejected {
                            provider_id: self.id.clone(),
                            reason: format!("unknown category '{category}'"),
                        })?;
                Ok((target.to_string(), category))
            }
            _ => Err(ProviderError::UpstreamRejected {
                provider_id: self.id.clone(),
                reason: "expected 'target [category]'".to_string(),
            }),
        }
    }
}

impl Default for DorkForge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Provider for DorkForge {
    async fn invoke(&self, query: &ValidatedQuery, cancel: &CancellationToken) -> Result<Finding> {
        let ValidatedQuery::Target(raw) = query else {
            return Err(ProviderError::UpstreamRejected {
                provider_id: self.id.clone(),
                reason: "expected a free-text target query".to_string(),
            });
        };

        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled {
                provider_id: self.id.clone(),
            });
        }

        let (target, category) = self.parse_input(raw)?;

        let entries = templates(category)
            .iter()
            .map(|&(template, description, risk, group)| DorkEntry {
                query: template.replace("{target}", &target),
                description: description.to_string(),
                risk,
                category: group.to_string(),
            })
            .collect();

        Ok(Finding::DorkSet(DorkSet {
            target,
            category,
            entries,
        }))
    }

    fn id(&self) -> &ProviderId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn forge(input: &str) -> Result<Finding> {
        DorkForge::new()
            .invoke(
                &ValidatedQuery::Target(input.to_string()),
                &CancellationToken::new(),
            )
            .await
    }

    #[tokio::test]
    async fn test_default_category_is_general() {
        let Ok(Finding::DorkSet(set)) = forge("acme.io").await else {
            panic!("expected a dork set");
        };
        assert_eq!(set.category, DorkCategory::General);
        assert_eq!(set.entries.len(), GENERAL.len());
        assert_eq!(set.entries[0].query, "site:acme.io");
        assert_eq!(set.entries[4].query, "\"acme.io\" -site:acme.io");
    }

    #[tokio::test]
    async fn test_sensitive_files_substitution() {
        let Ok(Finding::DorkSet(set)) = forge("acme.io sensitive-files").await else {
            panic!("expected a dork set");
        };
        assert_eq!(set.target, "acme.io");
        assert_eq!(set.entries.len(), SENSITIVE_FILES.len());
        assert!(set.entries.iter().all(|e| e.risk == RiskLevel::High));
        assert_eq!(set.entries[0].query, "site:acme.io filetype:sql");
    }

    #[tokio::test]
    async fn test_deterministic_output() {
        let first = forge("acme.io sensitive-files").await.expect("generates");
        let second = forge("acme.io sensitive-files").await.expect("generates");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let result = forge("acme.io secret-sauce").await;
        assert!(matches!(
            result,
            Err(ProviderError::UpstreamRejected { .. })
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = DorkForge::new()
            .invoke(&ValidatedQuery::Target("acme.io".to_string()), &cancel)
            .await;
        assert!(matches!(result, Err(ProviderError::Cancelled { .. })));
    }
}
