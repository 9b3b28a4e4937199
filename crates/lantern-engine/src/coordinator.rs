//! The dispatch coordinator.
//!
//! Accepts submissions, fans each one out to the tool's bound providers
//! on background tasks, and writes exactly one terminal state per record
//! back into the ledger. `submit` returns the investigation ID as soon
//! as the record is created; callers observe progress through the ledger.

use crate::entitlement::EntitlementCheck;
use crate::error::SubmitError;
use crate::ledger::{
    FailureReason, InvestigationLedger, InvestigationRecord, InvestigationState, ProviderNote,
};
use crate::normalize::normalize;
use futures::stream::{FuturesUnordered, StreamExt};
use lantern_catalog::{ToolCatalog, ToolDescriptor};
use lantern_core::{
    validate_query, DispatchConfig, InvestigationId, Timestamp, ToolId, ValidatedQuery,
    ValidationError,
};
use lantern_providers::{Finding, ProviderError, ProviderRegistry};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

struct Inner {
    catalog: Arc<ToolCatalog>,
    providers: ProviderRegistry,
    ledger: Arc<InvestigationLedger>,
    entitlements: Arc<dyn EntitlementCheck>,
    provider_timeout: Duration,
    // Cancel tokens for investigations that have not reached a terminal
    // state yet, keyed by investigation ID.
    inflight: Mutex<HashMap<InvestigationId, CancellationToken>>,
}

/// Orchestrates investigations from submission to terminal state.
///
/// Cheap to clone; clones share the same ledger and in-flight set.
#[derive(Clone)]
pub struct DispatchCoordinator {
    inner: Arc<Inner>,
}

impl DispatchCoordinator {
    /// Creates a coordinator over the given catalog, providers and ledger.
    #[must_use]
    pub fn new(
        catalog: Arc<ToolCatalog>,
        providers: ProviderRegistry,
        ledger: Arc<InvestigationLedger>,
        entitlements: Arc<dyn EntitlementCheck>,
        dispatch: &DispatchConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                catalog,
                providers,
                ledger,
                entitlements,
                provider_timeout: dispatch.provider_timeout(),
                inflight: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The shared ledger.
    #[must_use]
    pub fn ledger(&self) -> &Arc<InvestigationLedger> {
        &self.inner.ledger
    }

    /// The tool catalog this coordinator dispatches against.
    #[must_use]
    pub fn catalog(&self) -> &Arc<ToolCatalog> {
        &self.inner.catalog
    }

    /// Number of investigations currently awaiting a terminal state.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner
            .inflight
            .lock()
            .expect("acquire in-flight lock")
            .len()
    }

    /// Accepts a submission and starts dispatching it in the background.
    ///
    /// Validation and entitlement checks happen before any record is
    /// created, so a rejected submission leaves no trace in the ledger.
    /// On acceptance the `Pending` record exists before this returns.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns [`SubmitError::Validation`] for an unknown tool or invalid
    /// input, and [`SubmitError::AccessDenied`] when the tool requires a
    /// premium entitlement the user does not hold.
    pub fn submit(
        &self,
        user_id: &str,
        tool_id: &ToolId,
        raw_input: &str,
    ) -> Result<InvestigationId, SubmitError> {
        let descriptor = self
            .inner
            .catalog
            .get(tool_id)
            .map_err(|_| ValidationError::UnknownTool {
                tool_id: tool_id.to_string(),
            })?
            .clone();

        if descriptor.requires_premium && !self.inner.entitlements.is_entitled(user_id) {
            debug!(user_id, tool_id = %tool_id, "premium tool denied");
            return Err(SubmitError::AccessDenied {
                tool_id: tool_id.clone(),
            });
        }

        let query = validate_query(descriptor.query_kind, raw_input)?;

        let id = InvestigationId::generate();
        let record = InvestigationRecord {
            id: id.clone(),
            tool_id: tool_id.clone(),
            query: query.canonical(),
            submitted_at: Timestamp::now(),
            state: InvestigationState::Pending,
            provider_notes: Vec::new(),
        };
        self.inner
            .ledger
            .append(record)
            .map_err(|e| SubmitError::Internal(e.to_string()))?;

        let cancel = CancellationToken::new();
        self.inner
            .inflight
            .lock()
            .expect("acquire in-flight lock")
            .insert(id.clone(), cancel.clone());

        info!(investigation_id = %id, tool_id = %tool_id, "accepted investigation");

        let inner = Arc::clone(&self.inner);
        let task_id = id.clone();
        tokio::spawn(async move {
            Inner::run_investigation(inner, task_id, descriptor, query, cancel).await;
        });

        Ok(id)
    }

    /// Requests cancellation of an in-flight investigation.
    ///
    /// Returns `true` if the investigation was still in flight and the
    /// cancel signal fired; `false` if it already reached a terminal
    /// state (or never existed), in which case nothing changes.
    pub fn cancel(&self, id: &InvestigationId) -> bool {
        let inflight = self.inner.inflight.lock().expect("acquire in-flight lock");
        if let Some(token) = inflight.get(id) {
            info!(investigation_id = %id, "cancellation requested");
            token.cancel();
            true
        } else {
            false
        }
    }
}

impl Inner {
    async fn run_investigation(
        inner: Arc<Self>,
        id: InvestigationId,
        descriptor: ToolDescriptor,
        query: ValidatedQuery,
        cancel: CancellationToken,
    ) {
        // Racing collection against the root token keeps cancellation
        // prompt even if a provider ignores its child token.
        let collected = tokio::select! {
            () = cancel.cancelled() => None,
            collected = inner.collect_findings(&descriptor, &query, &cancel) => Some(collected),
        };

        let (state, notes) = match collected {
            None => (
                InvestigationState::Failed {
                    reason: FailureReason::Cancelled,
                },
                Vec::new(),
            ),
            Some((_, notes)) if cancel.is_cancelled() => (
                InvestigationState::Failed {
                    reason: FailureReason::Cancelled,
                },
                notes,
            ),
            Some((findings, notes)) => {
                if findings.is_empty() {
                    (
                        InvestigationState::Failed {
                            reason: FailureReason::AllProvidersFailed,
                        },
                        notes,
                    )
                } else {
                    match normalize(descriptor.report, &findings) {
                        Ok(payload) => (InvestigationState::Succeeded { payload }, notes),
                        Err(e) => {
                            error!(investigation_id = %id, error = %e, "normalization failed");
                            (
                                InvestigationState::Failed {
                                    reason: FailureReason::Internal,
                                },
                                notes,
                            )
                        }
                    }
                }
            }
        };

        inner
            .inflight
            .lock()
            .expect("acquire in-flight lock")
            .remove(&id);

        // `cancel()` fires the token while holding the in-flight lock, so
        // any cancel that reported true is visible here after the removal
        // above. Re-checking keeps "cancel() returned true" and a
        // Cancelled terminal state in lockstep even when the token fired
        // after collection completed.
        let state = if cancel.is_cancelled() {
            InvestigationState::Failed {
                reason: FailureReason::Cancelled,
            }
        } else {
            state
        };

        match inner.ledger.finish(&id, state, notes) {
            Ok(true) => info!(investigation_id = %id, "investigation finished"),
            Ok(false) => debug!(investigation_id = %id, "record already terminal"),
            Err(e) => error!(investigation_id = %id, error = %e, "ledger write failed"),
        }
    }

    /// Invokes every bound provider concurrently and collects the
    /// successful findings in provider-binding order, with one
    /// diagnostic note per failure.
    async fn collect_findings(
        &self,
        descriptor: &ToolDescriptor,
        query: &ValidatedQuery,
        cancel: &CancellationToken,
    ) -> (Vec<Finding>, Vec<ProviderNote>) {
        let mut slots: Vec<Option<Finding>> =
            descriptor.providers.iter().map(|_| None).collect();
        let mut notes = Vec::new();

        let mut invocations = FuturesUnordered::new();
        for (slot, provider_id) in descriptor.providers.iter().enumerate() {
            let provider = match self.providers.get(provider_id) {
                Ok(provider) => provider,
                Err(e) => {
                    warn!(provider_id = %provider_id, error = %e, "provider unavailable");
                    notes.push(ProviderNote {
                        provider_id: provider_id.clone(),
                        kind: e.kind().to_string(),
                        detail: e.to_string(),
                    });
                    continue;
                }
            };
            let provider_id = provider_id.clone();
            let query = query.clone();
            let token = cancel.child_token();
            let timeout = self.provider_timeout;
            invocations.push(async move {
                let result = match tokio::time::timeout(
                    timeout,
                    provider.invoke(&query, &token),
                )
                .await
                {
                    Ok(result) => result,
                    Err(_) => {
                        token.cancel();
                        Err(ProviderError::Timeout {
                            provider_id: provider_id.clone(),
                        })
                    }
                };
                (slot, provider_id, result)
            });
        }

        while let Some((slot, provider_id, result)) = invocations.next().await {
            match result {
                Ok(finding) => {
                    debug!(provider_id = %provider_id, "provider answered");
                    slots[slot] = Some(finding);
                }
                Err(e) => {
                    warn!(provider_id = %provider_id, error = %e, "provider failed");
                    notes.push(ProviderNote {
                        provider_id,
                        kind: e.kind().to_string(),
                        detail: e.to_string(),
                    });
                }
            }
        }

        (slots.into_iter().flatten().collect(), notes)
    }
}
