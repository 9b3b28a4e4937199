//! The in-memory investigation ledger.
//!
//! One record per accepted submission. A record starts `Pending` and
//! moves exactly once to `Succeeded` or `Failed`; the first terminal
//! write wins and later writes are no-ops. Reads return snapshots in
//! newest-first submission order.

use crate::normalize::ResultPayload;
use lantern_core::{InvestigationId, ProviderId, Timestamp, ToolId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A record with this ID already exists.
    #[error("duplicate investigation ID: {id}")]
    DuplicateId {
        /// The colliding ID.
        id: String,
    },

    /// No record with this ID exists.
    #[error("investigation not found: {id}")]
    NotFound {
        /// The unknown ID.
        id: String,
    },

    /// The ledger could not be serialized for export.
    #[error("failed to serialize ledger: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Lifecycle state of one investigation.
///
/// A result payload exists only on `Succeeded` and a failure reason only
/// on `Failed`, so an inconsistent record cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InvestigationState {
    /// Dispatched, awaiting a terminal outcome.
    Pending,
    /// At least one provider answered and the result normalized.
    Succeeded {
        /// The normalized result.
        payload: ResultPayload,
    },
    /// No usable result will ever arrive.
    Failed {
        /// Why the investigation failed.
        reason: FailureReason,
    },
}

impl InvestigationState {
    /// Returns `true` for `Succeeded` and `Failed`.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Why a failed investigation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Every bound provider failed or timed out.
    AllProvidersFailed,
    /// The caller cancelled the investigation before it finished.
    Cancelled,
    /// Provider output could not be normalized.
    Internal,
}

/// Diagnostic note recorded when a provider fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderNote {
    /// The failed provider.
    pub provider_id: ProviderId,
    /// Stable failure kind (e.g., "timeout").
    pub kind: String,
    /// Human-readable detail.
    pub detail: String,
}

/// One accepted submission and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestigationRecord {
    /// Unique id, assigned at acceptance.
    pub id: InvestigationId,
    /// The tool that was run.
    pub tool_id: ToolId,
    /// The canonical validated query text.
    pub query: String,
    /// When the submission was accepted.
    pub submitted_at: Timestamp,
    /// Current lifecycle state.
    #[serde(flatten)]
    pub state: InvestigationState,
    /// Per-provider failure diagnostics, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub provider_notes: Vec<ProviderNote>,
}

#[derive(Default)]
struct LedgerInner {
    // Submission order, oldest first. Reads reverse it.
    order: Vec<InvestigationId>,
    records: HashMap<InvestigationId, InvestigationRecord>,
}

/// Thread-safe store of investigation records.
#[derive(Default)]
pub struct InvestigationLedger {
    inner: RwLock<LedgerInner>,
}

impl InvestigationLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new record.
    ///
    /// # Errors
    /// Returns [`LedgerError::DuplicateId`] if a record with the same ID
    /// already exists.
    pub fn append(&self, record: InvestigationRecord) -> Result<(), LedgerError> {
        let mut inner = self.inner.write().expect("acquire ledger write lock");
        if inner.records.contains_key(&record.id) {
            return Err(LedgerError::DuplicateId {
                id: record.id.to_string(),
            });
        }
        inner.order.push(record.id.clone());
        inner.records.insert(record.id.clone(), record);
        Ok(())
    }

    /// Applies the terminal `state` (and any diagnostics) to a record.
    ///
    /// Returns `Ok(true)` if the record transitioned, `Ok(false)` if it
    /// was already terminal and nothing changed.
    ///
    /// # Errors
    /// Returns [`LedgerError::NotFound`] if no record with `id` exists.
    ///
    /// # Panics
    /// Debug builds assert that `state` is terminal.
    pub fn finish(
        &self,
        id: &InvestigationId,
        state: InvestigationState,
        notes: Vec<ProviderNote>,
    ) -> Result<bool, LedgerError> {
        debug_assert!(state.is_terminal());
        let mut inner = self.inner.write().expect("acquire ledger write lock");
        let record = inner
            .records
            .get_mut(id)
            .ok_or_else(|| LedgerError::NotFound { id: id.to_string() })?;
        if record.state.is_terminal() {
            return Ok(false);
        }
        record.state = state;
        record.provider_notes.extend(notes);
        Ok(true)
    }

    /// Returns a copy of one record, if it exists.
    #[must_use]
    pub fn get(&self, id: &InvestigationId) -> Option<InvestigationRecord> {
        let inner = self.inner.read().expect("acquire ledger read lock");
        inner.records.get(id).cloned()
    }

    /// Returns all records, newest submission first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<InvestigationRecord> {
        let inner = self.inner.read().expect("acquire ledger read lock");
        inner
            .order
            .iter()
            .rev()
            .map(|id| inner.records[id].clone())
            .collect()
    }

    /// Returns up to `limit` records starting `offset` records back from
    /// the newest submission.
    #[must_use]
    pub fn window(&self, offset: usize, limit: usize) -> Vec<InvestigationRecord> {
        let inner = self.inner.read().expect("acquire ledger read lock");
        inner
            .order
            .iter()
            .rev()
            .skip(offset)
            .take(limit)
            .map(|id| inner.records[id].clone())
            .collect()
    }

    /// Serializes all records, newest first, as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`LedgerError::Serialize`] if serialization fails.
    pub fn export_json(&self) -> Result<String, LedgerError> {
        let records = self.snapshot();
        Ok(serde_json::to_string_pretty(&records)?)
    }

    /// Number of records in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().expect("acquire ledger read lock").order.len()
    }

    /// Returns `true` if the ledger holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending_record(tool: &str, query: &str) -> InvestigationRecord {
        InvestigationRecord {
            id: InvestigationId::generate(),
            tool_id: ToolId::new(tool).expect("valid tool id"),
            query: query.to_string(),
            submitted_at: Timestamp::now(),
            state: InvestigationState::Pending,
            provider_notes: Vec::new(),
        }
    }

    #[test]
    fn append_then_get_roundtrips() {
        let ledger = InvestigationLedger::new();
        let record = pending_record("username", "octo");
        let id = record.id.clone();
        ledger.append(record.clone()).expect("append");
        assert_eq!(ledger.get(&id), Some(record));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let ledger = InvestigationLedger::new();
        let record = pending_record("username", "octo");
        ledger.append(record.clone()).expect("append");
        assert!(matches!(
            ledger.append(record),
            Err(LedgerError::DuplicateId { .. })
        ));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn snapshot_is_newest_first() {
        let ledger = InvestigationLedger::new();
        let first = pending_record("username", "first");
        let second = pending_record("username", "second");
        let third = pending_record("username", "third");
        ledger.append(first).expect("append");
        ledger.append(second).expect("append");
        ledger.append(third).expect("append");

        let snapshot = ledger.snapshot();
        let queries: Vec<&str> = snapshot.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, ["third", "second", "first"]);
    }

    #[test]
    fn window_pages_from_the_newest() {
        let ledger = InvestigationLedger::new();
        for i in 0..5 {
            ledger
                .append(pending_record("username", &format!("q{i}")))
                .expect("append");
        }

        let page = ledger.window(1, 2);
        let queries: Vec<&str> = page.iter().map(|r| r.query.as_str()).collect();
        assert_eq!(queries, ["q3", "q2"]);

        assert!(ledger.window(10, 2).is_empty());
    }

    #[test]
    fn first_terminal_write_wins() {
        let ledger = InvestigationLedger::new();
        let record = pending_record("username", "octo");
        let id = record.id.clone();
        ledger.append(record).expect("append");

        let failed = InvestigationState::Failed {
            reason: FailureReason::Cancelled,
        };
        assert!(ledger.finish(&id, failed.clone(), Vec::new()).expect("finish"));

        let succeeded = InvestigationState::Succeeded {
            payload: ResultPayload::Notice {
                message: "late".into(),
            },
        };
        assert!(!ledger.finish(&id, succeeded, Vec::new()).expect("finish"));

        let stored = ledger.get(&id).expect("record exists");
        assert_eq!(stored.state, failed);
    }

    #[test]
    fn finishing_an_unknown_record_is_an_error() {
        let ledger = InvestigationLedger::new();
        let id = InvestigationId::generate();
        let state = InvestigationState::Failed {
            reason: FailureReason::Internal,
        };
        assert!(matches!(
            ledger.finish(&id, state, Vec::new()),
            Err(LedgerError::NotFound { .. })
        ));
    }

    #[test]
    fn export_preserves_every_record_field() {
        let ledger = InvestigationLedger::new();
        let record = pending_record("ip", "8.8.8.8");
        let id = record.id.clone();
        ledger.append(record).expect("append");
        ledger
            .finish(
                &id,
                InvestigationState::Succeeded {
                    payload: ResultPayload::Notice {
                        message: "done".into(),
                    },
                },
                vec![ProviderNote {
                    provider_id: ProviderId::new("geo-probe").expect("valid provider id"),
                    kind: "timeout".into(),
                    detail: "provider 'geo-probe' timed out".into(),
                }],
            )
            .expect("finish");

        let json = ledger.export_json().expect("export");
        let parsed: Vec<InvestigationRecord> =
            serde_json::from_str(&json).expect("reimport export");
        assert_eq!(parsed, ledger.snapshot());
    }
}
