//! Per-document diagnostics store.
//!
//! Holds the latest `(version, diagnostics)` pair for every analyzed
//! document and hands out snapshots across all of them for publishing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Diagnostic;

/// How [`DiagnosticsStore::record`] treats an incoming version that is older
/// than the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Every write overwrites the entry, whatever its version.
    #[default]
    LastWriteWins,
    /// Writes with a version lower than the stored one are refused.
    RejectStale,
}

/// Errors from the diagnostics store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// An out-of-order update was refused under [`WritePolicy::RejectStale`].
    #[error("stale diagnostics for {uri}: version {incoming} is older than stored version {stored}")]
    StaleWrite {
        uri: String,
        stored: i32,
        incoming: i32,
    },
}

/// The diagnostics computed for one version of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedDiagnostics {
    /// The document version the diagnostics were computed from.
    pub version: i32,
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// One document's entry in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// The document's URI.
    pub uri: String,
    /// The document version the diagnostics were computed from.
    pub version: i32,
    /// Diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Latest diagnostics for every tracked document, keyed by URI.
#[derive(Debug, Default)]
pub struct DiagnosticsStore {
    policy: WritePolicy,
    entries: BTreeMap<String, VersionedDiagnostics>,
}

impl DiagnosticsStore {
    /// Create a new empty store with the given write policy.
    pub fn new(policy: WritePolicy) -> Self {
        Self {
            policy,
            entries: BTreeMap::new(),
        }
    }

    /// The policy this store was created with.
    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    /// Replace the entry for `uri` with `diagnostics` computed from `version`.
    ///
    /// Entries are overwritten, never merged. Under
    /// [`WritePolicy::RejectStale`] a version lower than the stored one is
    /// refused and the stored entry is kept.
    pub fn record(
        &mut self,
        uri: impl Into<String>,
        version: i32,
        diagnostics: Vec<Diagnostic>,
    ) -> Result<(), StoreError> {
        let uri = uri.into();
        self.check_version(&uri, version)?;
        self.entries.insert(
            uri,
            VersionedDiagnostics {
                version,
                diagnostics,
            },
        );
        Ok(())
    }

    /// Check whether [`record`](Self::record) would accept `version` for
    /// `uri` under this store's policy.
    pub fn check_version(&self, uri: &str, version: i32) -> Result<(), StoreError> {
        let stale = self
            .entries
            .get(uri)
            .map(|entry| entry.version)
            .filter(|&stored| self.policy == WritePolicy::RejectStale && version < stored);
        match stale {
            Some(stored) => Err(StoreError::StaleWrite {
                uri: uri.to_string(),
                stored,
                incoming: version,
            }),
            None => Ok(()),
        }
    }

    /// Get the entry for `uri`.
    pub fn get(&self, uri: &str) -> Option<&VersionedDiagnostics> {
        self.entries.get(uri)
    }

    /// Stop tracking `uri`.
    pub fn remove(&mut self, uri: &str) -> Option<VersionedDiagnostics> {
        self.entries.remove(uri)
    }

    /// Every tracked document's current entry, ordered by URI.
    pub fn snapshot_all(&self) -> Vec<SnapshotEntry> {
        self.entries
            .iter()
            .map(|(uri, entry)| SnapshotEntry {
                uri: uri.clone(),
                version: entry.version,
                diagnostics: entry.diagnostics.clone(),
            })
            .collect()
    }

    /// Get the number of tracked documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
