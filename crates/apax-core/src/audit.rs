//! # Audit Trail
//!
//! The bounded event log shown on the proof-of-reserve view. Entries are
//! mock audit events; the trail evicts oldest-first once full so a
//! long-running session stays bounded.
//!
//! Ages are formatted from caller-supplied timestamps with integer math
//! only, matching the reference display buckets (just now / minutes /
//! hours / days).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::primitives::MAX_AUDIT_ENTRIES;
use crate::types::UnixSeconds;

// =============================================================================
// AUDIT ENTRY
// =============================================================================

/// Outcome class of one audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Confirmed,
    Pending,
}

/// One recorded audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub at: UnixSeconds,
    pub event: String,
    pub status: AuditStatus,
}

impl AuditEntry {
    /// Create a new entry.
    #[must_use]
    pub fn new(at: UnixSeconds, event: impl Into<String>, status: AuditStatus) -> Self {
        Self {
            at,
            event: event.into(),
            status,
        }
    }
}

// =============================================================================
// AUDIT TRAIL
// =============================================================================

/// Bounded FIFO of audit events, newest last.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuditTrail {
    entries: VecDeque<AuditEntry>,
}

impl AuditTrail {
    /// Create an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event, evicting the oldest entry if the trail is full.
    pub fn record(&mut self, entry: AuditEntry) {
        if self.entries.len() >= MAX_AUDIT_ENTRIES {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entries oldest-first.
    pub fn entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the trail holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// AGE FORMATTING
// =============================================================================

/// Format the age of an event relative to `now`.
///
/// Buckets match the reference view: under a minute is "just now", then
/// whole minutes, hours, days.
#[must_use]
pub fn format_age(at: UnixSeconds, now: UnixSeconds) -> String {
    let mins = at.elapsed_until(now) / 60;
    if mins < 1 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{}m ago", mins)
    } else if mins < 1440 {
        format!("{}h ago", mins / 60)
    } else {
        format!("{}d ago", mins / 1440)
    }
}

// =============================================================================
// TESTS
// =============================================================================
