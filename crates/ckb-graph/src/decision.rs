//! Write-conflict policy
//!
//! One pure comparator over (emptiness, lock state, source priority, force
//! flag) returning an explicit [`WriteDecision`]. The store consults this
//! and nothing else, so the whole conflict policy is unit-testable without
//! a graph.

use crate::provenance::Source;
use crate::slot::FieldSlot;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};

/// Options carried by a single write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOptions {
    /// Bypass the lock and priority checks (never the path/kind checks)
    pub force: bool,
}

impl WriteOptions {
    /// A forced write
    #[inline]
    #[must_use]
    pub const fn forced() -> Self {
        Self { force: true }
    }
}

/// Outcome of the conflict policy for one write
///
/// Every rejection here is a silent no-op by design: callers tolerant of
/// noisy producers diff before/after graphs to detect that nothing
/// changed. Only unknown paths and kind mismatches are hard errors, and
/// those are raised before this policy runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteDecision {
    /// Write applied; a contribution was prepended
    Applied,
    /// Incoming value was empty; existing data is protected
    RejectedEmpty,
    /// Slot is human-confirmed and the writer is not a human
    RejectedLocked,
    /// Slot's current source outranks the writer
    RejectedLowerPriority,
}

impl WriteDecision {
    /// Whether the write changed the graph
    #[inline]
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Decide whether a write lands
///
/// Rules, in order:
/// 1. An empty incoming value never lands, force or not.
/// 2. An absent or empty slot accepts any non-empty write.
/// 3. A confirmed slot rejects non-human writers unless forced.
/// 4. Otherwise the write lands iff the incoming priority is `>=` the
///    slot's current priority (ties go to the newer write); force
///    bypasses this check.
#[must_use]
pub fn decide(
    slot: Option<&FieldSlot>,
    source: &Source,
    value: &FieldValue,
    opts: WriteOptions,
) -> WriteDecision {
    if value.is_empty() {
        return WriteDecision::RejectedEmpty;
    }

    let Some(slot) = slot else {
        return WriteDecision::Applied;
    };
    if slot.value.is_empty() {
        return WriteDecision::Applied;
    }

    if slot.confirmed && !source.is_user() && !opts.force {
        return WriteDecision::RejectedLocked;
    }

    if opts.force {
        return WriteDecision::Applied;
    }

    let current_priority = slot.current().map_or(0, |c| c.source.priority());
    if source.priority() >= current_priority {
        WriteDecision::Applied
    } else {
        WriteDecision::RejectedLowerPriority
    }
}
