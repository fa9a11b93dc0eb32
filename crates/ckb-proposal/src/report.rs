//! Apply-result reporting
//!
//! Every batch or bulk apply returns an [`ApplyReport`]: per-outcome counts
//! plus a per-field detail list, so a caller can render exactly why any
//! individual field did not change. Consumed for audit logs and
//! user-facing diagnostics.

use serde::{Deserialize, Serialize};

/// Outcome of applying one proposed field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FieldApplyStatus {
    /// Write landed; the graph changed
    Updated,
    /// Slot is human-confirmed; the machine write was dropped
    SkippedHumanOverride,
    /// Slot's current source outranks the writer
    SkippedHigherPriority,
    /// Nothing was written: the proposed value was empty, or the member
    /// was rejected by the reviewer
    SkippedUnchanged,
    /// The write itself failed (stale or unknown path, kind mismatch)
    Error(String),
}

/// One field's outcome within a batch apply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOutcome {
    /// Target path, string form
    pub path: String,
    /// What happened
    pub status: FieldApplyStatus,
}

impl FieldOutcome {
    /// Create an outcome
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, status: FieldApplyStatus) -> Self {
        Self {
            path: path.into(),
            status,
        }
    }
}

/// Summary of a batch or bulk apply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyReport {
    /// Members the action attempted to resolve
    pub attempted: usize,
    /// Writes that landed
    pub updated: usize,
    /// Writes dropped by the confirmation lock
    pub skipped_human_override: usize,
    /// Writes dropped by source priority
    pub skipped_higher_priority: usize,
    /// Writes dropped because the proposed value was empty
    pub skipped_unchanged: usize,
    /// Writes that failed outright
    pub errors: usize,
    /// Per-field detail, in batch order
    pub fields: Vec<FieldOutcome>,
}

impl ApplyReport {
    /// Fold one field outcome into the counts
    pub fn record(&mut self, outcome: FieldOutcome) {
        self.attempted += 1;
        match outcome.status {
            FieldApplyStatus::Updated => self.updated += 1,
            FieldApplyStatus::SkippedHumanOverride => self.skipped_human_override += 1,
            FieldApplyStatus::SkippedHigherPriority => self.skipped_higher_priority += 1,
            FieldApplyStatus::SkippedUnchanged => self.skipped_unchanged += 1,
            FieldApplyStatus::Error(_) => self.errors += 1,
        }
        self.fields.push(outcome);
    }

    /// Whether every attempted field landed
    #[inline]
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.updated == self.attempted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_tallies_by_status() {
        let mut report = ApplyReport::default();
        report.record(FieldOutcome::new("brand.voice_tone", FieldApplyStatus::Updated));
        report.record(FieldOutcome::new(
            "brand.positioning",
            FieldApplyStatus::SkippedHumanOverride,
        ));
        report.record(FieldOutcome::new(
            "seo.top_keywords",
            FieldApplyStatus::Error("unknown field path: seo.top_kw".to_string()),
        ));

        assert_eq!(report.attempted, 3);
        assert_eq!(report.updated, 1);
        assert_eq!(report.skipped_human_override, 1);
        assert_eq!(report.errors, 1);
        assert_eq!(report.fields.len(), 3);
        assert!(!report.is_clean());
    }

    #[test]
    fn clean_report() {
        let mut report = ApplyReport::default();
        report.record(FieldOutcome::new("brand.voice_tone", FieldApplyStatus::Updated));
        assert!(report.is_clean());
    }

    #[test]
    fn empty_report_is_clean() {
        assert!(ApplyReport::default().is_clean());
    }
}
