//! Field slots
//!
//! A [`FieldSlot`] is one cell of the context graph: the active value, the
//! full provenance history behind it, and the human confirmation lock.

use crate::provenance::Contribution;
use crate::value::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One field's value, lineage, and lock state
///
/// # Invariants
/// - `provenance` is ordered newest first and is never empty
/// - `value` is the value carried by `provenance[0]`; older entries are
///   retained for audit but never re-activated automatically
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSlot {
    /// Active value
    pub value: FieldValue,
    /// Contribution history, newest first
    pub provenance: Vec<Contribution>,
    /// Whether a human has locked this field
    pub confirmed: bool,
    /// Who confirmed it
    pub confirmed_by: Option<String>,
    /// When it was confirmed
    pub confirmed_at: Option<DateTime<Utc>>,
}

impl FieldSlot {
    /// Create a slot from its first applied write
    #[inline]
    #[must_use]
    pub fn new(value: FieldValue, contribution: Contribution) -> Self {
        Self {
            value,
            provenance: vec![contribution],
            confirmed: false,
            confirmed_by: None,
            confirmed_at: None,
        }
    }

    /// The active contribution (newest provenance entry)
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Contribution> {
        self.provenance.first()
    }

    /// Return a new slot with a write applied on top
    ///
    /// The contribution is prepended — history is retained, not
    /// overwritten. Confirmation state is untouched; releasing a lock is a
    /// separate, explicit operation.
    #[must_use]
    pub fn with_write(&self, value: FieldValue, contribution: Contribution) -> Self {
        let mut provenance = Vec::with_capacity(self.provenance.len() + 1);
        provenance.push(contribution);
        provenance.extend(self.provenance.iter().cloned());
        Self {
            value,
            provenance,
            confirmed: self.confirmed,
            confirmed_by: self.confirmed_by.clone(),
            confirmed_at: self.confirmed_at,
        }
    }

    /// Return a confirmed copy of this slot; idempotent
    #[must_use]
    pub fn confirm(&self, confirmed_by: Option<String>) -> Self {
        if self.confirmed {
            return self.clone();
        }
        Self {
            confirmed: true,
            confirmed_by,
            confirmed_at: Some(Utc::now()),
            ..self.clone()
        }
    }

    /// Return an unconfirmed copy of this slot; idempotent
    #[must_use]
    pub fn unconfirm(&self) -> Self {
        Self {
            confirmed: false,
            confirmed_by: None,
            confirmed_at: None,
            ..self.clone()
        }
    }
}
