//! Proposals
//!
//! A [`Proposal`] is a staged, reviewable candidate write produced by a
//! generation run. It lives briefly in `Proposed` state and is then
//! terminally resolved — no code path re-opens a decided proposal.

use chrono::{DateTime, Utc};
use ckb_graph::{Confidence, FieldValue};
use ckb_registry::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use uuid::Uuid;

/// Lifecycle state of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Awaiting a decision
    Proposed,
    /// Accepted; the candidate write was pushed through the mutation engine
    Confirmed,
    /// Declined; the graph was never touched
    Rejected,
}

impl ProposalStatus {
    /// Whether the proposal is terminally resolved
    #[inline]
    #[must_use]
    pub const fn is_decided(&self) -> bool {
        !matches!(self, Self::Proposed)
    }
}

impl Display for ProposalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Proposed => "proposed",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

/// Who resolved a proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Decider {
    /// A human reviewer; their acceptance writes as `user` and locks the
    /// field
    Human(String),
    /// An automated bulk action; preserves the batch's machine origin and
    /// never locks
    Automation,
}

impl Decider {
    /// Whether a human made this decision
    #[inline]
    #[must_use]
    pub const fn is_human(&self) -> bool {
        matches!(self, Self::Human(_))
    }

    /// Label recorded as `decided_by`
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Human(name) => name,
            Self::Automation => "automation",
        }
    }
}

/// One staged candidate write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    /// Unique id
    pub id: Uuid,
    /// Company whose graph this targets
    pub company_id: Uuid,
    /// Target field
    pub path: FieldPath,
    /// Candidate value
    pub proposed_value: FieldValue,
    /// Generator's declared confidence
    pub confidence: Confidence,
    /// Generator's rationale, rendered for the reviewer
    pub reason: String,
    /// Value the field held when the proposal was staged
    pub previous_value: Option<FieldValue>,
    /// Lifecycle state
    pub status: ProposalStatus,
    /// When the decision was made
    pub decided_at: Option<DateTime<Utc>>,
    /// Who made the decision
    pub decided_by: Option<String>,
}

impl Proposal {
    /// Stage a new proposal
    #[must_use]
    pub fn new(
        company_id: Uuid,
        path: FieldPath,
        proposed_value: FieldValue,
        confidence: Confidence,
        reason: impl Into<String>,
        previous_value: Option<FieldValue>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            path,
            proposed_value,
            confidence,
            reason: reason.into(),
            previous_value,
            status: ProposalStatus::Proposed,
            decided_at: None,
            decided_by: None,
        }
    }

    /// Whether this proposal is still awaiting a decision
    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.status, ProposalStatus::Proposed)
    }

    pub(crate) fn decided(&self, status: ProposalStatus, decider: &Decider) -> Self {
        Self {
            status,
            decided_at: Some(Utc::now()),
            decided_by: Some(decider.label().to_string()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckb_registry::Domain;

    fn proposal() -> Proposal {
        Proposal::new(
            Uuid::new_v4(),
            FieldPath::new(Domain::Brand, "voice_tone").unwrap(),
            FieldValue::text("Confident"),
            Confidence::new(0.7),
            "Derived from homepage copy",
            None,
        )
    }

    #[test]
    fn new_proposal_is_pending() {
        let p = proposal();
        assert!(p.is_pending());
        assert!(p.decided_at.is_none());
        assert!(p.decided_by.is_none());
    }

    #[test]
    fn decided_stamps_actor_and_time() {
        let p = proposal().decided(
            ProposalStatus::Confirmed,
            &Decider::Human("alex".to_string()),
        );
        assert_eq!(p.status, ProposalStatus::Confirmed);
        assert_eq!(p.decided_by.as_deref(), Some("alex"));
        assert!(p.decided_at.is_some());
    }

    #[test]
    fn status_is_decided() {
        assert!(!ProposalStatus::Proposed.is_decided());
        assert!(ProposalStatus::Confirmed.is_decided());
        assert!(ProposalStatus::Rejected.is_decided());
    }

    #[test]
    fn decider_labels() {
        assert_eq!(Decider::Human("alex".to_string()).label(), "alex");
        assert_eq!(Decider::Automation.label(), "automation");
        assert!(Decider::Human("alex".to_string()).is_human());
        assert!(!Decider::Automation.is_human());
    }
}
