//! Readiness verdict types
//!
//! [`FlowReadiness`] is derived state: recomputed on demand, never
//! persisted, never updated in place.

use chrono::{DateTime, Utc};
use ckb_registry::{Domain, Flow, Importance, LabId};
use serde::{Deserialize, Serialize};

/// One required domain's standing for a flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainStatus {
    /// The domain under evaluation
    pub domain: Domain,
    /// How much the flow cares
    pub importance: Importance,
    /// Whether the domain holds any real data
    pub present: bool,
    /// Lab attributed with the domain's newest contribution
    pub lab: Option<LabId>,
    /// When the domain's data last changed
    pub last_updated: Option<DateTime<Utc>>,
}

/// Urgency of a remediation call-to-action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaPriority {
    /// Fills only recommended domains
    Recommended,
    /// Fills at least one critical domain
    Critical,
}

/// Remediation pointer at the producer able to fill missing domains
///
/// CTAs are deduplicated by lab: a lab responsible for several missing
/// domains gets one CTA listing all of them, at the highest priority any
/// of them carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabCta {
    /// Responsible producer
    pub lab: LabId,
    /// Urgency
    pub priority: CtaPriority,
    /// Missing domains this lab would fill
    pub domains: Vec<Domain>,
    /// Rendered remediation message
    pub message: String,
}

/// The computed verdict on whether a flow may run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowReadiness {
    /// Flow under evaluation
    pub flow: Flow,
    /// True iff no critical domain is missing
    pub is_ready: bool,
    /// Percent of critical domains present; recommended and optional
    /// domains never affect this number
    pub completeness_percent: u8,
    /// Standing of every non-optional requirement, in matrix order
    pub requirements: Vec<DomainStatus>,
    /// Critical domains with no data
    pub missing_critical: Vec<Domain>,
    /// Recommended domains with no data
    pub missing_recommended: Vec<Domain>,
    /// Deduplicated remediation pointers
    pub lab_ctas: Vec<LabCta>,
    /// Whether the caller may proceed despite a gap (at most one missing
    /// critical domain)
    pub can_proceed_anyway: bool,
    /// Quality warning shown when proceeding anyway, or the explanation
    /// for a degenerate evaluation
    pub proceed_anyway_warning: Option<String>,
}
