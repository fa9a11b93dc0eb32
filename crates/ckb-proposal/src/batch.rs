//! Proposal batches and their resolution
//!
//! A [`ProposalBatch`] groups the proposals created by one generation run
//! and carries the whole resolution surface: accept or reject one member,
//! edit-and-accept, and the bulk accept-all / reject-all actions. All
//! operations return new values — the batch and graph in hand are never
//! mutated.

use crate::proposal::{Decider, Proposal, ProposalStatus};
use crate::report::{ApplyReport, FieldApplyStatus, FieldOutcome};
use chrono::{DateTime, Utc};
use ckb_graph::{
    Confidence, ContextGraph, Contribution, FieldValue, GraphError, Source, WriteDecision,
    WriteOptions,
};
use ckb_registry::FieldRegistry;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors raised by the proposal workflow
#[derive(Debug, thiserror::Error)]
pub enum ProposalError {
    /// No such proposal in the batch
    #[error("proposal not found: {0}")]
    NotFound(Uuid),

    /// The proposal was already terminally resolved
    #[error("proposal {id} already decided: {status}")]
    AlreadyDecided {
        /// Proposal id
        id: Uuid,
        /// Its terminal status
        status: ProposalStatus,
    },

    /// The accepted write was rejected by the mutation engine's validation
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Result of resolving one proposal
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Next graph value (unchanged for rejections)
    pub graph: ContextGraph,
    /// Next batch value with the member decided
    pub batch: ProposalBatch,
    /// What happened to the target field
    pub outcome: FieldOutcome,
}

/// Result of a bulk accept-all / reject-all
#[derive(Debug, Clone)]
pub struct BulkResolution {
    /// Next graph value
    pub graph: ContextGraph,
    /// Next batch value
    pub batch: ProposalBatch,
    /// Per-field outcomes and counts
    pub report: ApplyReport,
}

/// Proposals created by one generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalBatch {
    /// Unique id
    pub id: Uuid,
    /// Company whose graph the members target
    pub company_id: Uuid,
    /// Producer that generated the run
    pub origin: Source,
    /// When the run staged its proposals
    pub created_at: DateTime<Utc>,
    /// Members, in generation order
    pub proposals: Vec<Proposal>,
}

impl ProposalBatch {
    /// Create a batch from a generation run's output
    #[must_use]
    pub fn new(company_id: Uuid, origin: Source, proposals: Vec<Proposal>) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id,
            origin,
            created_at: Utc::now(),
            proposals,
        }
    }

    /// Member by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Proposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    /// Members still awaiting a decision
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.proposals.iter().filter(|p| p.is_pending()).count()
    }

    /// Whether every member is terminally resolved
    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.pending_count() == 0
    }

    /// Accept one member, pushing its value through the mutation engine
    ///
    /// A human decider writes as `user` and confirms the slot on an
    /// applied write; automation preserves the batch's machine origin and
    /// never confirms. The proposal is decided regardless of whether the
    /// write landed — the decision is about the proposal, the
    /// [`FieldOutcome`] says what the engine did with it.
    ///
    /// # Errors
    /// - [`ProposalError::NotFound`] / [`ProposalError::AlreadyDecided`]
    /// - [`ProposalError::Graph`] when the target path is unknown or the
    ///   value's kind is wrong; the proposal stays pending
    pub fn accept(
        &self,
        graph: &ContextGraph,
        registry: &FieldRegistry,
        proposal_id: Uuid,
        decider: &Decider,
    ) -> Result<Resolution, ProposalError> {
        self.accept_inner(graph, registry, proposal_id, decider, None)
    }

    /// Accept one member with a reviewer-edited value
    ///
    /// Same as [`ProposalBatch::accept`], substituting `value` for the
    /// staged `proposed_value`; the substituted value is recorded on the
    /// decided proposal.
    ///
    /// # Errors
    /// See [`ProposalBatch::accept`]
    pub fn accept_with_value(
        &self,
        graph: &ContextGraph,
        registry: &FieldRegistry,
        proposal_id: Uuid,
        decider: &Decider,
        value: FieldValue,
    ) -> Result<Resolution, ProposalError> {
        self.accept_inner(graph, registry, proposal_id, decider, Some(value))
    }

    /// Reject one member; the graph is never touched
    ///
    /// # Errors
    /// - [`ProposalError::NotFound`] / [`ProposalError::AlreadyDecided`]
    pub fn reject(
        &self,
        graph: &ContextGraph,
        proposal_id: Uuid,
        decider: &Decider,
    ) -> Result<Resolution, ProposalError> {
        let index = self.index_of_pending(proposal_id)?;
        let mut batch = self.clone();
        batch.proposals[index] =
            batch.proposals[index].decided(ProposalStatus::Rejected, decider);
        let path = batch.proposals[index].path.to_string();
        Ok(Resolution {
            graph: graph.clone(),
            batch,
            outcome: FieldOutcome::new(path, FieldApplyStatus::SkippedUnchanged),
        })
    }

    /// Accept every member still pending
    ///
    /// Decided members are untouched — bulk actions never reverse prior
    /// decisions. Per-field engine failures become
    /// [`FieldApplyStatus::Error`] entries without aborting the rest; the
    /// failing member stays pending.
    #[must_use]
    pub fn accept_all(
        &self,
        graph: &ContextGraph,
        registry: &FieldRegistry,
        decider: &Decider,
    ) -> BulkResolution {
        let mut graph = graph.clone();
        let mut batch = self.clone();
        let mut report = ApplyReport::default();

        for index in 0..batch.proposals.len() {
            if !batch.proposals[index].is_pending() {
                continue;
            }
            match apply_one(&graph, registry, &batch, index, decider, None) {
                Ok((next_graph, decided, outcome)) => {
                    graph = next_graph;
                    batch.proposals[index] = decided;
                    report.record(outcome);
                }
                Err(err) => {
                    let path = batch.proposals[index].path.to_string();
                    report.record(FieldOutcome::new(
                        path,
                        FieldApplyStatus::Error(err.to_string()),
                    ));
                }
            }
        }

        tracing::info!(
            batch = %self.id,
            attempted = report.attempted,
            updated = report.updated,
            errors = report.errors,
            "bulk accept applied"
        );
        BulkResolution {
            graph,
            batch,
            report,
        }
    }

    /// Reject every member still pending
    ///
    /// Decided members — including already-`Confirmed` ones — are left
    /// untouched.
    #[must_use]
    pub fn reject_all(&self, graph: &ContextGraph, decider: &Decider) -> BulkResolution {
        let mut batch = self.clone();
        let mut report = ApplyReport::default();

        for proposal in &mut batch.proposals {
            if !proposal.is_pending() {
                continue;
            }
            *proposal = proposal.decided(ProposalStatus::Rejected, decider);
            report.record(FieldOutcome::new(
                proposal.path.to_string(),
                FieldApplyStatus::SkippedUnchanged,
            ));
        }

        tracing::info!(batch = %self.id, rejected = report.attempted, "bulk reject applied");
        BulkResolution {
            graph: graph.clone(),
            batch,
            report,
        }
    }

    fn accept_inner(
        &self,
        graph: &ContextGraph,
        registry: &FieldRegistry,
        proposal_id: Uuid,
        decider: &Decider,
        value: Option<FieldValue>,
    ) -> Result<Resolution, ProposalError> {
        let index = self.index_of_pending(proposal_id)?;
        let (graph, decided, outcome) =
            apply_one(graph, registry, self, index, decider, value)?;
        let mut batch = self.clone();
        batch.proposals[index] = decided;
        Ok(Resolution {
            graph,
            batch,
            outcome,
        })
    }

    fn index_of_pending(&self, proposal_id: Uuid) -> Result<usize, ProposalError> {
        let index = self
            .proposals
            .iter()
            .position(|p| p.id == proposal_id)
            .ok_or(ProposalError::NotFound(proposal_id))?;
        let proposal = &self.proposals[index];
        if proposal.is_pending() {
            Ok(index)
        } else {
            Err(ProposalError::AlreadyDecided {
                id: proposal_id,
                status: proposal.status,
            })
        }
    }
}

/// Push one pending member through the mutation engine
///
/// Returns the next graph, the decided proposal, and the field outcome.
fn apply_one(
    graph: &ContextGraph,
    registry: &FieldRegistry,
    batch: &ProposalBatch,
    index: usize,
    decider: &Decider,
    value: Option<FieldValue>,
) -> Result<(ContextGraph, Proposal, FieldOutcome), GraphError> {
    let proposal = &batch.proposals[index];
    let value = value.unwrap_or_else(|| proposal.proposed_value.clone());

    let contribution = if decider.is_human() {
        Contribution::new(Source::User, Confidence::CERTAIN)
    } else {
        Contribution::new(batch.origin.clone(), proposal.confidence)
    };

    let (mut next_graph, decision) = graph.set_field(
        registry,
        &proposal.path,
        value.clone(),
        contribution,
        WriteOptions::default(),
    )?;

    if decider.is_human() && decision.is_applied() {
        next_graph =
            next_graph.confirm_field(&proposal.path, Some(decider.label().to_string()));
    }

    let mut decided = proposal.decided(ProposalStatus::Confirmed, decider);
    decided.proposed_value = value;
    let outcome = FieldOutcome::new(proposal.path.to_string(), status_for(decision));
    Ok((next_graph, decided, outcome))
}

const fn status_for(decision: WriteDecision) -> FieldApplyStatus {
    match decision {
        WriteDecision::Applied => FieldApplyStatus::Updated,
        WriteDecision::RejectedEmpty => FieldApplyStatus::SkippedUnchanged,
        WriteDecision::RejectedLocked => FieldApplyStatus::SkippedHumanOverride,
        WriteDecision::RejectedLowerPriority => FieldApplyStatus::SkippedHigherPriority,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckb_registry::{Domain, FieldPath, LabId};

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    fn staged_batch(company_id: Uuid) -> ProposalBatch {
        let proposals = vec![
            Proposal::new(
                company_id,
                path("brand.voice_tone"),
                FieldValue::text("Confident, plainspoken"),
                Confidence::new(0.8),
                "Derived from homepage copy",
                None,
            ),
            Proposal::new(
                company_id,
                path("brand.brand_values"),
                FieldValue::list(["craft", "candor"]),
                Confidence::new(0.7),
                "Recurring themes in about page",
                None,
            ),
        ];
        ProposalBatch::new(company_id, Source::Lab(LabId::BrandLab), proposals)
    }

    fn setup() -> (ContextGraph, ProposalBatch) {
        let company_id = Uuid::new_v4();
        (
            ContextGraph::new(company_id, "Acme Corp"),
            staged_batch(company_id),
        )
    }

    #[test]
    fn human_accept_writes_as_user_and_confirms() {
        let (graph, batch) = setup();
        let id = batch.proposals[0].id;
        let decider = Decider::Human("alex".to_string());

        let resolution = batch
            .accept(&graph, FieldRegistry::shared(), id, &decider)
            .unwrap();

        assert_eq!(resolution.outcome.status, FieldApplyStatus::Updated);
        assert_eq!(resolution.batch.proposals[0].status, ProposalStatus::Confirmed);

        let slot = resolution.graph.slot(&path("brand.voice_tone")).unwrap();
        assert!(slot.current().unwrap().source.is_user());
        assert!(slot.confirmed);
        assert_eq!(slot.confirmed_by.as_deref(), Some("alex"));
    }

    #[test]
    fn automation_accept_preserves_origin_and_never_confirms() {
        let (graph, batch) = setup();
        let id = batch.proposals[0].id;

        let resolution = batch
            .accept(&graph, FieldRegistry::shared(), id, &Decider::Automation)
            .unwrap();

        let slot = resolution.graph.slot(&path("brand.voice_tone")).unwrap();
        assert_eq!(
            slot.current().unwrap().source,
            Source::Lab(LabId::BrandLab)
        );
        assert!(!slot.confirmed);
    }

    #[test]
    fn accept_with_value_records_the_edit() {
        let (graph, batch) = setup();
        let id = batch.proposals[0].id;
        let decider = Decider::Human("alex".to_string());

        let resolution = batch
            .accept_with_value(
                &graph,
                FieldRegistry::shared(),
                id,
                &decider,
                FieldValue::text("Warm and direct"),
            )
            .unwrap();

        assert_eq!(
            resolution.graph.field_value(&path("brand.voice_tone")),
            Some(&FieldValue::text("Warm and direct"))
        );
        assert_eq!(
            resolution.batch.proposals[0].proposed_value,
            FieldValue::text("Warm and direct")
        );
    }

    #[test]
    fn reject_never_touches_the_graph() {
        let (graph, batch) = setup();
        let id = batch.proposals[0].id;

        let resolution = batch
            .reject(&graph, id, &Decider::Human("alex".to_string()))
            .unwrap();

        assert_eq!(resolution.batch.proposals[0].status, ProposalStatus::Rejected);
        assert!(resolution.graph.diff(&graph).is_empty());
    }

    #[test]
    fn decided_proposal_cannot_be_redecided() {
        let (graph, batch) = setup();
        let id = batch.proposals[0].id;
        let decider = Decider::Automation;

        let resolution = batch
            .accept(&graph, FieldRegistry::shared(), id, &decider)
            .unwrap();
        let again = resolution
            .batch
            .accept(&resolution.graph, FieldRegistry::shared(), id, &decider);

        assert!(matches!(
            again,
            Err(ProposalError::AlreadyDecided {
                status: ProposalStatus::Confirmed,
                ..
            })
        ));
    }

    #[test]
    fn unknown_proposal_id() {
        let (graph, batch) = setup();
        let result = batch.accept(
            &graph,
            FieldRegistry::shared(),
            Uuid::new_v4(),
            &Decider::Automation,
        );
        assert!(matches!(result, Err(ProposalError::NotFound(_))));
    }

    #[test]
    fn accept_all_resolves_only_pending_members() {
        let (graph, batch) = setup();
        let first = batch.proposals[0].id;

        // A human rejects the first member, then automation sweeps the rest.
        let resolution = batch
            .reject(&graph, first, &Decider::Human("alex".to_string()))
            .unwrap();
        let bulk = resolution.batch.accept_all(
            &resolution.graph,
            FieldRegistry::shared(),
            &Decider::Automation,
        );

        assert_eq!(bulk.report.attempted, 1);
        assert_eq!(bulk.report.updated, 1);
        assert_eq!(bulk.batch.proposals[0].status, ProposalStatus::Rejected);
        assert_eq!(bulk.batch.proposals[1].status, ProposalStatus::Confirmed);
        assert!(bulk.batch.is_settled());
    }

    #[test]
    fn reject_all_never_reverses_confirmed_members() {
        let (graph, batch) = setup();
        let first = batch.proposals[0].id;
        let decider = Decider::Human("alex".to_string());

        let resolution = batch
            .accept(&graph, FieldRegistry::shared(), first, &decider)
            .unwrap();
        let bulk = resolution.batch.reject_all(&resolution.graph, &decider);

        assert_eq!(bulk.batch.proposals[0].status, ProposalStatus::Confirmed);
        assert_eq!(bulk.batch.proposals[1].status, ProposalStatus::Rejected);
        assert_eq!(bulk.report.attempted, 1);
    }

    #[test]
    fn accept_all_reports_skips_against_confirmed_slots() {
        let (graph, batch) = setup();

        // Human locks the first field before the sweep.
        let graph = graph
            .set_field(
                FieldRegistry::shared(),
                &path("brand.voice_tone"),
                FieldValue::text("Hand-written tone"),
                Contribution::from_user(),
                WriteOptions::default(),
            )
            .unwrap()
            .0
            .confirm_field(&path("brand.voice_tone"), Some("alex".to_string()));

        let bulk = batch.accept_all(&graph, FieldRegistry::shared(), &Decider::Automation);

        assert_eq!(bulk.report.attempted, 2);
        assert_eq!(bulk.report.updated, 1);
        assert_eq!(bulk.report.skipped_human_override, 1);
        // The skipped member is still decided; the outcome says why the
        // field did not change.
        assert!(bulk.batch.is_settled());
        assert_eq!(
            bulk.graph.field_value(&path("brand.voice_tone")),
            Some(&FieldValue::text("Hand-written tone"))
        );
    }

    #[test]
    fn accept_all_surfaces_per_field_errors_without_aborting() {
        let company_id = Uuid::new_v4();
        let graph = ContextGraph::new(company_id, "Acme Corp");
        // Second member carries a kind the catalog rejects.
        let proposals = vec![
            Proposal::new(
                company_id,
                path("website.page_count"),
                FieldValue::text("forty"),
                Confidence::new(0.5),
                "Misparsed crawl output",
                None,
            ),
            Proposal::new(
                company_id,
                path("website.platform"),
                FieldValue::text("custom"),
                Confidence::new(0.9),
                "Detected from headers",
                None,
            ),
        ];
        let batch = ProposalBatch::new(company_id, Source::Lab(LabId::WebsiteLab), proposals);

        let bulk = batch.accept_all(&graph, FieldRegistry::shared(), &Decider::Automation);

        assert_eq!(bulk.report.errors, 1);
        assert_eq!(bulk.report.updated, 1);
        // The failing member stays pending for a corrected retry.
        assert_eq!(bulk.batch.proposals[0].status, ProposalStatus::Proposed);
        assert_eq!(bulk.batch.proposals[1].status, ProposalStatus::Confirmed);
    }
}
