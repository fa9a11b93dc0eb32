//! Context service facade
//!
//! Wires the registry, matrix, roster, and readiness cache behind one
//! object request handlers can hold. Every mutation is a pure
//! value-in/value-out call under the hood; the service adds configuration
//! plumbing, cache invalidation, and tracing at operation boundaries.

use crate::cache::ReadinessCache;
use ckb_graph::{
    ContextGraph, Contribution, FieldValue, GraphError, WriteDecision, WriteOptions,
};
use ckb_proposal::{BulkResolution, Decider, ProposalBatch, ProposalError, Resolution};
use ckb_readiness::{evaluate, FlowReadiness};
use ckb_registry::{FieldPath, FieldRegistry, Flow, LabRoster, RequirementMatrix};
use uuid::Uuid;

/// Gate verdict for running a flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowGate {
    /// All critical domains present
    Allowed,
    /// One critical domain missing; caller may proceed surfacing the
    /// quality warning
    AllowedWithWarning(String),
    /// Too many critical domains missing; the full verdict explains what
    /// to fix
    Blocked(Box<FlowReadiness>),
}

impl FlowGate {
    /// Whether the flow may run at all (with or without a warning)
    #[inline]
    #[must_use]
    pub const fn may_proceed(&self) -> bool {
        !matches!(self, Self::Blocked(_))
    }
}

/// Facade over the knowledge-base core
///
/// Holds the static configuration and the injected readiness cache.
/// Graphs and batches still travel as values: the caller fetches them
/// from its record store, passes them in, and persists what comes back.
#[derive(Debug, Clone)]
pub struct ContextService {
    registry: FieldRegistry,
    matrix: RequirementMatrix,
    roster: LabRoster,
    cache: ReadinessCache,
}

impl ContextService {
    /// Service over the default catalog, matrix, and roster
    #[inline]
    #[must_use]
    pub fn new(cache: ReadinessCache) -> Self {
        Self {
            registry: FieldRegistry::default(),
            matrix: RequirementMatrix::default(),
            roster: LabRoster::default(),
            cache,
        }
    }

    /// Service over explicit configuration tables
    #[inline]
    #[must_use]
    pub fn with_config(
        registry: FieldRegistry,
        matrix: RequirementMatrix,
        roster: LabRoster,
        cache: ReadinessCache,
    ) -> Self {
        Self {
            registry,
            matrix,
            roster,
            cache,
        }
    }

    /// The field registry in use
    #[inline]
    #[must_use]
    pub const fn registry(&self) -> &FieldRegistry {
        &self.registry
    }

    /// Apply one write under the conflict policy
    ///
    /// Invalidates the company's cached readiness when the write lands.
    ///
    /// # Errors
    /// Propagates the mutation engine's registry validation errors
    pub fn set_field(
        &self,
        graph: &ContextGraph,
        path: &FieldPath,
        value: FieldValue,
        contribution: Contribution,
        opts: WriteOptions,
    ) -> Result<(ContextGraph, WriteDecision), GraphError> {
        let (next, decision) = graph.set_field(&self.registry, path, value, contribution, opts)?;
        if decision.is_applied() {
            self.cache.invalidate_company(next.company_id());
        }
        Ok((next, decision))
    }

    /// Lock a field against non-human writers; idempotent
    #[must_use]
    pub fn confirm_field(
        &self,
        graph: &ContextGraph,
        path: &FieldPath,
        confirmed_by: Option<String>,
    ) -> ContextGraph {
        graph.confirm_field(path, confirmed_by)
    }

    /// Release a field's confirmation lock; idempotent
    #[must_use]
    pub fn unconfirm_field(&self, graph: &ContextGraph, path: &FieldPath) -> ContextGraph {
        graph.unconfirm_field(path)
    }

    /// Accept one proposal from a batch
    ///
    /// # Errors
    /// See [`ProposalBatch::accept`]
    pub fn accept_proposal(
        &self,
        graph: &ContextGraph,
        batch: &ProposalBatch,
        proposal_id: Uuid,
        decider: &Decider,
    ) -> Result<Resolution, ProposalError> {
        let resolution = batch.accept(graph, &self.registry, proposal_id, decider)?;
        self.cache.invalidate_company(graph.company_id());
        Ok(resolution)
    }

    /// Accept one proposal with a reviewer-edited value
    ///
    /// # Errors
    /// See [`ProposalBatch::accept_with_value`]
    pub fn accept_proposal_with_value(
        &self,
        graph: &ContextGraph,
        batch: &ProposalBatch,
        proposal_id: Uuid,
        decider: &Decider,
        value: FieldValue,
    ) -> Result<Resolution, ProposalError> {
        let resolution =
            batch.accept_with_value(graph, &self.registry, proposal_id, decider, value)?;
        self.cache.invalidate_company(graph.company_id());
        Ok(resolution)
    }

    /// Reject one proposal; never touches the graph
    ///
    /// # Errors
    /// See [`ProposalBatch::reject`]
    pub fn reject_proposal(
        &self,
        graph: &ContextGraph,
        batch: &ProposalBatch,
        proposal_id: Uuid,
        decider: &Decider,
    ) -> Result<Resolution, ProposalError> {
        batch.reject(graph, proposal_id, decider)
    }

    /// Accept every pending member of a batch
    #[must_use]
    pub fn apply_batch(
        &self,
        graph: &ContextGraph,
        batch: &ProposalBatch,
        decider: &Decider,
    ) -> BulkResolution {
        let bulk = batch.accept_all(graph, &self.registry, decider);
        if bulk.report.updated > 0 {
            self.cache.invalidate_company(graph.company_id());
        }
        bulk
    }

    /// Reject every pending member of a batch
    #[must_use]
    pub fn discard_batch(
        &self,
        graph: &ContextGraph,
        batch: &ProposalBatch,
        decider: &Decider,
    ) -> BulkResolution {
        batch.reject_all(graph, decider)
    }

    /// Readiness verdict for a flow, cache-aware
    ///
    /// Cached per (company, flow); entries are dropped when this service
    /// applies a write and expire on the cache's TTL otherwise. Callers
    /// mutating graphs outside the service should inject a short TTL.
    #[must_use]
    pub fn readiness(&self, graph: Option<&ContextGraph>, flow: Flow) -> FlowReadiness {
        let Some(graph) = graph else {
            return ckb_readiness::empty_readiness(flow);
        };
        if let Some(hit) = self.cache.get(graph.company_id(), flow) {
            tracing::trace!(company = %graph.company_id(), %flow, "readiness cache hit");
            return hit;
        }
        let readiness = evaluate(Some(graph), flow, &self.registry, &self.matrix, &self.roster);
        self.cache
            .insert(graph.company_id(), flow, readiness.clone());
        readiness
    }

    /// Gate verdict for running a flow against a graph
    #[must_use]
    pub fn gate(&self, graph: Option<&ContextGraph>, flow: Flow) -> FlowGate {
        let readiness = self.readiness(graph, flow);
        if readiness.is_ready {
            FlowGate::Allowed
        } else if readiness.can_proceed_anyway {
            let warning = readiness
                .proceed_anyway_warning
                .clone()
                .unwrap_or_else(|| format!("Proceeding with incomplete context for {flow}."));
            tracing::debug!(%flow, "flow allowed with warning");
            FlowGate::AllowedWithWarning(warning)
        } else {
            tracing::debug!(%flow, missing = readiness.missing_critical.len(), "flow blocked");
            FlowGate::Blocked(Box::new(readiness))
        }
    }
}

impl Default for ContextService {
    fn default() -> Self {
        Self::new(ReadinessCache::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ckb_graph::Source;
    use ckb_registry::Domain;

    fn service() -> ContextService {
        ContextService::new(ReadinessCache::new(100))
    }

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn gate_blocks_empty_graph_for_strategy() {
        let service = service();
        let graph = ContextGraph::new(Uuid::new_v4(), "Acme Corp");
        let gate = service.gate(Some(&graph), Flow::Strategy);
        assert!(!gate.may_proceed());
        match gate {
            FlowGate::Blocked(readiness) => {
                assert!(readiness.missing_critical.contains(&Domain::Identity));
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn gate_absent_graph_is_blocked() {
        let gate = service().gate(None, Flow::Assessment);
        assert!(!gate.may_proceed());
    }

    #[test]
    fn applied_write_invalidates_cached_readiness() {
        let service = service();
        let graph = ContextGraph::new(Uuid::new_v4(), "Acme Corp");

        // Prime the cache with a not-ready verdict.
        let before = service.readiness(Some(&graph), Flow::Assessment);
        assert!(!before.is_ready);

        let (graph, _) = service
            .set_field(
                &graph,
                &path("identity.mission"),
                FieldValue::text("Ship great software"),
                Contribution::new(Source::User, ckb_graph::Confidence::CERTAIN),
                WriteOptions::default(),
            )
            .unwrap();
        let (graph, _) = service
            .set_field(
                &graph,
                &path("website.platform"),
                FieldValue::text("custom"),
                Contribution::new(Source::User, ckb_graph::Confidence::CERTAIN),
                WriteOptions::default(),
            )
            .unwrap();

        let after = service.readiness(Some(&graph), Flow::Assessment);
        assert!(after.is_ready);
    }

    #[test]
    fn rejected_write_keeps_cache_entry() {
        let service = service();
        let graph = ContextGraph::new(Uuid::new_v4(), "Acme Corp");
        let _ = service.readiness(Some(&graph), Flow::Strategy);

        // Empty value: accepted no-op, cache untouched.
        let (_, decision) = service
            .set_field(
                &graph,
                &path("identity.mission"),
                FieldValue::text(""),
                Contribution::from_user(),
                WriteOptions::default(),
            )
            .unwrap();
        assert!(!decision.is_applied());
        assert!(service.cache.get(graph.company_id(), Flow::Strategy).is_some());
    }
}
