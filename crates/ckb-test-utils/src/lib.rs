//! Testing utilities for the CKB workspace
//!
//! Shared fixtures: populated graphs, sample contributions, and staged
//! batches.

#![allow(missing_docs)]

use ckb_graph::{Confidence, ContextGraph, Contribution, FieldValue, Source, WriteOptions};
use ckb_proposal::{Proposal, ProposalBatch};
use ckb_registry::{Domain, FieldPath, FieldRegistry, LabId, LabRoster, ValueKind};
use uuid::Uuid;

pub fn empty_graph() -> ContextGraph {
    ContextGraph::new(Uuid::new_v4(), "Acme Corp")
}

/// A registry-legal sample value for a field kind
pub fn sample_value(kind: ValueKind) -> FieldValue {
    match kind {
        ValueKind::Text => FieldValue::text("sample"),
        ValueKind::Number => FieldValue::Number(42.0),
        ValueKind::Flag => FieldValue::Flag(true),
        ValueKind::List => FieldValue::list(["alpha", "beta"]),
        ValueKind::Structured => FieldValue::Structured(serde_json::json!({"sample": true})),
    }
}

pub fn lab_contribution(lab: LabId) -> Contribution {
    Contribution::new(Source::Lab(lab), Confidence::new(0.8))
}

/// Populate every non-meta field of the given domains, attributed to each
/// domain's responsible lab
pub fn graph_with_domains(domains: &[Domain]) -> ContextGraph {
    let registry = FieldRegistry::shared();
    let roster = LabRoster::shared();
    let mut graph = empty_graph();
    for &domain in domains {
        let lab = roster.lab_for(domain).unwrap();
        for spec in registry.content_fields(domain) {
            let path = FieldPath::new(domain, spec.name.clone()).unwrap();
            let (next, decision) = graph
                .set_field(
                    registry,
                    &path,
                    sample_value(spec.kind),
                    lab_contribution(lab),
                    WriteOptions::default(),
                )
                .unwrap();
            assert!(decision.is_applied(), "fixture write rejected at {path}");
            graph = next;
        }
    }
    graph
}

/// Stage a batch of lab proposals against the given paths
pub fn staged_batch(
    company_id: Uuid,
    origin: LabId,
    fields: &[(&str, FieldValue)],
) -> ProposalBatch {
    let proposals = fields
        .iter()
        .map(|(path, value)| {
            Proposal::new(
                company_id,
                path.parse().unwrap(),
                value.clone(),
                Confidence::new(0.75),
                "staged by fixture",
                None,
            )
        })
        .collect();
    ProposalBatch::new(company_id, Source::Lab(origin), proposals)
}
