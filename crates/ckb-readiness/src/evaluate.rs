//! Readiness evaluation
//!
//! A pure function of (graph snapshot, flow) against the static
//! requirement matrix and lab roster. Never errors: an absent graph yields
//! a valid "not ready" verdict, not an exception.

use crate::status::{CtaPriority, DomainStatus, FlowReadiness, LabCta};
use ckb_graph::ContextGraph;
use ckb_registry::{Domain, FieldRegistry, Flow, Importance, LabId, LabRoster, RequirementMatrix};
use indexmap::IndexMap;

/// Maximum missing critical domains under which a caller may still proceed
/// with a quality warning
const PROCEED_ANYWAY_THRESHOLD: usize = 1;

/// Evaluate a graph snapshot against one flow's requirements
///
/// Optional domains are skipped entirely. Completeness is a
/// critical-domain gate: recommended presence is surfaced in
/// `requirements` and `missing_recommended` but never moves the
/// percentage.
///
/// `None` means no graph exists for the company at all; the result is the
/// degenerate [`empty_readiness`] verdict.
#[must_use]
pub fn evaluate(
    graph: Option<&ContextGraph>,
    flow: Flow,
    registry: &FieldRegistry,
    matrix: &RequirementMatrix,
    roster: &LabRoster,
) -> FlowReadiness {
    let Some(graph) = graph else {
        return empty_readiness(flow);
    };

    let mut requirements = Vec::new();
    let mut missing_critical = Vec::new();
    let mut missing_recommended = Vec::new();
    let mut critical_total = 0usize;
    let mut critical_present = 0usize;

    for (domain, importance) in matrix.row(flow) {
        if importance == Importance::Optional {
            continue;
        }
        let present = graph.has_domain_data(registry, domain);
        if importance == Importance::Critical {
            critical_total += 1;
            if present {
                critical_present += 1;
            } else {
                missing_critical.push(domain);
            }
        } else if !present {
            missing_recommended.push(domain);
        }
        requirements.push(DomainStatus {
            domain,
            importance,
            present,
            lab: graph.source_lab(registry, domain),
            last_updated: graph.last_updated(registry, domain),
        });
    }

    let lab_ctas = derive_ctas(&missing_critical, &missing_recommended, roster);
    let is_ready = missing_critical.is_empty();
    let can_proceed_anyway = missing_critical.len() <= PROCEED_ANYWAY_THRESHOLD;
    let proceed_anyway_warning = (!is_ready && can_proceed_anyway).then(|| {
        format!(
            "Proceeding without {} data may significantly degrade {} output quality.",
            missing_critical[0], flow
        )
    });

    FlowReadiness {
        flow,
        is_ready,
        completeness_percent: completeness(critical_present, critical_total),
        requirements,
        missing_critical,
        missing_recommended,
        lab_ctas,
        can_proceed_anyway,
        proceed_anyway_warning,
    }
}

/// The degenerate verdict for a company with no graph at all
///
/// Not ready, zero completeness, no CTAs — only a single explanatory
/// message, without attempting domain-by-domain evaluation.
#[must_use]
pub fn empty_readiness(flow: Flow) -> FlowReadiness {
    FlowReadiness {
        flow,
        is_ready: false,
        completeness_percent: 0,
        requirements: Vec::new(),
        missing_critical: Vec::new(),
        missing_recommended: Vec::new(),
        lab_ctas: Vec::new(),
        can_proceed_anyway: false,
        proceed_anyway_warning: Some(format!(
            "No context graph exists for this company yet; onboard it before running {flow}."
        )),
    }
}

/// One CTA per responsible lab, upgraded to critical when any of its
/// missing domains is critical
fn derive_ctas(
    missing_critical: &[Domain],
    missing_recommended: &[Domain],
    roster: &LabRoster,
) -> Vec<LabCta> {
    let mut by_lab: IndexMap<LabId, (CtaPriority, Vec<Domain>)> = IndexMap::new();

    let mut fold = |domains: &[Domain], priority: CtaPriority| {
        for &domain in domains {
            let Some(lab) = roster.lab_for(domain) else {
                continue;
            };
            let entry = by_lab
                .entry(lab)
                .or_insert_with(|| (priority, Vec::new()));
            entry.0 = entry.0.max(priority);
            entry.1.push(domain);
        }
    };
    fold(missing_critical, CtaPriority::Critical);
    fold(missing_recommended, CtaPriority::Recommended);

    by_lab
        .into_iter()
        .map(|(lab, (priority, domains))| {
            let listed = domains
                .iter()
                .map(Domain::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let message = format!("Run the {} to fill in {listed}.", lab.title());
            LabCta {
                lab,
                priority,
                domains,
                message,
            }
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn completeness(present: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((present as f64 / total as f64) * 100.0).round() as u8
}
