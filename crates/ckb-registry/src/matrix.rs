//! Flow requirement matrix
//!
//! The static table of how much each flow cares about each domain. The
//! readiness engine is a pure function of a graph snapshot against one row
//! of this table.

use crate::domain::{Domain, Flow, Importance};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Flow → domain → importance table
#[derive(Debug, Clone)]
pub struct RequirementMatrix {
    rows: IndexMap<Flow, IndexMap<Domain, Importance>>,
}

impl RequirementMatrix {
    /// Build a matrix from explicit rows
    #[must_use]
    pub fn new(rows: IndexMap<Flow, IndexMap<Domain, Importance>>) -> Self {
        Self { rows }
    }

    /// The process-wide default matrix
    #[inline]
    #[must_use]
    pub fn shared() -> &'static Self {
        &DEFAULT_MATRIX
    }

    /// Requirements for one flow, in declaration order
    ///
    /// An unknown flow yields an empty row; readiness treats that as a flow
    /// with nothing required.
    #[must_use]
    pub fn row(&self, flow: Flow) -> Vec<(Domain, Importance)> {
        self.rows
            .get(&flow)
            .map(|row| row.iter().map(|(d, i)| (*d, *i)).collect())
            .unwrap_or_default()
    }

    /// Importance of one domain for one flow
    ///
    /// Domains absent from the row are [`Importance::Optional`].
    #[inline]
    #[must_use]
    pub fn importance(&self, flow: Flow, domain: Domain) -> Importance {
        self.rows
            .get(&flow)
            .and_then(|row| row.get(&domain).copied())
            .unwrap_or(Importance::Optional)
    }
}

impl Default for RequirementMatrix {
    fn default() -> Self {
        DEFAULT_MATRIX.clone()
    }
}

static DEFAULT_MATRIX: Lazy<RequirementMatrix> = Lazy::new(|| {
    use Domain::{
        Audience, Brand, Competitive, Content, Identity, Objectives, Seo, Website,
    };
    use Importance::{Critical, Optional, Recommended};

    let mut rows: IndexMap<Flow, IndexMap<Domain, Importance>> = IndexMap::new();

    let mut row = |flow: Flow, entries: Vec<(Domain, Importance)>| {
        rows.insert(flow, entries.into_iter().collect());
    };

    row(
        Flow::Strategy,
        vec![
            (Identity, Critical),
            (Brand, Critical),
            (Audience, Critical),
            (Objectives, Critical),
            (Website, Recommended),
            (Seo, Recommended),
            (Competitive, Recommended),
            (Content, Optional),
        ],
    );
    row(
        Flow::GapIa,
        vec![
            (Identity, Critical),
            (Brand, Critical),
            (Website, Critical),
            (Seo, Recommended),
            (Content, Recommended),
            (Audience, Optional),
        ],
    );
    row(
        Flow::GapFull,
        vec![
            (Identity, Critical),
            (Brand, Critical),
            (Website, Critical),
            (Seo, Critical),
            (Content, Recommended),
            (Competitive, Recommended),
            (Audience, Optional),
        ],
    );
    row(
        Flow::Assessment,
        vec![
            (Identity, Critical),
            (Website, Critical),
            (Seo, Recommended),
            (Content, Recommended),
            (Competitive, Optional),
        ],
    );
    row(
        Flow::Program,
        vec![
            (Identity, Critical),
            (Objectives, Critical),
            (Brand, Recommended),
            (Audience, Recommended),
            (Content, Optional),
        ],
    );

    RequirementMatrix::new(rows)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_every_flow_has_a_row() {
        for flow in Flow::ALL {
            assert!(
                !RequirementMatrix::shared().row(flow).is_empty(),
                "flow {flow} has no requirements"
            );
        }
    }

    #[test]
    fn matrix_every_flow_requires_identity() {
        for flow in Flow::ALL {
            assert_eq!(
                RequirementMatrix::shared().importance(flow, Domain::Identity),
                Importance::Critical
            );
        }
    }

    #[test]
    fn matrix_gap_ia_criticals() {
        let criticals: Vec<Domain> = RequirementMatrix::shared()
            .row(Flow::GapIa)
            .into_iter()
            .filter(|(_, i)| *i == Importance::Critical)
            .map(|(d, _)| d)
            .collect();
        assert_eq!(criticals, vec![Domain::Identity, Domain::Brand, Domain::Website]);
    }

    #[test]
    fn matrix_gap_full_has_four_criticals() {
        let criticals = RequirementMatrix::shared()
            .row(Flow::GapFull)
            .into_iter()
            .filter(|(_, i)| *i == Importance::Critical)
            .count();
        assert_eq!(criticals, 4);
    }

    #[test]
    fn matrix_absent_domain_is_optional() {
        assert_eq!(
            RequirementMatrix::shared().importance(Flow::Assessment, Domain::Audience),
            Importance::Optional
        );
    }
}
