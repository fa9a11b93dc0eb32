//! Lab roster
//!
//! The static map from each domain to the producer responsible for filling
//! it. Readiness remediation uses this to point "what's missing" at the
//! lab that can fix it.

use crate::domain::{Domain, LabId};
use indexmap::IndexMap;
use once_cell::sync::Lazy;

/// Domain → responsible lab map
#[derive(Debug, Clone)]
pub struct LabRoster {
    assignments: IndexMap<Domain, LabId>,
}

impl LabRoster {
    /// Build a roster from explicit assignments
    #[must_use]
    pub fn new(assignments: IndexMap<Domain, LabId>) -> Self {
        Self { assignments }
    }

    /// The process-wide default roster
    #[inline]
    #[must_use]
    pub fn shared() -> &'static Self {
        &DEFAULT_ROSTER
    }

    /// Lab responsible for a domain
    ///
    /// Every domain in the fixed set has an assignment; `None` can only
    /// occur for a reduced roster built via [`LabRoster::new`].
    #[inline]
    #[must_use]
    pub fn lab_for(&self, domain: Domain) -> Option<LabId> {
        self.assignments.get(&domain).copied()
    }

    /// Domains a lab is responsible for, in declaration order
    #[must_use]
    pub fn domains_of(&self, lab: LabId) -> Vec<Domain> {
        self.assignments
            .iter()
            .filter(|(_, assigned)| **assigned == lab)
            .map(|(domain, _)| *domain)
            .collect()
    }
}

impl Default for LabRoster {
    fn default() -> Self {
        DEFAULT_ROSTER.clone()
    }
}

static DEFAULT_ROSTER: Lazy<LabRoster> = Lazy::new(|| {
    let assignments: IndexMap<Domain, LabId> = [
        (Domain::Identity, LabId::Discovery),
        (Domain::Objectives, LabId::Discovery),
        (Domain::Brand, LabId::BrandLab),
        (Domain::Audience, LabId::AudienceLab),
        (Domain::Website, LabId::WebsiteLab),
        (Domain::Seo, LabId::SeoLab),
        (Domain::Content, LabId::ContentLab),
        (Domain::Competitive, LabId::MarketLab),
    ]
    .into_iter()
    .collect();
    LabRoster::new(assignments)
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_covers_every_domain() {
        for domain in Domain::ALL {
            assert!(
                LabRoster::shared().lab_for(domain).is_some(),
                "domain {domain} has no responsible lab"
            );
        }
    }

    #[test]
    fn roster_discovery_owns_identity_and_objectives() {
        let domains = LabRoster::shared().domains_of(LabId::Discovery);
        assert_eq!(domains, vec![Domain::Identity, Domain::Objectives]);
    }

    #[test]
    fn roster_single_domain_labs() {
        assert_eq!(LabRoster::shared().lab_for(Domain::Seo), Some(LabId::SeoLab));
        assert_eq!(
            LabRoster::shared().domains_of(LabId::SeoLab),
            vec![Domain::Seo]
        );
    }
}
