//! Context graph store and mutation engine
//!
//! [`ContextGraph`] is an immutable value: every mutation returns a new
//! graph backed by structurally-shared persistent maps, so snapshots are
//! free to read concurrently and before/after diffing is trivial. The
//! external record store owns persistence; this engine only computes the
//! next graph value and says what it decided.

use crate::decision::{decide, WriteDecision, WriteOptions};
use crate::provenance::{Contribution, Source};
use crate::slot::FieldSlot;
use crate::value::FieldValue;
use chrono::{DateTime, Utc};
use ckb_registry::{Domain, FieldPath, FieldRegistry, LabId, RegistryError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors raised by the mutation engine
///
/// Everything else — empty values, locked slots, outranked writers — is a
/// silent no-op reported through [`WriteDecision`], not an error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GraphError {
    /// Path or kind rejected by the field registry
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Per-company store of domain → field → slot
///
/// Created empty at company onboarding and mutated indefinitely by
/// producers. Never deleted by this engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextGraph {
    company_id: Uuid,
    company_name: String,
    domains: im::HashMap<Domain, im::HashMap<String, FieldSlot>>,
}

impl ContextGraph {
    /// Create an empty graph for a company
    #[inline]
    #[must_use]
    pub fn new(company_id: Uuid, company_name: impl Into<String>) -> Self {
        Self {
            company_id,
            company_name: company_name.into(),
            domains: im::HashMap::new(),
        }
    }

    /// Company this graph belongs to
    #[inline]
    #[must_use]
    pub const fn company_id(&self) -> Uuid {
        self.company_id
    }

    /// Company display name
    #[inline]
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    /// Apply one write under the conflict policy
    ///
    /// Returns the (possibly unchanged) next graph value together with the
    /// policy's decision. On `Applied`, a new contribution is prepended to
    /// the slot's provenance and the active value replaced; on any
    /// rejection the returned graph is the receiver, structurally shared.
    ///
    /// # Errors
    /// - [`RegistryError::UnknownPath`] for an uncatalogued path
    /// - [`RegistryError::KindMismatch`] when a non-empty value's shape
    ///   disagrees with the catalog
    pub fn set_field(
        &self,
        registry: &FieldRegistry,
        path: &FieldPath,
        value: FieldValue,
        contribution: Contribution,
        opts: WriteOptions,
    ) -> Result<(Self, WriteDecision), GraphError> {
        registry.resolve(path)?;
        if !value.is_empty() {
            registry.validate_kind(path, value.kind())?;
        }

        let slot = self.slot(path);
        let decision = decide(slot, &contribution.source, &value, opts);

        match decision {
            WriteDecision::Applied => {
                if opts.force && slot.is_some_and(|s| s.confirmed) && !contribution.source.is_user()
                {
                    tracing::warn!(%path, source = %contribution.source, "forced write over confirmed slot");
                }
                let next_slot = match slot {
                    Some(existing) => existing.with_write(value, contribution),
                    None => FieldSlot::new(value, contribution),
                };
                Ok((self.with_slot(path, next_slot), decision))
            }
            _ => {
                tracing::debug!(%path, source = %contribution.source, ?decision, "write rejected");
                Ok((self.clone(), decision))
            }
        }
    }

    /// Lock a field against non-human writers; idempotent
    ///
    /// Confirming an absent or empty slot is a no-op — there is nothing to
    /// lock.
    #[must_use]
    pub fn confirm_field(&self, path: &FieldPath, confirmed_by: Option<String>) -> Self {
        match self.slot(path) {
            Some(slot) if !slot.value.is_empty() => {
                self.with_slot(path, slot.confirm(confirmed_by))
            }
            _ => self.clone(),
        }
    }

    /// Release a field's confirmation lock; idempotent
    #[must_use]
    pub fn unconfirm_field(&self, path: &FieldPath) -> Self {
        match self.slot(path) {
            Some(slot) if slot.confirmed => self.with_slot(path, slot.unconfirm()),
            _ => self.clone(),
        }
    }

    /// The slot at a path, if one has ever been written
    #[inline]
    #[must_use]
    pub fn slot(&self, path: &FieldPath) -> Option<&FieldSlot> {
        self.domains
            .get(&path.domain())
            .and_then(|fields| fields.get(path.field()))
    }

    /// The active value at a path
    #[inline]
    #[must_use]
    pub fn field_value(&self, path: &FieldPath) -> Option<&FieldValue> {
        self.slot(path).map(|slot| &slot.value)
    }

    /// Whether a domain has any real data
    ///
    /// True iff at least one non-meta field in the domain holds a
    /// non-empty value.
    #[must_use]
    pub fn has_domain_data(&self, registry: &FieldRegistry, domain: Domain) -> bool {
        let Some(fields) = self.domains.get(&domain) else {
            return false;
        };
        fields.iter().any(|(name, slot)| {
            !slot.value.is_empty() && !is_meta(registry, domain, name)
        })
    }

    /// The lab attributed with a domain's newest non-meta contribution
    ///
    /// Reads only the active contribution of each slot, never the full
    /// history. Returns `None` when the newest contribution is not from a
    /// lab (human entry, pipeline) or the domain is empty.
    #[must_use]
    pub fn source_lab(&self, registry: &FieldRegistry, domain: Domain) -> Option<LabId> {
        self.newest_contribution(registry, domain)
            .and_then(|c| c.source.lab())
    }

    /// The source attributed with a domain's newest non-meta contribution
    #[must_use]
    pub fn domain_source(&self, registry: &FieldRegistry, domain: Domain) -> Option<Source> {
        self.newest_contribution(registry, domain)
            .map(|c| c.source.clone())
    }

    /// When a domain's data last changed
    #[must_use]
    pub fn last_updated(&self, registry: &FieldRegistry, domain: Domain) -> Option<DateTime<Utc>> {
        self.newest_contribution(registry, domain)
            .map(|c| c.updated_at)
    }

    /// Percent of a domain's non-meta catalog fields holding data
    ///
    /// A coarse per-domain indicator for UI collaborators; readiness does
    /// not use it.
    #[must_use]
    pub fn domain_completion(&self, registry: &FieldRegistry, domain: Domain) -> u8 {
        let specs = registry.content_fields(domain);
        if specs.is_empty() {
            return 0;
        }
        let populated = specs
            .iter()
            .filter(|spec| {
                self.domains
                    .get(&domain)
                    .and_then(|fields| fields.get(&spec.name))
                    .is_some_and(|slot| !slot.value.is_empty())
            })
            .count();
        percent(populated, specs.len())
    }

    /// Paths whose active value differs between two graph values
    ///
    /// Rejected writes are silent, so callers detect "nothing changed" by
    /// diffing before and after. An empty diff means the write was a
    /// no-op.
    #[must_use]
    pub fn diff(&self, other: &Self) -> Vec<FieldPath> {
        let mut changed = Vec::new();
        let domains = self
            .domains
            .keys()
            .chain(other.domains.keys())
            .copied()
            .collect::<std::collections::BTreeSet<_>>();

        for domain in domains {
            let ours = self.domains.get(&domain);
            let theirs = other.domains.get(&domain);
            let fields = ours
                .into_iter()
                .flat_map(im::HashMap::keys)
                .chain(theirs.into_iter().flat_map(im::HashMap::keys))
                .collect::<std::collections::BTreeSet<_>>();

            for field in fields {
                let a = ours.and_then(|f| f.get(field)).map(|s| &s.value);
                let b = theirs.and_then(|f| f.get(field)).map(|s| &s.value);
                if a != b {
                    if let Ok(path) = FieldPath::new(domain, field.clone()) {
                        changed.push(path);
                    }
                }
            }
        }
        changed
    }

    fn newest_contribution(
        &self,
        registry: &FieldRegistry,
        domain: Domain,
    ) -> Option<&Contribution> {
        self.domains.get(&domain).and_then(|fields| {
            fields
                .iter()
                .filter(|(name, slot)| {
                    !slot.value.is_empty() && !is_meta(registry, domain, name)
                })
                .filter_map(|(_, slot)| slot.current())
                .max_by_key(|c| c.updated_at)
        })
    }

    fn with_slot(&self, path: &FieldPath, slot: FieldSlot) -> Self {
        let fields = self
            .domains
            .get(&path.domain())
            .cloned()
            .unwrap_or_default()
            .update(path.field().to_string(), slot);
        Self {
            company_id: self.company_id,
            company_name: self.company_name.clone(),
            domains: self.domains.update(path.domain(), fields),
        }
    }
}

fn is_meta(registry: &FieldRegistry, domain: Domain, field: &str) -> bool {
    FieldPath::new(domain, field)
        .ok()
        .and_then(|path| registry.resolve(&path).ok())
        .is_some_and(|spec| spec.meta)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> u8 {
    ((part as f64 / whole as f64) * 100.0).round() as u8
}
