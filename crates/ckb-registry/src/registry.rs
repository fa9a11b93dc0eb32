//! Field registry
//!
//! The static catalog of valid `(domain, field)` paths and their semantic
//! kinds. Both the write path and the readiness path validate against it:
//! an unknown path is the one condition this workspace treats as a hard
//! caller error rather than a silent no-op.

use crate::domain::Domain;
use crate::path::FieldPath;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Semantic kind of a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Free text
    Text,
    /// Numeric measure
    Number,
    /// Boolean flag
    Flag,
    /// List of short strings
    List,
    /// Structured JSON object
    Structured,
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Flag => "flag",
            Self::List => "list",
            Self::Structured => "structured",
        };
        f.write_str(name)
    }
}

/// Catalog entry for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name within its domain
    pub name: String,
    /// Semantic kind enforced at the write boundary
    pub kind: ValueKind,
    /// Meta fields are bookkeeping (analysis timestamps, run notes) and
    /// never count toward domain presence
    pub meta: bool,
}

impl FieldSpec {
    fn new(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            meta: false,
        }
    }

    fn meta(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            kind,
            meta: true,
        }
    }

    /// Whether a value of `kind` may be written to this field
    #[inline]
    #[must_use]
    pub fn accepts(&self, kind: ValueKind) -> bool {
        self.kind == kind
    }
}

/// Static catalog of valid field paths
///
/// Iteration order over a domain's fields is the declaration order of the
/// catalog, so rendered field lists are stable.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    tables: IndexMap<Domain, IndexMap<String, FieldSpec>>,
}

impl FieldRegistry {
    /// Build a registry from explicit per-domain tables
    ///
    /// Exposed so tests and forked deployments can carry a reduced catalog;
    /// production callers use [`FieldRegistry::shared`].
    #[must_use]
    pub fn new(tables: IndexMap<Domain, IndexMap<String, FieldSpec>>) -> Self {
        Self { tables }
    }

    /// The process-wide default catalog
    #[inline]
    #[must_use]
    pub fn shared() -> &'static Self {
        &DEFAULT_REGISTRY
    }

    /// Resolve a path against the catalog
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownPath`] if the `(domain, field)` pair
    /// is not in the catalog — an unrecognized path indicates a caller or
    /// configuration bug, never noisy producer data.
    pub fn resolve(&self, path: &FieldPath) -> Result<&FieldSpec, RegistryError> {
        self.tables
            .get(&path.domain())
            .and_then(|fields| fields.get(path.field()))
            .ok_or_else(|| RegistryError::UnknownPath(path.to_string()))
    }

    /// Check that a value kind is legal for a path
    ///
    /// # Errors
    /// Returns [`RegistryError::UnknownPath`] for an uncatalogued path and
    /// [`RegistryError::KindMismatch`] when the kind disagrees with the
    /// catalog
    pub fn validate_kind(&self, path: &FieldPath, kind: ValueKind) -> Result<(), RegistryError> {
        let spec = self.resolve(path)?;
        if spec.accepts(kind) {
            Ok(())
        } else {
            Err(RegistryError::KindMismatch {
                path: path.to_string(),
                expected: spec.kind,
                actual: kind,
            })
        }
    }

    /// Whether the catalog contains a path
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &FieldPath) -> bool {
        self.resolve(path).is_ok()
    }

    /// Field specs for one domain, in catalog order
    #[must_use]
    pub fn fields(&self, domain: Domain) -> Vec<&FieldSpec> {
        self.tables
            .get(&domain)
            .map(|fields| fields.values().collect())
            .unwrap_or_default()
    }

    /// Non-meta field specs for one domain, in catalog order
    #[must_use]
    pub fn content_fields(&self, domain: Domain) -> Vec<&FieldSpec> {
        self.tables
            .get(&domain)
            .map(|fields| fields.values().filter(|spec| !spec.meta).collect())
            .unwrap_or_default()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        DEFAULT_REGISTRY.clone()
    }
}

/// Errors raised when validating against the registry
#[derive(Debug, Clone, thiserror::Error)]
pub enum RegistryError {
    /// Path not in the catalog
    #[error("unknown field path: {0}")]
    UnknownPath(String),

    /// Value kind disagrees with the catalog
    #[error("kind mismatch at {path}: expected {expected}, got {actual}")]
    KindMismatch {
        /// Offending path (string form)
        path: String,
        /// Kind the catalog declares
        expected: ValueKind,
        /// Kind the caller supplied
        actual: ValueKind,
    },
}

static DEFAULT_REGISTRY: Lazy<FieldRegistry> = Lazy::new(|| {
    use ValueKind::{Flag, List, Number, Structured, Text};

    let mut tables: IndexMap<Domain, IndexMap<String, FieldSpec>> = IndexMap::new();

    let mut table = |domain: Domain, specs: Vec<FieldSpec>| {
        let mut fields: IndexMap<String, FieldSpec> = specs
            .into_iter()
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        // Every domain carries the same analyzer-bookkeeping slot.
        let meta = FieldSpec::meta("analysis_meta", Structured);
        fields.insert(meta.name.clone(), meta);
        tables.insert(domain, fields);
    };

    table(
        Domain::Identity,
        vec![
            FieldSpec::new("legal_name", Text),
            FieldSpec::new("tagline", Text),
            FieldSpec::new("mission", Text),
            FieldSpec::new("industry", Text),
            FieldSpec::new("company_size", Text),
            FieldSpec::new("value_proposition", Text),
            FieldSpec::new("differentiators", List),
        ],
    );
    table(
        Domain::Brand,
        vec![
            FieldSpec::new("voice_tone", Text),
            FieldSpec::new("positioning", Text),
            FieldSpec::new("visual_style", Text),
            FieldSpec::new("brand_values", List),
            FieldSpec::new("messaging_pillars", List),
        ],
    );
    table(
        Domain::Audience,
        vec![
            FieldSpec::new("primary_segments", List),
            FieldSpec::new("personas", Structured),
            FieldSpec::new("pain_points", List),
            FieldSpec::new("buying_triggers", List),
        ],
    );
    table(
        Domain::Website,
        vec![
            FieldSpec::new("platform", Text),
            FieldSpec::new("page_count", Number),
            FieldSpec::new("has_blog", Flag),
            FieldSpec::new("conversion_paths", List),
            FieldSpec::new("tech_stack", List),
        ],
    );
    table(
        Domain::Seo,
        vec![
            FieldSpec::new("domain_authority", Number),
            FieldSpec::new("organic_traffic", Number),
            FieldSpec::new("backlink_count", Number),
            FieldSpec::new("top_keywords", List),
            FieldSpec::new("technical_issues", List),
        ],
    );
    table(
        Domain::Content,
        vec![
            FieldSpec::new("publishing_cadence", Text),
            FieldSpec::new("content_types", List),
            FieldSpec::new("top_performing", List),
            FieldSpec::new("content_gaps", List),
        ],
    );
    table(
        Domain::Competitive,
        vec![
            FieldSpec::new("market_position", Text),
            FieldSpec::new("share_of_voice", Number),
            FieldSpec::new("main_competitors", List),
            FieldSpec::new("competitor_strengths", Structured),
        ],
    );
    table(
        Domain::Objectives,
        vec![
            FieldSpec::new("primary_goal", Text),
            FieldSpec::new("time_horizon", Text),
            FieldSpec::new("kpis", List),
            FieldSpec::new("growth_targets", Structured),
        ],
    );

    FieldRegistry::new(tables)
});

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> FieldPath {
        s.parse().unwrap()
    }

    #[test]
    fn registry_resolves_known_path() {
        let spec = FieldRegistry::shared()
            .resolve(&path("identity.mission"))
            .unwrap();
        assert_eq!(spec.kind, ValueKind::Text);
        assert!(!spec.meta);
    }

    #[test]
    fn registry_rejects_unknown_field() {
        let result = FieldRegistry::shared().resolve(&path("identity.revenue"));
        assert!(matches!(result, Err(RegistryError::UnknownPath(_))));
    }

    #[test]
    fn registry_every_domain_has_fields() {
        for domain in Domain::ALL {
            assert!(
                !FieldRegistry::shared().content_fields(domain).is_empty(),
                "domain {domain} has no content fields"
            );
        }
    }

    #[test]
    fn registry_meta_fields_excluded_from_content() {
        let registry = FieldRegistry::shared();
        let all = registry.fields(Domain::Seo).len();
        let content = registry.content_fields(Domain::Seo).len();
        assert_eq!(all, content + 1); // analysis_meta
    }

    #[test]
    fn registry_validate_kind_match() {
        let registry = FieldRegistry::shared();
        assert!(registry
            .validate_kind(&path("website.page_count"), ValueKind::Number)
            .is_ok());
    }

    #[test]
    fn registry_validate_kind_mismatch() {
        let registry = FieldRegistry::shared();
        let result = registry.validate_kind(&path("website.page_count"), ValueKind::Text);
        assert!(matches!(result, Err(RegistryError::KindMismatch { .. })));
    }

    #[test]
    fn field_spec_accepts() {
        let spec = FieldSpec::new("mission", ValueKind::Text);
        assert!(spec.accepts(ValueKind::Text));
        assert!(!spec.accepts(ValueKind::List));
    }
}
