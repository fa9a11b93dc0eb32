//! Asset snapshots
//!
//! The curated set of sub-entities a generated artifact depends on. Only
//! ids and last-modified timestamps are captured — enough to detect
//! change, nothing more.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One sub-entity's identity and last-modified time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    /// Stable id of the sub-entity
    pub id: String,
    /// When it last changed
    pub updated_at: DateTime<Utc>,
}

impl SnapshotEntry {
    /// Create an entry
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>, updated_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            updated_at,
        }
    }
}

/// The sub-entity collections a generated artifact was built from
///
/// Missing collections are simply empty — fingerprinting represents them
/// with a known empty marker rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    /// Team member profiles
    pub team_members: Vec<SnapshotEntry>,
    /// Case studies
    pub case_studies: Vec<SnapshotEntry>,
    /// Client references
    pub references: Vec<SnapshotEntry>,
    /// Document templates
    pub templates: Vec<SnapshotEntry>,
}

impl AssetSnapshot {
    /// An empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the team member collection
    #[inline]
    #[must_use]
    pub fn with_team_members(mut self, entries: Vec<SnapshotEntry>) -> Self {
        self.team_members = entries;
        self
    }

    /// Set the case study collection
    #[inline]
    #[must_use]
    pub fn with_case_studies(mut self, entries: Vec<SnapshotEntry>) -> Self {
        self.case_studies = entries;
        self
    }

    /// Set the reference collection
    #[inline]
    #[must_use]
    pub fn with_references(mut self, entries: Vec<SnapshotEntry>) -> Self {
        self.references = entries;
        self
    }

    /// Set the template collection
    #[inline]
    #[must_use]
    pub fn with_templates(mut self, entries: Vec<SnapshotEntry>) -> Self {
        self.templates = entries;
        self
    }

    /// Collections in canonical order, with their type tags
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &[SnapshotEntry]); 4] {
        [
            ("team_members", self.team_members.as_slice()),
            ("case_studies", self.case_studies.as_slice()),
            ("references", self.references.as_slice()),
            ("templates", self.templates.as_slice()),
        ]
    }
}
