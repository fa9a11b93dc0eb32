//! Sources, confidence, and contributions
//!
//! Every applied write carries a [`Contribution`]: who produced the value,
//! at what declared confidence, and when. Sources are totally ordered by
//! priority for conflict resolution — `User` is maximal, labs outrank
//! anonymous AI pipelines, and ties go to the newer write.

use chrono::{DateTime, Utc};
use ckb_registry::LabId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Identity of a producer contributing field values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Source {
    /// A human operator; maximal priority
    User,
    /// One of the fixed diagnostic analyzers
    Lab(LabId),
    /// An AI proposal pipeline, identified by name
    Pipeline(String),
}

impl Source {
    /// Conflict-resolution priority
    ///
    /// A write is applied when the incoming priority is greater than or
    /// *equal to* the slot's current priority, so among same-priority
    /// machine sources recency wins.
    #[inline]
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            Self::User => 100,
            Self::Lab(_) => 60,
            Self::Pipeline(_) => 40,
        }
    }

    /// Whether this source is a human operator
    #[inline]
    #[must_use]
    pub const fn is_user(&self) -> bool {
        matches!(self, Self::User)
    }

    /// The lab identity, if this source is a lab
    #[inline]
    #[must_use]
    pub const fn lab(&self) -> Option<LabId> {
        match self {
            Self::Lab(lab) => Some(*lab),
            _ => None,
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Lab(lab) => write!(f, "lab:{}", lab.title()),
            Self::Pipeline(name) => write!(f, "pipeline:{name}"),
        }
    }
}

/// Declared confidence of a contribution, clamped to `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Full certainty — used for direct human entry
    pub const CERTAIN: Self = Self(1.0);

    /// Create a confidence, clamping out-of-range input
    #[inline]
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Raw value in `[0, 1]`
    #[inline]
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.5)
    }
}

/// One provenance entry: who set a value, how sure, and when
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    /// Producer of the value
    pub source: Source,
    /// Declared confidence
    pub confidence: Confidence,
    /// When the contribution was made
    pub updated_at: DateTime<Utc>,
}

impl Contribution {
    /// Create a contribution stamped with the current time
    #[inline]
    #[must_use]
    pub fn new(source: Source, confidence: Confidence) -> Self {
        Self {
            source,
            confidence,
            updated_at: Utc::now(),
        }
    }

    /// Create a contribution with an explicit timestamp
    #[inline]
    #[must_use]
    pub fn at(source: Source, confidence: Confidence, updated_at: DateTime<Utc>) -> Self {
        Self {
            source,
            confidence,
            updated_at,
        }
    }

    /// A human contribution at full certainty
    #[inline]
    #[must_use]
    pub fn from_user() -> Self {
        Self::new(Source::User, Confidence::CERTAIN)
    }
}
