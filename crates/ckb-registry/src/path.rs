//! Typed field paths
//!
//! Provides [`FieldPath`], the typed `(domain, field)` address used by the
//! write path and the proposal workflow. Replaces stringly `"domain.field"`
//! concatenation so an unknown path is a typed error rather than a string
//! that silently fails to match anything.

use crate::domain::Domain;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Address of one field slot in a context graph
///
/// # Examples
/// - `identity.mission`
/// - `seo.top_keywords`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldPath {
    domain: Domain,
    field: String,
}

impl FieldPath {
    /// Create a path, validating the field segment
    ///
    /// The segment must be non-empty lowercase alphanumeric with
    /// underscores. Registry membership is checked separately, at the
    /// write boundary.
    ///
    /// # Errors
    /// Returns [`PathError`] if the field segment is malformed
    pub fn new(domain: Domain, field: impl Into<String>) -> Result<Self, PathError> {
        let field = field.into();
        validate_segment(&field)?;
        Ok(Self { domain, field })
    }

    /// Domain component
    #[inline]
    #[must_use]
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// Field name component
    #[inline]
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }
}

fn validate_segment(segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment);
    }
    if segment
        .chars()
        .any(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'))
    {
        return Err(PathError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain, self.field)
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (domain, field) = s
            .split_once('.')
            .ok_or_else(|| PathError::MissingSeparator(s.to_string()))?;
        let domain: Domain = domain
            .parse()
            .map_err(|_| PathError::UnknownDomain(domain.to_string()))?;
        Self::new(domain, field)
    }
}

/// Errors related to field paths
#[derive(Debug, Clone, thiserror::Error)]
pub enum PathError {
    /// Path has no `.` separator
    #[error("path '{0}' is not of the form 'domain.field'")]
    MissingSeparator(String),

    /// Domain segment is outside the fixed domain set
    #[error("unknown domain in path: {0}")]
    UnknownDomain(String),

    /// Empty field segment
    #[error("path contains empty field segment")]
    EmptySegment,

    /// Invalid field segment characters
    #[error("invalid field segment: {0} (must be lowercase alphanumeric or underscore)")]
    InvalidSegment(String),
}
