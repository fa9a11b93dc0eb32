//! Domains, flows, labs, and importance levels
//!
//! The fixed vocabulary the rest of the workspace is typed against.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// A named grouping of related fields in the context graph
///
/// The set is fixed: producers and flows are typed against it, and the
/// [`crate::FieldRegistry`] carries exactly one field table per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Who the company is: name, mission, positioning basics
    Identity,
    /// Brand voice, values, and messaging
    Brand,
    /// Target segments and personas
    Audience,
    /// Website structure and technology
    Website,
    /// Search visibility and technical SEO
    Seo,
    /// Content production and performance
    Content,
    /// Competitive landscape
    Competitive,
    /// Business goals and KPIs
    Objectives,
}

impl Domain {
    /// All domains, in canonical order
    pub const ALL: [Self; 8] = [
        Self::Identity,
        Self::Brand,
        Self::Audience,
        Self::Website,
        Self::Seo,
        Self::Content,
        Self::Competitive,
        Self::Objectives,
    ];

    /// Canonical lowercase name (matches the serde representation)
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Brand => "brand",
            Self::Audience => "audience",
            Self::Website => "website",
            Self::Seo => "seo",
            Self::Content => "content",
            Self::Competitive => "competitive",
            Self::Objectives => "objectives",
        }
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

/// Error for a domain name outside the fixed set
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown domain: {0}")]
pub struct UnknownDomain(pub String);

/// A downstream generation flow gated on graph readiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Full strategy synthesis
    Strategy,
    /// Information-architecture gap analysis
    GapIa,
    /// Full-funnel gap analysis
    GapFull,
    /// Standalone assessment report
    Assessment,
    /// Program instantiation from a strategy
    Program,
}

impl Flow {
    /// All flows, in canonical order
    pub const ALL: [Self; 5] = [
        Self::Strategy,
        Self::GapIa,
        Self::GapFull,
        Self::Assessment,
        Self::Program,
    ];

    /// Canonical lowercase name (matches the serde representation)
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strategy => "strategy",
            Self::GapIa => "gap_ia",
            Self::GapFull => "gap_full",
            Self::Assessment => "assessment",
            Self::Program => "program",
        }
    }
}

impl Display for Flow {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic analyzer responsible for producing one or more domains
///
/// Labs are black boxes to this workspace: they emit field values with a
/// confidence, and readiness remediation points back at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabId {
    /// Onboarding discovery interview (identity, objectives)
    Discovery,
    /// Brand voice and messaging analyzer
    BrandLab,
    /// Audience and persona analyzer
    AudienceLab,
    /// Website crawler and IA analyzer
    WebsiteLab,
    /// Search visibility analyzer
    SeoLab,
    /// Content inventory analyzer
    ContentLab,
    /// Competitive landscape analyzer
    MarketLab,
}

impl LabId {
    /// Human-readable title for remediation messaging
    #[inline]
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Discovery => "Discovery interview",
            Self::BrandLab => "Brand Lab",
            Self::AudienceLab => "Audience Lab",
            Self::WebsiteLab => "Website Lab",
            Self::SeoLab => "SEO Lab",
            Self::ContentLab => "Content Lab",
            Self::MarketLab => "Market Lab",
        }
    }
}

impl Display for LabId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// How much a flow cares about a domain
///
/// Ordered: `Critical > Recommended > Optional` (declaration order carries
/// the derived `Ord`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Importance {
    /// Nice to have; never affects readiness or completeness
    Optional,
    /// Improves output quality; missing ones are surfaced but do not block
    Recommended,
    /// The flow must not run without it
    Critical,
}
