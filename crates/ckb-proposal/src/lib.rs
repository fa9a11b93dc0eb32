//! Proposal workflow for the context knowledge base
//!
//! AI generation runs stage candidate field writes as [`Proposal`]s grouped
//! into a [`ProposalBatch`]. Reviewers (or automated bulk actions) resolve
//! members into mutation-engine writes or discard them; every apply comes
//! back with an [`ApplyReport`] explaining, field by field, what changed
//! and why the rest did not.
//!
//! Persistence of batches is the caller's concern — this crate only
//! computes next values.

pub mod batch;
pub mod proposal;
pub mod report;

pub use batch::{BulkResolution, ProposalBatch, ProposalError, Resolution};
pub use proposal::{Decider, Proposal, ProposalStatus};
pub use report::{ApplyReport, FieldApplyStatus, FieldOutcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
