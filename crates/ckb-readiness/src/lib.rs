//! Flow readiness engine
//!
//! Answers "may this flow run against this graph, and if not, what is
//! missing and who can fix it". A stateless re-derivation on every call:
//! no persisted state, no transition model beyond recompute.
//!
//! - [`evaluate`] — graph snapshot × flow → [`FlowReadiness`]
//! - [`empty_readiness`] — the degenerate verdict when no graph exists
//! - [`LabCta`] — remediation pointers, deduplicated by responsible lab

pub mod evaluate;
pub mod status;

pub use evaluate::{empty_readiness, evaluate};
pub use status::{CtaPriority, DomainStatus, FlowReadiness, LabCta};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
