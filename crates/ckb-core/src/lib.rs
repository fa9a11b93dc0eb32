//! Context knowledge base core
//!
//! Facade over the CKB workspace: one [`ContextService`] wiring the field
//! registry, requirement matrix, lab roster, and an injected
//! [`ReadinessCache`] behind the surface request handlers call.
//!
//! Multiple independent producers — manual entry, a fixed set of
//! diagnostic labs, and AI proposal generators — contribute facts about a
//! company into one shared graph. This crate governs how those
//! contributions merge, how flows are gated on graph readiness, and how
//! generated artifacts detect that their source data drifted.
//!
//! # Example
//!
//! ```rust
//! use ckb_core::{ContextService, FlowGate, ReadinessCache};
//! use ckb_graph::{ContextGraph, Contribution, FieldValue, WriteOptions};
//! use ckb_registry::Flow;
//! use uuid::Uuid;
//!
//! let service = ContextService::new(ReadinessCache::new(1_000));
//! let graph = ContextGraph::new(Uuid::new_v4(), "Acme Corp");
//!
//! let gate = service.gate(Some(&graph), Flow::Strategy);
//! assert!(!gate.may_proceed());
//! ```

pub mod cache;
pub mod service;

pub use cache::ReadinessCache;
pub use service::{ContextService, FlowGate};

// The full surface, re-exported for callers that hold one dependency.
pub use ckb_fingerprint::{
    build_fingerprint, check_drift, AssetSnapshot, DriftStatus, SnapshotEntry,
    SnapshotFingerprint,
};
pub use ckb_graph::{
    decide, Confidence, ContextGraph, Contribution, FieldSlot, FieldValue, GraphError, Source,
    WriteDecision, WriteOptions,
};
pub use ckb_proposal::{
    ApplyReport, BulkResolution, Decider, FieldApplyStatus, FieldOutcome, Proposal,
    ProposalBatch, ProposalError, ProposalStatus, Resolution,
};
pub use ckb_readiness::{evaluate, CtaPriority, DomainStatus, FlowReadiness, LabCta};
pub use ckb_registry::{
    Domain, FieldPath, FieldRegistry, Flow, Importance, LabId, LabRoster, PathError,
    RegistryError, RequirementMatrix, ValueKind,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the CKB core
    pub use crate::{
        ContextGraph, ContextService, Contribution, Decider, FieldPath, FieldValue, Flow,
        FlowGate, ProposalBatch, ReadinessCache, WriteDecision, WriteOptions,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
