//! Context graph store and mutation engine
//!
//! Per-company field store with provenance, the write-conflict policy, and
//! read accessors:
//! - [`FieldValue`] — tagged value union matching the registry's kinds
//! - [`Source`], [`Confidence`], [`Contribution`] — provenance entries
//! - [`FieldSlot`] — value + history + confirmation lock
//! - [`decide`] / [`WriteDecision`] — the pure conflict comparator
//! - [`ContextGraph`] — the immutable-value store itself
//!
//! # Example
//!
//! ```rust
//! use ckb_graph::{ContextGraph, Contribution, FieldValue, WriteOptions};
//! use ckb_registry::{FieldPath, FieldRegistry};
//! use uuid::Uuid;
//!
//! # fn main() -> Result<(), ckb_graph::GraphError> {
//! let graph = ContextGraph::new(Uuid::new_v4(), "Acme Corp");
//! let path: FieldPath = "identity.mission".parse().unwrap();
//!
//! let (graph, decision) = graph.set_field(
//!     FieldRegistry::shared(),
//!     &path,
//!     FieldValue::text("Ship great software"),
//!     Contribution::from_user(),
//!     WriteOptions::default(),
//! )?;
//! assert!(decision.is_applied());
//! assert!(graph.field_value(&path).is_some());
//! # Ok(())
//! # }
//! ```

pub mod decision;
pub mod graph;
pub mod provenance;
pub mod slot;
pub mod value;

pub use decision::{decide, WriteDecision, WriteOptions};
pub use graph::{ContextGraph, GraphError};
pub use provenance::{Confidence, Contribution, Source};
pub use slot::FieldSlot;
pub use value::FieldValue;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
