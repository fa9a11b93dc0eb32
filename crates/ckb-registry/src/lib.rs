//! Static configuration for the context knowledge base
//!
//! This crate owns the fixed vocabulary the rest of the workspace is typed
//! against:
//! - [`Domain`], [`Flow`], [`LabId`], [`Importance`] — the enums
//! - [`FieldPath`] — typed `(domain, field)` addresses
//! - [`FieldRegistry`] — the catalog of valid paths and value kinds
//! - [`RequirementMatrix`] — per-flow domain requirements
//! - [`LabRoster`] — which producer is responsible for which domain
//!
//! Everything here is configuration, not derived state: the tables are
//! static, and the shared instances are plain `Lazy` values with no
//! mutability.

pub mod domain;
pub mod matrix;
pub mod path;
pub mod registry;
pub mod roster;

pub use domain::{Domain, Flow, Importance, LabId, UnknownDomain};
pub use matrix::RequirementMatrix;
pub use path::{FieldPath, PathError};
pub use registry::{FieldRegistry, FieldSpec, RegistryError, ValueKind};
pub use roster::LabRoster;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
