//! Snapshot fingerprinting and drift detection
//!
//! Derives a short, order-independent [`SnapshotFingerprint`] from the
//! sub-entities a generated artifact was built from (ids and last-modified
//! timestamps only). Callers stamp artifacts with the fingerprint and
//! later ask [`check_drift`] whether the source data has changed enough to
//! make the artifact stale.
//!
//! Nothing here errors: missing collections canonicalize to a known empty
//! marker, and a missing saved fingerprint answers
//! [`DriftStatus::Unknown`].

pub mod fingerprint;
pub mod snapshot;

pub use fingerprint::{
    build_fingerprint, canonical_string, check_drift, DriftStatus, SnapshotFingerprint,
};
pub use snapshot::{AssetSnapshot, SnapshotEntry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
