//! Fingerprint derivation and drift checking
//!
//! An 8-hex-character change detector over a snapshot's ids and
//! timestamps. Explicitly non-cryptographic: collisions are acceptable at
//! negligible rates for staleness detection, and the hash function could
//! be swapped without changing this interface.

use crate::snapshot::AssetSnapshot;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A short, order-independent fingerprint of a snapshot
///
/// Attached by callers to generated artifacts and later compared against
/// the live data. Never mutated — a new fingerprint is derived instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFingerprint {
    /// 8 lowercase hex characters
    pub hash: String,
    /// When the fingerprint was derived
    pub created_at: DateTime<Utc>,
}

/// Verdict of comparing live data against a saved fingerprint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftStatus {
    /// Live data still matches the saved fingerprint
    Unchanged,
    /// Source data changed since the artifact was generated
    Drifted,
    /// No saved fingerprint to compare against
    Unknown,
}

/// Derive the fingerprint of a snapshot
#[must_use]
pub fn build_fingerprint(snapshot: &AssetSnapshot) -> SnapshotFingerprint {
    SnapshotFingerprint {
        hash: format!("{:08x}", rolling_hash(&canonical_string(snapshot))),
        created_at: Utc::now(),
    }
}

/// Compare live data against the fingerprint saved with an artifact
///
/// Absent a saved fingerprint the answer is [`DriftStatus::Unknown`] —
/// "cannot determine drift", not "drifted".
#[must_use]
pub fn check_drift(
    current: &AssetSnapshot,
    saved: Option<&SnapshotFingerprint>,
) -> DriftStatus {
    let Some(saved) = saved else {
        return DriftStatus::Unknown;
    };
    if build_fingerprint(current).hash == saved.hash {
        DriftStatus::Unchanged
    } else {
        DriftStatus::Drifted
    }
}

/// Canonical string form of a snapshot
///
/// Per collection: `{tag}:{count}:{sorted 'id:updated_at' pairs joined by
/// ','}`, all collections joined by `|`. Sorting the pairs makes the
/// result independent of iteration order; an empty collection contributes
/// its tag and a zero count.
#[must_use]
pub fn canonical_string(snapshot: &AssetSnapshot) -> String {
    snapshot
        .sections()
        .iter()
        .map(|(tag, entries)| {
            let mut pairs: Vec<String> = entries
                .iter()
                .map(|entry| {
                    format!(
                        "{}:{}",
                        entry.id,
                        entry.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
                    )
                })
                .collect();
            pairs.sort_unstable();
            format!("{tag}:{}:{}", entries.len(), pairs.join(","))
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// 32-bit multiplicative rolling hash (`h = h * 31 + byte`, wrapping)
fn rolling_hash(input: &str) -> u32 {
    input
        .bytes()
        .fold(0u32, |hash, byte| hash.wrapping_mul(31).wrapping_add(u32::from(byte)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::SnapshotEntry;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn snapshot() -> AssetSnapshot {
        AssetSnapshot::new()
            .with_team_members(vec![
                SnapshotEntry::new("tm-1", at(0)),
                SnapshotEntry::new("tm-2", at(60)),
            ])
            .with_case_studies(vec![SnapshotEntry::new("cs-1", at(120))])
    }

    #[test]
    fn fingerprint_is_deterministic() {
        let snap = snapshot();
        assert_eq!(build_fingerprint(&snap).hash, build_fingerprint(&snap).hash);
    }

    #[test]
    fn fingerprint_is_eight_hex_chars() {
        let hash = build_fingerprint(&snapshot()).hash;
        assert_eq!(hash.len(), 8);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn fingerprint_is_order_independent() {
        let forward = snapshot();
        let reversed = AssetSnapshot::new()
            .with_team_members(vec![
                SnapshotEntry::new("tm-2", at(60)),
                SnapshotEntry::new("tm-1", at(0)),
            ])
            .with_case_studies(vec![SnapshotEntry::new("cs-1", at(120))]);
        assert_eq!(
            build_fingerprint(&forward).hash,
            build_fingerprint(&reversed).hash
        );
    }

    #[test]
    fn touching_one_timestamp_changes_the_hash() {
        let base = snapshot();
        let touched = AssetSnapshot::new()
            .with_team_members(vec![
                SnapshotEntry::new("tm-1", at(0)),
                SnapshotEntry::new("tm-2", at(61)),
            ])
            .with_case_studies(vec![SnapshotEntry::new("cs-1", at(120))]);
        assert_ne!(build_fingerprint(&base).hash, build_fingerprint(&touched).hash);
    }

    #[test]
    fn empty_collections_use_empty_marker() {
        let canonical = canonical_string(&AssetSnapshot::new());
        assert_eq!(
            canonical,
            "team_members:0:|case_studies:0:|references:0:|templates:0:"
        );
    }

    #[test]
    fn collections_are_tag_separated() {
        // Moving an entry between collections must change the canonical
        // string even though the id/timestamp set is identical.
        let in_refs = AssetSnapshot::new().with_references(vec![SnapshotEntry::new("x", at(0))]);
        let in_templates =
            AssetSnapshot::new().with_templates(vec![SnapshotEntry::new("x", at(0))]);
        assert_ne!(canonical_string(&in_refs), canonical_string(&in_templates));
    }

    #[test]
    fn drift_unchanged_then_drifted() {
        let snap = snapshot();
        let saved = build_fingerprint(&snap);
        assert_eq!(check_drift(&snap, Some(&saved)), DriftStatus::Unchanged);

        let changed = snap
            .clone()
            .with_references(vec![SnapshotEntry::new("ref-1", at(300))]);
        assert_eq!(check_drift(&changed, Some(&saved)), DriftStatus::Drifted);
    }

    #[test]
    fn missing_saved_fingerprint_is_unknown() {
        assert_eq!(check_drift(&snapshot(), None), DriftStatus::Unknown);
    }

    proptest::proptest! {
        #[test]
        fn hash_is_stable_across_calls(ids in proptest::collection::vec("[a-z0-9-]{1,12}", 0..8)) {
            let entries: Vec<SnapshotEntry> = ids
                .iter()
                .enumerate()
                .map(|(i, id)| SnapshotEntry::new(id.clone(), at(i as i64)))
                .collect();
            let snap = AssetSnapshot::new().with_case_studies(entries);
            proptest::prop_assert_eq!(
                build_fingerprint(&snap).hash,
                build_fingerprint(&snap).hash
            );
        }

        #[test]
        fn shuffled_entries_hash_identically(count in 1usize..6) {
            let entries: Vec<SnapshotEntry> = (0..count)
                .map(|i| SnapshotEntry::new(format!("id-{i}"), at(i as i64)))
                .collect();
            let mut reversed = entries.clone();
            reversed.reverse();
            let a = AssetSnapshot::new().with_templates(entries);
            let b = AssetSnapshot::new().with_templates(reversed);
            proptest::prop_assert_eq!(build_fingerprint(&a).hash, build_fingerprint(&b).hash);
        }
    }
}
