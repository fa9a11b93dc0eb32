//! Field values
//!
//! Provides [`FieldValue`], the tagged union of value shapes a field slot
//! can hold. Each variant maps 1:1 onto a [`ValueKind`] in the registry,
//! and the write boundary enforces that mapping.

use ckb_registry::ValueKind;
use serde::{Deserialize, Serialize};

/// A field's value, tagged by shape
///
/// Emptiness matters: producers routinely emit blank output, and the
/// mutation engine treats an empty incoming value as a silent no-op so a
/// noisy analyzer can never blank out good data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text
    Text(String),
    /// Numeric measure
    Number(f64),
    /// Boolean flag
    Flag(bool),
    /// List of short strings
    List(Vec<String>),
    /// Structured JSON payload
    Structured(serde_json::Value),
}

impl FieldValue {
    /// The registry kind this value satisfies
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Number(_) => ValueKind::Number,
            Self::Flag(_) => ValueKind::Flag,
            Self::List(_) => ValueKind::List,
            Self::Structured(_) => ValueKind::Structured,
        }
    }

    /// Whether this value counts as "nothing to say"
    ///
    /// Empty text (after trimming), an empty list, and a null or empty
    /// structured payload are all empty. Numbers and flags are never
    /// empty: `0` and `false` are real answers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) | Self::Flag(_) => false,
            Self::List(items) => items.is_empty(),
            Self::Structured(value) => match value {
                serde_json::Value::Null => true,
                serde_json::Value::String(s) => s.trim().is_empty(),
                serde_json::Value::Array(items) => items.is_empty(),
                serde_json::Value::Object(map) => map.is_empty(),
                serde_json::Value::Bool(_) | serde_json::Value::Number(_) => false,
            },
        }
    }

    /// Convenience constructor for text values
    #[inline]
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Convenience constructor for list values
    #[inline]
    #[must_use]
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_kind_mapping() {
        assert_eq!(FieldValue::text("x").kind(), ValueKind::Text);
        assert_eq!(FieldValue::Number(3.0).kind(), ValueKind::Number);
        assert_eq!(FieldValue::Flag(true).kind(), ValueKind::Flag);
        assert_eq!(FieldValue::list(["a"]).kind(), ValueKind::List);
        assert_eq!(
            FieldValue::Structured(json!({"a": 1})).kind(),
            ValueKind::Structured
        );
    }

    #[test]
    fn empty_text_variants() {
        assert!(FieldValue::text("").is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text("hello").is_empty());
    }

    #[test]
    fn numbers_and_flags_are_never_empty() {
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(!FieldValue::Flag(false).is_empty());
    }

    #[test]
    fn empty_list_and_structured() {
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::list(["a"]).is_empty());
        assert!(FieldValue::Structured(json!(null)).is_empty());
        assert!(FieldValue::Structured(json!({})).is_empty());
        assert!(FieldValue::Structured(json!([])).is_empty());
        assert!(!FieldValue::Structured(json!({"k": "v"})).is_empty());
    }

    #[test]
    fn value_serde_is_tagged() {
        let json = serde_json::to_value(FieldValue::text("hi")).unwrap();
        assert_eq!(json, json!({"kind": "text", "value": "hi"}));
    }
}
