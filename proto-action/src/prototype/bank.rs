//! Labeled descriptor storage.
//!
//! Labels are kept in a `BTreeMap`, so every walk over the bank visits
//! labels in sorted order. Classification relies on this for its
//! tie-break.

use crate::features::MotionFeatureVector;
use std::collections::BTreeMap;

/// Mapping from action label to its prototype descriptors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrototypeBank {
    entries: BTreeMap<String, Vec<MotionFeatureVector>>,
}

impl PrototypeBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the prototypes of a label, replacing any previous list
    pub fn insert(&mut self, label: impl Into<String>, prototypes: Vec<MotionFeatureVector>) {
        self.entries.insert(label.into(), prototypes);
    }

    /// Append one prototype to a label, creating the label if needed
    pub fn push(&mut self, label: impl Into<String>, prototype: MotionFeatureVector) {
        self.entries.entry(label.into()).or_default().push(prototype);
    }

    /// Prototypes of a label
    pub fn get(&self, label: &str) -> Option<&[MotionFeatureVector]> {
        self.entries.get(label).map(|v| v.as_slice())
    }

    /// Labels in sorted order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// (label, prototypes) pairs in sorted label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MotionFeatureVector])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of prototypes across all labels
    pub fn prototype_count(&self) -> usize {
        self.entries.values().map(|v| v.len()).sum()
    }

    /// Whether at least one label has at least one prototype
    pub fn has_prototypes(&self) -> bool {
        self.entries.values().any(|v| !v.is_empty())
    }
}
