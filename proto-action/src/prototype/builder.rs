//! Prototype construction from labeled example clips.

use super::bank::PrototypeBank;
use crate::features::{FeaturePipeline, Tolerances};
use crate::skeleton::SkeletonSequence;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Example clips grouped by action label
pub type LabeledExamples = BTreeMap<String, Vec<SkeletonSequence>>;

/// Builds a `PrototypeBank` by describing every example independently
#[derive(Debug, Clone, Default)]
pub struct PrototypeBuilder {
    pipeline: FeaturePipeline,
}

impl PrototypeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            pipeline: FeaturePipeline::with_tolerances(tolerances),
        }
    }

    /// Build a bank, preserving label grouping and per-label order.
    ///
    /// A label with no examples is kept with an empty prototype list.
    pub fn build(&self, examples: &LabeledExamples) -> PrototypeBank {
        let mut bank = PrototypeBank::new();

        for (label, sequences) in examples {
            let prototypes = sequences.iter().map(|seq| self.pipeline.describe(seq)).collect::<Vec<_>>();
            debug!(label = %label, count = prototypes.len(), "Built prototypes");
            bank.insert(label.clone(), prototypes);
        }

        info!(
            labels = bank.len(),
            prototypes = bank.prototype_count(),
            "Prototype bank ready"
        );
        bank
    }

    /// Describe and append examples for one label
    pub fn extend(&self, bank: &mut PrototypeBank, label: &str, sequences: &[SkeletonSequence]) {
        for seq in sequences {
            bank.push(label, self.pipeline.describe(seq));
        }
    }
}
