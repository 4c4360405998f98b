//! Max-similarity classifier.
//!
//! Each label is represented by its single closest prototype: the label
//! score is the maximum cosine similarity between the query descriptor and
//! any of the label's prototypes. A label with no prototypes scores 0.0.
//!
//! Labels are visited in sorted order and only a strictly greater score
//! replaces the current best, so ties go to the label that sorts first.

use crate::features::{FeaturePipeline, MotionFeatureVector, SimilarityScorer, Tolerances};
use crate::prototype::PrototypeBank;
use crate::skeleton::SkeletonSequence;
use crate::{Error, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Best similarity per label, iterated in sorted label order
pub type ScoreMap = BTreeMap<String, f64>;

/// Result of classifying one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Winning label
    pub label: String,
    /// Score of every label in the bank
    pub scores: ScoreMap,
}

impl Classification {
    /// Score of a label
    pub fn score(&self, label: &str) -> Option<f64> {
        self.scores.get(label).copied()
    }

    /// Score of the winning label
    pub fn best_score(&self) -> f64 {
        self.scores.get(&self.label).copied().unwrap_or(0.0)
    }

    /// Pretty JSON report: `{ "label": ..., "scores": { ... } }`
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Labels by descending score, ties by label name
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.scores.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(b.0))
        });
        ranked
    }
}

/// Nearest-prototype action classifier
#[derive(Debug, Clone, Default)]
pub struct ActionClassifier {
    pipeline: FeaturePipeline,
    scorer: SimilarityScorer,
    /// Reject banks where no label has a prototype
    require_prototypes: bool,
}

impl ActionClassifier {
    /// Create with default tolerances
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom tolerances
    pub fn with_tolerances(tolerances: Tolerances) -> Self {
        Self {
            pipeline: FeaturePipeline::with_tolerances(tolerances),
            scorer: SimilarityScorer::with_tolerances(tolerances),
            require_prototypes: false,
        }
    }

    /// Fail with `EmptyPrototypeBank` instead of returning an all-zero
    /// score map when no label has a prototype
    pub fn require_prototypes(mut self, require: bool) -> Self {
        self.require_prototypes = require;
        self
    }

    /// Classify a raw query sequence
    pub fn classify(&self, query: &SkeletonSequence, bank: &PrototypeBank) -> Result<Classification> {
        let features = self.pipeline.describe(query);
        self.classify_features(&features, bank)
    }

    /// Classify an already extracted query descriptor
    pub fn classify_features(
        &self,
        query: &MotionFeatureVector,
        bank: &PrototypeBank,
    ) -> Result<Classification> {
        if bank.is_empty() {
            return Err(Error::EmptyPrototypeBank);
        }
        if !bank.has_prototypes() {
            if self.require_prototypes {
                return Err(Error::EmptyPrototypeBank);
            }
            warn!(labels = bank.len(), "No label has prototypes, every score will be 0.0");
        }

        let mut scores = ScoreMap::new();
        let mut best: Option<(&str, f64)> = None;

        for (label, prototypes) in bank.iter() {
            let score = self.label_score(query, prototypes)?;
            debug!(label = %label, score, prototypes = prototypes.len(), "Scored label");

            let is_better = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if is_better {
                best = Some((label, score));
            }
            scores.insert(label.to_string(), score);
        }

        // The bank is non-empty, so at least one label was scored
        let label = best.map(|(l, _)| l.to_string()).ok_or(Error::EmptyPrototypeBank)?;

        Ok(Classification { label, scores })
    }

    /// Maximum similarity over a label's prototypes, 0.0 when there are none
    fn label_score(&self, query: &MotionFeatureVector, prototypes: &[MotionFeatureVector]) -> Result<f64> {
        if prototypes.is_empty() {
            return Ok(0.0);
        }

        let mut best = f64::NEG_INFINITY;
        for prototype in prototypes {
            best = best.max(self.scorer.score(query, prototype)?);
        }
        Ok(best)
    }
}
