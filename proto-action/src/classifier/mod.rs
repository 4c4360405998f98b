//! Nearest-Prototype Classification
//!
//! Scores a query clip against every label of a prototype bank and picks
//! the best label.

pub mod nearest;

pub use nearest::{ActionClassifier, Classification, ScoreMap};
