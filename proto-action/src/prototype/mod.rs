//! Prototype Bank
//!
//! Labeled reference descriptors built from example clips.

pub mod bank;
pub mod builder;

pub use bank::PrototypeBank;
pub use builder::{LabeledExamples, PrototypeBuilder};
