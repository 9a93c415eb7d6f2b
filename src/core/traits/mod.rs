//! Trait definitions shared across the classifier.

pub mod scoring;

pub use scoring::ScoringModel;
