//! Model wrappers built on top of the core inference engine.

pub mod classification;

pub use classification::{ImageClassifier, ImageClassifierBuilder, classify};
