//! Classification models.

pub mod image_classifier;

pub use image_classifier::{ImageClassifier, ImageClassifierBuilder, classify};
