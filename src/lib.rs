//! # pet-classifier
//!
//! Classifies images with a pretrained ONNX model and an ordered label file,
//! reporting the predicted class and the model's confidence.
//!
//! ## Pipeline
//!
//! 1. Decode the image and convert it to RGB
//! 2. Crop to fill a 224x224 square, Lanczos3 resampling
//! 3. Normalize each channel with `(v / 127.5) - 1`
//! 4. Score a `(1, 224, 224, 3)` batch with the model
//! 5. Pick the highest score (first on ties) and look up its label
//!
//! ## Modules
//!
//! * [`core`] - Errors, configuration, constants and the ONNX Runtime engine
//! * [`domain`] - Label set and prediction types
//! * [`models`] - The image classifier and its builder
//! * [`processors`] - Resizing, normalization and argmax
//! * [`utils`] - Image decoding and logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pet_classifier::prelude::*;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = ImageClassifierBuilder::new()
//!     .model_path("keras_model.onnx")
//!     .labels_path("labels.txt")
//!     .build()?;
//!
//! let prediction = classifier.classify_path(Path::new("cat.jpg"))?;
//! println!("{prediction}");
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod models;
pub mod processors;
pub mod utils;

/// Prelude module for convenient imports.
///
/// ```rust
/// use pet_classifier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::config::{ClassifierConfig, OrtSessionConfig};
    pub use crate::core::{ClassifierError, ClassifierResult, ScoringModel};
    pub use crate::domain::{LabelSet, Prediction};
    pub use crate::models::{ImageClassifier, ImageClassifierBuilder, classify};
    pub use crate::utils::{decode_image, load_image};
}
