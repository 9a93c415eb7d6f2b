//! The core module of the classifier.
//!
//! This module contains the fundamental components:
//! - Tensor types
//! - Configuration management
//! - Constants shared with the exported model
//! - Error handling
//! - ONNX Runtime inference
//! - The `ScoringModel` trait
//!
//! It also re-exports commonly used types for convenience.

pub mod batch;
pub mod config;
pub mod constants;
pub mod errors;
pub mod inference;
pub mod traits;

pub use crate::utils::init_tracing;
pub use batch::{Tensor2D, Tensor4D};
pub use config::{ClassifierConfig, OrtSessionConfig};
pub use constants::*;
pub use errors::{ClassifierError, ClassifierResult};
pub use inference::OrtInfer;
pub use traits::ScoringModel;
