//! Configuration for the classifier and its ONNX Runtime session.

pub mod classifier;
pub mod onnx;

pub use classifier::ClassifierConfig;
pub use onnx::{OrtExecutionProvider, OrtGraphOptimizationLevel, OrtSessionConfig};
