//! ONNX Runtime inference.
//!
//! This module holds the engine that owns the ONNX Runtime session and
//! implements [`ScoringModel`](crate::core::traits::ScoringModel) for it.

pub mod ort_infer;

pub use ort_infer::OrtInfer;
