//! ONNX Runtime inference engine wrapping a single session.

use crate::core::{
    batch::{Tensor2D, Tensor4D},
    errors::ClassifierError,
    traits::ScoringModel,
};
use ort::{session::Session, value::ValueType};
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// Owns a loaded model. `Session::run` needs `&mut`, so the session lives behind a mutex.
pub struct OrtInfer {
    pub(super) session: Mutex<Session>,
    pub(super) input_name: String,
    pub(super) output_name: Option<String>,
    pub(super) model_path: std::path::PathBuf,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Attempts to retrieve the primary input tensor shape.
    ///
    /// Dynamic dimensions (e.g., -1) are returned as-is.
    pub fn primary_input_shape(&self) -> Option<Vec<i64>> {
        let session_guard = self.session.lock().ok()?;
        let input = session_guard.inputs.first()?;
        match &input.input_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }

    /// Attempts to retrieve the primary output tensor shape.
    pub fn primary_output_shape(&self) -> Option<Vec<i64>> {
        let session_guard = self.session.lock().ok()?;
        let output = session_guard.outputs.first()?;
        match &output.output_type {
            ValueType::Tensor { shape, .. } => Some(shape.iter().copied().collect()),
            _ => None,
        }
    }
}

impl ScoringModel for OrtInfer {
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, ClassifierError> {
        self.infer_2d(input)
    }

    fn declared_num_classes(&self) -> Option<usize> {
        let shape = self.primary_output_shape()?;
        match shape.as_slice() {
            [_, classes] if *classes > 0 => Some(*classes as usize),
            _ => None,
        }
    }

    fn engine_info(&self) -> String {
        format!(
            "ONNX Runtime model '{}' ({})",
            self.model_name,
            self.model_path.display()
        )
    }
}
