//! Tensor types passed between preprocessing, the model and postprocessing.

/// A 2-dimensional tensor (batch x classes) of f32 scores.
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4-dimensional tensor (batch x height x width x channels) of f32 values.
pub type Tensor4D = ndarray::Array4<f32>;
