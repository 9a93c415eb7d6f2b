//! The seam between the classifier and whatever produces class scores.
//!
//! ```text
//! ┌──────────────┐    ┌─────────────┐    ┌──────────────┐
//! │ FitResize +  │───▶│ScoringModel │───▶│ argmax +     │
//! │ NormalizeImg │    │             │    │ LabelSet     │
//! │              │    │• score      │    │              │
//! │              │    │• engine_info│    │              │
//! └──────────────┘    └─────────────┘    └──────────────┘
//! ```

use crate::core::{ClassifierError, Tensor2D, Tensor4D};
use std::fmt::Debug;

/// A pretrained classifier treated as a black box.
///
/// Takes a preprocessed NHWC batch and returns one row of class scores per
/// batch item. The scores are reported as-is; implementations must not
/// renormalize them.
pub trait ScoringModel: Debug {
    /// Scores a preprocessed batch.
    ///
    /// # Returns
    ///
    /// A `(batch_size, num_classes)` tensor or an error.
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, ClassifierError>;

    /// Number of classes the model declares in its output, when known before running it.
    fn declared_num_classes(&self) -> Option<usize> {
        None
    }

    /// Short description of the engine, used in log output.
    fn engine_info(&self) -> String;
}

impl<M: ScoringModel + ?Sized> ScoringModel for Box<M> {
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, ClassifierError> {
        (**self).score(input)
    }

    fn declared_num_classes(&self) -> Option<usize> {
        (**self).declared_num_classes()
    }

    fn engine_info(&self) -> String {
        (**self).engine_info()
    }
}
