//! Image preprocessing and score postprocessing.
//!
//! * [`resize`] - crop-to-fill resizing to the model input size
//! * [`normalization`] - pixel value normalization into tensors
//! * [`topk`] - argmax and top-k selection over scores
//! * [`types`] - shared enums

pub mod normalization;
pub mod resize;
pub mod topk;
pub mod types;

pub use normalization::NormalizeImage;
pub use resize::{FitResize, fit_crop_box};
pub use topk::{TopkResult, argmax, topk};
pub use types::ChannelOrder;
