//! Domain types: the label set and the prediction handed back to callers.

pub mod labels;
pub mod prediction;

pub use labels::{LabelSet, parse_label_line};
pub use prediction::Prediction;
