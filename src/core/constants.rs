//! Constants shared by the classifier.
//!
//! The input shape and normalization constants are a compatibility contract
//! with the exported model. Scores are meaningless if they drift.

/// Default input shape (height, width) expected by the model.
pub const DEFAULT_INPUT_SHAPE: (u32, u32) = (224, 224);

/// Number of color channels fed to the model.
pub const INPUT_CHANNELS: usize = 3;

/// Divisor mapping `[0, 255]` pixel values onto `[0, 2]`.
pub const NORMALIZE_DIVISOR: f32 = 127.5;

/// Offset subtracted after scaling, moving the range onto `[-1, 1]`.
pub const NORMALIZE_OFFSET: f32 = 1.0;

/// Model artifact loaded when no path is given.
pub const DEFAULT_MODEL_PATH: &str = "keras_model.onnx";

/// Label file loaded when no path is given.
pub const DEFAULT_LABELS_PATH: &str = "labels.txt";

/// Number of predictions reported per image by default.
pub const DEFAULT_TOPK: usize = 1;

/// The maximum allowed tensor size.
///
/// Guards against input shapes that would allocate absurd batches.
pub const MAX_TENSOR_SIZE: usize = 100_000_000;
