//! Error types for the classifier.
//!
//! Every failure a classification can hit surfaces as a [`ClassifierError`]
//! to the immediate caller. Nothing here retries or falls back to a partial
//! result; the caller decides how to report the failure.
//!
//! # Usage
//!
//! ```rust
//! use pet_classifier::core::errors::ClassifierError;
//!
//! let error = ClassifierError::shape_mismatch("label count vs model output", 2, 3);
//! assert!(error.to_string().contains("expected 2"));
//!
//! let config_error = ClassifierError::config_error("Missing required model path");
//! assert!(config_error.to_string().starts_with("configuration"));
//! ```

use std::path::Path;
use thiserror::Error;

/// Enum representing the errors that can occur while loading or running the classifier.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The input bytes or file could not be decoded as an image.
    #[error("image decode")]
    Decode(#[source] image::ImageError),

    /// The model artifact is missing, failed to load, or its session is unusable.
    #[error("model '{model_path}' unavailable: {reason}{suggestion}")]
    ModelUnavailable {
        /// Path of the model artifact.
        model_path: String,
        /// Short description of what went wrong.
        reason: String,
        /// Formatted suggestion suffix, empty when there is none.
        suggestion: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The label file could not be read.
    #[error("labels '{path}' unavailable")]
    LabelsUnavailable {
        /// Path of the label file.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The model output does not line up with the label set or the input batch.
    #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Where the mismatch was detected.
        context: String,
        /// The expected length.
        expected: usize,
        /// The length actually observed.
        actual: usize,
    },

    /// Error occurred while the model was running.
    #[error("inference in model '{model_name}' failed: {context}")]
    Inference {
        /// Name of the model that failed.
        model_name: String,
        /// Additional context about the error.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration.
    #[error("json configuration")]
    Json(#[from] serde_json::Error),
}

/// Convenient result alias for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// A plain message usable as an error source.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new simple error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}

impl ClassifierError {
    /// Creates a `ModelUnavailable` error.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the model file
    /// * `reason` - Short reason description
    /// * `suggestion` - Optional suggestion message (without punctuation)
    /// * `source` - Optional underlying error
    pub fn model_unavailable(
        model_path: impl AsRef<Path>,
        reason: impl Into<String>,
        suggestion: Option<&str>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        let suggestion = suggestion
            .map(|s| format!("; suggested fix: {}", s))
            .unwrap_or_default();
        Self::ModelUnavailable {
            model_path: model_path.as_ref().display().to_string(),
            reason: reason.into(),
            suggestion,
            source: source.map(|e| Box::new(e) as _),
        }
    }

    /// Creates a `LabelsUnavailable` error for the given path.
    pub fn labels_unavailable(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::LabelsUnavailable {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Creates a `ShapeMismatch` error.
    ///
    /// # Arguments
    ///
    /// * `context` - Where the mismatch was detected.
    /// * `expected` - The expected length.
    /// * `actual` - The observed length.
    pub fn shape_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Creates an `Inference` error carrying the model name and context.
    pub fn inference_error(
        model_name: &str,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.to_string(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an `InvalidInput` error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a `ConfigError`.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a `ConfigError` naming the offending field and value.
    pub fn config_error_with_context(field: &str, value: &str, reason: &str) -> Self {
        Self::ConfigError {
            message: format!(
                "Configuration error in field '{}' with value '{}': {}",
                field, value, reason
            ),
        }
    }
}

impl From<image::ImageError> for ClassifierError {
    fn from(error: image::ImageError) -> Self {
        Self::Decode(error)
    }
}
