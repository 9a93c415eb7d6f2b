//! Top-level classifier configuration.

use super::onnx::OrtSessionConfig;
use crate::core::constants::{
    DEFAULT_INPUT_SHAPE, DEFAULT_LABELS_PATH, DEFAULT_MODEL_PATH, INPUT_CHANNELS, MAX_TENSOR_SIZE,
};
use crate::core::errors::{ClassifierError, ClassifierResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Everything needed to build an [`ImageClassifier`](crate::models::ImageClassifier).
///
/// Can be written by hand or loaded from JSON:
///
/// ```rust
/// use pet_classifier::core::config::ClassifierConfig;
///
/// let config: ClassifierConfig = serde_json::from_str(r#"
/// {
///   "model_path": "models/keras_model.onnx",
///   "labels_path": "models/labels.txt",
///   "ort_session": { "intra_threads": 2 }
/// }
/// "#).unwrap();
///
/// assert_eq!(config.input_shape, (224, 224));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Path to the ONNX model artifact.
    pub model_path: PathBuf,
    /// Path to the label file, one label per line.
    pub labels_path: PathBuf,
    /// Input shape (height, width) the model was exported with.
    pub input_shape: (u32, u32),
    /// Name of the model input tensor; the first declared input when unset.
    pub input_name: Option<String>,
    /// Name of the model output tensor; the first declared output when unset.
    pub output_name: Option<String>,
    /// ONNX Runtime session options.
    pub ort_session: Option<OrtSessionConfig>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            labels_path: PathBuf::from(DEFAULT_LABELS_PATH),
            input_shape: DEFAULT_INPUT_SHAPE,
            input_name: None,
            output_name: None,
            ort_session: None,
        }
    }
}

impl ClassifierConfig {
    /// Creates a configuration pointing at the default artifact paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> ClassifierResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::config_error(format!(
                "failed to read configuration '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the model path.
    pub fn with_model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Sets the label file path.
    pub fn with_labels_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.labels_path = path.into();
        self
    }

    /// Sets the ONNX Runtime session options.
    pub fn with_ort_session(mut self, ort_session: OrtSessionConfig) -> Self {
        self.ort_session = Some(ort_session);
        self
    }

    /// Checks that the configuration describes a usable input tensor.
    pub fn validate(&self) -> ClassifierResult<()> {
        let (height, width) = self.input_shape;
        if height == 0 || width == 0 {
            return Err(ClassifierError::config_error_with_context(
                "input_shape",
                &format!("{}x{}", height, width),
                "height and width must be greater than 0",
            ));
        }
        let tensor_size = height as usize * width as usize * INPUT_CHANNELS;
        if tensor_size > MAX_TENSOR_SIZE {
            return Err(ClassifierError::config_error_with_context(
                "input_shape",
                &format!("{}x{}", height, width),
                &format!("input tensor would exceed {} elements", MAX_TENSOR_SIZE),
            ));
        }
        if self.ort_session.as_ref().and_then(|o| o.intra_threads) == Some(0) {
            return Err(ClassifierError::config_error_with_context(
                "ort_session.intra_threads",
                "0",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_point_at_fixed_artifacts() {
        let config = ClassifierConfig::default();
        assert_eq!(config.model_path, PathBuf::from("keras_model.onnx"));
        assert_eq!(config.labels_path, PathBuf::from("labels.txt"));
        assert_eq!(config.input_shape, (224, 224));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_file_keeps_defaults_for_missing_fields() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "labels_path": "custom/labels.txt" }}"#).unwrap();

        let config = ClassifierConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.labels_path, PathBuf::from("custom/labels.txt"));
        assert_eq!(config.model_path, PathBuf::from("keras_model.onnx"));
        assert!(config.ort_session.is_none());
    }

    #[test]
    fn test_from_json_file_rejects_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = ClassifierConfig::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, ClassifierError::Json(_)));
    }

    #[test]
    fn test_from_json_file_missing_file() {
        let err = ClassifierConfig::from_json_file("/nonexistent/classifier.json").unwrap_err();
        assert!(matches!(err, ClassifierError::ConfigError { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_shape() {
        let config = ClassifierConfig {
            input_shape: (0, 224),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let config =
            ClassifierConfig::new().with_ort_session(OrtSessionConfig::new().with_intra_threads(0));
        assert!(config.validate().is_err());
    }
}
