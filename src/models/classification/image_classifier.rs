//! Image Classification Model
//!
//! This module wires preprocessing, the scoring model and the label set into a
//! single immutable context. One instance is built at startup and borrowed for
//! every request; classifying never mutates it.

use crate::core::config::{ClassifierConfig, OrtSessionConfig};
use crate::core::errors::SimpleError;
use crate::core::inference::OrtInfer;
use crate::core::traits::ScoringModel;
use crate::core::{ClassifierError, ClassifierResult, Tensor2D, Tensor4D};
use crate::domain::{LabelSet, Prediction};
use crate::processors::topk::{self, TopkResult};
use crate::processors::{FitResize, NormalizeImage, argmax};
use crate::utils::{decode_image, load_image};
use image::RgbImage;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Classifies images with a scoring model and its label set.
///
/// Preprocessing is fixed: crop-to-fill to the input shape with Lanczos3, then
/// `(v / 127.5) - 1` in HWC order, batch of one.
#[derive(Debug)]
pub struct ImageClassifier<M: ScoringModel = OrtInfer> {
    /// The scoring model
    model: M,
    /// Class names in model output order
    labels: LabelSet,
    /// Crop-to-fill resizer
    resizer: FitResize,
    /// Pixel normalizer
    normalizer: NormalizeImage,
}

impl<M: ScoringModel> ImageClassifier<M> {
    /// Creates a classifier for the default 224x224 input.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the model declares an output width that
    /// differs from the number of labels.
    pub fn new(model: M, labels: LabelSet) -> ClassifierResult<Self> {
        if let Some(num_classes) = model.declared_num_classes() {
            if num_classes != labels.len() {
                return Err(ClassifierError::shape_mismatch(
                    "label count vs declared model output",
                    labels.len(),
                    num_classes,
                ));
            }
        }

        Ok(Self {
            model,
            labels,
            resizer: FitResize::new(crate::core::DEFAULT_INPUT_SHAPE),
            normalizer: NormalizeImage::symmetric_unit(),
        })
    }

    /// Changes the input shape (height, width) for models exported at another size.
    pub fn with_input_shape(mut self, input_shape: (u32, u32)) -> Self {
        self.resizer.input_shape = input_shape;
        self
    }

    /// The label set.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// The scoring model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Input shape (height, width) fed to the model.
    pub fn input_shape(&self) -> (u32, u32) {
        self.resizer.input_shape
    }

    /// Crops, resizes and normalizes an image into a `(1, H, W, 3)` tensor.
    pub fn preprocess(&self, img: &RgbImage) -> ClassifierResult<Tensor4D> {
        let resized = self.resizer.apply(img);
        self.normalizer.normalize_to(&resized)
    }

    /// Runs the model on one image and returns its `(1, classes)` score tensor.
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the model returns anything other than one
    /// row with exactly one score per label.
    pub fn score_tensor(&self, img: &RgbImage) -> ClassifierResult<Tensor2D> {
        let start = Instant::now();
        let batch_tensor = self.preprocess(img)?;
        let predictions = self.model.score(&batch_tensor)?;

        if predictions.nrows() != 1 {
            return Err(ClassifierError::shape_mismatch(
                "model output batch size",
                1,
                predictions.nrows(),
            ));
        }
        if predictions.ncols() != self.labels.len() {
            return Err(ClassifierError::shape_mismatch(
                "label count vs model output",
                self.labels.len(),
                predictions.ncols(),
            ));
        }

        tracing::debug!(
            source = ?img.dimensions(),
            input = ?batch_tensor.shape(),
            classes = predictions.ncols(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "scored image"
        );

        Ok(predictions)
    }

    /// Runs the model on one image and returns its raw score vector.
    pub fn scores(&self, img: &RgbImage) -> ClassifierResult<Vec<f32>> {
        Ok(self.score_tensor(img)?.row(0).to_vec())
    }

    /// Classifies encoded image bytes (PNG, JPEG, BMP, ...).
    ///
    /// # Errors
    ///
    /// * `Decode` if the bytes are not a decodable image
    /// * `ShapeMismatch` if the model output does not match the label set
    /// * `Inference` or `ModelUnavailable` if the model fails to run
    pub fn classify(&self, raw_image: &[u8]) -> ClassifierResult<Prediction> {
        let img = decode_image(raw_image)?;
        self.classify_image(&img)
    }

    /// Classifies an already decoded image.
    pub fn classify_image(&self, img: &RgbImage) -> ClassifierResult<Prediction> {
        let scores = self.scores(img)?;
        let (class_id, confidence) = argmax(&scores).ok_or_else(|| {
            ClassifierError::inference_error(
                &self.model.engine_info(),
                "model produced no comparable scores",
                SimpleError::new("every score is NaN"),
            )
        })?;
        self.prediction_for(class_id, confidence)
    }

    /// Reads and classifies an image file.
    ///
    /// A file that cannot be read is reported as `Decode`, the same as one
    /// whose bytes are not an image.
    pub fn classify_path(&self, path: &Path) -> ClassifierResult<Prediction> {
        let img = load_image(path)?;
        self.classify_image(&img)
    }

    /// Returns the `k` best classes for an image, best first.
    ///
    /// The first entry always equals [`classify_image`](Self::classify_image).
    pub fn classify_topk(&self, img: &RgbImage, k: usize) -> ClassifierResult<Vec<Prediction>> {
        if k == 0 {
            return Err(ClassifierError::invalid_input("k must be greater than 0"));
        }
        let predictions = self.score_tensor(img)?;
        let TopkResult { indexes, scores } = topk::process(&predictions, k)?;
        indexes
            .into_iter()
            .zip(scores)
            .flat_map(|(row_indexes, row_scores)| row_indexes.into_iter().zip(row_scores))
            .filter(|(_, score)| !score.is_nan())
            .map(|(class_id, confidence)| self.prediction_for(class_id, confidence))
            .collect()
    }

    fn prediction_for(&self, class_id: usize, confidence: f32) -> ClassifierResult<Prediction> {
        let label = self.labels.get(class_id).ok_or_else(|| {
            ClassifierError::shape_mismatch(
                "class index vs label count",
                self.labels.len(),
                class_id + 1,
            )
        })?;

        if !(0.0..=1.0).contains(&confidence) {
            tracing::warn!(
                class_id,
                confidence,
                "score outside [0, 1]; the model output may not be a probability distribution"
            );
        }

        Ok(Prediction {
            label: label.to_string(),
            class_id,
            confidence,
        })
    }
}

/// Classifies `raw_image` against an explicit classifier context.
pub fn classify<M: ScoringModel>(
    context: &ImageClassifier<M>,
    raw_image: &[u8],
) -> ClassifierResult<Prediction> {
    context.classify(raw_image)
}

/// Builder for an ONNX-backed [`ImageClassifier`].
#[derive(Debug, Default)]
pub struct ImageClassifierBuilder {
    config: ClassifierConfig,
}

impl ImageClassifierBuilder {
    /// Creates a builder pointing at the default artifact paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing configuration.
    pub fn from_config(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Sets the ONNX model path.
    pub fn model_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.model_path = path.into();
        self
    }

    /// Sets the label file path.
    pub fn labels_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.labels_path = path.into();
        self
    }

    /// Sets the input image shape (height, width).
    pub fn input_shape(mut self, shape: (u32, u32)) -> Self {
        self.config.input_shape = shape;
        self
    }

    /// Sets the model input tensor name.
    pub fn input_name(mut self, name: impl Into<String>) -> Self {
        self.config.input_name = Some(name.into());
        self
    }

    /// Sets the model output tensor name.
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_name = Some(name.into());
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn with_ort_config(mut self, config: OrtSessionConfig) -> Self {
        self.config.ort_session = Some(config);
        self
    }

    /// The configuration the builder will use.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Loads the labels and the model and checks that they belong together.
    ///
    /// Labels are loaded first so a bad label file fails before the model,
    /// which is the slower of the two, is read.
    ///
    /// # Errors
    ///
    /// * `ConfigError` for an unusable configuration or label file content
    /// * `LabelsUnavailable` if the label file cannot be read
    /// * `ModelUnavailable` if the model is missing or fails to load
    /// * `ShapeMismatch` if the model's declared output width differs from the label count
    pub fn build(self) -> ClassifierResult<ImageClassifier<OrtInfer>> {
        let config = self.config;
        config.validate()?;

        let labels = LabelSet::from_path(&config.labels_path)?;

        let ort_config = config.ort_session.clone().unwrap_or_default();
        let mut inference =
            OrtInfer::from_config(&ort_config, &config.model_path, config.input_name.as_deref())?;
        if let Some(name) = &config.output_name {
            inference = inference.with_output_name(name.clone());
        }

        Self::check_input_shape(&inference, config.input_shape)?;

        let classifier = ImageClassifier::new(inference, labels)?.with_input_shape(config.input_shape);
        tracing::info!(
            classes = classifier.labels().len(),
            input_shape = ?classifier.input_shape(),
            "{} ready",
            classifier.model().engine_info()
        );
        Ok(classifier)
    }

    fn check_input_shape(inference: &OrtInfer, input_shape: (u32, u32)) -> ClassifierResult<()> {
        let Some(declared) = inference.primary_input_shape() else {
            return Ok(());
        };
        if let [_, h, w, c] = declared.as_slice() {
            let (height, width) = input_shape;
            let static_mismatch = (*h > 0 && *h != height as i64) || (*w > 0 && *w != width as i64);
            if *c > 0 && *c != crate::core::INPUT_CHANNELS as i64 {
                return Err(ClassifierError::config_error(format!(
                    "model '{}' expects {} input channels in NHWC layout, got shape {:?}",
                    inference.model_name(),
                    crate::core::INPUT_CHANNELS,
                    declared
                )));
            }
            if static_mismatch {
                return Err(ClassifierError::config_error_with_context(
                    "input_shape",
                    &format!("{}x{}", height, width),
                    &format!(
                        "model '{}' declares input shape {:?}",
                        inference.model_name(),
                        declared
                    ),
                ));
            }
        }
        Ok(())
    }
}
