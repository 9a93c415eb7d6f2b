use super::*;
use crate::core::config::{OrtExecutionProvider, OrtGraphOptimizationLevel, OrtSessionConfig};
use ort::execution_providers::ExecutionProviderDispatch;
use ort::logging::LogLevel;
use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use std::path::Path;

impl OrtInfer {
    /// Loads a model with default ONNX Runtime settings.
    ///
    /// `input_name` defaults to the first input the model declares.
    pub fn new(model_path: impl AsRef<Path>, input_name: Option<&str>) -> Result<Self, ClassifierError> {
        Self::from_config(&OrtSessionConfig::default(), model_path, input_name)
    }

    /// Loads a model, applying the given session options.
    pub fn from_config(
        config: &OrtSessionConfig,
        model_path: impl AsRef<Path>,
        input_name: Option<&str>,
    ) -> Result<Self, ClassifierError> {
        let path = model_path.as_ref();
        if !path.is_file() {
            return Err(ClassifierError::model_unavailable(
                path,
                "model file not found",
                Some("check the model path or export the model to ONNX first"),
                None::<ort::Error>,
            ));
        }

        let session = Session::builder()
            .and_then(|builder| Self::apply_ort_config(builder, config))
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| {
                ClassifierError::model_unavailable(
                    path,
                    "failed to create ONNX session",
                    Some("verify model path and compatibility with selected execution providers"),
                    Some(e),
                )
            })?;

        let input_name = match input_name {
            Some(name) => name.to_string(),
            None => session
                .inputs
                .first()
                .map(|input| input.name.clone())
                .ok_or_else(|| {
                    ClassifierError::model_unavailable(
                        path,
                        "model declares no inputs",
                        None,
                        None::<ort::Error>,
                    )
                })?,
        };

        let model_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown_model")
            .to_string();

        tracing::info!(
            model = %model_name,
            input = %input_name,
            "loaded ONNX model from {}",
            path.display()
        );

        Ok(OrtInfer {
            session: Mutex::new(session),
            input_name,
            output_name: None,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    /// Reads scores from the named output instead of the first declared one.
    pub fn with_output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = Some(output_name.into());
        self
    }

    fn apply_ort_config(
        builder: SessionBuilder,
        cfg: &OrtSessionConfig,
    ) -> Result<SessionBuilder, ort::Error> {
        // Keep ORT's own logging quiet; failures come back as errors.
        let mut builder = builder.with_log_level(LogLevel::Error)?;
        if let Some(intra) = cfg.intra_threads {
            builder = builder.with_intra_threads(intra)?;
        }
        if let Some(inter) = cfg.inter_threads {
            builder = builder.with_inter_threads(inter)?;
        }
        if let Some(level) = cfg.optimization_level {
            let mapped = match level {
                OrtGraphOptimizationLevel::DisableAll => GraphOptimizationLevel::Disable,
                OrtGraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
                OrtGraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
                OrtGraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
            };
            builder = builder.with_optimization_level(mapped)?;
        }
        let providers = Self::build_execution_providers(&cfg.get_execution_providers());
        if !providers.is_empty() {
            builder = builder.with_execution_providers(providers)?;
        }
        Ok(builder)
    }

    pub(super) fn build_execution_providers(
        eps: &[OrtExecutionProvider],
    ) -> Vec<ExecutionProviderDispatch> {
        let mut providers = Vec::new();

        for ep in eps {
            match ep {
                OrtExecutionProvider::CPU => {
                    providers.push(ort::execution_providers::CPUExecutionProvider::default().build());
                }
                #[cfg(feature = "cuda")]
                OrtExecutionProvider::CUDA { device_id } => {
                    let mut cuda_provider =
                        ort::execution_providers::CUDAExecutionProvider::default();
                    if let Some(id) = device_id {
                        cuda_provider = cuda_provider.with_device_id(*id);
                    }
                    providers.push(cuda_provider.build());
                }
                #[cfg(not(feature = "cuda"))]
                OrtExecutionProvider::CUDA { .. } => {
                    tracing::warn!("CUDA requested but the cuda feature is not enabled; skipping");
                }
            }
        }

        providers
    }
}
