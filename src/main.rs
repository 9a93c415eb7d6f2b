//! Command-line front end: classify image files and print the result.
//!
//! Usage:
//! ```text
//! pet-classifier --model keras_model.onnx --labels labels.txt cat.jpg dog.png
//! ```

use clap::Parser;
use clap::builder::TypedValueParser as _;
use pet_classifier::core::config::{ClassifierConfig, OrtSessionConfig};
use pet_classifier::core::{ClassifierResult, DEFAULT_TOPK, init_tracing};
use pet_classifier::domain::Prediction;
use pet_classifier::models::{ImageClassifier, ImageClassifierBuilder};
use pet_classifier::utils::load_image;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::error;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "pet-classifier")]
#[command(about = "Classify images with a pretrained ONNX model and a label file")]
struct Args {
    /// Path to the ONNX model [default: keras_model.onnx]
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Path to the label file [default: labels.txt]
    #[arg(short, long)]
    labels: Option<PathBuf>,

    /// JSON configuration file; explicit flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of ranked classes to print after the prediction
    #[arg(
        short = 'k',
        long,
        default_value_t = DEFAULT_TOPK,
        value_parser = clap::value_parser!(u64).range(1..).map(|k| k as usize)
    )]
    topk: usize,

    /// ONNX Runtime intra-op threads
    #[arg(long)]
    intra_threads: Option<usize>,

    /// Print one JSON object per image instead of text
    #[arg(long)]
    json: bool,

    /// Image files to classify
    #[arg(required = true)]
    images: Vec<PathBuf>,
}

impl Args {
    /// Merges the optional config file with the explicit flags.
    fn classifier_config(&self) -> ClassifierResult<ClassifierConfig> {
        let mut config = match &self.config {
            Some(path) => ClassifierConfig::from_json_file(path)?,
            None => ClassifierConfig::default(),
        };
        if let Some(model) = &self.model {
            config.model_path = model.clone();
        }
        if let Some(labels) = &self.labels {
            config.labels_path = labels.clone();
        }
        if let Some(threads) = self.intra_threads {
            let ort = config.ort_session.take().unwrap_or_else(OrtSessionConfig::new);
            config.ort_session = Some(ort.with_intra_threads(threads));
        }
        config.validate()?;
        Ok(config)
    }
}

/// Formats an error with its full source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let config = match args.classifier_config() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {}", error_chain(&e));
            return ExitCode::FAILURE;
        }
    };

    let classifier = match ImageClassifierBuilder::from_config(config).build() {
        Ok(classifier) => classifier,
        Err(e) => {
            error!("failed to load classifier: {}", error_chain(&e));
            return ExitCode::FAILURE;
        }
    };

    let show_path = args.images.len() > 1;
    let mut failures = 0usize;

    for path in &args.images {
        match classify_one(&classifier, path, args.topk) {
            Ok(ranked) => print_result(path, &ranked, show_path, args.json),
            Err(e) => {
                failures += 1;
                error!("{}: {}", path.display(), error_chain(&e));
            }
        }
    }

    if failures > 0 {
        error!("{} of {} images failed", failures, args.images.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn classify_one(
    classifier: &ImageClassifier,
    path: &Path,
    topk: usize,
) -> ClassifierResult<Vec<Prediction>> {
    let img = load_image(path)?;
    if topk == 1 {
        Ok(vec![classifier.classify_image(&img)?])
    } else {
        classifier.classify_topk(&img, topk)
    }
}

fn print_result(
    path: &Path,
    ranked: &[Prediction],
    show_path: bool,
    json: bool,
) {
    let Some(best) = ranked.first() else {
        return;
    };

    if json {
        let value = serde_json::json!({
            "image": path.display().to_string(),
            "prediction": best,
            "ranked": ranked,
        });
        println!("{value}");
        return;
    }

    if show_path {
        println!("{}", path.display());
    }
    println!("{best}");
    for (rank, runner_up) in ranked.iter().enumerate().skip(1) {
        println!(
            "  #{} {} ({:.2}%)",
            rank + 1,
            runner_up.label,
            runner_up.confidence_percent()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pet_classifier::core::ClassifierError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_config() {
        let args = Args::try_parse_from(["pet-classifier", "cat.jpg"]).unwrap();
        assert_eq!(args.topk, DEFAULT_TOPK);
        assert_eq!(args.classifier_config().unwrap(), ClassifierConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let file = config_file(
            r#"{ "model_path": "from_config.onnx", "labels_path": "from_config.txt", "input_shape": [192, 192] }"#,
        );
        let config_path = file.path().to_str().unwrap();
        let args = Args::try_parse_from([
            "pet-classifier",
            "--config",
            config_path,
            "--model",
            "flag.onnx",
            "--labels",
            "flag.txt",
            "cat.jpg",
        ])
        .unwrap();

        let config = args.classifier_config().unwrap();
        assert_eq!(config.model_path, PathBuf::from("flag.onnx"));
        assert_eq!(config.labels_path, PathBuf::from("flag.txt"));
        assert_eq!(config.input_shape, (192, 192));
    }

    #[test]
    fn test_config_file_used_when_flags_absent() {
        let file = config_file(r#"{ "model_path": "from_config.onnx" }"#);
        let args = Args::try_parse_from([
            "pet-classifier",
            "--config",
            file.path().to_str().unwrap(),
            "cat.jpg",
        ])
        .unwrap();

        let config = args.classifier_config().unwrap();
        assert_eq!(config.model_path, PathBuf::from("from_config.onnx"));
        assert_eq!(config.labels_path, ClassifierConfig::default().labels_path);
    }

    #[test]
    fn test_intra_threads_merges_into_ort_session() {
        let file = config_file(
            r#"{ "ort_session": { "inter_threads": 2, "optimization_level": "Level3", "intra_threads": 8 } }"#,
        );
        let args = Args::try_parse_from([
            "pet-classifier",
            "--config",
            file.path().to_str().unwrap(),
            "--intra-threads",
            "3",
            "cat.jpg",
        ])
        .unwrap();

        let ort = args.classifier_config().unwrap().ort_session.unwrap();
        assert_eq!(ort.intra_threads, Some(3));
        assert_eq!(ort.inter_threads, Some(2));
        assert_eq!(
            ort.optimization_level,
            Some(pet_classifier::core::config::OrtGraphOptimizationLevel::Level3)
        );
    }

    #[test]
    fn test_zero_intra_threads_fails_validation() {
        let args =
            Args::try_parse_from(["pet-classifier", "--intra-threads", "0", "cat.jpg"]).unwrap();
        assert!(matches!(
            args.classifier_config(),
            Err(ClassifierError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_topk_must_be_positive() {
        assert!(Args::try_parse_from(["pet-classifier", "--topk", "0", "cat.jpg"]).is_err());
        let args = Args::try_parse_from(["pet-classifier", "-k", "3", "cat.jpg"]).unwrap();
        assert_eq!(args.topk, 3);
    }

    #[test]
    fn test_images_are_required() {
        assert!(Args::try_parse_from(["pet-classifier"]).is_err());
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let err = ClassifierError::model_unavailable(
            "m.onnx",
            "failed to create ONNX session",
            None,
            Some(pet_classifier::core::errors::SimpleError::new("bad protobuf")),
        );
        assert_eq!(
            error_chain(&err),
            "model 'm.onnx' unavailable: failed to create ONNX session: bad protobuf"
        );
    }
}
