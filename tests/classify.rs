//! End-to-end classification through the public API with a stand-in model.

use image::{ImageFormat, Rgb, RgbImage};
use pet_classifier::core::{Tensor2D, Tensor4D};
use pet_classifier::prelude::*;
use std::io::{Cursor, Write};
use tempfile::NamedTempFile;

/// Scores classes by the mean of one input channel, so different images get different answers.
#[derive(Debug)]
struct ChannelMeanModel {
    classes: usize,
}

impl ScoringModel for ChannelMeanModel {
    fn score(&self, input: &Tensor4D) -> Result<Tensor2D, ClassifierError> {
        let shape = input.shape();
        let channels = shape[3];
        let mut sums = vec![0.0f32; channels];
        for ((_, _, _, c), v) in input.indexed_iter() {
            sums[c] += *v;
        }
        // Map channel means from [-1, 1] into [0, 1] and pad the remaining classes with zero.
        let pixels = (shape[1] * shape[2]) as f32;
        let scores: Vec<f32> = (0..self.classes)
            .map(|i| {
                sums.get(i)
                    .map(|s| ((s / pixels) + 1.0) / 2.0)
                    .unwrap_or(0.0)
            })
            .collect();
        Ok(Tensor2D::from_shape_vec((1, self.classes), scores)?)
    }

    fn declared_num_classes(&self) -> Option<usize> {
        Some(self.classes)
    }

    fn engine_info(&self) -> String {
        "channel mean".to_string()
    }
}

fn png_bytes(img: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn rgb_labels() -> LabelSet {
    LabelSet::parse("0 Red\n1 Green\n2 Blue\n").unwrap()
}

fn classifier() -> ImageClassifier<ChannelMeanModel> {
    ImageClassifier::new(ChannelMeanModel { classes: 3 }, rgb_labels()).unwrap()
}

#[test]
fn classifies_encoded_png() {
    let bytes = png_bytes(&RgbImage::from_pixel(300, 200, Rgb([10, 240, 20])));
    let prediction = classify(&classifier(), &bytes).unwrap();

    assert_eq!(prediction.label, "Green");
    assert_eq!(prediction.class_id, 1);
    assert!((0.0..=1.0).contains(&prediction.confidence));
}

#[test]
fn prediction_label_is_always_from_label_set() {
    let ctx = classifier();
    for color in [[255, 0, 0], [0, 0, 255], [90, 90, 91], [0, 0, 0]] {
        let bytes = png_bytes(&RgbImage::from_pixel(64, 48, Rgb(color)));
        let prediction = classify(&ctx, &bytes).unwrap();
        assert!(ctx.labels().contains(&prediction.label));
        assert!((0.0..=1.0).contains(&prediction.confidence));
    }
}

#[test]
fn repeated_classification_is_deterministic() {
    let ctx = classifier();
    let mut img = RgbImage::new(97, 131);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([(x * 2) as u8, (y * 3 % 256) as u8, ((x + y) % 256) as u8]);
    }
    let bytes = png_bytes(&img);

    let first = classify(&ctx, &bytes).unwrap();
    let second = classify(&ctx, &bytes).unwrap();
    assert_eq!(first, second);
}

#[test]
fn uniform_gray_ties_resolve_to_first_label() {
    let bytes = png_bytes(&RgbImage::from_pixel(50, 50, Rgb([128, 128, 128])));
    let prediction = classify(&classifier(), &bytes).unwrap();
    assert_eq!(prediction.label, "Red");
    assert_eq!(prediction.class_id, 0);
}

#[test]
fn undecodable_bytes_fail_with_decode_error() {
    let err = classify(&classifier(), b"definitely not a png").unwrap_err();
    assert!(matches!(err, ClassifierError::Decode(_)));

    let err = classify(&classifier(), &[]).unwrap_err();
    assert!(matches!(err, ClassifierError::Decode(_)));
}

#[test]
fn declared_width_must_match_label_count() {
    let err = ImageClassifier::new(ChannelMeanModel { classes: 2 }, rgb_labels()).unwrap_err();
    assert!(matches!(
        err,
        ClassifierError::ShapeMismatch {
            expected: 3,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn labels_load_from_file_with_index_prefixes() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "0 Red\n1 Green\n2 Blue\n\n").unwrap();

    let labels = LabelSet::from_path(file.path()).unwrap();
    assert_eq!(labels.as_slice(), &["Red", "Green", "Blue"]);

    let ctx = ImageClassifier::new(ChannelMeanModel { classes: 3 }, labels).unwrap();
    let bytes = png_bytes(&RgbImage::from_pixel(10, 10, Rgb([0, 0, 255])));
    assert_eq!(classify(&ctx, &bytes).unwrap().label, "Blue");
}

#[test]
fn missing_label_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = LabelSet::from_path(&dir.path().join("labels.txt")).unwrap_err();
    assert!(matches!(err, ClassifierError::LabelsUnavailable { .. }));
}

#[test]
fn missing_model_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let labels = dir.path().join("labels.txt");
    std::fs::write(&labels, "0 Cat\n1 Dog\n").unwrap();

    let err = ImageClassifierBuilder::new()
        .model_path(dir.path().join("keras_model.onnx"))
        .labels_path(&labels)
        .build()
        .unwrap_err();
    assert!(matches!(err, ClassifierError::ModelUnavailable { .. }));
}

#[test]
fn topk_ranks_all_classes() {
    let img = RgbImage::from_pixel(40, 40, Rgb([200, 20, 120]));
    let ranked = classifier().classify_topk(&img, 3).unwrap();
    let labels: Vec<&str> = ranked.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, ["Red", "Blue", "Green"]);
    assert!(ranked.windows(2).all(|w| w[0].confidence >= w[1].confidence));
}
