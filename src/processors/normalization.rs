//! Pixel normalization for model input.
//!
//! Every channel value `v` is mapped to `v * alpha + beta`, with
//! `alpha = scale / std` and `beta = -mean / std`. The preset used by the
//! classifier, [`NormalizeImage::symmetric_unit`], yields `(v / 127.5) - 1`.

use crate::core::constants::{INPUT_CHANNELS, NORMALIZE_DIVISOR, NORMALIZE_OFFSET};
use crate::core::{ClassifierError, Tensor4D};
use crate::processors::types::ChannelOrder;
use image::RgbImage;

/// Normalizes images into model input tensors.
#[derive(Debug, Clone)]
pub struct NormalizeImage {
    /// Scaling factors for each channel (alpha = scale / std)
    pub alpha: Vec<f32>,
    /// Offset values for each channel (beta = -mean / std)
    pub beta: Vec<f32>,
    /// Channel ordering (CHW or HWC)
    pub order: ChannelOrder,
}

impl NormalizeImage {
    /// Creates a new NormalizeImage instance with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `scale` - Scaling factor applied to raw `[0, 255]` values
    /// * `mean` - Mean values for each channel (RGB order)
    /// * `std` - Standard deviation values for each channel (RGB order)
    /// * `order` - Channel ordering of the produced tensor
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * Scale is less than or equal to 0
    /// * Mean or std vectors don't have exactly 3 elements
    /// * Any standard deviation value is less than or equal to 0
    pub fn new(
        scale: f32,
        mean: Vec<f32>,
        std: Vec<f32>,
        order: ChannelOrder,
    ) -> Result<Self, ClassifierError> {
        if scale <= 0.0 {
            return Err(ClassifierError::config_error("Scale must be greater than 0"));
        }

        if mean.len() != INPUT_CHANNELS {
            return Err(ClassifierError::config_error(
                "Mean must have exactly 3 elements for RGB",
            ));
        }

        if std.len() != INPUT_CHANNELS {
            return Err(ClassifierError::config_error(
                "Std must have exactly 3 elements for RGB",
            ));
        }

        for (i, &s) in std.iter().enumerate() {
            if s <= 0.0 {
                return Err(ClassifierError::config_error(format!(
                    "Standard deviation at index {i} must be greater than 0, got {s}"
                )));
            }
        }

        let alpha: Vec<f32> = std.iter().map(|s| scale / s).collect();
        let beta: Vec<f32> = mean.iter().zip(&std).map(|(m, s)| -m / s).collect();

        Ok(Self { alpha, beta, order })
    }

    /// Maps `[0, 255]` to `[-1, 1]` via `(v / 127.5) - 1`, HWC order.
    ///
    /// This is the transform the bundled Keras-exported models were trained with.
    pub fn symmetric_unit() -> Self {
        let alpha = 1.0 / NORMALIZE_DIVISOR;
        Self {
            alpha: vec![alpha; INPUT_CHANNELS],
            beta: vec![-NORMALIZE_OFFSET; INPUT_CHANNELS],
            order: ChannelOrder::HWC,
        }
    }

    /// Normalizes one channel value.
    #[inline]
    pub fn normalize_value(&self, value: u8, channel: usize) -> f32 {
        value as f32 * self.alpha[channel] + self.beta[channel]
    }

    /// Normalizes a single image and returns it as a batch of one.
    ///
    /// The tensor is `(1, H, W, 3)` for HWC and `(1, 3, H, W)` for CHW.
    pub fn normalize_to(&self, img: &RgbImage) -> Result<Tensor4D, ClassifierError> {
        let (width, height) = img.dimensions();
        let (w, h) = (width as usize, height as usize);
        let channels = INPUT_CHANNELS;
        let mut result = vec![0.0f32; channels * h * w];

        match self.order {
            ChannelOrder::CHW => {
                for (x, y, pixel) in img.enumerate_pixels() {
                    let (x, y) = (x as usize, y as usize);
                    for c in 0..channels {
                        result[c * h * w + y * w + x] = self.normalize_value(pixel[c], c);
                    }
                }
                Tensor4D::from_shape_vec((1, channels, h, w), result).map_err(ClassifierError::from)
            }
            ChannelOrder::HWC => {
                // RgbImage stores pixels row-major as interleaved RGB, which is already HWC.
                for (dst, (i, &value)) in result.iter_mut().zip(img.as_raw().iter().enumerate()) {
                    *dst = self.normalize_value(value, i % channels);
                }
                Tensor4D::from_shape_vec((1, h, w, channels), result).map_err(ClassifierError::from)
            }
        }
    }
}
