//! Crop-to-fill ("fit") resizing.
//!
//! The source is cropped around its center to the target aspect ratio and the
//! crop is then resized to the exact target size, so nothing is stretched and
//! nothing is padded.

use image::{RgbImage, imageops::FilterType};

/// Computes the centered crop box `(x, y, width, height)` that has the
/// aspect ratio of `dst_w x dst_h`.
///
/// Wide sources lose columns on both sides, tall sources lose rows at the top
/// and bottom. Sources that already have the target ratio are returned whole.
///
/// The box is snapped to whole pixels: an odd surplus leaves the extra
/// column or row on the right or bottom, where a fractional box would split it.
pub fn fit_crop_box(src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> (u32, u32, u32, u32) {
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return (0, 0, src_w, src_h);
    }

    // Compare src_w / src_h against dst_w / dst_h without floating point.
    let src_ratio_lhs = src_w as u64 * dst_h as u64;
    let dst_ratio_rhs = dst_w as u64 * src_h as u64;

    let (crop_w, crop_h) = if src_ratio_lhs == dst_ratio_rhs {
        (src_w, src_h)
    } else if src_ratio_lhs > dst_ratio_rhs {
        let crop_w = (src_h as f64 * dst_w as f64 / dst_h as f64).round() as u32;
        (crop_w.clamp(1, src_w), src_h)
    } else {
        let crop_h = (src_w as f64 * dst_h as f64 / dst_w as f64).round() as u32;
        (src_w, crop_h.clamp(1, src_h))
    };

    ((src_w - crop_w) / 2, (src_h - crop_h) / 2, crop_w, crop_h)
}

/// Crops to the target aspect ratio, then resizes to the target size.
#[derive(Debug, Clone)]
pub struct FitResize {
    /// Target shape (height, width)
    pub input_shape: (u32, u32),
    /// Resampling filter
    pub filter: FilterType,
}

impl FitResize {
    /// Creates a fit resizer using Lanczos3 resampling.
    pub fn new(input_shape: (u32, u32)) -> Self {
        Self {
            input_shape,
            filter: FilterType::Lanczos3,
        }
    }

    /// Overrides the resampling filter.
    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    /// Applies the crop and resize. The result is always exactly the target size.
    pub fn apply(&self, img: &RgbImage) -> RgbImage {
        let (dst_h, dst_w) = self.input_shape;
        let (src_w, src_h) = img.dimensions();
        let (x, y, w, h) = fit_crop_box(src_w, src_h, dst_w, dst_h);

        if (x, y, w, h) == (0, 0, src_w, src_h) {
            if (src_w, src_h) == (dst_w, dst_h) {
                return img.clone();
            }
            return image::imageops::resize(img, dst_w, dst_h, self.filter);
        }

        let cropped = image::imageops::crop_imm(img, x, y, w, h).to_image();
        image::imageops::resize(&cropped, dst_w, dst_h, self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_crop_box_odd_surplus_floors_origin() {
        assert_eq!(fit_crop_box(401, 200, 224, 224), (100, 0, 200, 200));
        assert_eq!(fit_crop_box(200, 401, 224, 224), (0, 100, 200, 200));
    }
    use image::Rgb;

    #[test]
    fn test_crop_box_wide_source_crops_sides() {
        assert_eq!(fit_crop_box(400, 200, 224, 224), (100, 0, 200, 200));
    }

    #[test]
    fn test_crop_box_tall_source_crops_top_and_bottom() {
        assert_eq!(fit_crop_box(300, 500, 224, 224), (0, 100, 300, 300));
    }

    #[test]
    fn test_crop_box_matching_ratio_keeps_everything() {
        assert_eq!(fit_crop_box(448, 448, 224, 224), (0, 0, 448, 448));
        assert_eq!(fit_crop_box(640, 480, 4, 3), (0, 0, 640, 480));
    }

    #[test]
    fn test_crop_box_non_square_target() {
        // 1000x1000 into a 2:1 target keeps the full width and the middle half of the rows.
        assert_eq!(fit_crop_box(1000, 1000, 200, 100), (0, 250, 1000, 500));
    }

    #[test]
    fn test_apply_always_hits_target_size() {
        let resizer = FitResize::new((224, 224));
        for (w, h) in [(1, 1), (17, 901), (901, 17), (224, 224), (640, 480)] {
            let out = resizer.apply(&RgbImage::new(w, h));
            assert_eq!(out.dimensions(), (224, 224), "source {w}x{h}");
        }
    }

    #[test]
    fn test_apply_discards_cropped_margins() {
        // Red side bands on a wide image fall entirely outside the centered square.
        let mut img = RgbImage::from_pixel(300, 100, Rgb([0, 0, 255]));
        for y in 0..100 {
            for x in (0..100).chain(200..300) {
                img.put_pixel(x, y, Rgb([255, 0, 0]));
            }
        }

        let out = FitResize::new((50, 50))
            .with_filter(FilterType::Nearest)
            .apply(&img);
        assert!(out.pixels().all(|p| *p == Rgb([0, 0, 255])));
    }
}
