use image::{ColorType, DynamicImage};
use tracing::info;

use crate::core::params::PixelateParams;
use crate::core::processing::quantize::limit_palette;
use crate::core::processing::resize::{downscale_dimensions, resize_dynamic};
use crate::core::processing::threshold::gray_threshold;
use crate::error::{Error, Result};
use crate::types::ResampleMode;

/// Apply the pixelation pipeline to one image.
///
/// Steps run in a fixed order, each gated by its boolean flag and a validity
/// threshold on its numeric parameter; a guard that fails makes that step a
/// no-op, never an error. The working image is RGBA8 (so intermediate steps
/// cannot drop an alpha channel) until gray thresholding switches it to
/// single-channel luma; the result is converted back to the input's color
/// type before returning.
///
/// When at least one step fired, a single diagnostic line summarizes which
/// ones and with what values. That line is advisory, not part of the
/// contract.
pub fn apply(image: DynamicImage, params: &PixelateParams) -> Result<DynamicImage> {
    let original_color = image.color();
    let (original_width, original_height) = (image.width(), image.height());

    let mut img = match image {
        DynamicImage::ImageRgba8(rgba) => DynamicImage::ImageRgba8(rgba),
        other => DynamicImage::ImageRgba8(other.to_rgba8()),
    };

    let mut applied: Vec<String> = Vec::new();

    if params.pixelate && params.downscale_factor > 1 {
        let (new_width, new_height) =
            downscale_dimensions(original_width, original_height, params.downscale_factor);
        if new_width == 0 || new_height == 0 {
            return Err(Error::Processing(format!(
                "downscale factor {} exceeds image dimensions {}x{}",
                params.downscale_factor, original_width, original_height
            )));
        }
        img = resize_dynamic(&img, new_width, new_height, params.resample_mode)?;
        applied.push(format!(
            "downscale: {} ({})",
            params.downscale_factor, params.resample_mode
        ));
    }

    if params.palette_limit && params.palette_size > 1 {
        let rgba = img.to_rgba8();
        img = DynamicImage::ImageRgba8(limit_palette(&rgba, params.palette_size)?);
        applied.push(format!("color palette limit: {}", params.palette_size));
    }

    if params.gray_threshold && params.gray_threshold_value > 0 {
        img = DynamicImage::ImageLuma8(gray_threshold(&img, params.gray_threshold_value));
        applied.push(format!("gray limit: {}", params.gray_threshold_value));
    }

    if params.rescale && params.pixelate {
        img = resize_dynamic(&img, original_width, original_height, ResampleMode::Nearest)?;
        applied.push("rescale".to_string());
    }

    let img = restore_color(img, original_color);

    if !applied.is_empty() {
        info!("Pixelate with {}", applied.join(", "));
    }

    Ok(img)
}

/// Convert the working image back to the color type the input had.
fn restore_color(img: DynamicImage, color: ColorType) -> DynamicImage {
    if img.color() == color {
        return img;
    }
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(img.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(img.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(img.to_rgb8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(img.to_rgba8()),
        ColorType::L16 => DynamicImage::ImageLuma16(img.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(img.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(img.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(img.to_rgba16()),
        ColorType::Rgb32F => DynamicImage::ImageRgb32F(img.to_rgb32f()),
        ColorType::Rgba32F => DynamicImage::ImageRgba32F(img.to_rgba32f()),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn checker_rgba(size: u32, cell: u32) -> DynamicImage {
        let mut img = RgbaImage::new(size, size);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = if (x / cell + y / cell) % 2 == 0 {
                Rgba([220, 40, 40, 255])
            } else {
                Rgba([40, 40, 220, 255])
            };
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn all_flags_off_is_identity() {
        let src = checker_rgba(16, 4);
        let out = apply(src.clone(), &PixelateParams::default()).unwrap();
        assert_eq!(out.color(), src.color());
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn identity_preserves_non_rgba_color_type() {
        let mut rgb = RgbImage::new(8, 8);
        for (x, _y, p) in rgb.enumerate_pixels_mut() {
            *p = Rgb([x as u8 * 30, 100, 50]);
        }
        let src = DynamicImage::ImageRgb8(rgb);

        let out = apply(src.clone(), &PixelateParams::default()).unwrap();
        assert_eq!(out.color(), ColorType::Rgb8);
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn downscale_uses_floor_dimensions() {
        let params = PixelateParams {
            pixelate: true,
            downscale_factor: 3,
            ..Default::default()
        };
        let out = apply(checker_rgba(16, 4), &params).unwrap();
        assert_eq!((out.width(), out.height()), (5, 5));
    }

    #[test]
    fn factor_of_one_is_a_strict_no_op() {
        let src = checker_rgba(16, 4);
        let params = PixelateParams {
            pixelate: true,
            downscale_factor: 1,
            rescale: true,
            ..Default::default()
        };
        let out = apply(src.clone(), &params).unwrap();
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn rescale_restores_original_dimensions() {
        let src = checker_rgba(64, 8);
        let params = PixelateParams {
            pixelate: true,
            downscale_factor: 8,
            rescale: true,
            ..Default::default()
        };
        let out = apply(src.clone(), &params).unwrap();
        assert_eq!((out.width(), out.height()), (64, 64));
        assert_eq!(out.color(), src.color());
    }

    #[test]
    fn rescale_without_pixelate_does_nothing() {
        let src = checker_rgba(16, 4);
        let params = PixelateParams {
            rescale: true,
            ..Default::default()
        };
        let out = apply(src.clone(), &params).unwrap();
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn pixelate_with_rescale_yields_flat_cells() {
        // 64x64 with 8px cells downscaled by 8 and blown back up: every 8x8
        // output cell must be one solid color.
        let src = checker_rgba(64, 8);
        let params = PixelateParams {
            pixelate: true,
            downscale_factor: 8,
            rescale: true,
            ..Default::default()
        };
        let out = apply(src, &params).unwrap().to_rgba8();

        for cell_y in 0..8 {
            for cell_x in 0..8 {
                let first = out.get_pixel(cell_x * 8, cell_y * 8);
                for dy in 0..8 {
                    for dx in 0..8 {
                        assert_eq!(
                            out.get_pixel(cell_x * 8 + dx, cell_y * 8 + dy),
                            first,
                            "cell ({cell_x},{cell_y}) is not flat"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn palette_guard_of_one_is_a_strict_no_op() {
        let src = checker_rgba(16, 4);
        let params = PixelateParams {
            palette_limit: true,
            palette_size: 1,
            ..Default::default()
        };
        let out = apply(src.clone(), &params).unwrap();
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn gray_threshold_zero_is_a_strict_no_op() {
        let src = checker_rgba(16, 4);
        let params = PixelateParams {
            gray_threshold: true,
            gray_threshold_value: 0,
            ..Default::default()
        };
        let out = apply(src.clone(), &params).unwrap();
        assert_eq!(out.as_bytes(), src.as_bytes());
    }

    #[test]
    fn gray_threshold_output_restores_input_mode() {
        let src = checker_rgba(16, 4);
        let params = PixelateParams {
            gray_threshold: true,
            gray_threshold_value: 100,
            ..Default::default()
        };
        let out = apply(src, &params).unwrap();
        assert_eq!(out.color(), ColorType::Rgba8);
        // Two-tone survives the conversion back to RGBA.
        assert!(
            out.to_rgba8()
                .pixels()
                .all(|p| p.0 == [0, 0, 0, 255] || p.0 == [255, 255, 255, 255])
        );
    }

    #[test]
    fn oversized_factor_surfaces_a_processing_error() {
        let src = checker_rgba(16, 4);
        let params = PixelateParams {
            pixelate: true,
            downscale_factor: 32,
            ..Default::default()
        };
        assert!(matches!(apply(src, &params), Err(Error::Processing(_))));
    }
}
