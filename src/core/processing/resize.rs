use fast_image_resize::{PixelType, ResizeOptions, Resizer, images::Image};
use image::{DynamicImage, GrayImage, RgbaImage};

use crate::error::{Error, Result};
use crate::types::ResampleMode;

/// Dimensions after integer downscaling: `floor(side / factor)` per axis.
pub fn downscale_dimensions(width: u32, height: u32, factor: u32) -> (u32, u32) {
    (width / factor, height / factor)
}

pub fn resize_rgba8(
    src: &RgbaImage,
    target_width: u32,
    target_height: u32,
    mode: ResampleMode,
) -> Result<RgbaImage> {
    let resize_options = ResizeOptions::new().resize_alg(mode.resize_alg());
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        src.width(),
        src.height(),
        src.as_raw().clone(),
        PixelType::U8x4,
    )
    .map_err(Error::external)?;
    let mut dst_image = Image::new(target_width, target_height, PixelType::U8x4);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| Error::Processing("resized RGBA buffer has unexpected length".to_string()))
}

pub fn resize_luma8(
    src: &GrayImage,
    target_width: u32,
    target_height: u32,
    mode: ResampleMode,
) -> Result<GrayImage> {
    let resize_options = ResizeOptions::new().resize_alg(mode.resize_alg());
    let mut resizer = Resizer::new();

    let src_image = Image::from_vec_u8(
        src.width(),
        src.height(),
        src.as_raw().clone(),
        PixelType::U8,
    )
    .map_err(Error::external)?;
    let mut dst_image = Image::new(target_width, target_height, PixelType::U8);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(Error::external)?;

    GrayImage::from_raw(target_width, target_height, dst_image.into_vec())
        .ok_or_else(|| Error::Processing("resized luma buffer has unexpected length".to_string()))
}

/// Resize whichever working mode the pipeline currently holds.
///
/// The pipeline works in RGBA8 until gray thresholding switches it to
/// single-channel luma; both are resized without a mode change.
pub fn resize_dynamic(
    src: &DynamicImage,
    target_width: u32,
    target_height: u32,
    mode: ResampleMode,
) -> Result<DynamicImage> {
    match src {
        DynamicImage::ImageLuma8(gray) => Ok(DynamicImage::ImageLuma8(resize_luma8(
            gray,
            target_width,
            target_height,
            mode,
        )?)),
        DynamicImage::ImageRgba8(rgba) => Ok(DynamicImage::ImageRgba8(resize_rgba8(
            rgba,
            target_width,
            target_height,
            mode,
        )?)),
        other => {
            let rgba = other.to_rgba8();
            Ok(DynamicImage::ImageRgba8(resize_rgba8(
                &rgba,
                target_width,
                target_height,
                mode,
            )?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn downscale_dimensions_floor() {
        assert_eq!(downscale_dimensions(512, 512, 8), (64, 64));
        assert_eq!(downscale_dimensions(100, 60, 8), (12, 7));
        assert_eq!(downscale_dimensions(100, 60, 1), (100, 60));
        assert_eq!(downscale_dimensions(7, 7, 8), (0, 0));
    }

    #[test]
    fn nearest_downscale_picks_source_pixels() {
        // 2x2 blocks of solid color collapse to the block color under nearest.
        let mut src = RgbaImage::new(4, 4);
        for (x, y, p) in src.enumerate_pixels_mut() {
            let v = if (x / 2 + y / 2) % 2 == 0 { 255 } else { 0 };
            *p = Rgba([v, v, v, 255]);
        }

        let out = resize_rgba8(&src, 2, 2, ResampleMode::Nearest).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        for (x, y, p) in out.enumerate_pixels() {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            assert_eq!(p.0, [v, v, v, 255], "pixel at {x},{y}");
        }
    }

    #[test]
    fn nearest_upscale_expands_into_square_blocks() {
        let mut src = RgbaImage::new(2, 1);
        src.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        src.put_pixel(1, 0, Rgba([200, 210, 220, 255]));

        let out = resize_rgba8(&src, 8, 4, ResampleMode::Nearest).unwrap();
        for (x, _y, p) in out.enumerate_pixels() {
            let expected = if x < 4 {
                [10, 20, 30, 255]
            } else {
                [200, 210, 220, 255]
            };
            assert_eq!(p.0, expected);
        }
    }

    #[test]
    fn luma_resize_keeps_two_tone_under_nearest() {
        let mut src = GrayImage::new(4, 4);
        for (x, _y, p) in src.enumerate_pixels_mut() {
            p.0 = [if x < 2 { 0 } else { 255 }];
        }

        let out = resize_luma8(&src, 8, 8, ResampleMode::Nearest).unwrap();
        assert!(out.pixels().all(|p| p.0 == [0] || p.0 == [255]));
    }
}
