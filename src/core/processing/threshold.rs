use image::{DynamicImage, GrayImage, Luma};

/// Binarize `src` into a strict two-tone luma image.
///
/// The image is first reduced to 8-bit luminance; any pixel with luminance
/// at or below `threshold` becomes black (0), every other pixel white (255).
/// This is a hard cutoff, not a curve.
pub fn gray_threshold(src: &DynamicImage, threshold: u8) -> GrayImage {
    let gray = src.to_luma8();
    let (width, height) = gray.dimensions();

    let mut bw = GrayImage::from_pixel(width, height, Luma([255u8]));
    for (x, y, p) in gray.enumerate_pixels() {
        if p[0] <= threshold {
            bw.put_pixel(x, y, Luma([0u8]));
        }
    }
    bw
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    // Gray pixels (v, v, v) keep luminance exactly v under the luma weights,
    // which makes the cutoff boundary testable without rounding slack.
    fn gray_ramp() -> DynamicImage {
        let mut img = RgbaImage::new(256, 1);
        for (x, _y, p) in img.enumerate_pixels_mut() {
            let v = x as u8;
            *p = Rgba([v, v, v, 255]);
        }
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn output_is_strictly_two_tone() {
        let bw = gray_threshold(&gray_ramp(), 155);
        assert!(bw.pixels().all(|p| p.0 == [0] || p.0 == [255]));
    }

    #[test]
    fn cutoff_is_inclusive_at_the_threshold() {
        let bw = gray_threshold(&gray_ramp(), 155);
        assert_eq!(bw.get_pixel(155, 0).0, [0]);
        assert_eq!(bw.get_pixel(156, 0).0, [255]);
    }

    #[test]
    fn pixel_is_black_iff_luminance_at_most_threshold() {
        let bw = gray_threshold(&gray_ramp(), 42);
        for (x, _y, p) in bw.enumerate_pixels() {
            let expected = if x <= 42 { [0] } else { [255] };
            assert_eq!(p.0, expected, "pixel at x={x}");
        }
    }

    #[test]
    fn dimensions_match_the_source() {
        let src = DynamicImage::ImageRgba8(RgbaImage::new(13, 7));
        assert_eq!(gray_threshold(&src, 100).dimensions(), (13, 7));
    }
}
