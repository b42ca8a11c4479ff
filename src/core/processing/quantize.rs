use image::RgbaImage;
use imagequant::RGBA;

use crate::error::{Error, Result};

/// Reduce `src` to at most `palette_size` representative colors.
///
/// Dithering stays disabled so quantized regions remain flat color blocks
/// instead of noisy gradients. Alpha is part of every palette entry, so
/// transparency survives the remap.
pub fn limit_palette(src: &RgbaImage, palette_size: u32) -> Result<RgbaImage> {
    let (width, height) = src.dimensions();

    let mut attr = imagequant::new();
    attr.set_max_colors(palette_size)?;

    let bitmap: Vec<RGBA> = src
        .pixels()
        .map(|p| RGBA {
            r: p[0],
            g: p[1],
            b: p[2],
            a: p[3],
        })
        .collect();
    let mut img = attr.new_image(bitmap, width as usize, height as usize, 0.0)?;

    let mut res = attr.quantize(&mut img)?;
    res.set_dithering_level(0.0)?;

    let (palette, indexed) = res.remapped(&mut img)?;

    let mut raw = Vec::with_capacity(indexed.len() * 4);
    for idx in indexed {
        let c = palette[idx as usize];
        raw.extend_from_slice(&[c.r, c.g, c.b, c.a]);
    }

    RgbaImage::from_raw(width, height, raw)
        .ok_or_else(|| Error::Processing("remapped palette buffer has unexpected length".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::collections::HashSet;

    fn distinct_colors(img: &RgbaImage) -> usize {
        img.pixels().map(|p| p.0).collect::<HashSet<_>>().len()
    }

    fn gradient_image() -> RgbaImage {
        let mut img = RgbaImage::new(16, 16);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = Rgba([(x * 16) as u8, (y * 16) as u8, ((x + y) * 8) as u8, 255]);
        }
        img
    }

    #[test]
    fn palette_size_bounds_distinct_colors() {
        let src = gradient_image();
        assert!(distinct_colors(&src) > 16);

        let out = limit_palette(&src, 16).unwrap();
        assert_eq!(out.dimensions(), src.dimensions());
        assert!(distinct_colors(&out) <= 16);

        let out = limit_palette(&src, 4).unwrap();
        assert!(distinct_colors(&out) <= 4);
    }

    #[test]
    fn opaque_input_stays_opaque() {
        let out = limit_palette(&gradient_image(), 8).unwrap();
        assert!(out.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn already_flat_image_is_preserved() {
        let src = RgbaImage::from_pixel(8, 8, Rgba([40, 90, 160, 255]));
        let out = limit_palette(&src, 2).unwrap();
        assert_eq!(distinct_colors(&out), 1);
    }
}
