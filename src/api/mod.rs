//! High-level, ergonomic library API: run the pixelation pipeline on
//! in-memory images or files, plus batch helpers for directories. Prefer
//! these entrypoints over the low-level processing modules when embedding
//! PIXELPOST in another application.
use std::fs;
use std::path::Path;

use image::{DynamicImage, ImageReader};
use tracing::{info, warn};

use crate::core::params::PixelateParams;
use crate::core::processing::pipeline;
use crate::error::Result;
use crate::types::OutputFormat;

/// Outcome of a batch run.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
}

/// Apply the pixelation pipeline to an in-memory image.
pub fn process_image(image: DynamicImage, params: &PixelateParams) -> Result<DynamicImage> {
    pipeline::apply(image, params)
}

/// Decode `input`, apply the pipeline, and encode the result to `output`.
/// The output format is inferred from the output extension.
pub fn process_path_to_path(input: &Path, output: &Path, params: &PixelateParams) -> Result<()> {
    let image = ImageReader::open(input)?.decode()?;
    let processed = pipeline::apply(image, params)?;
    save_image(&processed, output)
}

/// Encode `image` to `output`, flattening alpha for formats that reject it.
pub fn save_image(image: &DynamicImage, output: &Path) -> Result<()> {
    let jpeg_output = output
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));

    if jpeg_output && image.color().has_alpha() {
        DynamicImage::ImageRgb8(image.to_rgb8()).save(output)?;
    } else {
        image.save(output)?;
    }
    Ok(())
}

const INPUT_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            INPUT_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Process every recognized image file in `input_dir` into `output_dir`.
///
/// Output files keep the input stem and take the extension of `format`.
/// With `continue_on_error`, per-file failures are counted and logged
/// instead of aborting the run.
pub fn process_directory_to_path(
    input_dir: &Path,
    output_dir: &Path,
    params: &PixelateParams,
    format: OutputFormat,
    continue_on_error: bool,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;

    let mut report = BatchReport::default();

    for entry in fs::read_dir(input_dir)? {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() || !is_supported_input(&path) {
            info!("Skipping non-image entry: {:?}", path);
            report.skipped += 1;
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let output_path = output_dir.join(format!("{}.{}", stem, format.extension()));

        info!("Processing: {:?} -> {:?}", path, output_path);
        match process_path_to_path(&path, &output_path, params) {
            Ok(()) => {
                info!("Successfully processed: {:?}\n", path);
                report.processed += 1;
            }
            Err(e) if continue_on_error => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn recognizes_image_extensions_case_insensitively() {
        assert!(is_supported_input(Path::new("a.png")));
        assert!(is_supported_input(Path::new("b.JPG")));
        assert!(!is_supported_input(Path::new("c.txt")));
        assert!(!is_supported_input(Path::new("noext")));
    }

    #[test]
    fn process_image_is_a_thin_pipeline_wrapper() {
        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([1, 2, 3, 255])));
        let out = process_image(src.clone(), &PixelateParams::default()).unwrap();
        assert_eq!(out.as_bytes(), src.as_bytes());
    }
}
