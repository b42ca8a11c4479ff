use image::{ColorType, DynamicImage, Rgba, RgbaImage};
use pixelpost::{
    OutputFormat, PixelateParams, process_directory_to_path, process_image, process_path_to_path,
};

/// Colorful stand-in for a generated image: smooth gradients plus an alpha
/// ramp, so every step of the pipeline has something to chew on.
fn generated_image(size: u32) -> DynamicImage {
    let mut img = RgbaImage::new(size, size);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = Rgba([
            (x * 255 / size.max(1)) as u8,
            (y * 255 / size.max(1)) as u8,
            ((x + y) * 128 / size.max(1)) as u8,
            255,
        ]);
    }
    DynamicImage::ImageRgba8(img)
}

#[test]
fn identity_when_every_flag_is_false() {
    let src = generated_image(64);
    let out = process_image(src.clone(), &PixelateParams::default()).unwrap();

    assert_eq!(out.color(), src.color());
    assert_eq!(out.as_bytes(), src.as_bytes());
}

#[test]
fn pixelate_512_rgba_by_8_with_rescale_is_blocky() {
    let src = generated_image(512);
    let params = PixelateParams {
        pixelate: true,
        downscale_factor: 8,
        rescale: true,
        ..Default::default()
    };

    let out = process_image(src, &params).unwrap();
    assert_eq!((out.width(), out.height()), (512, 512));
    assert_eq!(out.color(), ColorType::Rgba8);

    // Every 8x8 cell is one flat color.
    let rgba = out.to_rgba8();
    for cell_y in 0..64 {
        for cell_x in 0..64 {
            let first = rgba.get_pixel(cell_x * 8, cell_y * 8);
            for dy in 0..8 {
                for dx in 0..8 {
                    assert_eq!(
                        rgba.get_pixel(cell_x * 8 + dx, cell_y * 8 + dy),
                        first,
                        "cell ({cell_x},{cell_y}) is not flat"
                    );
                }
            }
        }
    }
}

#[test]
fn downscale_without_rescale_keeps_floor_dimensions() {
    let src = generated_image(100);
    let params = PixelateParams {
        pixelate: true,
        downscale_factor: 8,
        ..Default::default()
    };

    let out = process_image(src, &params).unwrap();
    assert_eq!((out.width(), out.height()), (12, 12));
}

#[test]
fn palette_limit_bounds_distinct_colors_end_to_end() {
    use std::collections::HashSet;

    let src = generated_image(64);
    let params = PixelateParams {
        palette_limit: true,
        palette_size: 12,
        ..Default::default()
    };

    let out = process_image(src, &params).unwrap().to_rgba8();
    let distinct: HashSet<_> = out.pixels().map(|p| p.0).collect();
    assert!(distinct.len() <= 12, "got {} colors", distinct.len());
}

#[test]
fn full_stack_produces_two_tone_output_at_original_size() {
    let src = generated_image(64);
    let params = PixelateParams {
        pixelate: true,
        downscale_factor: 4,
        rescale: true,
        palette_limit: true,
        palette_size: 8,
        gray_threshold: true,
        gray_threshold_value: 155,
        ..Default::default()
    };

    let out = process_image(src, &params).unwrap();
    assert_eq!((out.width(), out.height()), (64, 64));
    assert_eq!(out.color(), ColorType::Rgba8);
    assert!(
        out.to_rgba8()
            .pixels()
            .all(|p| p.0 == [0, 0, 0, 255] || p.0 == [255, 255, 255, 255])
    );
}

#[test]
fn single_file_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.png");
    let output = dir.path().join("output.png");
    generated_image(32).save(&input).unwrap();

    let params = PixelateParams {
        pixelate: true,
        downscale_factor: 4,
        rescale: true,
        ..Default::default()
    };
    process_path_to_path(&input, &output, &params).unwrap();

    let written = image::open(&output).unwrap();
    assert_eq!((written.width(), written.height()), (32, 32));
}

#[test]
fn jpeg_output_flattens_alpha_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.png");
    let output = dir.path().join("output.jpg");
    generated_image(32).save(&input).unwrap();

    process_path_to_path(&input, &output, &PixelateParams::default()).unwrap();

    let written = image::open(&output).unwrap();
    assert_eq!((written.width(), written.height()), (32, 32));
    assert!(!written.color().has_alpha());
}

#[test]
fn batch_processes_images_and_skips_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir_all(&input_dir).unwrap();

    generated_image(16).save(input_dir.join("a.png")).unwrap();
    generated_image(24).save(input_dir.join("b.png")).unwrap();
    std::fs::write(input_dir.join("notes.txt"), "not an image").unwrap();

    let params = PixelateParams {
        pixelate: true,
        downscale_factor: 2,
        rescale: true,
        ..Default::default()
    };
    let report =
        process_directory_to_path(&input_dir, &output_dir, &params, OutputFormat::Png, true)
            .unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.errors, 0);
    assert!(output_dir.join("a.png").is_file());
    assert!(output_dir.join("b.png").is_file());
}

#[test]
fn batch_counts_undecodable_files_as_errors_when_continuing() {
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("in");
    let output_dir = dir.path().join("out");
    std::fs::create_dir_all(&input_dir).unwrap();

    generated_image(16).save(input_dir.join("good.png")).unwrap();
    std::fs::write(input_dir.join("broken.png"), b"definitely not a png").unwrap();

    let report = process_directory_to_path(
        &input_dir,
        &output_dir,
        &PixelateParams::default(),
        OutputFormat::Png,
        true,
    )
    .unwrap();

    assert_eq!(report.processed, 1);
    assert_eq!(report.errors, 1);
}
