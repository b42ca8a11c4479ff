#![doc = r#"
PIXELPOST — a pixel-art post-processing toolkit for generated images.

This crate turns an ordinary raster image into pixel art: integer downscale,
optional color-palette quantization, optional gray thresholding, and an
optional hard-edge rescale back to the original size. It powers the PIXELPOST
CLI and GUI, and can be embedded in your own Rust applications — either
through the plain function API or through the host-agnostic post-processor
plugin contract.

Stability
---------
The public library API is experimental in initial releases. It is built on
top of a working MVP used by the CLI/GUI and is robust, but may evolve as the
crate stabilizes. Breaking changes can occur.

Add dependency
--------------
```toml
[dependencies]
pixelpost = { version = "0.1", features = ["full"] }
```

Quick start: pixelate a file
----------------------------
```rust,no_run
use std::path::Path;
use pixelpost::{process_path_to_path, PixelateParams, ResampleMode};

fn main() -> pixelpost::Result<()> {
    let params = PixelateParams {
        pixelate: true,
        downscale_factor: 8,
        resample_mode: ResampleMode::Nearest,
        rescale: true,
        palette_limit: true,
        palette_size: 16,
        gray_threshold: false,
        gray_threshold_value: 0,
    };

    process_path_to_path(
        Path::new("/images/generated.png"),
        Path::new("/out/pixelated.png"),
        &params,
    )
}
```

Process in-memory images
------------------------
```rust
use image::{DynamicImage, RgbaImage};
use pixelpost::{process_image, PixelateParams};

fn main() -> pixelpost::Result<()> {
    let img = DynamicImage::ImageRgba8(RgbaImage::new(512, 512));

    let params = PixelateParams {
        pixelate: true,
        rescale: true,
        ..Default::default()
    };

    // Same dimensions and color mode as the input, blocky content.
    let out = process_image(img, &params)?;
    assert_eq!((out.width(), out.height()), (512, 512));
    Ok(())
}
```

Embedding as a host plugin
--------------------------
Hosts that render their own parameter forms integrate against the
[`plugin::PostProcessor`] trait: the parameter form is described as pure data
(including which rows are only relevant while a toggle is on), and values come
back as a flat record.

```rust
use image::{DynamicImage, RgbaImage};
use pixelpost::plugin::{ParamValues, PixelatePlugin, PostProcessor, ProcessContext};

fn main() -> pixelpost::Result<()> {
    let plugin = PixelatePlugin;
    let schema = plugin.describe_parameters();
    assert!(schema.field("downscale").is_some());

    let mut values = ParamValues::new();
    values.set_bool("pixelate", true).set_bool("rescale", true);

    let img = DynamicImage::ImageRgba8(RgbaImage::new(64, 64));
    let out = plugin.apply(img, &values, &ProcessContext::new())?;
    assert_eq!((out.width(), out.height()), (64, 64));
    Ok(())
}
```

Batch helpers
-------------
```rust,no_run
use std::path::Path;
use pixelpost::{process_directory_to_path, OutputFormat, PixelateParams};

fn main() -> pixelpost::Result<()> {
    let params = PixelateParams {
        pixelate: true,
        rescale: true,
        ..Default::default()
    };

    let report = process_directory_to_path(
        Path::new("/images"),
        Path::new("/out"),
        &params,
        OutputFormat::Png,
        true, // continue_on_error
    )?;

    println!(
        "processed={} skipped={} errors={}",
        report.processed, report.skipped, report.errors
    );
    Ok(())
}
```

Error handling
--------------
All public functions return `pixelpost::Result<T>`; match on
`pixelpost::Error` to handle specific cases, e.g. codec or quantizer errors.

```rust,no_run
use std::path::Path;
use pixelpost::{process_path_to_path, Error, PixelateParams};

fn main() {
    let params = PixelateParams::default();
    match process_path_to_path(Path::new("/bad/path.png"), Path::new("/out.png"), &params) {
        Ok(()) => {}
        Err(Error::Image(e)) => eprintln!("Image error: {e}"),
        Err(Error::Quantize(e)) => eprintln!("Quantizer error: {e}"),
        Err(other) => eprintln!("Other error: {other}"),
    }
}
```

Feature flags
-------------
- `gui`: builds the GUI crate module.
- `full`: enables a complete feature set for typical end-to-end workflows.

Useful modules
--------------
- [`api`] — high-level, ergonomic entry points.
- [`plugin`] — host-facing post-processor contract and parameter schema.
- [`types`] — enums and core types (e.g. `ResampleMode`, `OutputFormat`).
- [`error`] — crate-level `Error` and `Result`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod plugin;
pub mod types;

// GUI module (only available with gui feature)
#[cfg(feature = "gui")]
pub mod gui;

// Curated public API surface
// Types
pub use crate::core::params::PixelateParams;
pub use error::{Error, Result};
pub use types::{OutputFormat, ResampleMode};

// Plugin contract
pub use plugin::{ParamValues, ParameterSchema, PixelatePlugin, PostProcessor, ProcessContext};

// High-level API re-exports
pub use api::{
    BatchReport, process_directory_to_path, process_image, process_path_to_path, save_image,
};
