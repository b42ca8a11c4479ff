use clap::Parser;
use std::path::PathBuf;

use pixelpost::core::params::PixelateParams;
use pixelpost::types::OutputFormat;
use pixelpost::ResampleMode;

#[derive(Parser)]
#[command(name = "pixelpost", version, about = "PIXELPOST CLI")]
pub struct CliArgs {
    /// Input image file (single file mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Input directory containing image files (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output filename (single file mode)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Output format for batch mode (png or jpeg)
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Png)]
    pub format: OutputFormat,

    /// Enable the pixelation (downscale) step
    #[arg(long, default_value_t = false)]
    pub pixelate: bool,

    /// Downscale factor (1-32); 1 leaves the image untouched
    #[arg(long, default_value_t = 8)]
    pub downscale: u32,

    /// Resampling filter for the downscale step
    #[arg(long, value_enum, default_value_t = ResampleMode::Nearest)]
    pub resample: ResampleMode,

    /// Resize back to the original dimensions after downscaling
    #[arg(long, default_value_t = false)]
    pub rescale: bool,

    /// Enable the color palette limit step
    #[arg(long, default_value_t = false)]
    pub palette_limit: bool,

    /// Maximum number of palette colors (0-256); values of 1 or less are ignored
    #[arg(long, default_value_t = 16)]
    pub palette_size: u32,

    /// Enable the gray threshold step
    #[arg(long, default_value_t = false)]
    pub gray_threshold: bool,

    /// Luminance cutoff (0-255); 0 leaves the image untouched
    #[arg(long, default_value_t = 155)]
    pub gray_value: u8,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,

    /// Batch mode: continue processing other files when one of them fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,
}

impl CliArgs {
    pub fn params(&self) -> PixelateParams {
        PixelateParams {
            pixelate: self.pixelate,
            downscale_factor: self.downscale,
            resample_mode: self.resample,
            rescale: self.rescale,
            palette_limit: self.palette_limit,
            palette_size: self.palette_size,
            gray_threshold: self.gray_threshold,
            gray_threshold_value: self.gray_value,
        }
    }
}
