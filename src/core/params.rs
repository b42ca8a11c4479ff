use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ResampleMode;

/// Pixelation parameters suitable for config files and GUI presets.
///
/// Every step is gated by its own boolean flag plus a validity threshold on
/// its numeric parameter; a value outside the useful range turns the step
/// into a no-op rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelateParams {
    /// Enable the downscale step
    pub pixelate: bool,
    /// Integer downscale factor in [1, 32]; 1 leaves the image untouched
    pub downscale_factor: u32,
    /// Resampling filter for the downscale step
    pub resample_mode: ResampleMode,
    /// Resize back to the pre-downscale dimensions (nearest-neighbor)
    pub rescale: bool,
    /// Enable the color palette limit step
    pub palette_limit: bool,
    /// Maximum palette entries in [0, 256]; values <= 1 leave the image untouched
    pub palette_size: u32,
    /// Enable the gray threshold step
    pub gray_threshold: bool,
    /// Luminance cutoff in [0, 255]; 0 leaves the image untouched
    pub gray_threshold_value: u8,
}

impl Default for PixelateParams {
    fn default() -> Self {
        Self {
            pixelate: false,
            downscale_factor: 8,
            resample_mode: ResampleMode::Nearest,
            rescale: false,
            palette_limit: false,
            palette_size: 16,
            gray_threshold: false,
            gray_threshold_value: 155,
        }
    }
}

impl PixelateParams {
    /// Serialize for preset files.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(Error::external)
    }

    /// Deserialize from preset files.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::external)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_disable_every_step() {
        let params = PixelateParams::default();
        assert!(!params.pixelate);
        assert!(!params.rescale);
        assert!(!params.palette_limit);
        assert!(!params.gray_threshold);
    }

    #[test]
    fn json_preset_round_trip() {
        let params = PixelateParams {
            pixelate: true,
            downscale_factor: 4,
            resample_mode: ResampleMode::Lanczos,
            rescale: true,
            palette_limit: true,
            palette_size: 32,
            gray_threshold: false,
            gray_threshold_value: 0,
        };
        let json = params.to_json().unwrap();
        assert_eq!(PixelateParams::from_json(&json).unwrap(), params);
    }

    #[test]
    fn from_json_rejects_garbage() {
        assert!(PixelateParams::from_json("not a preset").is_err());
    }
}
