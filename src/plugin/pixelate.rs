use image::DynamicImage;

use super::schema::{Condition, FieldKind, FieldSpec, ParamValues, ParameterSchema};
use super::{PostProcessor, ProcessContext};
use crate::core::params::PixelateParams;
use crate::core::processing::pipeline;
use crate::error::Result;
use crate::types::ResampleMode;

pub const PIXELATE: &str = "pixelate";
pub const RESCALE: &str = "rescale";
pub const DOWNSCALE: &str = "downscale";
pub const RESAMPLE_MODE: &str = "resample_mode";
pub const PALETTE_LIMIT: &str = "palette_limit";
pub const PALETTE_SIZE: &str = "palette_size";
pub const GRAY_THRESHOLD: &str = "gray_threshold";
pub const GRAY_THRESHOLD_VALUE: &str = "gray_threshold_value";

/// Resample mode names in `ResampleMode` order, for the schema choice field.
pub const RESAMPLE_MODE_NAMES: &[&str] = &["nearest", "bilinear", "bicubic", "hamming", "lanczos"];

fn resample_mode_from_index(index: usize) -> ResampleMode {
    match index {
        1 => ResampleMode::Bilinear,
        2 => ResampleMode::Bicubic,
        3 => ResampleMode::Hamming,
        4 => ResampleMode::Lanczos,
        _ => ResampleMode::Nearest,
    }
}

fn resample_mode_index(mode: ResampleMode) -> usize {
    match mode {
        ResampleMode::Nearest => 0,
        ResampleMode::Bilinear => 1,
        ResampleMode::Bicubic => 2,
        ResampleMode::Hamming => 3,
        ResampleMode::Lanczos => 4,
    }
}

/// The pixelation post-processor.
pub struct PixelatePlugin;

impl PixelatePlugin {
    /// Typed view of a host value record, with defaults for anything the
    /// host left out and numeric values clamped to the schema ranges.
    pub fn params_from_values(values: &ParamValues) -> PixelateParams {
        let defaults = PixelateParams::default();
        PixelateParams {
            pixelate: values.bool_or(PIXELATE, defaults.pixelate),
            downscale_factor: values
                .int_or(DOWNSCALE, i64::from(defaults.downscale_factor))
                .clamp(1, 32) as u32,
            resample_mode: resample_mode_from_index(
                values.choice_or(RESAMPLE_MODE, resample_mode_index(defaults.resample_mode)),
            ),
            rescale: values.bool_or(RESCALE, defaults.rescale),
            palette_limit: values.bool_or(PALETTE_LIMIT, defaults.palette_limit),
            palette_size: values
                .int_or(PALETTE_SIZE, i64::from(defaults.palette_size))
                .clamp(0, 256) as u32,
            gray_threshold: values.bool_or(GRAY_THRESHOLD, defaults.gray_threshold),
            gray_threshold_value: values
                .int_or(
                    GRAY_THRESHOLD_VALUE,
                    i64::from(defaults.gray_threshold_value),
                )
                .clamp(0, 255) as u8,
        }
    }

    /// Value record mirroring `params`, e.g. for loading a preset into a
    /// schema-driven form.
    pub fn values_from_params(params: &PixelateParams) -> ParamValues {
        let mut values = ParamValues::new();
        values
            .set_bool(PIXELATE, params.pixelate)
            .set_bool(RESCALE, params.rescale)
            .set_int(DOWNSCALE, i64::from(params.downscale_factor))
            .set_choice(RESAMPLE_MODE, resample_mode_index(params.resample_mode))
            .set_bool(PALETTE_LIMIT, params.palette_limit)
            .set_int(PALETTE_SIZE, i64::from(params.palette_size))
            .set_bool(GRAY_THRESHOLD, params.gray_threshold)
            .set_int(
                GRAY_THRESHOLD_VALUE,
                i64::from(params.gray_threshold_value),
            );
        values
    }
}

impl PostProcessor for PixelatePlugin {
    fn name(&self) -> &'static str {
        "pixel"
    }

    fn describe_parameters(&self) -> ParameterSchema {
        ParameterSchema {
            fields: vec![
                FieldSpec {
                    id: PIXELATE,
                    label: "Pixelate",
                    help: "Enable or disable pixelation.",
                    kind: FieldKind::Toggle { default: false },
                    relevant_when: None,
                },
                FieldSpec {
                    id: RESCALE,
                    label: "Rescale",
                    help: "Resize back to the original dimensions after downscaling.",
                    kind: FieldKind::Toggle { default: false },
                    relevant_when: Some(Condition::Enabled(PIXELATE)),
                },
                FieldSpec {
                    id: DOWNSCALE,
                    label: "Downscale",
                    help: "Adjust the downscaling factor.",
                    kind: FieldKind::IntRange {
                        min: 1,
                        max: 32,
                        step: 1,
                        default: 8,
                    },
                    relevant_when: Some(Condition::Enabled(PIXELATE)),
                },
                FieldSpec {
                    id: RESAMPLE_MODE,
                    label: "Resample Mode",
                    help: "Filter used for the downscale step.",
                    kind: FieldKind::Choice {
                        options: RESAMPLE_MODE_NAMES,
                        default: 0,
                    },
                    relevant_when: Some(Condition::Enabled(PIXELATE)),
                },
                FieldSpec {
                    id: PALETTE_LIMIT,
                    label: "Color Palette Limit",
                    help: "Enable or disable the palette limit.",
                    kind: FieldKind::Toggle { default: false },
                    relevant_when: None,
                },
                FieldSpec {
                    id: PALETTE_SIZE,
                    label: "Palette Size",
                    help: "Adjust the palette size.",
                    kind: FieldKind::IntRange {
                        min: 0,
                        max: 256,
                        step: 1,
                        default: 16,
                    },
                    relevant_when: Some(Condition::Enabled(PALETTE_LIMIT)),
                },
                FieldSpec {
                    id: GRAY_THRESHOLD,
                    label: "Gray Limit",
                    help: "Enable or disable gray thresholding.",
                    kind: FieldKind::Toggle { default: false },
                    relevant_when: None,
                },
                FieldSpec {
                    id: GRAY_THRESHOLD_VALUE,
                    label: "Gray Limit Value",
                    help: "Adjust the luminance cutoff.",
                    kind: FieldKind::IntRange {
                        min: 0,
                        max: 255,
                        step: 1,
                        default: 155,
                    },
                    relevant_when: Some(Condition::Enabled(GRAY_THRESHOLD)),
                },
            ],
        }
    }

    fn apply(
        &self,
        image: DynamicImage,
        values: &ParamValues,
        _ctx: &ProcessContext<'_>,
    ) -> Result<DynamicImage> {
        pipeline::apply(image, &Self::params_from_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn empty_values_produce_default_params() {
        let params = PixelatePlugin::params_from_values(&ParamValues::new());
        assert_eq!(params, PixelateParams::default());
    }

    #[test]
    fn values_round_trip_through_params() {
        let params = PixelateParams {
            pixelate: true,
            downscale_factor: 12,
            resample_mode: ResampleMode::Hamming,
            rescale: true,
            palette_limit: true,
            palette_size: 64,
            gray_threshold: true,
            gray_threshold_value: 200,
        };
        let values = PixelatePlugin::values_from_params(&params);
        assert_eq!(PixelatePlugin::params_from_values(&values), params);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut values = ParamValues::new();
        values
            .set_int(DOWNSCALE, 1000)
            .set_int(PALETTE_SIZE, -3)
            .set_int(GRAY_THRESHOLD_VALUE, 999);

        let params = PixelatePlugin::params_from_values(&values);
        assert_eq!(params.downscale_factor, 32);
        assert_eq!(params.palette_size, 0);
        assert_eq!(params.gray_threshold_value, 255);
    }

    #[test]
    fn schema_hides_sliders_until_their_toggle_is_on() {
        let plugin = PixelatePlugin;
        let schema = plugin.describe_parameters();
        let downscale = *schema.field(DOWNSCALE).unwrap();

        let mut values = ParamValues::new();
        assert!(!schema.is_relevant(&downscale, &values));
        values.set_bool(PIXELATE, true);
        assert!(schema.is_relevant(&downscale, &values));
    }

    #[test]
    fn apply_honors_the_host_record() {
        let plugin = PixelatePlugin;
        let mut values = ParamValues::new();
        values
            .set_bool(PIXELATE, true)
            .set_int(DOWNSCALE, 4)
            .set_bool(RESCALE, true);

        let src = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            32,
            32,
            Rgba([120, 60, 30, 255]),
        ));
        let out = plugin
            .apply(src, &values, &ProcessContext::new())
            .unwrap();
        assert_eq!((out.width(), out.height()), (32, 32));
    }
}
