//! Shared types and enums used across PIXELPOST.
//! Includes the resampling filter selection (`ResampleMode`) and the
//! output encoding (`OutputFormat`).
use clap::ValueEnum;
use fast_image_resize::{FilterType, ResizeAlg};
use serde::{Deserialize, Serialize};

/// Resampling filter used by the downscale step.
///
/// `Nearest` is the default: it copies source pixels verbatim and keeps the
/// hard block edges that make an image read as "pixelated". The convolution
/// filters trade those edges for smoother color averaging.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Serialize, Deserialize)]
pub enum ResampleMode {
    Nearest,
    Bilinear,
    Bicubic,
    Hamming,
    Lanczos,
}

impl ResampleMode {
    /// Fixed lookup from mode to the resize algorithm constant.
    pub fn resize_alg(self) -> ResizeAlg {
        match self {
            ResampleMode::Nearest => ResizeAlg::Nearest,
            ResampleMode::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResampleMode::Bicubic => ResizeAlg::Convolution(FilterType::CatmullRom),
            ResampleMode::Hamming => ResizeAlg::Convolution(FilterType::Hamming),
            ResampleMode::Lanczos => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

impl Default for ResampleMode {
    fn default() -> Self {
        ResampleMode::Nearest
    }
}

impl std::fmt::Display for ResampleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResampleMode::Nearest => "nearest",
            ResampleMode::Bilinear => "bilinear",
            ResampleMode::Bicubic => "bicubic",
            ResampleMode::Hamming => "hamming",
            ResampleMode::Lanczos => "lanczos",
        };
        write!(f, "{}", s)
    }
}

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Debug,
    ValueEnum,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum OutputFormat {
    Png,
    Jpeg, // Lossy, flattens alpha
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Png => write!(f, "PNG"),
            OutputFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}
