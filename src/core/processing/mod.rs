//! Pixelation primitives: resampling, palette quantization, gray
//! thresholding, and the pipeline that orders them.
pub mod pipeline;
pub mod quantize;
pub mod resize;
pub mod threshold;
