//! Core processing building blocks: the pixelation pipeline and its
//! resize/quantize/threshold primitives. These are internal primitives
//! consumed by the high-level `api` module and the plugin contract.
pub mod params;
pub mod processing;
