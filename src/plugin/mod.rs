//! Host-facing post-processor contract.
//!
//! A GUI host that wants to offer pixelation as a post-processing step
//! integrates against two things: a parameter form described as pure data
//! (`ParameterSchema`), and a transform over one in-memory image
//! (`PostProcessor::apply`). Nothing here depends on a widget toolkit;
//! conditional row visibility is declared per field and the host renders it
//! however it likes.
pub mod pixelate;
pub mod schema;

pub use pixelate::PixelatePlugin;
pub use schema::{Condition, FieldKind, FieldSpec, ParamValue, ParamValues, ParameterSchema};

use image::DynamicImage;

use crate::error::Result;

/// Per-invocation context owned by the caller.
///
/// Processors that need a heavyweight resource (a decoder, an inference
/// session, a download cache) receive it here for the duration of one
/// `apply` call instead of stashing it in process-wide state; the pipeline
/// itself stays reentrant.
#[derive(Default)]
pub struct ProcessContext<'a> {
    pub resource: Option<&'a dyn std::any::Any>,
}

impl<'a> ProcessContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(resource: &'a dyn std::any::Any) -> Self {
        Self {
            resource: Some(resource),
        }
    }
}

/// A post-processing step a host can offer.
///
/// `describe_parameters` returns the form as data; the host hands the edited
/// values back through `apply` together with the image to transform. The
/// returned image keeps the color mode it arrived in.
pub trait PostProcessor {
    fn name(&self) -> &'static str;

    fn describe_parameters(&self) -> ParameterSchema;

    fn apply(
        &self,
        image: DynamicImage,
        values: &ParamValues,
        ctx: &ProcessContext<'_>,
    ) -> Result<DynamicImage>;
}
