use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Downscale factor out of range: {factor}. Must be between 1 and 32")]
    FactorOutOfRange { factor: u32 },

    #[error("Palette size out of range: {size}. Must be between 0 and 256")]
    PaletteSizeOutOfRange { size: u32 },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processing error: {0}")]
    Processing(#[from] pixelpost::Error),
}
