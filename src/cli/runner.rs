use tracing::info;

use pixelpost::api::{process_directory_to_path, process_path_to_path};

use super::args::CliArgs;
use super::errors::AppError;

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    if args.downscale == 0 || args.downscale > 32 {
        return Err(AppError::FactorOutOfRange {
            factor: args.downscale,
        }
        .into());
    }
    if args.palette_size > 256 {
        return Err(AppError::PaletteSizeOutOfRange {
            size: args.palette_size,
        }
        .into());
    }

    let params = args.params();
    let batch_mode = args.batch || args.input_dir.is_some();

    if batch_mode {
        let input_dir = args.input_dir.ok_or(AppError::MissingArgument {
            arg: "--input-dir".to_string(),
        })?;
        let output_dir = args.output_dir.ok_or(AppError::MissingArgument {
            arg: "--output-dir".to_string(),
        })?;

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        let report =
            process_directory_to_path(&input_dir, &output_dir, &params, args.format, true)?;

        info!("Batch processing complete!");
        info!("Processed: {}", report.processed);
        info!("Skipped: {}", report.skipped);
        info!("Errors: {}", report.errors);
    } else {
        let input = args.input.ok_or(AppError::MissingArgument {
            arg: "--input".to_string(),
        })?;
        let output = args.output.ok_or(AppError::MissingArgument {
            arg: "--output".to_string(),
        })?;

        process_path_to_path(&input, &output, &params)?;
        info!("Successfully processed: {:?} -> {:?}\n", input, output);
    }

    Ok(())
}
