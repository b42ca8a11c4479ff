use super::logging::GuiLogLayer;
use super::models::{PixelpostGui, init_gui_logging};
use crate::api;
use crate::core::params::PixelateParams;
use crate::types::OutputFormat;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::SubscriberExt;

/// GUI-specific errors
#[derive(Debug, Error)]
pub enum GuiError {
    #[error("Error creating output directory: {0}")]
    OutputDirError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Processing error: {0}")]
    Processing(#[from] crate::Error),
}

const IMAGE_FILTER: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

impl PixelpostGui {
    pub fn select_input_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image files", IMAGE_FILTER)
            .pick_file()
        {
            self.input_path = Some(path);
            info!(
                "Selected input file: {:?}",
                self.input_path.as_ref().unwrap()
            );
            trace!("Input path set for single file processing");
        }
    }

    pub fn select_input_directory(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            self.input_dir_path = Some(path);
            info!(
                "Selected input directory: {:?}",
                self.input_dir_path.as_ref().unwrap()
            );
            trace!("Input directory set for batch processing");
        }
    }

    fn path_without_extension(path: &PathBuf) -> PathBuf {
        if let Some(file_name) = path.file_name().and_then(|s| s.to_str()) {
            if let Some(index) = file_name.find('.') {
                let prefix = &file_name[..index];
                if let Some(parent) = path.parent() {
                    return parent.join(prefix);
                } else {
                    return PathBuf::from(prefix);
                }
            }
        }
        path.to_path_buf()
    }

    pub fn select_output_file(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Image files", &["png", "jpg", "jpeg"])
            .save_file()
        {
            // Strip any extension from the user-selected path.
            // The extension is controlled by the format setting.
            let path_without_extension = Self::path_without_extension(&path);

            self.output_path = Some(path_without_extension);
            self.update_output_path_extension();
            info!(
                "Selected output file: {:?}",
                self.output_path.as_ref().unwrap()
            );
            trace!("Output path configured for single file processing");
        }
    }

    pub fn select_output_directory(&mut self) {
        if let Some(path) = rfd::FileDialog::new().pick_folder() {
            self.output_dir_path = Some(path);
            info!(
                "Selected output directory: {:?}",
                self.output_dir_path.as_ref().unwrap()
            );
            trace!("Output directory configured for batch processing");
        }
    }

    /// Update the output path extension based on the current format setting
    pub fn update_output_path_extension(&mut self) {
        if let Some(output_path) = &self.output_path {
            let path_without_extension = Self::path_without_extension(output_path);
            let new_path = path_without_extension.with_extension(self.output_format.extension());
            self.output_path = Some(new_path);
            debug!(
                "Updated output path extension to: {}",
                self.output_format.extension()
            );
        }
    }

    pub fn process_files(&mut self) {
        if self.is_processing {
            debug!("Processing already in progress, ignoring request");
            return;
        }

        trace!("Starting file processing");
        self.is_processing = true;
        self.processing_start_time = Some(Instant::now());
        self.last_processing_duration = None;

        // Always initialize logging so error messages appear in the GUI
        init_gui_logging();
        info!("Processing started");

        // Clone everything the background thread needs
        let input_path = self.input_path.clone();
        let input_dir_path = self.input_dir_path.clone();
        let output_path = self.output_path.clone();
        let output_dir_path = self.output_dir_path.clone();
        let output_format = self.output_format;
        let batch_mode = self.batch_mode;
        let params = self.params();
        let log_messages = self.log_messages.clone();
        let (tx, rx) = std::sync::mpsc::channel();

        debug!("Background processing parameters:");
        debug!("  Batch mode: {}", batch_mode);
        debug!("  Output format: {:?}", output_format);
        debug!("  Params: {:?}", params);

        std::thread::spawn(move || {
            // Set up a subscriber for this thread so messages reach the GUI;
            // ignore the error if one is already installed.
            let subscriber = Registry::default().with(GuiLogLayer::new());
            let _ = tracing::subscriber::set_global_default(subscriber);

            trace!("Background processing thread started");

            let separator = crate::gui::logging::LogEntry::new(
                tracing::Level::INFO,
                "--- Processing Started ---".to_string(),
                "gui".to_string(),
            );
            if let Ok(mut logs) = log_messages.lock() {
                logs.push(separator);
            }

            let result = run_processing(
                batch_mode,
                input_path,
                input_dir_path,
                output_path,
                output_dir_path,
                output_format,
                &params,
            );
            let msg = match result {
                Ok(m) => m,
                Err(e) => {
                    error!("Processing cancelled: {}", e);
                    format!("Error: {}", e)
                }
            };
            let _ = tx.send(msg);
        });

        // Store the receiver for completion notification
        self.completion_receiver = Some(rx);
        info!("Processing started in background thread");
    }
}

fn run_processing(
    batch_mode: bool,
    input_path: Option<PathBuf>,
    input_dir_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    output_dir_path: Option<PathBuf>,
    output_format: OutputFormat,
    params: &PixelateParams,
) -> Result<String, String> {
    let batch_mode = batch_mode && input_dir_path.is_some();
    debug!(
        "Processing mode: {}",
        if batch_mode { "Batch" } else { "Single file" }
    );

    if batch_mode {
        let (input_dir, output_dir) = match (&input_dir_path, &output_dir_path) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                error!("Input and output directories required for batch processing");
                return Err("Input and output directories required".to_string());
            }
        };

        trace!("Starting batch processing");
        if let Err(e) = fs::create_dir_all(output_dir) {
            error!("Error creating output directory: {}", e);
            return Err(GuiError::OutputDirError(e.to_string()).to_string());
        }

        info!("Starting batch processing from directory: {:?}", input_dir);
        info!("Output directory: {:?}", output_dir);

        match api::process_directory_to_path(input_dir, output_dir, params, output_format, true) {
            Ok(report) => {
                info!("Batch processing complete!");
                info!("Processed: {}", report.processed);
                info!("Skipped: {}", report.skipped);
                info!("Errors: {}", report.errors);
                Ok(format!(
                    "Batch processing complete! Processed: {}, Skipped: {}, Errors: {}",
                    report.processed, report.skipped, report.errors
                ))
            }
            Err(e) => {
                error!("Error during batch processing: {}", e);
                Err(format!("Error during batch processing: {}", e))
            }
        }
    } else {
        let (input, output) = match (&input_path, &output_path) {
            (Some(i), Some(o)) => (i, o),
            _ => {
                error!("Input and output files required for single file processing");
                return Err("Input and output files required".to_string());
            }
        };

        trace!("Starting single file processing");
        trace!("Input file: {:?}", input);
        trace!("Output file: {:?}", output);

        match api::process_path_to_path(input, output, params) {
            Ok(()) => {
                info!("Successfully processed: {:?} -> {:?}\n", input, output);
                Ok(format!(
                    "Successfully processed: {:?} -> {:?}\n",
                    input, output
                ))
            }
            Err(e) => {
                warn!("Error processing file: {}", e);
                Err(format!("Error processing file: {}", e))
            }
        }
    }
}
