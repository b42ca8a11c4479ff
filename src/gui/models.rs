use crate::core::params::PixelateParams;
use crate::gui::logging::{GuiLogLayer, LogEntry};
use crate::plugin::schema::{ParamValues, ParameterSchema};
use crate::plugin::{PixelatePlugin, PostProcessor};
use crate::types::OutputFormat;
use once_cell::sync::OnceCell;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use sysinfo;
use tracing::Level;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

static LOGGING_INIT: OnceCell<()> = OnceCell::new();

pub fn init_gui_logging() {
    LOGGING_INIT.get_or_init(|| {
        let gui_layer = GuiLogLayer::new();

        // Keep eframe/winit internals from flooding the TRACE view.
        let filter = EnvFilter::new("trace")
            .add_directive("eframe=info".parse().unwrap())
            .add_directive("winit=info".parse().unwrap());

        let subscriber = Registry::default().with(gui_layer).with(filter);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

pub struct PixelpostGui {
    // Input parameters
    pub input_path: Option<PathBuf>,
    pub input_dir_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub output_dir_path: Option<PathBuf>,

    // Pixelation parameters, edited through the schema-driven form
    pub schema: ParameterSchema,
    pub values: ParamValues,

    // Format parameters
    pub output_format: OutputFormat,

    // Options
    pub batch_mode: bool,
    pub min_log_level: Level,

    // Status
    pub is_processing: bool,
    pub processing_start_time: Option<Instant>,
    pub last_processing_duration: Option<Duration>,

    // Log messages for the central panel - thread-safe
    pub log_messages: Arc<Mutex<Vec<LogEntry>>>,

    // Receiver for completion notification from background processing
    pub completion_receiver: Option<std::sync::mpsc::Receiver<String>>,

    // System monitoring
    pub cpu_usage: f32,
    pub memory_usage_mb: f64,
    pub total_memory_mb: f64,
    pub system_monitor: Option<sysinfo::System>,
    pub last_system_update: Option<Instant>,
}

impl Default for PixelpostGui {
    fn default() -> Self {
        Self {
            input_path: None,
            input_dir_path: None,
            output_path: None,
            output_dir_path: None,
            schema: PixelatePlugin.describe_parameters(),
            values: ParamValues::new(),
            output_format: OutputFormat::Png,
            batch_mode: false,
            min_log_level: Level::INFO,
            is_processing: false,
            processing_start_time: None,
            last_processing_duration: None,
            log_messages: Arc::new(Mutex::new(Vec::new())),
            completion_receiver: None,
            cpu_usage: 0.0,
            memory_usage_mb: 0.0,
            total_memory_mb: 0.0,
            system_monitor: None,
            last_system_update: None,
        }
    }
}

impl PixelpostGui {
    /// Typed parameters for the current form state.
    pub fn params(&self) -> PixelateParams {
        PixelatePlugin::params_from_values(&self.values)
    }

    pub fn save_logs_to_file(&self) -> Result<(), Box<dyn std::error::Error>> {
        let logs = self
            .log_messages
            .lock()
            .map_err(|e| format!("Failed to lock logs: {}", e))?;

        if logs.is_empty() {
            return Err("No logs to save".into());
        }

        let filtered_logs: Vec<&LogEntry> = logs
            .iter()
            .filter(|entry| {
                if self.min_log_level == Level::TRACE {
                    // Show all logs when ALL is selected
                    true
                } else {
                    entry.level == self.min_log_level
                }
            })
            .collect();

        if filtered_logs.is_empty() {
            return Err("No logs match the current filter level".into());
        }

        if let Some(save_path) = rfd::FileDialog::new()
            .add_filter("PIXELPOST Log files", &["pixellog"])
            .set_file_name("pixelpost_log.pixellog")
            .save_file()
        {
            let mut log_content = String::new();
            log_content.push_str("=== PIXELPOST Log File ===\n");
            log_content.push_str(&format!("Generated: {}\n", chrono::Utc::now().to_rfc3339()));
            log_content.push_str(&format!(
                "Filter Level: {}\n",
                match self.min_log_level {
                    Level::ERROR => "ERROR",
                    Level::WARN => "WARN",
                    Level::INFO => "INFO",
                    Level::DEBUG => "DEBUG",
                    Level::TRACE => "ALL",
                }
            ));
            log_content.push_str(&format!("Total Logs: {}\n", filtered_logs.len()));
            log_content.push_str("==========================\n\n");

            for entry in &filtered_logs {
                log_content.push_str(&format!(
                    "[{}] {} {}: {}\n",
                    entry.timestamp, entry.level, entry.target, entry.message
                ));
            }

            fs::write(&save_path, log_content)?;

            tracing::info!(
                "Filtered logs saved to: {:?} ({} entries)",
                save_path,
                filtered_logs.len()
            );

            Ok(())
        } else {
            Err("No save location selected".into())
        }
    }

    pub fn save_preset(&self) -> Result<(), Box<dyn std::error::Error>> {
        let params = self.params();

        if let Some(save_path) = rfd::FileDialog::new()
            .add_filter("PIXELPOST Preset files", &["pixelpost"])
            .set_file_name("pixelpost_preset.pixelpost")
            .save_file()
        {
            let mut preset_content = String::new();
            preset_content.push_str("// ==========================================\n");
            preset_content.push_str("// PIXELPOST Configuration Preset\n");
            preset_content.push_str("// ==========================================\n");
            preset_content.push_str(&format!("// Version: {}\n", env!("CARGO_PKG_VERSION")));
            preset_content.push_str(&format!(
                "// Generated: {}\n",
                chrono::Utc::now().to_rfc3339()
            ));
            preset_content.push_str("// Note: Input/Output paths are not included in presets\n");
            preset_content.push_str("// ==========================================\n\n");

            preset_content.push_str(&params.to_json()?);

            fs::write(&save_path, preset_content)?;

            tracing::info!("Preset saved to: {:?}", save_path);
            Ok(())
        } else {
            Err("No save location selected".into())
        }
    }

    pub fn load_preset(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(load_path) = rfd::FileDialog::new()
            .add_filter("PIXELPOST Preset files", &["pixelpost"])
            .pick_file()
        {
            let content = fs::read_to_string(&load_path)?;

            // Skip the comment header by finding the first '{' character
            let json_start = content
                .find('{')
                .ok_or("Invalid preset file: no JSON content found")?;
            let params = PixelateParams::from_json(&content[json_start..])?;

            self.values = PixelatePlugin::values_from_params(&params);

            tracing::info!("Preset loaded from: {:?}", load_path);
            Ok(())
        } else {
            Err("No preset file selected".into())
        }
    }

    pub fn generate_cli_command(&self) -> String {
        let params = self.params();
        let mut cmd = String::from("cargo run --release --bin pixelpost --");

        // Add input/output paths depending on the mode to avoid mixing single and batch flags
        if self.batch_mode {
            if let Some(input_dir) = &self.input_dir_path {
                cmd.push_str(&format!(" --input-dir {:?}", input_dir));
            }
            if let Some(output_dir) = &self.output_dir_path {
                cmd.push_str(&format!(" --output-dir {:?}", output_dir));
            }
            cmd.push_str(&format!(" --format {:?}", self.output_format).to_lowercase());
        } else {
            if let Some(input_path) = &self.input_path {
                cmd.push_str(&format!(" --input {:?}", input_path));
            }
            if let Some(output_path) = &self.output_path {
                cmd.push_str(&format!(" --output {:?}", output_path));
            }
        }

        if params.pixelate {
            cmd.push_str(" --pixelate");
            cmd.push_str(&format!(" --downscale {}", params.downscale_factor));
            cmd.push_str(&format!(" --resample {}", params.resample_mode));
        }
        if params.rescale {
            cmd.push_str(" --rescale");
        }
        if params.palette_limit {
            cmd.push_str(" --palette-limit");
            cmd.push_str(&format!(" --palette-size {}", params.palette_size));
        }
        if params.gray_threshold {
            cmd.push_str(" --gray-threshold");
            cmd.push_str(&format!(" --gray-value {}", params.gray_threshold_value));
        }

        if self.batch_mode {
            cmd.push_str(" --batch");
        }
        // we always want to log
        cmd.push_str(" --log");

        cmd
    }

    /// Update system statistics (CPU and memory usage)
    pub fn update_system_stats(&mut self) {
        // Only update every 2 seconds to avoid excessive system calls
        let now = Instant::now();
        if let Some(last_update) = self.last_system_update {
            if now.duration_since(last_update).as_secs() < 2 {
                return;
            }
        }

        if self.system_monitor.is_none() {
            self.system_monitor = Some(sysinfo::System::new_all());
        }

        if let Some(ref mut sys) = self.system_monitor {
            sys.refresh_all();

            self.cpu_usage = sys.global_cpu_usage();
            self.memory_usage_mb = sys.used_memory() as f64 / 1024.0 / 1024.0;
            self.total_memory_mb = sys.total_memory() as f64 / 1024.0 / 1024.0;
        }

        self.last_system_update = Some(now);
    }
}
