use super::models::PixelpostGui;
use crate::plugin::schema::{FieldKind, FieldSpec};
use crate::types::OutputFormat;
use eframe::egui::{Align, Color32, ComboBox, Frame, Layout, RichText, Slider, Ui};

const COMPONENT_HEIGHT: f32 = 80.0;
const COMPONENT_WIDTH: f32 = 120.0;

pub struct ModeSelectionComponent;

impl ModeSelectionComponent {
    pub fn render(ui: &mut Ui, app: &mut PixelpostGui) {
        ui.heading("Processing Mode");

        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.set_min_height(COMPONENT_HEIGHT * 0.6);
            ui.set_min_width(COMPONENT_WIDTH);
            ui.horizontal(|ui| {
                ui.radio_value(&mut app.batch_mode, false, "Single File");
                ui.radio_value(&mut app.batch_mode, true, "Batch Processing");
            });

            if app.batch_mode {
                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    ui.label("Will skip files that are not images");
                });
            }
        });
    }
}

pub struct FileSelectionComponent;

impl FileSelectionComponent {
    pub fn render_single_file(ui: &mut Ui, app: &mut PixelpostGui) {
        ui.heading("File Selection");

        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.set_min_height(COMPONENT_HEIGHT);
            ui.set_min_width(COMPONENT_WIDTH);

            ui.horizontal(|ui| {
                ui.label("Input Image:");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Browse").clicked() {
                        app.select_input_file();
                    }
                });
            });

            if let Some(path) = &app.input_path {
                ui.label(
                    RichText::new(path.to_string_lossy()).color(Color32::from_rgb(255, 165, 0)),
                );
            } else {
                ui.label(RichText::new("None selected").color(Color32::from_gray(120)));
            }

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label("Output File:");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Browse").clicked() {
                        app.select_output_file();
                    }
                });
            });

            if let Some(path) = &app.output_path {
                ui.label(
                    RichText::new(path.to_string_lossy()).color(Color32::from_rgb(255, 165, 0)),
                );
            } else {
                ui.label(RichText::new("None selected").color(Color32::from_gray(120)));
            }
        });
    }

    pub fn render_batch_mode(ui: &mut Ui, app: &mut PixelpostGui) {
        ui.heading("Batch Processing");

        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.set_min_height(COMPONENT_HEIGHT);
            ui.set_min_width(COMPONENT_WIDTH);

            ui.horizontal(|ui| {
                ui.label("Input Directory:");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Browse").clicked() {
                        app.select_input_directory();
                    }
                });
            });

            if let Some(path) = &app.input_dir_path {
                ui.label(
                    RichText::new(path.to_string_lossy()).color(Color32::from_rgb(255, 165, 0)),
                );
            } else {
                ui.label(RichText::new("None selected").color(Color32::from_gray(120)));
            }

            ui.add_space(10.0);

            ui.horizontal(|ui| {
                ui.label("Output Directory:");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Browse").clicked() {
                        app.select_output_directory();
                    }
                });
            });

            if let Some(path) = &app.output_dir_path {
                ui.label(
                    RichText::new(path.to_string_lossy()).color(Color32::from_rgb(255, 165, 0)),
                );
            } else {
                ui.label(RichText::new("None selected").color(Color32::from_gray(120)));
            }
        });
    }
}

pub struct FormatOptionsComponent;

impl FormatOptionsComponent {
    pub fn render(ui: &mut Ui, app: &mut PixelpostGui) {
        ui.heading("Format Options");

        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.set_min_height(COMPONENT_HEIGHT * 0.6);
            ui.set_min_width(COMPONENT_WIDTH);

            ui.horizontal(|ui| {
                ui.label("Image Format:");
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let old_format = app.output_format;
                    ComboBox::from_id_salt("output_format")
                        .selected_text(app.output_format.to_string())
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut app.output_format, OutputFormat::Png, "PNG");
                            ui.selectable_value(&mut app.output_format, OutputFormat::Jpeg, "JPEG");
                        });

                    // Update output path extension if format changed
                    if app.output_format != old_format {
                        app.update_output_path_extension();
                    }
                });
            });

            ui.add_space(5.0);

            let format_info = match app.output_format {
                OutputFormat::Png => {
                    "Lossless. Keeps the alpha channel and exact palette colors. Recommended."
                }
                OutputFormat::Jpeg => {
                    "Lossy. Flattens transparency and may smear flat color blocks."
                }
            };
            ui.label(
                RichText::new(format_info)
                    .color(Color32::from_gray(120))
                    .size(11.0),
            );
        });
    }
}

/// Renders the pixelation form straight from the plugin's parameter schema.
/// Rows whose `relevant_when` toggle is off are not shown at all, which is
/// the declarative equivalent of the usual checkbox-hides-row wiring.
pub struct ParameterFormComponent;

impl ParameterFormComponent {
    pub fn render(ui: &mut Ui, app: &mut PixelpostGui) {
        ui.heading("Pixelation");

        let schema = app.schema.clone();
        Frame::NONE.inner_margin(0.0).show(ui, |ui| {
            ui.set_min_height(COMPONENT_HEIGHT);
            ui.set_min_width(COMPONENT_WIDTH);

            for field in &schema.fields {
                if !schema.is_relevant(field, &app.values) {
                    continue;
                }
                Self::render_field(ui, app, field);
                ui.add_space(5.0);
            }
        });
    }

    fn render_field(ui: &mut Ui, app: &mut PixelpostGui, field: &FieldSpec) {
        match field.kind {
            FieldKind::Toggle { default } => {
                let mut value = app.values.bool_or(field.id, default);
                if ui
                    .checkbox(&mut value, field.label)
                    .on_hover_text(field.help)
                    .changed()
                {
                    app.values.set_bool(field.id, value);
                }
            }
            FieldKind::IntRange {
                min, max, default, ..
            } => {
                let mut value = app.values.int_or(field.id, default);
                ui.horizontal(|ui| {
                    ui.label(field.label);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui
                            .add(Slider::new(&mut value, min..=max))
                            .on_hover_text(field.help)
                            .changed()
                        {
                            app.values.set_int(field.id, value);
                        }
                    });
                });
            }
            FieldKind::Choice { options, default } => {
                let mut selected = app
                    .values
                    .choice_or(field.id, default)
                    .min(options.len().saturating_sub(1));
                ui.horizontal(|ui| {
                    ui.label(field.label);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let response = ComboBox::from_id_salt(field.id)
                            .selected_text(options[selected])
                            .show_ui(ui, |ui| {
                                let mut changed = false;
                                for (index, name) in options.iter().enumerate() {
                                    if ui
                                        .selectable_value(&mut selected, index, *name)
                                        .clicked()
                                    {
                                        changed = true;
                                    }
                                }
                                changed
                            });
                        if response.inner == Some(true) {
                            app.values.set_choice(field.id, selected);
                        }
                    });
                });
            }
        }
    }
}

pub struct FooterComponent;

impl FooterComponent {
    pub fn render(ui: &mut Ui, app: &mut PixelpostGui) {
        // Update system statistics
        app.update_system_stats();

        ui.horizontal(|ui| {
            // Left side - Timing and system information
            let status_color = if app.is_processing {
                Color32::from_rgb(255, 165, 0) // Orange for processing
            } else {
                Color32::from_rgb(100, 200, 100) // Green for ready
            };

            let timing_text = if app.is_processing {
                if let Some(start_time) = app.processing_start_time {
                    format!("Processing: {:.2?}", start_time.elapsed())
                } else {
                    "Processing...".to_string()
                }
            } else if let Some(duration) = app.last_processing_duration {
                format!("Last run: {:.2?}", duration)
            } else {
                "Ready".to_string()
            };

            ui.label(RichText::new(timing_text).color(status_color).size(14.0));

            ui.separator();

            let cpu_color = if app.cpu_usage > 80.0 {
                Color32::from_rgb(255, 100, 100)
            } else if app.cpu_usage > 50.0 {
                Color32::from_rgb(255, 165, 0)
            } else {
                Color32::from_rgb(100, 200, 100)
            };

            ui.label(
                RichText::new(format!("CPU: {:.1}%", app.cpu_usage))
                    .color(cpu_color)
                    .size(12.0),
            );

            ui.separator();

            let memory_percent = if app.total_memory_mb > 0.0 {
                (app.memory_usage_mb / app.total_memory_mb) * 100.0
            } else {
                0.0
            };

            let memory_color = if memory_percent > 80.0 {
                Color32::from_rgb(255, 100, 100)
            } else if memory_percent > 60.0 {
                Color32::from_rgb(255, 165, 0)
            } else {
                Color32::from_rgb(100, 200, 100)
            };

            ui.label(
                RichText::new(format!(
                    "RAM: {:.1} GB / {:.1} GB ({:.1}%)",
                    app.memory_usage_mb / 1024.0,
                    app.total_memory_mb / 1024.0,
                    memory_percent
                ))
                .color(memory_color)
                .size(12.0),
            );

            // Right side - Buttons
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.button("To CLI").clicked() {
                    let cli_command = app.generate_cli_command();

                    // Special CLI command entry (not a regular log)
                    let cli_entry = crate::gui::logging::LogEntry::new(
                        tracing::Level::INFO,
                        format!("CLI Command: {}", cli_command),
                        "cli".to_string(),
                    );

                    if let Ok(mut logs) = app.log_messages.lock() {
                        logs.push(cli_entry);
                    }
                }

                if ui.button("Save Preset").clicked() {
                    if let Err(e) = app.save_preset() {
                        tracing::error!("Failed to save preset: {}", e);
                    }
                }

                if ui.button("Load Preset").clicked() {
                    if let Err(e) = app.load_preset() {
                        tracing::error!("Failed to load preset: {}", e);
                    }
                }

                if ui.button("Save Logs").clicked() {
                    if let Err(e) = app.save_logs_to_file() {
                        tracing::error!("Failed to save logs: {}", e);
                    }
                }

                if ui.button("Clear").clicked() {
                    if let Ok(mut logs) = app.log_messages.lock() {
                        logs.clear();
                    }
                }

                if ui.button("Reset").clicked() {
                    *app = PixelpostGui::default();
                }
            });
        });
    }
}
