use super::{Dialog, JobPhase, PitchUploader, DEFAULT_SERVER_URL};
use crate::utils::color;
use crate::utils::file_size::format_size;
use eframe::egui::{self, Align, Align2, RichText};
use rfd::FileDialog;

const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "wav", "m4a", "ogg", "flac", "aac"];

impl PitchUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let total_height = ui.available_height();
            let footer_height = 40.0;
            let footer_margin = 15.0;
            let content_height = total_height - footer_height - footer_margin;

            // a dialog blocks everything behind it
            let blocked = self.state.dialog.is_some();

            egui::ScrollArea::vertical()
                .max_height(content_height)
                .show(ui, |ui| {
                    ui.add_enabled_ui(!blocked, |ui| {
                        ui.add_space(20.0);
                        ui.vertical_centered(|ui| {
                            ui.heading("Pitch Analyzer");
                            ui.add_space(5.0);
                            ui.label(
                                RichText::new("Upload a presentation recording for analysis")
                                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
                            );
                        });

                        ui.add_space(20.0);
                        self.render_server_input(ui);
                        ui.add_space(10.0);
                        self.render_file_selection(ui);
                        ui.add_space(20.0);
                        self.render_submit(ui);
                        ui.add_space(20.0);
                        self.render_status(ui);
                        ui.add_space(20.0);
                    });
                });

            ui.with_layout(egui::Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(footer_margin);
                ui.label(
                    RichText::new("Results open in your browser")
                        .small()
                        .color(ui.visuals().text_color().gamma_multiply(0.5)),
                );
            });
        });

        self.render_dialog(ctx);
    }

    fn render_server_input(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                ui.label("Analysis server");
                let editable = !self.state.is_busy();
                ui.add_enabled(
                    editable,
                    egui::TextEdit::singleline(&mut self.server_url)
                        .desired_width(ui.available_width())
                        .hint_text(DEFAULT_SERVER_URL),
                );
            });
        });
    }

    fn render_file_selection(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.horizontal(|ui| {
                let pickable = !self.state.is_busy();
                if ui
                    .add_enabled(pickable, egui::Button::new("🎵 Select Audio File"))
                    .clicked()
                {
                    if let Some(path) = FileDialog::new()
                        .add_filter("Audio", &AUDIO_EXTENSIONS)
                        .pick_file()
                    {
                        self.select_file(path);
                    }
                }
                if let Some(file) = &self.state.selected_file {
                    let name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| file.display().to_string());
                    ui.label(format!(
                        "Selected: {} ({})",
                        name,
                        format_size(self.state.selected_size)
                    ));
                }
            });
        });
    }

    fn render_submit(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            // no second submission while a job is in flight
            let can_submit = self.state.selected_file.is_some()
                && !self.server_url.is_empty()
                && !self.state.is_busy();

            ui.add_enabled_ui(can_submit, |ui| {
                let button =
                    egui::Button::new("📤 Analyze Recording").min_size(egui::vec2(200.0, 40.0));
                if ui.add(button).clicked() {
                    self.submit();
                }
            });
        });
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        let mut reset_clicked = false;
        let mut reopen_url = None;

        match &self.state.phase {
            JobPhase::Idle => {}
            JobPhase::Uploading => {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Processing... the system is analyzing your audio file.");
                    });
                });
            }
            JobPhase::Processing { filename } => {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Analyzing {}... this can take a while.", filename));
                    });
                });
            }
            JobPhase::Complete { result_url } => {
                ui.group(|ui| {
                    ui.colored_label(color::success(), "✅ Analysis complete");
                    if ui
                        .add(
                            egui::Label::new(RichText::new("View results").color(color::accent()))
                                .sense(egui::Sense::click()),
                        )
                        .clicked()
                    {
                        reopen_url = Some(result_url.clone());
                    }
                });
            }
            JobPhase::Failed { message } => {
                ui.group(|ui| {
                    ui.colored_label(color::danger(), format!("❌ {}", message));
                    if ui.button("🔄 Try Again").clicked() {
                        reset_clicked = true;
                    }
                });
            }
        }

        if let Some(url) = reopen_url {
            self.navigate(&url);
        }
        if reset_clicked {
            self.reset();
        }
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.state.dialog.clone() else {
            return;
        };

        let (title, text) = match &dialog {
            Dialog::Warning { text } => ("⚠ Warning", text.clone()),
            Dialog::Success { message, .. } => ("✅ Success!", message.clone()),
            Dialog::Error { text } => ("❌ Analysis Failed", text.clone()),
        };

        let mut dismissed = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.add_space(5.0);
                ui.label(text);
                ui.add_space(10.0);
                ui.vertical_centered(|ui| {
                    if ui
                        .add(egui::Button::new("OK").min_size(egui::vec2(80.0, 28.0)))
                        .clicked()
                    {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.dismiss_dialog();
        }
    }
}
