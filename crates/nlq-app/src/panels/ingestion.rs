//! Data ingestion: database connection and document upload

use egui::{Button, ProgressBar, RichText, Ui};
use tracing::info;
use uuid::Uuid;

use nlq_core::{ConnectionStatus, FileHandle, FileRecord, FileStatus, SessionController};
use nlq_data::fixtures::DEFAULT_DESCRIPTOR;
use nlq_ui::{icons, AlertKind};
use nlq_views::{SchemaGraphView, SessionView, ViewContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IngestionTab {
    Connect,
    Upload,
}

pub struct IngestionPanel {
    tab: IngestionTab,
    descriptor: String,
    graph: SchemaGraphView,
}

impl Default for IngestionPanel {
    fn default() -> Self {
        Self {
            tab: IngestionTab::Connect,
            descriptor: DEFAULT_DESCRIPTOR.to_string(),
            graph: SchemaGraphView::new(Uuid::new_v4(), "Database Schema"),
        }
    }
}

impl IngestionPanel {
    /// Switch to the upload tab, used when files are dropped on the window
    pub fn show_uploads(&mut self) {
        self.tab = IngestionTab::Upload;
    }

    pub fn ui(&mut self, ui: &mut Ui, controller: &mut SessionController) {
        ui.horizontal(|ui| {
            ui.selectable_value(
                &mut self.tab,
                IngestionTab::Connect,
                format!("{} Connect Database", icons::DATABASE),
            );
            ui.selectable_value(
                &mut self.tab,
                IngestionTab::Upload,
                format!("{} Upload Documents", icons::FILE),
            );
        });
        ui.separator();

        match self.tab {
            IngestionTab::Connect => self.connect_ui(ui, controller),
            IngestionTab::Upload => Self::upload_ui(ui, controller),
        }
    }

    fn connect_ui(&mut self, ui: &mut Ui, controller: &mut SessionController) {
        let mut connect = false;

        nlq_ui::card(ui, |ui| {
            ui.label(RichText::new("Database Connection").strong());
            ui.add_space(8.0);
            ui.label("Connection string");
            ui.add(
                egui::TextEdit::singleline(&mut self.descriptor)
                    .desired_width(f32::INFINITY)
                    .font(egui::TextStyle::Monospace),
            );
            ui.add_space(8.0);

            let connecting = controller.state().connection.is_connecting();
            ui.horizontal(|ui| {
                let label = if connecting { "Connecting..." } else { "Connect" };
                connect = ui
                    .add_enabled(!connecting && !self.descriptor.trim().is_empty(), Button::new(label))
                    .clicked();
                if connecting {
                    ui.spinner();
                }
            });
        });

        if connect {
            controller.connect(self.descriptor.trim());
        }

        ui.add_space(12.0);
        let state = controller.state();
        match &state.connection {
            ConnectionStatus::Failed(message) => nlq_ui::alert(ui, AlertKind::Error, message),
            ConnectionStatus::Connected => {
                let tables = state.schema().map(|s| s.tables.len()).unwrap_or(0);
                nlq_ui::alert(
                    ui,
                    AlertKind::Success,
                    &format!("Connected. Discovered {tables} tables."),
                );
            }
            ConnectionStatus::Idle | ConnectionStatus::Connecting => {}
        }

        if state.has_schema() {
            ui.add_space(12.0);
            nlq_ui::card(ui, |ui| {
                ui.label(RichText::new(self.graph.title()).strong());
                ui.label(RichText::new("Drag tables to rearrange; hover for columns.").small().weak());
                ui.add_space(8.0);
                self.graph.ui(&ViewContext::new(state), ui);

                if let Some(schema) = state.schema() {
                    ui.add_space(8.0);
                    egui::CollapsingHeader::new("Schema summary")
                        .default_open(false)
                        .show(ui, |ui| {
                            ui.label(RichText::new(schema.describe()).monospace().small());
                        });
                }
            });
        }
    }

    fn upload_ui(ui: &mut Ui, controller: &mut SessionController) {
        let mut picked = Vec::new();

        nlq_ui::card(ui, |ui| {
            ui.label(RichText::new("Document Upload").strong());
            ui.label(
                RichText::new("PDF, DOCX, TXT or CSV up to 10 MB. Drop files anywhere on the window.")
                    .small()
                    .weak(),
            );
            ui.add_space(8.0);
            if ui.button(format!("{} Browse files", icons::FILE)).clicked() {
                if let Some(paths) = rfd::FileDialog::new()
                    .add_filter("Documents", &["pdf", "docx", "txt", "csv"])
                    .pick_files()
                {
                    picked = paths.into_iter().map(FileHandle::from_path).collect();
                }
            }
        });

        if !picked.is_empty() {
            info!("{} file(s) selected", picked.len());
            controller.add_files(picked);
        }

        let files = controller.state().files();
        ui.add_space(12.0);
        if files.is_empty() {
            nlq_ui::alert(ui, AlertKind::Info, "No documents uploaded yet.");
            return;
        }

        nlq_ui::card(ui, |ui| {
            ui.label(RichText::new(format!("Files ({})", files.len())).strong());
            ui.add_space(4.0);
            for record in files {
                Self::file_row(ui, record);
                ui.separator();
            }
        });
    }

    fn file_row(ui: &mut Ui, record: &FileRecord) {
        ui.horizontal(|ui| {
            ui.label(format!("{} {}", icons::FILE, record.file.name));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let (text, color) = match record.status() {
                    FileStatus::Uploading => ("Uploading", nlq_ui::theme::accent_color()),
                    FileStatus::Processing => ("Processing", nlq_ui::theme::warning_color()),
                    FileStatus::Completed => ("✓ Completed", nlq_ui::theme::success_color()),
                    FileStatus::Error => ("✗ Error", nlq_ui::theme::error_color()),
                };
                ui.label(RichText::new(text).color(color));
            });
        });

        if record.status().is_active() {
            ui.add(
                ProgressBar::new(f32::from(record.progress()) / 100.0)
                    .show_percentage()
                    .desired_width(ui.available_width()),
            );
        }
        if let Some(reason) = record.error() {
            ui.label(RichText::new(reason).small().color(nlq_ui::theme::error_color()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_panel_opens_connect_form() {
        let mut panel = IngestionPanel::default();
        assert_eq!(panel.tab, IngestionTab::Connect);
        assert_eq!(panel.descriptor, DEFAULT_DESCRIPTOR);

        panel.show_uploads();
        assert_eq!(panel.tab, IngestionTab::Upload);
    }
}
