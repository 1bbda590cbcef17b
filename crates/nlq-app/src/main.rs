//! Main application entry point

// Hide the console window in Windows release builds
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use std::sync::Arc;

use anyhow::Result;
use eframe::egui::{self, Context};
use tracing::{info, warn};

use nlq_core::{AppSettings, FileHandle, Notifier, SessionController, Theme};
use nlq_data::config::CONFIG_FILE_NAME;
use nlq_data::SimulationConfig;
use nlq_ui::{ShellAction, ShellConfig};

mod panels;

use panels::{DashboardPanel, IngestionPanel, QueryPanel};

/// Storage key holding the persisted theme
const THEME_KEY: &str = "theme";

/// Main application state
struct NlqWorkbenchApp {
    /// Single owner of the session
    controller: SessionController,

    /// Runtime driving the simulated backend
    _runtime: tokio::runtime::Runtime,

    shell: ShellConfig,
    ingestion: IngestionPanel,
    query: QueryPanel,
    dashboard: DashboardPanel,
}

impl NlqWorkbenchApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        config: SimulationConfig,
    ) -> Self {
        let theme = load_theme(cc.storage);
        nlq_ui::apply_theme(&cc.egui_ctx, theme);

        // Background tasks wake the UI through a repaint request
        let ctx = cc.egui_ctx.clone();
        let notifier: Notifier = Arc::new(move || ctx.request_repaint());

        let controller = SessionController::new(
            nlq_data::simulated_backend(&config),
            runtime.handle().clone(),
            AppSettings { theme },
            Some(notifier),
        );

        Self {
            controller,
            _runtime: runtime,
            shell: ShellConfig::default(),
            ingestion: IngestionPanel::default(),
            query: QueryPanel::default(),
            dashboard: DashboardPanel::default(),
        }
    }

    fn handle_shell_action(&mut self, ctx: &Context, frame: &mut eframe::Frame, action: ShellAction) {
        match action {
            ShellAction::SelectView(view) => {
                if let Err(err) = self.controller.select_view(view) {
                    warn!("{}", err);
                }
            }
            ShellAction::ToggleTheme => {
                let theme = self.controller.toggle_theme();
                nlq_ui::apply_theme(ctx, theme);
                if let Some(storage) = frame.storage_mut() {
                    store_theme(storage, theme);
                }
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        let files: Vec<FileHandle> = dropped.iter().filter_map(file_handle_from_drop).collect();
        info!("{} file(s) dropped", files.len());
        if !files.is_empty() {
            self.controller.add_files(files);
            self.ingestion.show_uploads();
        }
    }
}

/// Theme saved by a previous run; unknown values fall back to the default
fn load_theme(storage: Option<&dyn eframe::Storage>) -> Theme {
    storage
        .and_then(|storage| storage.get_string(THEME_KEY))
        .and_then(|value| match value.parse::<Theme>() {
            Ok(theme) => Some(theme),
            Err(err) => {
                warn!("Ignoring stored theme: {}", err);
                None
            }
        })
        .unwrap_or_default()
}

fn store_theme(storage: &mut dyn eframe::Storage, theme: Theme) {
    storage.set_string(THEME_KEY, theme.as_str().to_string());
}

/// Turn a dropped file into a handle; native drops carry a path, web drops carry bytes
fn file_handle_from_drop(file: &egui::DroppedFile) -> Option<FileHandle> {
    if let Some(path) = &file.path {
        return Some(FileHandle::from_path(path.clone()));
    }
    if file.name.is_empty() {
        return None;
    }
    let handle = FileHandle::new(file.name.clone());
    Some(match &file.bytes {
        Some(bytes) => handle.with_size(bytes.len() as u64),
        None => handle,
    })
}

impl eframe::App for NlqWorkbenchApp {
    fn update(&mut self, ctx: &Context, frame: &mut eframe::Frame) {
        self.controller.pump();
        self.handle_dropped_files(ctx);

        let state = self.controller.state();
        let action = nlq_ui::header(ctx, state).or(nlq_ui::sidebar(ctx, state, &self.shell));
        if let Some(action) = action {
            self.handle_shell_action(ctx, frame, action);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| match self.controller.state().active_view() {
                    nlq_core::ActiveView::Ingestion => self.ingestion.ui(ui, &mut self.controller),
                    nlq_core::ActiveView::Query => self.query.ui(ui, &mut self.controller),
                    nlq_core::ActiveView::Dashboard => self.dashboard.ui(ui, self.controller.state()),
                });
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        store_theme(storage, self.controller.state().settings.theme);
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting {}", nlq_ui::APP_TITLE);

    let config = SimulationConfig::load_or_default(CONFIG_FILE_NAME);
    let runtime = tokio::runtime::Runtime::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        default_theme: eframe::Theme::Light,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        nlq_ui::APP_TITLE,
        options,
        Box::new(move |cc| Box::new(NlqWorkbenchApp::new(cc, runtime, config))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStorage {
        values: HashMap<String, String>,
    }

    impl eframe::Storage for MemoryStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.values.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.values.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_theme_defaults_without_storage() {
        assert_eq!(load_theme(None), Theme::Light);
        assert_eq!(load_theme(Some(&MemoryStorage::default())), Theme::Light);
    }

    #[test]
    fn test_stored_theme_is_parsed() {
        let mut storage = MemoryStorage::default();
        storage.values.insert(THEME_KEY.to_string(), "dark".to_string());
        assert_eq!(load_theme(Some(&storage)), Theme::Dark);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back_to_light() {
        let mut storage = MemoryStorage::default();
        storage.values.insert(THEME_KEY.to_string(), "sepia".to_string());
        assert_eq!(load_theme(Some(&storage)), Theme::Light);
    }

    #[test]
    fn test_toggled_theme_survives_restart() {
        let mut storage = MemoryStorage::default();
        let toggled = load_theme(Some(&storage)).toggle();
        store_theme(&mut storage, toggled);

        assert_eq!(storage.values.get(THEME_KEY).map(String::as_str), Some("dark"));
        assert_eq!(load_theme(Some(&storage)), Theme::Dark);
    }

    #[test]
    fn test_web_drop_uses_name_and_byte_count() {
        let dropped = egui::DroppedFile {
            name: "resume.pdf".to_string(),
            bytes: Some(Arc::from(vec![0u8; 42])),
            ..Default::default()
        };
        let handle = file_handle_from_drop(&dropped).unwrap();
        assert_eq!(handle.name, "resume.pdf");
        assert_eq!(handle.size_bytes, Some(42));
        assert_eq!(handle.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_nameless_drop_is_ignored() {
        assert!(file_handle_from_drop(&egui::DroppedFile::default()).is_none());
    }
}
