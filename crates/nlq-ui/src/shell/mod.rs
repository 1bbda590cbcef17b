use egui::{Context, RichText, SelectableLabel, SidePanel, TopBottomPanel};
use nlq_core::{ActiveView, SessionState, Theme};

use crate::theme;

/// Title shown in the header and the window bar
pub const APP_TITLE: &str = "NLP Query";

/// What the user asked for through the shell this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellAction {
    SelectView(ActiveView),
    ToggleTheme,
}

/// Shell configuration
pub struct ShellConfig {
    pub sidebar_width: f32,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            sidebar_width: 200.0,
        }
    }
}

fn view_icon(view: ActiveView) -> &'static str {
    match view {
        ActiveView::Ingestion => "🗄",
        ActiveView::Query => "🔍",
        ActiveView::Dashboard => "📊",
    }
}

fn theme_icon(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "🌙",
        Theme::Dark => "☀",
    }
}

/// Render the header bar with the title and the theme toggle
pub fn header(ctx: &Context, state: &SessionState) -> Option<ShellAction> {
    let mut action = None;
    TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.heading(state.active_view().label());

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme = state.settings.theme;
                let hint = if theme.is_dark() {
                    "Switch to light theme"
                } else {
                    "Switch to dark theme"
                };
                if ui.button(theme_icon(theme)).on_hover_text(hint).clicked() {
                    action = Some(ShellAction::ToggleTheme);
                }
            });
        });
        ui.add_space(4.0);
    });
    action
}

/// Render the sidebar; views needing a schema stay disabled until one exists
pub fn sidebar(ctx: &Context, state: &SessionState, config: &ShellConfig) -> Option<ShellAction> {
    let mut action = None;
    SidePanel::left("sidebar")
        .exact_width(config.sidebar_width)
        .resizable(false)
        .show(ctx, |ui| {
            ui.add_space(12.0);
            ui.label(
                RichText::new(APP_TITLE)
                    .heading()
                    .strong()
                    .color(theme::accent_color()),
            );
            ui.add_space(16.0);

            for view in ActiveView::ALL {
                let available = state.is_view_available(view);
                let selected = state.active_view() == view;
                let text = format!("{}  {}", view_icon(view), view.label());

                let response = ui.add_enabled(
                    available,
                    SelectableLabel::new(selected, RichText::new(text).size(15.0)),
                );
                let response = if available {
                    response
                } else {
                    response.on_disabled_hover_text("Connect to a database first")
                };
                if response.clicked() && !selected {
                    action = Some(ShellAction::SelectView(view));
                }
                ui.add_space(4.0);
            }
        });
    action
}
