//! Small reusable widgets: cards, stat tiles, alerts and badges

use egui::{Color32, Frame, Margin, Response, RichText, Rounding, Stroke, Ui};

use crate::theme;

/// Severity of an inline alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertKind {
    pub fn color(self) -> Color32 {
        match self {
            AlertKind::Info => theme::accent_color(),
            AlertKind::Success => theme::success_color(),
            AlertKind::Warning => theme::warning_color(),
            AlertKind::Error => theme::error_color(),
        }
    }
}

/// A rounded panel matching the window fill
pub fn card<R>(ui: &mut Ui, add_contents: impl FnOnce(&mut Ui) -> R) -> R {
    let visuals = ui.visuals();
    Frame::none()
        .fill(visuals.window_fill)
        .stroke(visuals.widgets.noninteractive.bg_stroke)
        .rounding(Rounding::same(8.0))
        .inner_margin(Margin::same(16.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui)
        })
        .inner
}

/// Headline number with a title and an optional description
pub fn stat_card(ui: &mut Ui, icon: Option<&str>, title: &str, value: &str, description: Option<&str>) {
    card(ui, |ui| {
        ui.horizontal(|ui| {
            if let Some(icon) = icon {
                ui.label(RichText::new(icon).size(28.0));
                ui.add_space(8.0);
            }
            ui.vertical(|ui| {
                ui.label(RichText::new(title).small().weak());
                ui.label(RichText::new(value).size(26.0).strong());
                if let Some(description) = description {
                    ui.label(RichText::new(description).small().weak());
                }
            });
        });
    });
}

/// Colored message box
pub fn alert(ui: &mut Ui, kind: AlertKind, text: &str) {
    let color = kind.color();
    Frame::none()
        .fill(color.gamma_multiply(0.12))
        .stroke(Stroke::new(1.0, color))
        .rounding(Rounding::same(6.0))
        .inner_margin(Margin::same(10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).color(color));
        });
}

/// Small pill with colored text
pub fn badge(ui: &mut Ui, text: &str, color: Color32) -> Response {
    Frame::none()
        .fill(color.gamma_multiply(0.15))
        .rounding(Rounding::same(10.0))
        .inner_margin(Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small().strong().color(color));
        })
        .response
}
