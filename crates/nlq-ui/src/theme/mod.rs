use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use nlq_core::Theme;
use std::collections::BTreeMap;

/// Colors that differ between the light and dark themes
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub widget: Color32,
    pub hover: Color32,
    pub active: Color32,
    pub border: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub code_bg: Color32,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                background: Color32::from_rgb(17, 24, 39),
                panel: Color32::from_rgb(31, 41, 55),
                widget: Color32::from_rgb(55, 65, 81),
                hover: Color32::from_rgb(75, 85, 99),
                active: Color32::from_rgb(90, 100, 115),
                border: Color32::from_rgb(75, 85, 99),
                text: Color32::from_rgb(229, 231, 235),
                text_secondary: Color32::from_rgb(156, 163, 175),
                code_bg: Color32::from_rgb(17, 24, 39),
            },
            Theme::Light => Self {
                background: Color32::from_rgb(243, 244, 246),
                panel: Color32::WHITE,
                widget: Color32::from_rgb(249, 250, 251),
                hover: Color32::from_rgb(229, 231, 235),
                active: Color32::from_rgb(209, 213, 219),
                border: Color32::from_rgb(209, 213, 219),
                text: Color32::from_rgb(17, 24, 39),
                text_secondary: Color32::from_rgb(107, 114, 128),
                code_bg: Color32::from_rgb(243, 244, 246),
            },
        }
    }
}

/// Apply the light or dark application theme
pub fn apply_theme(ctx: &Context, theme: Theme) {
    tracing::debug!("Applying {} theme", theme.as_str());
    let mut style = Style::default();
    let mut visuals = if theme.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    };
    let palette = Palette::for_theme(theme);
    let accent = accent_color();

    // Window and panel styling
    visuals.window_fill = palette.panel;
    visuals.panel_fill = palette.panel;
    visuals.extreme_bg_color = palette.background;
    visuals.faint_bg_color = palette.widget;

    // Widget styling
    let rounding = Rounding::same(6.0);
    visuals.widgets.noninteractive.bg_fill = palette.panel;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, palette.border);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.noninteractive.rounding = rounding;

    visuals.widgets.inactive.bg_fill = palette.widget;
    visuals.widgets.inactive.weak_bg_fill = palette.widget;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, palette.border);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.inactive.rounding = rounding;

    visuals.widgets.hovered.bg_fill = palette.hover;
    visuals.widgets.hovered.weak_bg_fill = palette.hover;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.hovered.rounding = rounding;

    visuals.widgets.active.bg_fill = palette.active;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, palette.text);
    visuals.widgets.active.rounding = rounding;

    // Selection and highlighting
    visuals.selection.bg_fill = accent;
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(29, 78, 216));

    visuals.hyperlink_color = accent;
    visuals.code_bg_color = palette.code_bg;

    // Spacing
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 5.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    // Font sizes
    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    style.visuals = visuals;
    ctx.set_style(style);
}

/// Primary accent color
pub fn accent_color() -> Color32 {
    Color32::from_rgb(59, 130, 246)
}

/// Color of error text and alerts
pub fn error_color() -> Color32 {
    Color32::from_rgb(239, 68, 68)
}

/// Color of warnings
pub fn warning_color() -> Color32 {
    Color32::from_rgb(217, 119, 6)
}

/// Color of success states
pub fn success_color() -> Color32 {
    Color32::from_rgb(34, 197, 94)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_differ() {
        let light = Palette::for_theme(Theme::Light);
        let dark = Palette::for_theme(Theme::Dark);
        assert_ne!(light.panel, dark.panel);
        assert_ne!(light.text, dark.text);
    }

    #[test]
    fn test_apply_theme_sets_dark_mode() {
        let ctx = Context::default();
        apply_theme(&ctx, Theme::Dark);
        assert!(ctx.style().visuals.dark_mode);
        apply_theme(&ctx, Theme::Light);
        assert!(!ctx.style().visuals.dark_mode);
    }
}
