//! User interface components for the NLQ workbench
//!
//! This crate provides the theme, the application shell (header and
//! sidebar) and a few reusable widgets.

pub mod shell;
pub mod theme;
pub mod widgets;

/// Re-export commonly used types
pub use shell::{header, sidebar, ShellAction, ShellConfig, APP_TITLE};
pub use theme::{apply_theme, Palette};
pub use widgets::{alert, badge, card, stat_card, AlertKind};

// Common icon definitions
pub mod icons {
    pub const DATABASE: &str = "🗄";
    pub const FILE: &str = "📄";
    pub const HISTORY: &str = "🕘";
    pub const TABLE: &str = "📋";
    pub const CACHE: &str = "⚡";
    pub const CLOCK: &str = "⏱";
}
