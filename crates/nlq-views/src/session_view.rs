//! Session view abstraction - base trait for all panels rendered from session state

use egui::Ui;
use nlq_core::SessionState;
use uuid::Uuid;

/// Unique identifier for a view
pub type ViewId = Uuid;

/// Read-only context handed to views while rendering
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub state: &'a SessionState,
}

impl<'a> ViewContext<'a> {
    pub fn new(state: &'a SessionState) -> Self {
        Self { state }
    }
}

/// Base trait for everything drawn from the session (charts, graphs, tables)
pub trait SessionView {
    /// Get the unique ID of this view
    fn id(&self) -> ViewId;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ctx: &ViewContext<'_>, ui: &mut Ui);
}
