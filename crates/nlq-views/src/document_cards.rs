//! Card grid for document hits

use egui::{Frame, RichText, Ui};
use nlq_core::DocumentSummary;

use crate::{SessionView, ViewContext, ViewId};

/// Renders document summaries as a grid of cards
pub struct DocumentCardsView {
    id: ViewId,
    title: String,
    pub columns: usize,
}

impl DocumentCardsView {
    pub fn new(id: ViewId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            columns: 3,
        }
    }

    pub fn show(&self, ui: &mut Ui, documents: &[&DocumentSummary]) {
        if documents.is_empty() {
            ui.label("No documents found.");
            return;
        }

        let per_row = self.columns.max(1);
        for chunk in documents.chunks(per_row) {
            ui.columns(per_row, |cols| {
                for (col, doc) in cols.iter_mut().zip(chunk) {
                    Self::card(col, doc);
                }
            });
            ui.add_space(8.0);
        }
    }

    fn card(ui: &mut Ui, doc: &DocumentSummary) {
        let accent = ui.visuals().hyperlink_color;
        Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_height(110.0);
            ui.vertical(|ui| {
                ui.add(egui::Label::new(RichText::new(&doc.title).strong().color(accent)).truncate(true));
                ui.add_space(4.0);
                ui.label(RichText::new(format!("\"{}\"", doc.snippet)).small());
                ui.add_space(8.0);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.label(RichText::new(&doc.source).small().weak());
                });
            });
        });
    }
}

impl SessionView for DocumentCardsView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewContext<'_>, ui: &mut Ui) {
        let documents: Vec<&DocumentSummary> = ctx
            .state
            .last_result()
            .map(|r| r.documents().collect())
            .unwrap_or_default();
        self.show(ui, &documents);
    }
}
