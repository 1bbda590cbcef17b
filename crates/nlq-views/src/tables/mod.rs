//! Table view for structured query results

use egui::Ui;
use egui_extras::{Column, TableBuilder};
use nlq_core::{QueryResult, Row};
use serde_json::Value;

use crate::{SessionView, ViewContext, ViewId};

/// Configuration for table views
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub resizable_columns: bool,
    pub striped_rows: bool,
    pub max_rows_displayed: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            resizable_columns: true,
            striped_rows: true,
            max_rows_displayed: 1000,
        }
    }
}

/// Header text for a column name
pub fn header_label(column: &str) -> String {
    column.replace('_', " ")
}

/// Display text for one cell
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders the structured rows of the last result
pub struct ResultsTableView {
    id: ViewId,
    title: String,
    pub config: TableConfig,
}

impl ResultsTableView {
    pub fn new(id: ViewId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            config: TableConfig::default(),
        }
    }

    pub fn show(&self, ui: &mut Ui, columns: &[String], rows: &[&Row]) {
        if rows.is_empty() {
            ui.label("No results found.");
            return;
        }

        ui.push_id(self.id, |ui| {
            let text_height = egui::TextStyle::Body.resolve(ui.style()).size * 1.5;
            let num_rows = rows.len().min(self.config.max_rows_displayed);

            let mut builder = TableBuilder::new(ui)
                .striped(self.config.striped_rows)
                .resizable(self.config.resizable_columns)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .min_scrolled_height(0.0)
                .vscroll(true);

            for _ in columns {
                builder = builder.column(
                    Column::initial(180.0)
                        .at_least(80.0)
                        .clip(true)
                        .resizable(self.config.resizable_columns),
                );
            }

            builder
                .header(20.0, |mut header| {
                    for column in columns {
                        header.col(|ui| {
                            ui.strong(header_label(column));
                        });
                    }
                })
                .body(|body| {
                    body.rows(text_height, num_rows, |row_index, mut row| {
                        let data = rows[row_index];
                        for column in columns {
                            row.col(|ui| {
                                let text = data.get(column).map(cell_text).unwrap_or_default();
                                ui.label(text);
                            });
                        }
                    });
                });
        });
    }

    /// Render the structured part of `result`
    pub fn show_result(&self, ui: &mut Ui, result: &QueryResult) {
        let rows: Vec<&Row> = result.rows().collect();
        self.show(ui, &result.columns(), &rows);
    }
}

impl SessionView for ResultsTableView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewContext<'_>, ui: &mut Ui) {
        let Some(result) = ctx.state.last_result() else {
            ui.label("No results found.");
            return;
        };
        self.show_result(ui, result);
    }
}
