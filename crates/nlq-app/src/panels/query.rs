//! Natural-language query form and result display

use egui::{Button, Key, RichText, TextEdit, Ui};
use tracing::warn;
use uuid::Uuid;

use nlq_core::{DocumentSummary, QueryKind, QueryResult, SessionController, SessionState};
use nlq_ui::{icons, AlertKind};
use nlq_views::{DocumentCardsView, ResultsTableView};

const PLACEHOLDER: &str = "e.g., Show me all Python developers in Engineering";

/// What the area below the form shows
#[derive(Debug, PartialEq)]
enum ResultArea<'a> {
    Pending,
    /// A failure is shown above the previous result, which stays visible
    Settled {
        error: Option<&'a str>,
        result: Option<&'a QueryResult>,
    },
}

impl<'a> ResultArea<'a> {
    fn of(state: &'a SessionState) -> Self {
        if state.query.is_pending() {
            return ResultArea::Pending;
        }
        ResultArea::Settled {
            error: state.query.error(),
            result: state.last_result(),
        }
    }
}

pub struct QueryPanel {
    input: String,
    table: ResultsTableView,
    documents: DocumentCardsView,
}

impl Default for QueryPanel {
    fn default() -> Self {
        Self {
            input: String::new(),
            table: ResultsTableView::new(Uuid::new_v4(), "Structured Data"),
            documents: DocumentCardsView::new(Uuid::new_v4(), "Document Results"),
        }
    }
}

impl QueryPanel {
    pub fn ui(&mut self, ui: &mut Ui, controller: &mut SessionController) {
        if !controller.state().has_schema() {
            nlq_ui::alert(
                ui,
                AlertKind::Warning,
                "Please connect to a database first to enable querying.",
            );
            return;
        }

        let mut submit = false;
        let pending = controller.state().query.is_pending();

        nlq_ui::card(ui, |ui| {
            ui.label(RichText::new("Ask a question").strong());
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let history: Vec<(String, String)> = controller
                    .state()
                    .history()
                    .map(|entry| (entry.query_text.clone(), entry.timestamp_iso()))
                    .collect();
                ui.add_enabled_ui(!history.is_empty(), |ui| {
                    ui.menu_button(icons::HISTORY, |ui| {
                        for (text, timestamp) in &history {
                            if ui.button(text.as_str()).on_hover_text(timestamp.as_str()).clicked() {
                                self.input = text.clone();
                                ui.close_menu();
                            }
                        }
                    });
                });

                let blank = self.input.trim().is_empty();
                let button_width = 80.0;
                let response = ui.add(
                    TextEdit::singleline(&mut self.input)
                        .hint_text(PLACEHOLDER)
                        .desired_width(ui.available_width() - button_width),
                );
                let entered = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));

                let clicked = ui
                    .add_enabled(!pending && !blank, Button::new("Query"))
                    .clicked();
                submit = (clicked || entered) && !pending && !blank;
            });
        });

        if submit {
            if let Err(err) = controller.submit_query(&self.input) {
                warn!("Query not submitted: {}", err);
            }
        }

        ui.add_space(12.0);
        match ResultArea::of(controller.state()) {
            ResultArea::Pending => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Searching database and documents...");
                });
            }
            ResultArea::Settled { error, result } => {
                if let Some(message) = error {
                    nlq_ui::alert(ui, AlertKind::Error, message);
                    ui.add_space(12.0);
                }
                if let Some(result) = result {
                    self.result_ui(ui, result);
                }
            }
        }
    }

    fn result_ui(&self, ui: &mut Ui, result: &QueryResult) {
        nlq_ui::card(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Query Results").strong().size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let (text, color) = if result.performance.cache_hit {
                        ("CACHE HIT", nlq_ui::theme::success_color())
                    } else {
                        ("CACHE MISS", nlq_ui::theme::warning_color())
                    };
                    nlq_ui::badge(ui, &format!("{} {text}", icons::CACHE), color);
                    ui.label(
                        RichText::new(format!(
                            "{} Query took {:.0}ms",
                            icons::CLOCK,
                            result.performance.response_time_ms
                        ))
                        .weak(),
                    );
                    nlq_ui::badge(ui, &result.kind.to_string(), nlq_ui::theme::accent_color());
                });
            });

            if let Some(sql) = &result.generated_query {
                ui.add_space(8.0);
                ui.label(RichText::new("Generated SQL:").small().weak());
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(sql).monospace());
                });
            }

            ui.add_space(12.0);
            let documents: Vec<&DocumentSummary> = result.documents().collect();
            match result.kind {
                QueryKind::Sql => self.table.show_result(ui, result),
                QueryKind::Document => self.documents.show(ui, &documents),
                QueryKind::Hybrid => {
                    ui.label(RichText::new(format!("{} Structured Data", icons::TABLE)).strong());
                    ui.add_space(4.0);
                    self.table.show_result(ui, result);
                    ui.add_space(12.0);
                    ui.label(RichText::new(format!("{} Document Results", icons::FILE)).strong());
                    ui.add_space(4.0);
                    self.documents.show(ui, &documents);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use nlq_core::{Performance, QueryStatus};

    fn result() -> QueryResult {
        QueryResult {
            kind: QueryKind::Sql,
            records: vec![],
            generated_query: Some("SELECT 1;".to_string()),
            performance: Performance {
                response_time_ms: 420.0,
                cache_hit: true,
            },
        }
    }

    #[test]
    fn test_failure_keeps_previous_result_visible() {
        let mut state = SessionState::default();
        state.record_result("how many employees", result(), Utc::now());
        state.query = QueryStatus::Failed("Transport error: socket closed".to_string());

        let ResultArea::Settled { error, result } = ResultArea::of(&state) else {
            panic!("expected a settled result area");
        };
        assert_eq!(error, Some("Transport error: socket closed"));
        assert_eq!(
            result.and_then(|r| r.generated_query.as_deref()),
            Some("SELECT 1;")
        );
    }

    #[test]
    fn test_pending_hides_results() {
        let mut state = SessionState::default();
        state.record_result("how many employees", result(), Utc::now());
        state.query = QueryStatus::Pending;
        assert_eq!(ResultArea::of(&state), ResultArea::Pending);
    }

    #[test]
    fn test_default_panel_starts_empty() {
        let panel = QueryPanel::default();
        assert!(panel.input.is_empty());
    }
}
