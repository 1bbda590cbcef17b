//! Session statistics and the performance chart

use egui::{RichText, Ui};
use uuid::Uuid;

use nlq_core::SessionState;
use nlq_views::PerformanceChartView;

pub struct DashboardPanel {
    chart: PerformanceChartView,
}

impl Default for DashboardPanel {
    fn default() -> Self {
        Self {
            chart: PerformanceChartView::new(Uuid::new_v4(), "Query Performance"),
        }
    }
}

impl DashboardPanel {
    pub fn ui(&self, ui: &mut Ui, state: &SessionState) {
        let stats = state.dashboard_stats();

        let avg = stats
            .avg_response_time_ms
            .map(|ms| format!("{ms:.0}ms"))
            .unwrap_or_else(|| "N/A".to_string());
        let hit_rate = format!("{:.1}%", stats.cache_hit_rate_pct);
        let hits = format!("{} of {} queries", stats.cache_hits, stats.sample_count);

        ui.columns(4, |cols| {
            nlq_ui::stat_card(
                &mut cols[0],
                Some(nlq_ui::icons::DATABASE),
                "Tables Discovered",
                &stats.tables_discovered.to_string(),
                None,
            );
            nlq_ui::stat_card(
                &mut cols[1],
                Some(nlq_ui::icons::FILE),
                "Documents Indexed",
                &stats.documents_indexed.to_string(),
                None,
            );
            nlq_ui::stat_card(
                &mut cols[2],
                Some(nlq_ui::icons::CACHE),
                "Cache Hit Rate",
                &hit_rate,
                Some(&hits),
            );
            nlq_ui::stat_card(
                &mut cols[3],
                Some(nlq_ui::icons::CLOCK),
                "Avg. Response Time",
                &avg,
                Some("Avg. of last 20 queries"),
            );
        });

        ui.add_space(16.0);
        nlq_ui::card(ui, |ui| {
            ui.label(RichText::new("Query Performance").strong().size(16.0));
            ui.add_space(8.0);
            self.chart.show(ui, state.performance());
        });
    }
}
