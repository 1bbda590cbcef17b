//! Response-time chart over the recent query window

use egui::{Color32, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};
use nlq_core::{BoundedRing, PerformanceSample};

use crate::{SessionView, ViewContext, ViewId};

/// Configuration for the performance chart
#[derive(Clone)]
pub struct PerformanceChartConfig {
    pub height: f32,
    pub line_width: f32,
    pub line_color: Color32,
    pub hit_color: Color32,
    /// Mark cache hits with dots on top of the line
    pub show_cache_hits: bool,
}

impl Default for PerformanceChartConfig {
    fn default() -> Self {
        Self {
            height: 300.0,
            line_width: 2.0,
            line_color: Color32::from_rgb(59, 130, 246),
            hit_color: Color32::from_rgb(34, 197, 94),
            show_cache_hits: true,
        }
    }
}

/// Line chart of response times, oldest sample on the left
pub struct PerformanceChartView {
    id: ViewId,
    title: String,
    pub config: PerformanceChartConfig,
}

impl PerformanceChartView {
    pub fn new(id: ViewId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            config: PerformanceChartConfig::default(),
        }
    }

    /// (index, response time) pairs in chronological order
    pub fn series(samples: &BoundedRing<PerformanceSample>) -> Vec<[f64; 2]> {
        samples
            .iter()
            .enumerate()
            .map(|(i, s)| [i as f64, s.response_time_ms])
            .collect()
    }

    fn hits(samples: &BoundedRing<PerformanceSample>) -> Vec<[f64; 2]> {
        samples
            .iter()
            .enumerate()
            .filter(|(_, s)| s.cache_hit > 0)
            .map(|(i, s)| [i as f64, s.response_time_ms])
            .collect()
    }

    pub fn show(&self, ui: &mut Ui, samples: &BoundedRing<PerformanceSample>) {
        if samples.is_empty() {
            ui.label("Run a query to start collecting performance data.");
            return;
        }

        let labels: Vec<String> = samples.iter().map(|s| s.time_label.clone()).collect();
        let series = Self::series(samples);
        let hits = Self::hits(samples);

        Plot::new(self.id)
            .height(self.config.height)
            .legend(Legend::default())
            .x_axis_label("Query")
            .y_axis_label("Response Time (ms)")
            .allow_scroll(false)
            .label_formatter(move |_name, value| {
                let idx = value.x.round();
                match labels.get(idx.max(0.0) as usize) {
                    Some(time) if idx >= 0.0 => format!("{}\n{:.0} ms", time, value.y),
                    _ => String::new(),
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(series))
                        .name("Response Time (ms)")
                        .color(self.config.line_color)
                        .width(self.config.line_width),
                );
                if self.config.show_cache_hits && !hits.is_empty() {
                    plot_ui.points(
                        Points::new(PlotPoints::from(hits))
                            .name("Cache hit")
                            .color(self.config.hit_color)
                            .radius(4.0),
                    );
                }
            });
    }
}

impl SessionView for PerformanceChartView {
    fn id(&self) -> ViewId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn ui(&mut self, ctx: &ViewContext<'_>, ui: &mut Ui) {
        self.show(ui, ctx.state.performance());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_chronological() {
        let mut ring = BoundedRing::new(2);
        for (ms, hit) in [(100.0, 0), (200.0, 1), (300.0, 0)] {
            ring.push(PerformanceSample {
                time_label: "10:00:00".to_string(),
                response_time_ms: ms,
                cache_hit: hit,
            });
        }
        assert_eq!(
            PerformanceChartView::series(&ring),
            vec![[0.0, 200.0], [1.0, 300.0]]
        );
        assert_eq!(PerformanceChartView::hits(&ring), vec![[0.0, 200.0]]);
    }
}
