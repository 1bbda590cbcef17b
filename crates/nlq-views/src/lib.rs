//! Views rendered from the session state
//!
//! Each view borrows the session read-only through a [`ViewContext`] and
//! draws itself with egui. Views keep only presentation state such as
//! layout positions and hover.

mod document_cards;
mod performance_chart;
pub mod schema_graph;
mod session_view;
mod tables;

pub use document_cards::DocumentCardsView;
pub use performance_chart::{PerformanceChartConfig, PerformanceChartView};
pub use schema_graph::{ForceLayout, SchemaGraphView};
pub use session_view::{SessionView, ViewContext, ViewId};
pub use tables::{cell_text, header_label, ResultsTableView, TableConfig};
