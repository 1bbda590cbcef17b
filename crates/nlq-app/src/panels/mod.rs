//! Central panels, one per top-level view

mod dashboard;
mod ingestion;
mod query;

pub use dashboard::DashboardPanel;
pub use ingestion::IngestionPanel;
pub use query::QueryPanel;
