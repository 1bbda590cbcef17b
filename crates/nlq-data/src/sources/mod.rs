//! Simulated backend providers

pub mod mock_query;
pub mod mock_schema;

pub use mock_query::MockQueryProvider;
pub use mock_schema::MockSchemaProvider;
