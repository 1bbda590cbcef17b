//! Discovered database schema

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// A single column of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    #[serde(default)]
    pub is_primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_primary_key: false,
        }
    }

    /// Mark this column as (part of) the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}

/// A table and its columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Columns flagged as primary key
    pub fn primary_keys(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }
}

/// Directed edge between two tables, by name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
}

impl Relationship {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Tables and relationships produced by schema discovery.
///
/// A schema is built once by a provider and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
}

impl Schema {
    pub fn new(tables: Vec<Table>, relationships: Vec<Relationship>) -> Self {
        Self {
            tables,
            relationships,
        }
    }

    /// Look up a table by name
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.table(name).is_some()
    }

    /// Check that table names are unique and every relationship endpoint exists
    pub fn validate(&self) -> Result<(), SessionError> {
        let mut seen = HashSet::new();
        for table in &self.tables {
            if !seen.insert(table.name.as_str()) {
                return Err(SessionError::InvalidSchema(format!(
                    "duplicate table '{}'",
                    table.name
                )));
            }
        }

        for rel in &self.relationships {
            for endpoint in [&rel.source, &rel.target] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(SessionError::InvalidSchema(format!(
                        "relationship {} -> {} references unknown table '{}'",
                        rel.source, rel.target, endpoint
                    )));
                }
            }
        }

        Ok(())
    }

    /// Compact one-line-per-table description, e.g. `employees(emp_id*, full_name)`.
    /// Primary keys carry a trailing `*`.
    pub fn describe(&self) -> String {
        self.tables
            .iter()
            .map(|t| {
                let cols: Vec<String> = t
                    .columns
                    .iter()
                    .map(|c| {
                        if c.is_primary_key {
                            format!("{}*", c.name)
                        } else {
                            c.name.clone()
                        }
                    })
                    .collect();
                format!("{}({})", t.name, cols.join(", "))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
