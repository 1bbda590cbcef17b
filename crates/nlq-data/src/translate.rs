//! Rule-based natural language to SQL translation
//!
//! Each rule pairs a lowercase cue with a SQL template. A rule only fires
//! when every table it reads exists in the discovered schema.

use nlq_core::Schema;
use tracing::debug;

/// One cue and the query it produces
#[derive(Debug, Clone)]
pub struct TranslationRule {
    pub cue: &'static str,
    pub tables: &'static [&'static str],
    pub sql: &'static str,
}

const COMPANY_RULES: &[TranslationRule] = &[
    TranslationRule {
        cue: "how many employees",
        tables: &["employees"],
        sql: "SELECT COUNT(emp_id) FROM employees;",
    },
    TranslationRule {
        cue: "python developers in engineering",
        tables: &["employees", "departments"],
        sql: "SELECT e.full_name, e.position, d.dept_name\n\
              FROM employees e\n\
              JOIN departments d ON e.dept_id = d.dept_id\n\
              WHERE e.position LIKE '%Python Developer%' AND d.dept_name = 'Engineering';",
    },
    TranslationRule {
        cue: "average salary",
        tables: &["employees", "departments"],
        sql: "SELECT d.dept_name, AVG(e.annual_salary) as average_salary\n\
              FROM employees e\n\
              JOIN departments d ON e.dept_id = d.dept_id\n\
              GROUP BY d.dept_name;",
    },
];

/// Outcome of a translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub sql: String,
    /// Cue of the rule that fired, `None` for the fallback
    pub matched: Option<&'static str>,
}

/// Keyword matcher over a fixed rule table
#[derive(Debug, Clone)]
pub struct KeywordTranslator {
    rules: Vec<TranslationRule>,
}

impl Default for KeywordTranslator {
    fn default() -> Self {
        Self::new(COMPANY_RULES.to_vec())
    }
}

impl KeywordTranslator {
    pub fn new(rules: Vec<TranslationRule>) -> Self {
        Self { rules }
    }

    pub fn translate(&self, question: &str, schema: &Schema) -> Translation {
        let q = question.to_lowercase();

        for rule in &self.rules {
            if !q.contains(rule.cue) {
                continue;
            }
            if rule.tables.iter().all(|t| schema.contains_table(t)) {
                debug!("Translated with rule '{}'", rule.cue);
                return Translation {
                    sql: rule.sql.to_string(),
                    matched: Some(rule.cue),
                };
            }
            debug!("Rule '{}' skipped, schema lacks its tables", rule.cue);
        }

        debug!("No rule matched, falling back. Schema:\n{}", schema.describe());
        Translation {
            sql: Self::fallback(schema),
            matched: None,
        }
    }

    /// Preview of the main table
    fn fallback(schema: &Schema) -> String {
        let table = if schema.contains_table("employees") {
            "employees"
        } else {
            schema
                .tables
                .first()
                .map(|t| t.name.as_str())
                .unwrap_or("employees")
        };
        format!("SELECT * FROM {table} LIMIT 10;")
    }
}
