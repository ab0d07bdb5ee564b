// Series derivation: one table plus one (category, value) selection in,
// index-aligned (labels, values) out. This is the piece every chart kind
// shares; everything renderer-specific lives in chart.rs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::table::{Column, Table};

/// Reserved selector meaning "count rows per category" instead of reading
/// an explicit value column. This exact string is what dashboard documents
/// persist.
pub const COUNT_SENTINEL: &str = "<count>";

/// What provides the chart magnitudes: an explicit column, or the row
/// count per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueSelector {
    Count,
    Column(String),
}

impl From<String> for ValueSelector {
    fn from(raw: String) -> Self {
        if raw == COUNT_SENTINEL {
            ValueSelector::Count
        } else {
            ValueSelector::Column(raw)
        }
    }
}

impl From<ValueSelector> for String {
    fn from(selector: ValueSelector) -> Self {
        match selector {
            ValueSelector::Count => COUNT_SENTINEL.to_string(),
            ValueSelector::Column(name) => name,
        }
    }
}

impl ValueSelector {
    pub fn parse(raw: &str) -> Self {
        ValueSelector::from(raw.to_string())
    }
}

/// One chart's data question: which column labels the categories, and
/// what supplies the values.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRequest {
    pub category: String,
    pub value: ValueSelector,
}

impl SeriesRequest {
    pub fn count(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: ValueSelector::Count,
        }
    }

    pub fn column(category: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            value: ValueSelector::Column(value.into()),
        }
    }
}

/// Index-aligned (label, value) pairs ready for an options builder.
///
/// `None` entries are absent cells carried through untouched; zero
/// substitution, where a chart kind needs it, happens at options-build
/// time, never here. Produced fresh per request and owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Derive the (labels, values) series for one chart.
///
/// Three modes, in precedence order:
/// 1. Count sentinel: frequency table over the category column, labels in
///    first-seen order.
/// 2. Numeric value column: labels follow the category column row by row
///    (no grouping); values pass through with absent cells preserved.
/// 3. Non-numeric value column: frequency table over the *value* column.
///    The category column is validated but does not shape the result.
///
/// Both referenced columns are checked before the row-count check, so a
/// bad name reports `ColumnNotFound` even on an empty table.
pub fn derive(table: &Table, request: &SeriesRequest) -> Result<Series> {
    let category = table.column(&request.category)?;

    match &request.value {
        ValueSelector::Count => {
            require_rows(table)?;
            Ok(frequency_table(category))
        }
        ValueSelector::Column(name) => {
            let value = table.column(name)?;
            require_rows(table)?;
            if value.is_numeric() {
                Ok(Series {
                    labels: category.labels(),
                    values: value.numbers(),
                })
            } else {
                Ok(frequency_table(value))
            }
        }
    }
}

fn require_rows(table: &Table) -> Result<()> {
    if table.is_empty() {
        return Err(Error::EmptyTable);
    }
    Ok(())
}

/// Count rows per distinct label, keeping labels in first-seen order.
fn frequency_table(column: &Column) -> Series {
    let mut counts: HashMap<String, f64> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for label in column.labels() {
        if !counts.contains_key(&label) {
            order.push(label.clone());
        }
        *counts.entry(label).or_insert(0.0) += 1.0;
    }

    let values = order.iter().map(|label| counts.get(label).copied()).collect();
    Series {
        labels: order,
        values,
    }
}
