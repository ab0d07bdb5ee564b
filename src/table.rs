// In-memory tabular data: ordered named columns of equal length, with all
// missing/invalid numerics normalized to a single absent marker up front.

use serde_json::Value;

use crate::error::{Error, Result};

/// A single cell value after normalization.
///
/// Missing cells and invalid numerics (NaN, ±inf) collapse into `Absent`
/// when the table is built; downstream code never sees a non-finite number
/// and never has to re-check.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Number(f64),
    Text(String),
    Absent,
}

impl Datum {
    /// Parse a raw cell as it appears in a CSV field or a JSON string.
    /// Blank cells are absent; numeric parses that come back NaN/inf are
    /// absent too; everything else is text, kept verbatim.
    pub fn from_raw(cell: &str) -> Datum {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return Datum::Absent;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Datum::Number(n),
            Ok(_) => Datum::Absent,
            Err(_) => Datum::Text(cell.to_string()),
        }
    }

    /// Raw cell as text, without the numeric attempt. Used when a column
    /// has already been inferred as textual.
    fn text_or_absent(cell: &str) -> Datum {
        if cell.trim().is_empty() {
            Datum::Absent
        } else {
            Datum::Text(cell.to_string())
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Datum::Absent)
    }

    /// Numeric view: `None` for text and absent cells.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Datum::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// String representation used for chart labels and grouping keys.
    /// Numbers print minimally ("3", not "3.0"); absent cells become the
    /// empty string.
    pub fn label(&self) -> String {
        match self {
            Datum::Number(n) => format!("{}", n),
            Datum::Text(s) => s.clone(),
            Datum::Absent => String::new(),
        }
    }
}

/// A named column of cells. Length agreement across columns is enforced by
/// the owning `Table`.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Datum>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Datum>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Datum] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// A column is numeric when every cell is a number or absent. An
    /// all-absent column counts as numeric.
    pub fn is_numeric(&self) -> bool {
        self.values.iter().all(|d| !matches!(d, Datum::Text(_)))
    }

    /// Row-aligned numeric view (`None` where the cell is absent or text).
    pub fn numbers(&self) -> Vec<Option<f64>> {
        self.values.iter().map(Datum::as_number).collect()
    }

    /// Row-aligned label view.
    pub fn labels(&self) -> Vec<String> {
        self.values.iter().map(Datum::label).collect()
    }
}

/// Ordered named columns of equal length. Built once per ingested file,
/// held for a single rendering pass, never mutated by derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    rows: usize,
}

impl Table {
    /// Build a table from pre-normalized columns, enforcing the shared
    /// row-count invariant.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map(|c| c.len()).unwrap_or(0);
        for column in &columns {
            if column.len() != rows {
                return Err(Error::ColumnLengthMismatch {
                    name: column.name().to_string(),
                    expected: rows,
                    actual: column.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// Build a table from raw string cells (one inner Vec per row),
    /// inferring a type per column: if every non-blank cell parses as f64
    /// the column is numeric, otherwise the whole column stays textual.
    /// Normalization to `Datum::Absent` happens here, once.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(Error::MalformedData(format!(
                    "row {} has {} fields, expected {}",
                    idx + 1,
                    row.len(),
                    headers.len()
                )));
            }
        }

        let mut columns = Vec::with_capacity(headers.len());
        for (col_idx, name) in headers.into_iter().enumerate() {
            let parsed: Vec<Datum> = rows
                .iter()
                .map(|row| Datum::from_raw(&row[col_idx]))
                .collect();

            // Mixed columns fall back to text wholesale, keeping the raw
            // cells ("3" stays the string "3" in a text column).
            let values = if parsed.iter().any(|d| matches!(d, Datum::Text(_))) {
                rows.iter()
                    .map(|row| Datum::text_or_absent(&row[col_idx]))
                    .collect()
            } else {
                parsed
            };

            columns.push(Column::new(name, values));
        }

        Table::new(columns)
    }

    /// Build a table from a JSON array of objects. Headers come from the
    /// first object; objects missing a key contribute an absent cell.
    pub fn from_json(value: &Value) -> Result<Self> {
        let array = value.as_array().ok_or_else(|| {
            Error::MalformedData("input data must be a JSON array of objects".to_string())
        })?;

        let first = match array.first() {
            Some(item) => item.as_object().ok_or_else(|| {
                Error::MalformedData("items in array must be objects".to_string())
            })?,
            None => return Err(Error::NoColumns),
        };
        let headers: Vec<String> = first.keys().cloned().collect();

        let mut rows = Vec::with_capacity(array.len());
        for item in array {
            let obj = item.as_object().ok_or_else(|| {
                Error::MalformedData("items in array must be objects".to_string())
            })?;

            let mut row = Vec::with_capacity(headers.len());
            for header in &headers {
                let cell = match obj.get(header) {
                    Some(Value::String(s)) => s.clone(),
                    Some(Value::Number(n)) => n.to_string(),
                    Some(Value::Bool(b)) => b.to_string(),
                    Some(Value::Null) | None => String::new(),
                    Some(other) => {
                        return Err(Error::MalformedData(format!(
                            "unsupported value type for field '{}': {}",
                            header, other
                        )))
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }

        Table::from_rows(headers, rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// True when the table holds zero data rows (columns may still exist).
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Look up a column by name (ASCII-case-insensitive, first match wins).
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::ColumnNotFound(name.to_string()))
    }

    /// Names of the numeric columns; feeds value-column selection menus.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name().to_string())
            .collect()
    }
}
