// Dashboard state: grid placements plus per-chart configs, persisted as a
// flat JSON document. The state is plain data owned by the caller; rendering
// borrows it and the table, never the other way around.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chart::{build_options, ChartKind};
use crate::error::{Error, Result};
use crate::series::{derive, SeriesRequest, ValueSelector};
use crate::table::Table;

/// One grid cell: where a chart sits and how big it is. Field names follow
/// the persisted layout records (`i` is the chart id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPlacement {
    #[serde(rename = "i")]
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One chart's configuration: category column, value selector, chart kind.
/// Wire names match the persisted documents (`x`, `y`, `type`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(rename = "x")]
    pub category: String,
    #[serde(rename = "y")]
    pub value: ValueSelector,
    #[serde(rename = "type")]
    pub kind: ChartKind,
}

impl ChartConfig {
    pub fn new(category: impl Into<String>, value: ValueSelector, kind: ChartKind) -> Self {
        Self {
            category: category.into(),
            value,
            kind,
        }
    }

    fn request(&self) -> SeriesRequest {
        SeriesRequest {
            category: self.category.clone(),
            value: self.value.clone(),
        }
    }
}

/// Grid sizing for newly added charts.
#[derive(Debug, Clone, Deserialize)]
pub struct GridOptions {
    #[serde(default = "default_columns")]
    pub columns: u32,
    #[serde(default = "default_chart_w")]
    pub chart_w: u32,
    #[serde(default = "default_chart_h")]
    pub chart_h: u32,
}

fn default_columns() -> u32 { 12 }
fn default_chart_w() -> u32 { 6 }
fn default_chart_h() -> u32 { 4 }

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            columns: 12,
            chart_w: 6,
            chart_h: 4,
        }
    }
}

/// The whole dashboard: placement list plus chart configs keyed by id.
///
/// Serializes to the two-field document `{ "layout": [...], "charts": {...} }`;
/// both fields default to empty when missing so partial documents still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    #[serde(default)]
    pub layout: Vec<CellPlacement>,
    #[serde(default)]
    pub charts: BTreeMap<String, ChartConfig>,
}

/// One rendered panel: the chart id and the options object for it.
#[derive(Debug, Clone, Serialize)]
pub struct ChartPanel {
    pub id: String,
    pub options: Value,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chart and give it a cell below the current layout.
    /// Returns the allocated id. Ids are `chart_N` with N one past the
    /// highest suffix already present, so loading a sparse document never
    /// leads to a collision.
    pub fn add_chart(&mut self, config: ChartConfig, grid: &GridOptions) -> String {
        let id = self.next_chart_id();
        let y = self
            .layout
            .iter()
            .map(|cell| cell.y + cell.h)
            .max()
            .unwrap_or(0);
        self.layout.push(CellPlacement {
            id: id.clone(),
            x: 0,
            y,
            w: grid.chart_w.min(grid.columns),
            h: grid.chart_h,
        });
        self.charts.insert(id.clone(), config);
        id
    }

    /// Drop a chart's config and placement. Returns whether the id existed.
    pub fn remove_chart(&mut self, id: &str) -> bool {
        let had_config = self.charts.remove(id).is_some();
        let before = self.layout.len();
        self.layout.retain(|cell| cell.id != id);
        had_config || self.layout.len() != before
    }

    fn next_chart_id(&self) -> String {
        let next = self
            .charts
            .keys()
            .filter_map(|key| key.strip_prefix("chart_"))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .map_or(1, |n| n + 1);
        format!("chart_{}", next)
    }

    /// Serialize to the persisted document form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a persisted document. Unknown chart types and structural
    /// problems surface as `MalformedDashboard`.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| Error::FileNotWritable {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| Error::FileNotReadable {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Derive and build options for every configured chart, in id order.
    /// The first failing chart aborts the pass; callers present the error
    /// rather than rendering a partial dashboard.
    pub fn render(&self, table: &Table) -> Result<Vec<ChartPanel>> {
        let mut panels = Vec::with_capacity(self.charts.len());
        for (id, config) in &self.charts {
            let series = derive(table, &config.request())?;
            panels.push(ChartPanel {
                id: id.clone(),
                options: build_options(config.kind, &series),
            });
        }
        Ok(panels)
    }
}
