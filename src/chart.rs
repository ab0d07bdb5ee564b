// Chart kinds and their options builders. Each kind maps through a lookup
// table to one pure function from a derived series to the declarative
// options object a renderer consumes; adding a kind means adding a variant
// and a table entry, not branching at call sites.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::Error;
use crate::series::Series;

/// Every chart kind the dashboard supports, tagged by its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartKind {
    Bar,
    StackedBar,
    HorizontalBar,
    Line,
    Area,
    StackedArea,
    Pie,
    Donut,
    Scatter,
    Radar,
    Funnel,
    Gauge,
    Treemap,
    WordCloud,
}

/// Pure mapping from a derived series to renderer options.
pub type OptionsBuilder = fn(&Series) -> Value;

impl ChartKind {
    /// All supported kinds, in menu order.
    pub const ALL: [ChartKind; 14] = [
        ChartKind::Bar,
        ChartKind::StackedBar,
        ChartKind::HorizontalBar,
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::StackedArea,
        ChartKind::Pie,
        ChartKind::Donut,
        ChartKind::Scatter,
        ChartKind::Radar,
        ChartKind::Funnel,
        ChartKind::Gauge,
        ChartKind::Treemap,
        ChartKind::WordCloud,
    ];

    /// The wire tag, e.g. `"stacked-bar"`. This is the form persisted in
    /// dashboard documents and accepted on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::StackedBar => "stacked-bar",
            ChartKind::HorizontalBar => "horizontal-bar",
            ChartKind::Line => "line",
            ChartKind::Area => "area",
            ChartKind::StackedArea => "stacked-area",
            ChartKind::Pie => "pie",
            ChartKind::Donut => "donut",
            ChartKind::Scatter => "scatter",
            ChartKind::Radar => "radar",
            ChartKind::Funnel => "funnel",
            ChartKind::Gauge => "gauge",
            ChartKind::Treemap => "treemap",
            ChartKind::WordCloud => "word-cloud",
        }
    }

    /// The options builder for this kind.
    pub fn options_builder(&self) -> OptionsBuilder {
        match self {
            ChartKind::Bar => bar_options,
            ChartKind::StackedBar => stacked_bar_options,
            ChartKind::HorizontalBar => horizontal_bar_options,
            ChartKind::Line => line_options,
            ChartKind::Area => area_options,
            ChartKind::StackedArea => stacked_area_options,
            ChartKind::Pie => pie_options,
            ChartKind::Donut => donut_options,
            ChartKind::Scatter => scatter_options,
            ChartKind::Radar => radar_options,
            ChartKind::Funnel => funnel_options,
            ChartKind::Gauge => gauge_options,
            ChartKind::Treemap => treemap_options,
            ChartKind::WordCloud => word_cloud_options,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ChartKind {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .iter()
            .find(|kind| kind.tag() == raw)
            .copied()
            .ok_or_else(|| Error::UnsupportedChartType(raw.to_string()))
    }
}

impl TryFrom<String> for ChartKind {
    type Error = Error;

    fn try_from(raw: String) -> Result<Self, Error> {
        raw.parse()
    }
}

impl From<ChartKind> for String {
    fn from(kind: ChartKind) -> Self {
        kind.tag().to_string()
    }
}

/// Build the renderer options for one series under the given kind.
pub fn build_options(kind: ChartKind, series: &Series) -> Value {
    kind.options_builder()(series)
}

fn category_axis(labels: &[String]) -> Value {
    json!({ "type": "category", "data": labels })
}

fn value_axis() -> Value {
    json!({ "type": "value" })
}

/// Category-x / value-y skeleton shared by the whole axis family. Absent
/// values stay `null` so the renderer shows a gap.
fn axis_options(series: &Series, chart_series: Value) -> Value {
    json!({
        "tooltip": { "trigger": "axis" },
        "xAxis": category_axis(&series.labels),
        "yAxis": value_axis(),
        "series": [chart_series],
    })
}

fn bar_options(series: &Series) -> Value {
    axis_options(series, json!({ "data": series.values, "type": "bar" }))
}

fn stacked_bar_options(series: &Series) -> Value {
    axis_options(
        series,
        json!({ "data": series.values, "type": "bar", "stack": "total" }),
    )
}

fn horizontal_bar_options(series: &Series) -> Value {
    json!({
        "tooltip": { "trigger": "axis" },
        "xAxis": value_axis(),
        "yAxis": category_axis(&series.labels),
        "series": [{ "data": series.values, "type": "bar" }],
    })
}

fn line_options(series: &Series) -> Value {
    axis_options(series, json!({ "data": series.values, "type": "line" }))
}

fn area_options(series: &Series) -> Value {
    axis_options(
        series,
        json!({ "data": series.values, "type": "line", "areaStyle": {} }),
    )
}

fn stacked_area_options(series: &Series) -> Value {
    axis_options(
        series,
        json!({ "data": series.values, "type": "line", "areaStyle": {}, "stack": "total" }),
    )
}

fn scatter_options(series: &Series) -> Value {
    axis_options(series, json!({ "data": series.values, "type": "scatter" }))
}

/// (value, name) pairs for the named-point family. `fill_zero` substitutes
/// `0.0` for absent values; slice charts cannot render a null slice.
fn named_points(series: &Series, fill_zero: bool) -> Vec<Value> {
    series
        .labels
        .iter()
        .zip(&series.values)
        .map(|(name, value)| match value {
            Some(v) => json!({ "value": v, "name": name }),
            None if fill_zero => json!({ "value": 0.0, "name": name }),
            None => json!({ "value": null, "name": name }),
        })
        .collect()
}

fn pie_options(series: &Series) -> Value {
    json!({
        "tooltip": { "trigger": "item" },
        "series": [{ "type": "pie", "radius": "50%", "data": named_points(series, true) }],
    })
}

fn donut_options(series: &Series) -> Value {
    json!({
        "tooltip": { "trigger": "item" },
        "series": [{ "type": "pie", "radius": ["40%", "70%"], "data": named_points(series, true) }],
    })
}

fn funnel_options(series: &Series) -> Value {
    json!({
        "tooltip": { "trigger": "item" },
        "series": [{ "type": "funnel", "data": named_points(series, true) }],
    })
}

fn treemap_options(series: &Series) -> Value {
    json!({
        "tooltip": { "trigger": "item" },
        "series": [{ "type": "treemap", "data": named_points(series, false) }],
    })
}

fn word_cloud_options(series: &Series) -> Value {
    json!({
        "tooltip": { "trigger": "item" },
        "series": [{ "type": "wordCloud", "data": named_points(series, false) }],
    })
}

/// Gauge renders a single dial: only the first (label, value) pair is used.
fn gauge_options(series: &Series) -> Value {
    let name = series.labels.first().cloned().unwrap_or_default();
    let value = series.values.first().copied().flatten();
    json!({
        "tooltip": { "trigger": "item" },
        "series": [{ "type": "gauge", "data": [{ "value": value, "name": name }] }],
    })
}

/// Radar needs an explicit bound per indicator; every axis is sized to the
/// largest value in the series.
fn radar_options(series: &Series) -> Value {
    let bound = radar_bound(&series.values);
    let indicators: Vec<Value> = series
        .labels
        .iter()
        .map(|name| json!({ "name": name, "max": bound }))
        .collect();
    json!({
        "tooltip": { "trigger": "item" },
        "radar": { "indicator": indicators },
        "series": [{ "type": "radar", "data": [{ "value": series.values }] }],
    })
}

/// Largest value present, or 1.0 when nothing positive is there so the
/// axes still have extent.
fn radar_bound(values: &[Option<f64>]) -> f64 {
    let largest = values
        .iter()
        .flatten()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if largest > 0.0 {
        largest
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_series(pairs: Vec<(&str, Option<f64>)>) -> Series {
        Series {
            labels: pairs.iter().map(|(label, _)| label.to_string()).collect(),
            values: pairs.iter().map(|(_, value)| *value).collect(),
        }
    }

    #[test]
    fn test_all_tags_round_trip() {
        for kind in ChartKind::ALL {
            let parsed: ChartKind = kind.tag().parse().unwrap();
            assert_eq!(parsed, kind);

            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
            let back: ChartKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let result = "hexbin".parse::<ChartKind>();
        assert!(matches!(
            result,
            Err(Error::UnsupportedChartType(tag)) if tag == "hexbin"
        ));
    }

    #[test]
    fn test_bar_options_shape() {
        let series = make_series(vec![("A", Some(2.0)), ("B", Some(1.0))]);
        let opts = build_options(ChartKind::Bar, &series);
        assert_eq!(opts["xAxis"]["type"], json!("category"));
        assert_eq!(opts["xAxis"]["data"], json!(["A", "B"]));
        assert_eq!(opts["yAxis"]["type"], json!("value"));
        assert_eq!(opts["series"][0]["type"], json!("bar"));
        assert_eq!(opts["series"][0]["data"], json!([2.0, 1.0]));
        assert_eq!(opts["tooltip"]["trigger"], json!("axis"));
    }

    #[test]
    fn test_horizontal_bar_swaps_axes() {
        let series = make_series(vec![("A", Some(2.0)), ("B", Some(1.0))]);
        let opts = build_options(ChartKind::HorizontalBar, &series);
        assert_eq!(opts["yAxis"]["type"], json!("category"));
        assert_eq!(opts["yAxis"]["data"], json!(["A", "B"]));
        assert_eq!(opts["xAxis"]["type"], json!("value"));
        assert_eq!(opts["series"][0]["type"], json!("bar"));
    }

    #[test]
    fn test_stacked_variants_set_stack() {
        let series = make_series(vec![("A", Some(1.0))]);
        for kind in [ChartKind::StackedBar, ChartKind::StackedArea] {
            let opts = build_options(kind, &series);
            assert_eq!(opts["series"][0]["stack"], json!("total"));
        }
        for kind in [ChartKind::Bar, ChartKind::Line] {
            let opts = build_options(kind, &series);
            assert!(opts["series"][0].get("stack").is_none());
        }
    }

    #[test]
    fn test_area_variants_set_area_style() {
        let series = make_series(vec![("A", Some(1.0))]);
        for kind in [ChartKind::Area, ChartKind::StackedArea] {
            let opts = build_options(kind, &series);
            assert_eq!(opts["series"][0]["type"], json!("line"));
            assert!(opts["series"][0]["areaStyle"].is_object());
        }
        let line = build_options(ChartKind::Line, &series);
        assert!(line["series"][0].get("areaStyle").is_none());
    }

    #[test]
    fn test_axis_charts_keep_null_gaps() {
        let series = make_series(vec![("x", Some(10.0)), ("y", None), ("z", Some(30.0))]);
        for kind in [ChartKind::Bar, ChartKind::Line, ChartKind::Scatter] {
            let opts = build_options(kind, &series);
            assert_eq!(opts["series"][0]["data"], json!([10.0, null, 30.0]));
        }
    }

    #[test]
    fn test_pie_zero_fills_absent_slices() {
        let series = make_series(vec![("x", Some(3.0)), ("y", None)]);
        let opts = build_options(ChartKind::Pie, &series);
        assert_eq!(opts["series"][0]["type"], json!("pie"));
        assert_eq!(opts["series"][0]["radius"], json!("50%"));
        assert_eq!(
            opts["series"][0]["data"],
            json!([{ "value": 3.0, "name": "x" }, { "value": 0.0, "name": "y" }])
        );
        assert_eq!(opts["tooltip"]["trigger"], json!("item"));
    }

    #[test]
    fn test_donut_uses_radius_pair() {
        let series = make_series(vec![("x", Some(3.0)), ("y", None)]);
        let opts = build_options(ChartKind::Donut, &series);
        assert_eq!(opts["series"][0]["type"], json!("pie"));
        assert_eq!(opts["series"][0]["radius"], json!(["40%", "70%"]));
        assert_eq!(opts["series"][0]["data"][1]["value"], json!(0.0));
    }

    #[test]
    fn test_funnel_zero_fills_absent_slices() {
        let series = make_series(vec![("x", None)]);
        let opts = build_options(ChartKind::Funnel, &series);
        assert_eq!(opts["series"][0]["type"], json!("funnel"));
        assert_eq!(opts["series"][0]["data"][0]["value"], json!(0.0));
    }

    #[test]
    fn test_treemap_and_word_cloud_keep_null() {
        let series = make_series(vec![("x", Some(3.0)), ("y", None)]);
        let treemap = build_options(ChartKind::Treemap, &series);
        assert_eq!(treemap["series"][0]["type"], json!("treemap"));
        assert!(treemap["series"][0]["data"][1]["value"].is_null());

        let cloud = build_options(ChartKind::WordCloud, &series);
        assert_eq!(cloud["series"][0]["type"], json!("wordCloud"));
        assert!(cloud["series"][0]["data"][1]["value"].is_null());
    }

    #[test]
    fn test_gauge_takes_first_pair_only() {
        let series = make_series(vec![("a", Some(7.0)), ("b", Some(9.0)), ("c", Some(2.0))]);
        let opts = build_options(ChartKind::Gauge, &series);
        let data = opts["series"][0]["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0], json!({ "value": 7.0, "name": "a" }));
    }

    #[test]
    fn test_radar_indicators_share_largest_bound() {
        let series = make_series(vec![("a", Some(2.0)), ("b", Some(4.0)), ("c", Some(1.0))]);
        let opts = build_options(ChartKind::Radar, &series);
        assert_eq!(
            opts["radar"]["indicator"],
            json!([
                { "name": "a", "max": 4.0 },
                { "name": "b", "max": 4.0 },
                { "name": "c", "max": 4.0 }
            ])
        );
        assert_eq!(opts["series"][0]["data"][0]["value"], json!([2.0, 4.0, 1.0]));
    }

    #[test]
    fn test_radar_bound_defaults_without_positive_values() {
        let series = make_series(vec![("a", None), ("b", None)]);
        let opts = build_options(ChartKind::Radar, &series);
        assert_eq!(opts["radar"]["indicator"][0]["max"], json!(1.0));
    }
}
