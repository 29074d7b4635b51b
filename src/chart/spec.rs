use serde::Serialize;

use crate::color;

// ---------------------------------------------------------------------------
// ChartSpec – declarative description of one renderable chart
// ---------------------------------------------------------------------------

/// Data plus style for one chart. The UI consumes it; nothing in the chart
/// layer reads it back. Serializable so the Export menu can write it as JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: ChartData,
    pub style: ChartStyle,
}

impl ChartSpec {
    /// True when the spec carries no data points at all.
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Line { points } => points.is_empty(),
            ChartData::Bars { values, .. } => values.is_empty(),
            ChartData::Histogram { bins } => bins.is_empty(),
            ChartData::Pie { slices } => slices.is_empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ChartData {
    /// Connected x/y series.
    Line { points: Vec<[f64; 2]> },
    /// One bar per named category, in order.
    Bars {
        categories: Vec<String>,
        values: Vec<f64>,
    },
    /// Pre-binned value counts.
    Histogram { bins: Vec<HistogramBin> },
    /// Labelled proportional slices.
    Pie { slices: Vec<PieSlice> },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// ChartStyle – explicit fields instead of nested ad-hoc mappings
// ---------------------------------------------------------------------------

/// All colors are hex strings; the chart layer never touches UI color types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartStyle {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Primary series / text color.
    pub accent: String,
    /// Background behind the plot area.
    pub background: String,
    /// Discrete slice colors; empty means "use accent".
    pub palette: Vec<String>,
    pub width: f32,
    pub height: f32,
    pub show_legend: bool,
    /// Donut hole radius as a fraction of the pie radius (0 = solid).
    pub hole: f32,
}

impl ChartStyle {
    /// Base style for the axis charts (line, bars, histogram).
    pub fn axes(title: impl Into<String>, x_label: &str, y_label: &str) -> Self {
        ChartStyle {
            title: title.into(),
            x_label: Some(x_label.to_string()),
            y_label: Some(y_label.to_string()),
            accent: color::ACCENT.to_string(),
            background: color::CHART_BG.to_string(),
            palette: Vec::new(),
            width: 850.0,
            height: 500.0,
            show_legend: false,
            hole: 0.0,
        }
    }

    /// Style for the demographics donut.
    pub fn pie(title: impl Into<String>, palette: Vec<String>) -> Self {
        ChartStyle {
            title: title.into(),
            x_label: None,
            y_label: None,
            accent: color::ACCENT.to_string(),
            background: color::PIE_BG.to_string(),
            palette,
            width: 850.0,
            height: 430.0,
            show_legend: true,
            hole: 0.3,
        }
    }
}
