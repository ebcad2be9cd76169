//! Declarative render plans.
//!
//! A plan is plain data: what to show, not how to paint it. The egui
//! front-end walks a plan to draw it, and headless mode serializes it.

use serde::{Serialize, Serializer};

use crate::error::DashboardResult;
use crate::navigation::Page;

/// 24-bit RGB color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lower-case `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Linear interpolation towards `other`, `t` clamped to `[0, 1]`.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Fixed colors used across pages.
pub mod palette {
    use super::Rgb;

    /// Non-fraudulent claims.
    pub const NORMAL: Rgb = Rgb::new(0x00, 0xcc, 0x96);
    /// Fraudulent claims.
    pub const FRAUD: Rgb = Rgb::new(0xff, 0x6b, 0x6b);
    /// Female slice of the gender pie.
    pub const FEMALE: Rgb = Rgb::new(0xff, 0x99, 0x99);
    /// Male slice of the gender pie.
    pub const MALE: Rgb = Rgb::new(0x66, 0xb3, 0xff);
    /// Average claim series.
    pub const LIGHT_BLUE: Rgb = Rgb::new(173, 216, 230);
    /// Average paid series.
    pub const LIGHT_CORAL: Rgb = Rgb::new(240, 128, 128);
    /// Leading stops of the sequential red-blue palette.
    pub const RED_BLUE: [Rgb; 3] = [
        Rgb::new(103, 0, 31),
        Rgb::new(178, 24, 43),
        Rgb::new(214, 96, 77),
    ];
    /// Fallback when an encoding yields no color.
    pub const NEUTRAL: Rgb = Rgb::new(150, 150, 160);
}

/// Continuous color scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Dark purple to yellow.
    Viridis,
    /// Deep blue through magenta to yellow.
    Plasma,
    /// White to dark blue.
    Blues,
}

impl ColorScale {
    fn stops(self) -> &'static [Rgb] {
        const VIRIDIS: [Rgb; 5] = [
            Rgb::new(68, 1, 84),
            Rgb::new(59, 82, 139),
            Rgb::new(33, 145, 140),
            Rgb::new(94, 201, 98),
            Rgb::new(253, 231, 37),
        ];
        const PLASMA: [Rgb; 5] = [
            Rgb::new(13, 8, 135),
            Rgb::new(126, 3, 168),
            Rgb::new(204, 71, 120),
            Rgb::new(248, 149, 64),
            Rgb::new(240, 249, 33),
        ];
        const BLUES: [Rgb; 5] = [
            Rgb::new(247, 251, 255),
            Rgb::new(198, 219, 239),
            Rgb::new(107, 174, 214),
            Rgb::new(33, 113, 181),
            Rgb::new(8, 48, 107),
        ];
        match self {
            ColorScale::Viridis => &VIRIDIS,
            ColorScale::Plasma => &PLASMA,
            ColorScale::Blues => &BLUES,
        }
    }

    /// Color at position `t` in `[0, 1]`.
    pub fn sample(self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let scaled = t * (stops.len() - 1) as f64;
        let i = (scaled.floor() as usize).min(stops.len() - 2);
        stops[i].lerp(stops[i + 1], scaled - i as f64)
    }
}

/// How chart marks are colored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColorEncoding {
    /// Colors assigned to points in order, cycling.
    Discrete {
        /// Color sequence.
        colors: Vec<Rgb>,
    },
    /// Point color derived from its value on a scale.
    Continuous {
        /// Field the color is bound to.
        field: String,
        /// Scale to sample.
        scale: ColorScale,
    },
    /// One color per series.
    PerSeries,
}

/// Kind of chart to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Pie / donut over one series.
    Pie,
    /// Vertical bars over one series.
    Bar,
    /// Horizontal bars, first point at the bottom.
    HorizontalBar,
    /// Vertical bars, one bar per series within each category.
    GroupedBar,
    /// Centered horizontal bars, top to bottom.
    Funnel,
}

/// Binding of a chart axis to a data field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisBinding {
    /// Source field name.
    pub field: String,
    /// Axis title, when it differs from the field.
    pub title: Option<String>,
}

impl AxisBinding {
    /// Bind to `field` without a title.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: None,
        }
    }

    /// Set the axis title.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    /// Category label.
    pub label: String,
    /// Numeric value.
    pub value: f64,
    /// Text drawn on the mark, if any.
    pub text: Option<String>,
}

impl DataPoint {
    /// Point without mark text.
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
            text: None,
        }
    }

    /// Attach mark text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Named sequence of points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend name.
    pub name: String,
    /// Fixed color for [`ColorEncoding::PerSeries`].
    pub color: Option<Rgb>,
    /// Points in draw order.
    pub points: Vec<DataPoint>,
}

impl Series {
    /// Create a series.
    pub fn new(name: impl Into<String>, points: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            color: None,
            points,
        }
    }

    /// Set the series color.
    pub fn color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }
}

/// Library-independent chart descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    /// Chart kind.
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// Horizontal axis binding (category for pies).
    pub x: AxisBinding,
    /// Vertical axis binding (values for pies).
    pub y: AxisBinding,
    /// Color encoding.
    pub color: ColorEncoding,
    /// Data series.
    pub series: Vec<Series>,
    /// Preferred height in points.
    pub height: Option<f32>,
    /// Whether to draw a legend.
    pub show_legend: bool,
}

impl ChartSpec {
    /// Empty chart of `kind`.
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x: AxisBinding::new(""),
            y: AxisBinding::new(""),
            color: ColorEncoding::Discrete { colors: Vec::new() },
            series: Vec::new(),
            height: None,
            show_legend: true,
        }
    }

    /// Set the x binding.
    pub fn x(mut self, axis: AxisBinding) -> Self {
        self.x = axis;
        self
    }

    /// Set the y binding.
    pub fn y(mut self, axis: AxisBinding) -> Self {
        self.y = axis;
        self
    }

    /// Set the color encoding.
    pub fn color(mut self, color: ColorEncoding) -> Self {
        self.color = color;
        self
    }

    /// Append a series.
    pub fn series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Set the preferred height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Hide the legend.
    pub fn without_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    /// True when no series carries a point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Min and max value across all series.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.value))
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Resolved color of point `point` in series `series`.
    pub fn point_color(&self, series: usize, point: usize) -> Rgb {
        match &self.color {
            ColorEncoding::Discrete { colors } if !colors.is_empty() => colors[point % colors.len()],
            ColorEncoding::Discrete { .. } => palette::NEUTRAL,
            ColorEncoding::Continuous { scale, .. } => {
                let value = self
                    .series
                    .get(series)
                    .and_then(|s| s.points.get(point))
                    .map(|p| p.value);
                match (value, self.value_bounds()) {
                    (Some(v), Some((lo, hi))) if hi > lo => scale.sample((v - lo) / (hi - lo)),
                    (Some(_), Some(_)) => scale.sample(1.0),
                    _ => palette::NEUTRAL,
                }
            }
            ColorEncoding::PerSeries => self
                .series
                .get(series)
                .and_then(|s| s.color)
                .unwrap_or(palette::NEUTRAL),
        }
    }
}

/// Headline figure shown as a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    /// Caption.
    pub label: String,
    /// Formatted value.
    pub value: String,
    /// Formatted secondary figure.
    pub delta: Option<String>,
}

impl Metric {
    /// Metric without delta.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            delta: None,
        }
    }

    /// Attach a delta.
    pub fn with_delta(mut self, delta: impl Into<String>) -> Self {
        self.delta = Some(delta.into());
        self
    }
}

/// Building block of a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Section {
    /// Section heading.
    Subheading(String),
    /// Emphasized single line.
    Strong(String),
    /// Row of metric cards.
    Metrics(Vec<Metric>),
    /// A chart.
    Chart(ChartSpec),
    /// Bullet list.
    Bullets(Vec<String>),
    /// Numbered list.
    Numbered(Vec<String>),
    /// Highlighted informational note.
    Note(String),
    /// Small print.
    Caption(String),
    /// Horizontal rule.
    Divider,
    /// Side-by-side columns with relative widths.
    Columns {
        /// Relative width per column.
        weights: Vec<f32>,
        /// Sections per column.
        columns: Vec<Vec<Section>>,
    },
}

impl Section {
    /// Columns of equal width.
    pub fn columns(columns: Vec<Vec<Section>>) -> Self {
        Section::Columns {
            weights: vec![1.0; columns.len()],
            columns,
        }
    }
}

/// Everything one page shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPlan {
    /// Page the plan was rendered for.
    pub page: Page,
    /// Page heading.
    pub title: String,
    /// Sections top to bottom.
    pub sections: Vec<Section>,
}

impl RenderPlan {
    /// Empty plan for `page`.
    pub fn new(page: Page, title: impl Into<String>) -> Self {
        Self {
            page,
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// All sections depth-first, columns flattened left to right.
    pub fn flatten(&self) -> Vec<&Section> {
        fn walk<'a>(sections: &'a [Section], out: &mut Vec<&'a Section>) {
            for section in sections {
                out.push(section);
                if let Section::Columns { columns, .. } = section {
                    for column in columns {
                        walk(column, out);
                    }
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.sections, &mut out);
        out
    }

    /// Every chart on the page.
    pub fn charts(&self) -> Vec<&ChartSpec> {
        self.flatten()
            .into_iter()
            .filter_map(|s| match s {
                Section::Chart(chart) => Some(chart),
                _ => None,
            })
            .collect()
    }

    /// Chart with the given title.
    pub fn chart(&self, title: &str) -> Option<&ChartSpec> {
        self.charts().into_iter().find(|c| c.title == title)
    }

    /// Every metric card on the page.
    pub fn metrics(&self) -> Vec<&Metric> {
        self.flatten()
            .into_iter()
            .filter_map(|s| match s {
                Section::Metrics(metrics) => Some(metrics.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Metric with the given label.
    pub fn metric(&self, label: &str) -> Option<&Metric> {
        self.metrics().into_iter().find(|m| m.label == label)
    }

    /// Items of the list following the subheading `heading`.
    pub fn list_under(&self, heading: &str) -> Option<&[String]> {
        let flat = self.flatten();
        let pos = flat
            .iter()
            .position(|s| matches!(s, Section::Subheading(h) if h == heading))?;
        flat[pos + 1..].iter().find_map(|&s| match s {
            Section::Bullets(items) | Section::Numbered(items) => Some(items.as_slice()),
            _ => None,
        })
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> DashboardResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Rgb::from_hex("#00cc96").unwrap();
        assert_eq!(color, palette::NORMAL);
        assert_eq!(color.to_hex(), "#00cc96");
        assert!(Rgb::from_hex("#12345").is_none());
        assert!(Rgb::from_hex("zzzzzz").is_none());
    }

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(ColorScale::Viridis.sample(0.0), Rgb::new(68, 1, 84));
        assert_eq!(ColorScale::Viridis.sample(1.0), Rgb::new(253, 231, 37));
        assert_eq!(ColorScale::Blues.sample(-3.0), ColorScale::Blues.sample(0.0));
        assert_eq!(ColorScale::Plasma.sample(f64::NAN), ColorScale::Plasma.sample(0.0));
    }

    #[test]
    fn test_point_colors() {
        let chart = ChartSpec::new(ChartKind::HorizontalBar, "t")
            .color(ColorEncoding::Continuous {
                field: "V".into(),
                scale: ColorScale::Viridis,
            })
            .series(Series::new("", vec![DataPoint::new("a", 1.0), DataPoint::new("b", 3.0)]));
        assert_eq!(chart.point_color(0, 0), ColorScale::Viridis.sample(0.0));
        assert_eq!(chart.point_color(0, 1), ColorScale::Viridis.sample(1.0));

        let pie = ChartSpec::new(ChartKind::Pie, "p")
            .color(ColorEncoding::Discrete {
                colors: vec![palette::NORMAL, palette::FRAUD],
            })
            .series(Series::new("", vec![DataPoint::new("a", 1.0); 3]));
        assert_eq!(pie.point_color(0, 2), palette::NORMAL);

        let grouped = ChartSpec::new(ChartKind::GroupedBar, "g")
            .color(ColorEncoding::PerSeries)
            .series(Series::new("s", vec![]).color(palette::LIGHT_CORAL));
        assert_eq!(grouped.point_color(0, 0), palette::LIGHT_CORAL);
        assert_eq!(grouped.point_color(5, 0), palette::NEUTRAL);
    }

    #[test]
    fn test_plan_queries() {
        let mut plan = RenderPlan::new(Page::Overview, "Test");
        plan.push(Section::columns(vec![
            vec![
                Section::Subheading("Top".into()),
                Section::Numbered(vec!["1. a".into()]),
            ],
            vec![Section::Chart(ChartSpec::new(ChartKind::Pie, "Pie"))],
        ]));
        plan.push(Section::Metrics(vec![Metric::new("Total", "3")]));

        assert_eq!(plan.charts().len(), 1);
        assert!(plan.chart("Pie").unwrap().is_empty());
        assert_eq!(plan.metric("Total").unwrap().value, "3");
        assert_eq!(plan.list_under("Top").unwrap(), &["1. a".to_string()]);
        assert!(plan.list_under("Missing").is_none());
    }

    #[test]
    fn test_plan_serializes() {
        let mut plan = RenderPlan::new(Page::FraudAnalysis, "Fraud Analysis");
        plan.push(Section::Divider);
        let json = plan.to_json_pretty().unwrap();
        assert!(json.contains("\"page\": \"Fraud Analysis\""));
        assert!(json.contains("\"type\": \"divider\""));
    }
}
