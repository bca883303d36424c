use std::collections::HashSet;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use strum_macros::{Display, EnumIter};

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

pub const PANEL_WIDTH: usize = 8;
pub const PANEL_HEIGHT: usize = 6;
/// Number of panels generated for every stage; each stage owns one row band of this many panels.
pub const FAMILIES_PER_STAGE: usize = 3;

const DEFAULT_FILL_OPACITY: u8 = 20;
const LINE_WIDTH: u8 = 2;
const POINT_SIZE: u8 = 4;
const STACKING_GROUP: &str = "A";
const SCHEMA_VERSION: u32 = 42;
const DASHBOARD_VERSION: u32 = 1;

pub(crate) const DATASOURCE_VARIABLE_NAME: &str = "DS_PROMETHEUS";

/// Grafana panel types.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum PanelType {
    #[serde(rename = "timeseries")]
    TimeSeries,
}

/// Units understood by the Grafana field formatter.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub enum Unit {
    #[serde(rename = "ms")]
    Milliseconds,
    #[serde(rename = "bytes")]
    Bytes,
    #[serde(rename = "count")]
    Count,
}

/// Named colors from the Grafana palette.
#[derive(Clone, Copy, Debug, Display, EnumIter, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SeriesColor {
    Orange,
    SemiDarkGreen,
    DarkGreen,
    DarkBlue,
    SemiDarkPurple,
    LightRed,
    SemiDarkRed,
    SemiDarkYellow,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LineInterpolation {
    Smooth,
    Linear,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StackingMode {
    None,
    Normal,
}

/// A single Prometheus query feeding one series of a panel.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    expr: String,
    legend_format: String,
    ref_id: String,
}

impl Target {
    pub fn new(
        expr: impl Into<String>,
        legend_format: impl Into<String>,
        ref_id: impl Into<String>,
    ) -> Self {
        Self { expr: expr.into(), legend_format: legend_format.into(), ref_id: ref_id.into() }
    }

    pub fn expr(&self) -> &str {
        &self.expr
    }

    pub fn legend_format(&self) -> &str {
        &self.legend_format
    }

    pub fn ref_id(&self) -> &str {
        &self.ref_id
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct GridPos {
    pub h: usize,
    pub w: usize,
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    /// Panels of one stage are placed side by side, each one panel-height lower than its left
    /// neighbour, inside the stage's row band.
    pub fn from_slot(row: usize, column: usize) -> Self {
        assert!(
            column < FAMILIES_PER_STAGE,
            "Column {column} is out of range, a stage has {FAMILIES_PER_STAGE} panels."
        );
        Self {
            h: PANEL_HEIGHT,
            w: PANEL_WIDTH,
            x: column * PANEL_WIDTH,
            y: row * (PANEL_HEIGHT * FAMILIES_PER_STAGE) + column * PANEL_HEIGHT,
        }
    }
}

/// Visual configuration of a time series panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelStyle {
    fill_opacity: u8,
    line_interpolation: LineInterpolation,
    stacking: StackingMode,
    series_colors: IndexMap<String, SeriesColor>,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            fill_opacity: DEFAULT_FILL_OPACITY,
            line_interpolation: LineInterpolation::Smooth,
            stacking: StackingMode::None,
            series_colors: IndexMap::new(),
        }
    }
}

impl PanelStyle {
    pub fn with_fill_opacity(mut self, fill_opacity: u8) -> Self {
        assert!(fill_opacity <= 100, "Fill opacity {fill_opacity} is not a percentage.");
        self.fill_opacity = fill_opacity;
        self
    }

    pub fn stacked(mut self) -> Self {
        self.stacking = StackingMode::Normal;
        self
    }

    /// Counts are stepped, so their series should not be smoothed.
    pub fn with_linear_interpolation(mut self) -> Self {
        self.line_interpolation = LineInterpolation::Linear;
        self
    }

    /// Pins the series with the given legend to a fixed color.
    pub fn with_series_color(mut self, series_name: impl ToString, color: SeriesColor) -> Self {
        self.series_colors.insert(series_name.to_string(), color);
        self
    }

    pub fn fill_opacity(&self) -> u8 {
        self.fill_opacity
    }

    pub fn line_interpolation(&self) -> LineInterpolation {
        self.line_interpolation
    }

    pub fn stacking(&self) -> StackingMode {
        self.stacking
    }

    pub fn series_colors(&self) -> &IndexMap<String, SeriesColor> {
        &self.series_colors
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    id: u32,
    title: String,
    grid_pos: GridPos,
    unit: Unit,
    style: PanelStyle,
    targets: Vec<Target>,
}

impl Panel {
    /// Builds the panel at the `(row, column)` layout slot.
    ///
    /// Panics on an empty title, a zero id or an empty target list; these indicate a broken
    /// catalog rather than a runtime condition.
    pub fn new(
        row: usize,
        column: usize,
        title: impl ToString,
        targets: Vec<Target>,
        unit: Unit,
        id: u32,
        style: PanelStyle,
    ) -> Self {
        let title = title.to_string();
        assert!(!title.is_empty(), "Panel {id} has an empty title.");
        assert!(id > 0, "Panel ids start at 1, got 0 for panel {title}.");
        assert!(!targets.is_empty(), "Panel {title} has no targets.");

        Self { id, title, grid_pos: GridPos::from_slot(row, column), unit, style, targets }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn grid_pos(&self) -> GridPos {
        self.grid_pos
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn style(&self) -> &PanelStyle {
        &self.style
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }
}

#[derive(Serialize)]
struct DatasourceRef {
    #[serde(rename = "type")]
    datasource_type: &'static str,
    uid: &'static str,
}

const PROMETHEUS_DATASOURCE: DatasourceRef =
    DatasourceRef { datasource_type: "prometheus", uid: "${DS_PROMETHEUS}" };

const GRAFANA_DATASOURCE: DatasourceRef =
    DatasourceRef { datasource_type: "grafana", uid: "-- Grafana --" };

#[derive(Serialize)]
struct Mode {
    mode: &'static str,
}

#[derive(Serialize)]
struct ScaleDistribution {
    #[serde(rename = "type")]
    scale_type: &'static str,
}

#[derive(Serialize)]
struct Stacking {
    group: &'static str,
    mode: StackingMode,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CustomFieldConfig {
    axis_border_show: bool,
    axis_centered_zero: bool,
    axis_color_mode: &'static str,
    axis_placement: &'static str,
    bar_alignment: i32,
    draw_style: &'static str,
    fill_opacity: u8,
    gradient_mode: &'static str,
    line_interpolation: LineInterpolation,
    line_width: u8,
    point_size: u8,
    scale_distribution: ScaleDistribution,
    show_points: &'static str,
    span_nulls: bool,
    stacking: Stacking,
    thresholds_style: Mode,
}

impl From<&PanelStyle> for CustomFieldConfig {
    fn from(style: &PanelStyle) -> Self {
        Self {
            axis_border_show: false,
            axis_centered_zero: false,
            axis_color_mode: "text",
            axis_placement: "auto",
            bar_alignment: 0,
            draw_style: "line",
            fill_opacity: style.fill_opacity,
            gradient_mode: "none",
            line_interpolation: style.line_interpolation,
            line_width: LINE_WIDTH,
            point_size: POINT_SIZE,
            scale_distribution: ScaleDistribution { scale_type: "linear" },
            show_points: "auto",
            span_nulls: true,
            stacking: Stacking { group: STACKING_GROUP, mode: style.stacking },
            thresholds_style: Mode { mode: "off" },
        }
    }
}

#[derive(Serialize)]
struct FieldDefaults {
    color: Mode,
    custom: CustomFieldConfig,
    unit: Unit,
}

#[derive(Serialize)]
struct Matcher<'a> {
    id: &'static str,
    options: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FixedColor {
    fixed_color: SeriesColor,
    mode: &'static str,
}

#[derive(Serialize)]
struct ColorProperty {
    id: &'static str,
    value: FixedColor,
}

#[derive(Serialize)]
struct ColorOverride<'a> {
    matcher: Matcher<'a>,
    properties: [ColorProperty; 1],
}

impl<'a> ColorOverride<'a> {
    fn new(series_name: &'a str, color: SeriesColor) -> Self {
        Self {
            matcher: Matcher { id: "byName", options: series_name },
            properties: [ColorProperty {
                id: "color",
                value: FixedColor { fixed_color: color, mode: "fixed" },
            }],
        }
    }
}

#[derive(Serialize)]
struct FieldConfig<'a> {
    defaults: FieldDefaults,
    overrides: Vec<ColorOverride<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Legend {
    calcs: [&'static str; 0],
    display_mode: &'static str,
    placement: &'static str,
    show_legend: bool,
}

#[derive(Serialize)]
struct Tooltip {
    mode: &'static str,
    sort: &'static str,
}

#[derive(Serialize)]
struct PanelOptions {
    legend: Legend,
    tooltip: Tooltip,
}

const PANEL_OPTIONS: PanelOptions = PanelOptions {
    legend: Legend { calcs: [], display_mode: "list", placement: "bottom", show_legend: true },
    tooltip: Tooltip { mode: "multi", sort: "none" },
};

// Custom Serialize implementation for Panel, producing the Grafana panel json.
impl Serialize for Panel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let field_config = FieldConfig {
            defaults: FieldDefaults {
                color: Mode { mode: "palette-classic" },
                custom: CustomFieldConfig::from(&self.style),
                unit: self.unit,
            },
            overrides: self
                .style
                .series_colors
                .iter()
                .map(|(series_name, color)| ColorOverride::new(series_name, *color))
                .collect(),
        };

        let mut state = serializer.serialize_struct("Panel", 8)?;
        state.serialize_field("datasource", &PROMETHEUS_DATASOURCE)?;
        state.serialize_field("fieldConfig", &field_config)?;
        state.serialize_field("gridPos", &self.grid_pos)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("options", &PANEL_OPTIONS)?;
        state.serialize_field("targets", &self.targets)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("type", &PanelType::TimeSeries)?;
        state.end()
    }
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct TimeRange {
    pub from: &'static str,
    pub to: &'static str,
}

/// The fixed, non-panel part of the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardMetadata {
    pub title: &'static str,
    pub uid: &'static str,
    pub tags: &'static [&'static str],
    pub refresh: &'static str,
    pub time: TimeRange,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BuiltInAnnotation {
    built_in: u8,
    datasource: DatasourceRef,
    enable: bool,
    hide: bool,
    icon_color: &'static str,
    name: &'static str,
    #[serde(rename = "type")]
    annotation_type: &'static str,
}

const BUILT_IN_ANNOTATION: BuiltInAnnotation = BuiltInAnnotation {
    built_in: 1,
    datasource: GRAFANA_DATASOURCE,
    enable: true,
    hide: true,
    icon_color: "rgba(0, 211, 255, 1)",
    name: "Annotations & Alerts",
    annotation_type: "dashboard",
};

#[derive(Serialize)]
struct CurrentSelection {
    text: &'static str,
    value: &'static str,
}

#[derive(Serialize)]
struct DatasourceVariable {
    current: CurrentSelection,
    name: &'static str,
    options: [&'static str; 0],
    query: &'static str,
    refresh: u8,
    #[serde(rename = "type")]
    variable_type: &'static str,
}

const DATASOURCE_VARIABLE: DatasourceVariable = DatasourceVariable {
    current: CurrentSelection { text: "Prometheus", value: "Prometheus" },
    name: DATASOURCE_VARIABLE_NAME,
    options: [],
    query: "prometheus",
    refresh: 1,
    variable_type: "datasource",
};

#[derive(Serialize)]
struct List<T> {
    list: [T; 1],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Dashboard {
    metadata: DashboardMetadata,
    panels: Vec<Panel>,
}

impl Dashboard {
    pub fn new(metadata: DashboardMetadata, panels: Vec<Panel>) -> Self {
        // Validate that there are no duplicate panel ids.
        panels
            .iter()
            .map(Panel::id)
            .try_fold(HashSet::new(), |mut set, id| set.insert(id).then_some(set).ok_or(id))
            .unwrap_or_else(|duplicate| {
                panic!("Duplicate panel id found: {duplicate} in dashboard {}", metadata.title)
            });

        Self { metadata, panels }
    }

    pub fn metadata(&self) -> &DashboardMetadata {
        &self.metadata
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }
}

// Custom Serialize implementation for Dashboard, wrapping the panels in the Grafana envelope.
impl Serialize for Dashboard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let no_links: [&str; 0] = [];

        let mut state = serializer.serialize_struct("Dashboard", 18)?;
        state.serialize_field("annotations", &List { list: [BUILT_IN_ANNOTATION] })?;
        state.serialize_field("editable", &true)?;
        state.serialize_field("fiscalYearStartMonth", &0)?;
        state.serialize_field("graphTooltip", &0)?;
        // Grafana assigns the numeric id on import.
        state.serialize_field("id", &None::<u32>)?;
        state.serialize_field("links", &no_links)?;
        state.serialize_field("panels", &self.panels)?;
        state.serialize_field("preload", &false)?;
        state.serialize_field("refresh", self.metadata.refresh)?;
        state.serialize_field("schemaVersion", &SCHEMA_VERSION)?;
        state.serialize_field("tags", self.metadata.tags)?;
        state.serialize_field("templating", &List { list: [DATASOURCE_VARIABLE] })?;
        state.serialize_field("time", &self.metadata.time)?;
        state.serialize_field("timepicker", &serde_json::Map::new())?;
        state.serialize_field("timezone", "")?;
        state.serialize_field("title", self.metadata.title)?;
        state.serialize_field("uid", self.metadata.uid)?;
        state.serialize_field("version", &DASHBOARD_VERSION)?;
        state.end()
    }
}
