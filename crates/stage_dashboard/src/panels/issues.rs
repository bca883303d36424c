use crate::config::Stage;
use crate::dashboard::{Panel, PanelStyle, SeriesColor, Unit};
use crate::metric_definitions::{MetricCounter, CLIENT_ANOMALIES, MERGE_ALERTS};
use crate::panels::{get_targets, MetricFamily};
use crate::query_builder::{sum_increase, DEFAULT_DURATION};

const ISSUES_FILL_OPACITY: u8 = 15;

const ISSUE_COUNTERS: [(&str, MetricCounter, SeriesColor); 2] = [
    ("merge alerts", MERGE_ALERTS, SeriesColor::SemiDarkRed),
    ("client anomalies", CLIENT_ANOMALIES, SeriesColor::SemiDarkYellow),
];

pub(crate) fn get_issues_panel(row: usize, stage: &Stage, id: u32) -> Panel {
    let series = ISSUE_COUNTERS.into_iter().map(|(series_name, metric, _)| {
        (series_name.to_string(), sum_increase(&metric, stage.id(), DEFAULT_DURATION))
    });

    let style = ISSUE_COUNTERS.into_iter().fold(
        PanelStyle::default()
            .with_fill_opacity(ISSUES_FILL_OPACITY)
            .stacked()
            .with_linear_interpolation(),
        |style, (name, _, color)| style.with_series_color(name, color),
    );

    Panel::new(
        row,
        MetricFamily::Issues.column(),
        format!("{} merge issues ({DEFAULT_DURATION})", stage.label()),
        get_targets(series),
        Unit::Count,
        id,
        style,
    )
}
