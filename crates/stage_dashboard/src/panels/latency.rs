use crate::config::Stage;
use crate::dashboard::{Panel, PanelStyle, SeriesColor, Unit};
use crate::metric_definitions::{MetricHistogram, MERGE_DURATION_MS, STAGE_PROCESSING_DURATION_MS};
use crate::panels::{get_targets, MetricFamily};
use crate::query_builder::{histogram_quantile, DEFAULT_DURATION, HISTOGRAM_QUANTILES};

const LATENCY_HISTOGRAMS: [(&str, MetricHistogram); 2] =
    [("processing", STAGE_PROCESSING_DURATION_MS), ("merge", MERGE_DURATION_MS)];

const LATENCY_COLORS: [(&str, SeriesColor); 4] = [
    ("processing p90", SeriesColor::Orange),
    ("processing p50", SeriesColor::SemiDarkGreen),
    ("merge p90", SeriesColor::DarkBlue),
    ("merge p50", SeriesColor::SemiDarkPurple),
];

pub(crate) fn get_latency_panel(row: usize, stage: &Stage, id: u32) -> Panel {
    let series = LATENCY_HISTOGRAMS.into_iter().flat_map(|(series_prefix, metric)| {
        HISTOGRAM_QUANTILES.into_iter().map(move |quantile| {
            (
                format!("{series_prefix} {}", quantile.legend_suffix()),
                histogram_quantile(quantile, &metric, stage.id(), DEFAULT_DURATION),
            )
        })
    });

    let style = LATENCY_COLORS
        .into_iter()
        .fold(PanelStyle::default(), |style, (name, color)| style.with_series_color(name, color));

    Panel::new(
        row,
        MetricFamily::Latency.column(),
        format!("{} latencies ({DEFAULT_DURATION})", stage.label()),
        get_targets(series),
        Unit::Milliseconds,
        id,
        style,
    )
}
