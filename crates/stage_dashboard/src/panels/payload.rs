use crate::config::Stage;
use crate::dashboard::{Panel, PanelStyle, SeriesColor, Unit};
use crate::metric_definitions::STAGE_EVENT_PAYLOAD_PER_CLIENT_BYTES;
use crate::panels::{get_targets, MetricFamily};
use crate::query_builder::{histogram_quantile, DEFAULT_DURATION, HISTOGRAM_QUANTILES};

const PAYLOAD_FILL_OPACITY: u8 = 10;

const PAYLOAD_COLORS: [(&str, SeriesColor); 2] =
    [("payload p90", SeriesColor::LightRed), ("payload p50", SeriesColor::DarkGreen)];

pub(crate) fn get_payload_panel(row: usize, stage: &Stage, id: u32) -> Panel {
    let series = HISTOGRAM_QUANTILES.into_iter().map(|quantile| {
        (
            format!("payload {}", quantile.legend_suffix()),
            histogram_quantile(
                quantile,
                &STAGE_EVENT_PAYLOAD_PER_CLIENT_BYTES,
                stage.id(),
                DEFAULT_DURATION,
            ),
        )
    });

    let style = PAYLOAD_COLORS.into_iter().fold(
        PanelStyle::default().with_fill_opacity(PAYLOAD_FILL_OPACITY),
        |style, (name, color)| style.with_series_color(name, color),
    );

    Panel::new(
        row,
        MetricFamily::Payload.column(),
        format!("{} average per-client payload ({DEFAULT_DURATION})", stage.label()),
        get_targets(series),
        Unit::Bytes,
        id,
        style,
    )
}
