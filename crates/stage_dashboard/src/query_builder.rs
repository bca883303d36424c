use crate::metric_definitions::{MetricCounter, MetricHistogram};

#[cfg(test)]
#[path = "query_builder_test.rs"]
mod query_builder_test;

pub(crate) const DEFAULT_DURATION: &str = "30m";
pub(crate) const STAGE_LABEL_NAME: &str = "stage";

const MAX_REF_IDS: usize = 26;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Quantile {
    P90,
    P50,
}

impl Quantile {
    fn as_fraction(&self) -> &'static str {
        match self {
            Quantile::P90 => "0.9",
            Quantile::P50 => "0.5",
        }
    }

    pub(crate) fn legend_suffix(&self) -> &'static str {
        match self {
            Quantile::P90 => "p90",
            Quantile::P50 => "p50",
        }
    }
}

/// Quantiles shown for every histogram, highest first.
pub(crate) const HISTOGRAM_QUANTILES: [Quantile; 2] = [Quantile::P90, Quantile::P50];

/// `metric{stage="<stage_id>"}`
pub(crate) fn with_stage_filter(metric_name: &str, stage_id: &str) -> String {
    format!("{metric_name}{{{STAGE_LABEL_NAME}=\"{stage_id}\"}}")
}

pub(crate) fn histogram_quantile(
    quantile: Quantile,
    metric: &MetricHistogram,
    stage_id: &str,
    duration: &str,
) -> String {
    format!(
        "histogram_quantile({}, sum by (le) (rate({}[{duration}])))",
        quantile.as_fraction(),
        with_stage_filter(&metric.get_bucket_name(), stage_id)
    )
}

pub(crate) fn sum_increase(metric: &MetricCounter, stage_id: &str, duration: &str) -> String {
    format!("sum(increase({}[{duration}]))", with_stage_filter(metric.get_name(), stage_id))
}

/// Grafana query reference ids: `A`, `B`, `C`, ...
pub(crate) fn ref_id(index: usize) -> String {
    assert!(index < MAX_REF_IDS, "Query index {index} exceeds the {MAX_REF_IDS} reference ids.");
    let offset = u8::try_from(index).expect("Index is bounded by MAX_REF_IDS.");
    char::from(b'A' + offset).to_string()
}
