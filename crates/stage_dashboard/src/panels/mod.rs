use strum::EnumCount;
use strum_macros::{EnumCount as EnumCountMacro, EnumIter};

use crate::config::Stage;
use crate::dashboard::{Panel, Target, FAMILIES_PER_STAGE};
use crate::query_builder::ref_id;

pub(crate) mod issues;
pub(crate) mod latency;
pub(crate) mod payload;


/// The metric dimensions charted for every stage, in column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumCountMacro)]
pub(crate) enum MetricFamily {
    Latency,
    Payload,
    Issues,
}

const _: () = assert!(
    MetricFamily::COUNT == FAMILIES_PER_STAGE,
    "Every metric family needs its own column in the stage row band."
);

impl MetricFamily {
    pub(crate) fn column(&self) -> usize {
        match self {
            MetricFamily::Latency => 0,
            MetricFamily::Payload => 1,
            MetricFamily::Issues => 2,
        }
    }

    pub(crate) fn get_panel(&self, row: usize, stage: &Stage, id: u32) -> Panel {
        match self {
            MetricFamily::Latency => latency::get_latency_panel(row, stage, id),
            MetricFamily::Payload => payload::get_payload_panel(row, stage, id),
            MetricFamily::Issues => issues::get_issues_panel(row, stage, id),
        }
    }
}

/// Attaches sequential reference ids to `(legend, expr)` pairs.
fn get_targets(series: impl IntoIterator<Item = (String, String)>) -> Vec<Target> {
    series
        .into_iter()
        .enumerate()
        .map(|(index, (legend, expr))| Target::new(expr, legend, ref_id(index)))
        .collect()
}
