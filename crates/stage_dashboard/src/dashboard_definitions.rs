use strum::IntoEnumIterator;
use tracing::{debug, info};

use crate::config::{DashboardConfig, Stage};
use crate::dashboard::{Dashboard, DashboardMetadata, Panel, TimeRange};
use crate::panels::MetricFamily;

#[cfg(test)]
#[path = "dashboard_definitions_test.rs"]
mod dashboard_definitions_test;

pub const DEV_JSON_PATH: &str = "crates/stage_dashboard/resources/dev_grafana.json";

/// The monitored stages as `(stage label value, display name)`, in dashboard row order.
pub const STAGE_CATALOG: [(&str, &str); 9] = [
    ("tob_maiden", "Maiden"),
    ("tob_bloat", "Bloat"),
    ("tob_nylocas", "Nylocas"),
    ("tob_sotetseg", "Sotetseg"),
    ("tob_xarpus", "Xarpus"),
    ("tob_verzik", "Verzik"),
    ("colosseum_any", "Colosseum"),
    ("inferno_any", "Inferno"),
    ("mokhaiotl_any", "Mokhaiotl"),
];

pub const STAGE_DASHBOARD_METADATA: DashboardMetadata = DashboardMetadata {
    title: "Challenge Stage Processing Metrics",
    uid: "challenge-stage-processing-metrics",
    tags: &["metrics", "challenge-server", "stage"],
    refresh: "10s",
    time: TimeRange { from: "now-3h", to: "now" },
};

/// Builds one row band per stage, holding a panel per metric family. Panel ids are assigned
/// sequentially from 1 in stage order, then family order.
pub fn build_dashboard(stages: &[Stage]) -> Dashboard {
    let panels: Vec<Panel> = stages
        .iter()
        .enumerate()
        .inspect(|(row, stage)| {
            debug!("Adding stage {} ({}) at row {row}.", stage.id(), stage.label())
        })
        .flat_map(|(row, stage)| MetricFamily::iter().map(move |family| (row, stage, family)))
        .zip(1..)
        .map(|((row, stage, family), id)| family.get_panel(row, stage, id))
        .collect();

    info!("Built dashboard with {} panels for {} stages.", panels.len(), stages.len());
    Dashboard::new(STAGE_DASHBOARD_METADATA, panels)
}

pub fn build_dashboard_from_config(config: &DashboardConfig) -> Dashboard {
    build_dashboard(&config.stages)
}

/// The dashboard for the production stage catalog.
pub fn get_stage_dashboard() -> Dashboard {
    build_dashboard_from_config(&DashboardConfig::default())
}
