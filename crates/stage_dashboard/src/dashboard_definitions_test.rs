use std::collections::HashSet;

use pretty_assertions::assert_eq;

use crate::config::Stage;
use crate::dashboard::{GridPos, PANEL_HEIGHT, PANEL_WIDTH};
use crate::dashboard_definitions::{
    build_dashboard,
    get_stage_dashboard,
    DEV_JSON_PATH,
    STAGE_CATALOG,
    STAGE_DASHBOARD_METADATA,
};
use crate::dumping::{project_relative_path, serialize_to_file_test};

const FIX_BINARY_NAME: &str = "stage_dashboard_generator";

fn two_stages() -> Vec<Stage> {
    vec![Stage::new("a1", "Alpha"), Stage::new("b2", "Beta")]
}

// Test that the committed grafana dashboard file is up to date. To update the file, run:
// cargo run --bin stage_dashboard_generator -q
#[test]
fn default_dev_grafana_dashboard() {
    serialize_to_file_test(
        &get_stage_dashboard(),
        &project_relative_path(DEV_JSON_PATH),
        FIX_BINARY_NAME,
    );
}

#[test]
fn two_stage_scenario() {
    let dashboard = build_dashboard(&two_stages());
    let panels = dashboard.panels();

    let ids: Vec<u32> = panels.iter().map(|panel| panel.id()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

    assert_eq!(panels[0].grid_pos(), GridPos { x: 0, y: 0, w: 8, h: 6 });
    assert_eq!(panels[1].grid_pos(), GridPos { x: 8, y: 6, w: 8, h: 6 });
    assert_eq!(panels[2].grid_pos(), GridPos { x: 16, y: 12, w: 8, h: 6 });
    assert_eq!(panels[3].grid_pos(), GridPos { x: 0, y: 18, w: 8, h: 6 });

    assert_eq!(panels[0].title(), "Alpha latencies (30m)");
    assert_eq!(panels[3].title(), "Beta latencies (30m)");
    assert!(panels[2].targets()[0].expr().contains("stage=\"a1\""));
    assert!(panels[5].targets()[0].expr().contains("stage=\"b2\""));
}

#[test]
fn empty_catalog() {
    let dashboard = build_dashboard(&[]);
    assert!(dashboard.panels().is_empty());
    assert_eq!(dashboard.metadata(), &STAGE_DASHBOARD_METADATA);

    let serialized = serde_json::to_value(&dashboard).unwrap();
    assert_eq!(serialized["panels"], serde_json::json!([]));
    assert_eq!(serialized["uid"], "challenge-stage-processing-metrics");
    assert_eq!(serialized["refresh"], "10s");
    assert_eq!(serialized["time"], serde_json::json!({ "from": "now-3h", "to": "now" }));
}

#[test]
fn generation_is_deterministic() {
    let first = serde_json::to_string(&get_stage_dashboard()).unwrap();
    let second = serde_json::to_string(&get_stage_dashboard()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn panel_ids_are_sequential() {
    let dashboard = get_stage_dashboard();
    let ids: Vec<u32> = dashboard.panels().iter().map(|panel| panel.id()).collect();
    let expected: Vec<u32> = (1..=27).collect();
    assert_eq!(STAGE_CATALOG.len() * 3, 27);
    assert_eq!(ids, expected);
}

#[test]
fn stage_panels_share_a_row_band() {
    let dashboard = get_stage_dashboard();
    let band_height = PANEL_HEIGHT * 3;

    for (row, stage_panels) in dashboard.panels().chunks(3).enumerate() {
        let xs: Vec<usize> = stage_panels.iter().map(|panel| panel.grid_pos().x).collect();
        assert_eq!(xs, vec![0, PANEL_WIDTH, 2 * PANEL_WIDTH]);

        for panel in stage_panels {
            let GridPos { y, h, .. } = panel.grid_pos();
            assert!(y >= row * band_height, "Panel {} starts above its band.", panel.id());
            assert!(y + h <= (row + 1) * band_height, "Panel {} ends below its band.", panel.id());
        }
    }
}

#[test]
fn panels_do_not_overlap() {
    let dashboard = get_stage_dashboard();
    let panels = dashboard.panels();

    for (i, first) in panels.iter().enumerate() {
        for second in &panels[i + 1..] {
            let a = first.grid_pos();
            let b = second.grid_pos();
            let overlaps = a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h;
            assert!(!overlaps, "Panels {} and {} overlap.", first.id(), second.id());
        }
    }
}

#[test]
fn queries_reference_only_their_stage() {
    let dashboard = get_stage_dashboard();
    let stage_ids: Vec<&str> = STAGE_CATALOG.iter().map(|(id, _)| *id).collect();

    for (stage_id, stage_panels) in stage_ids.iter().zip(dashboard.panels().chunks(3)) {
        for target in stage_panels.iter().flat_map(|panel| panel.targets()) {
            let filters: HashSet<&str> = stage_ids
                .iter()
                .copied()
                .filter(|id| target.expr().contains(&format!("stage=\"{id}\"")))
                .collect();
            assert_eq!(
                filters,
                HashSet::from([*stage_id]),
                "Unexpected stage in {}",
                target.expr()
            );
        }
    }
}

#[test]
fn panel_titles_use_stage_labels() {
    let dashboard = get_stage_dashboard();
    for ((_, label), stage_panels) in STAGE_CATALOG.iter().zip(dashboard.panels().chunks(3)) {
        for panel in stage_panels {
            assert!(panel.title().starts_with(label), "Unexpected title {}", panel.title());
        }
    }
}
