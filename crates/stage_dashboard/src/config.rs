use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use validator::{Validate, ValidationError};

use crate::dashboard_definitions::STAGE_CATALOG;
use crate::errors::{DashboardGeneratorError, DashboardGeneratorResult};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// A monitored challenge stage. The id is the value of the `stage` label on the challenge server
/// metrics, the label is its human readable name.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct Stage {
    #[validate(length(min = 1), custom(function = "validate_label_value"))]
    id: String,
    #[validate(length(min = 1))]
    label: String,
}

impl Stage {
    pub fn new(id: impl ToString, label: impl ToString) -> Self {
        Self { id: id.to_string(), label: label.to_string() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The generator input. Stage order determines the dashboard row order.
#[derive(Clone, Debug, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct DashboardConfig {
    #[validate(nested, custom(function = "validate_unique_stage_ids"))]
    pub stages: Vec<Stage>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { stages: STAGE_CATALOG.iter().map(|(id, label)| Stage::new(id, label)).collect() }
    }
}

impl DashboardConfig {
    /// Loads and validates a stage catalog from a json file.
    pub fn load(path: &Path) -> DashboardGeneratorResult<Self> {
        debug!("Loading dashboard config from {path:?}.");
        let content = fs::read_to_string(path).map_err(|source| DashboardGeneratorError::Io {
            operation: "read",
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Loaded {} stages from {path:?}.", config.stages.len());
        Ok(config)
    }
}

// Stage ids are substituted verbatim into a Prometheus label matcher.
fn validate_label_value(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Ok(());
    }
    let mut error = ValidationError::new("Stage id contains characters outside [A-Za-z0-9_].");
    error.message = Some(std::borrow::Cow::from(format!("Invalid stage id: {value}")));
    Err(error)
}

fn validate_unique_stage_ids(stages: &[Stage]) -> Result<(), ValidationError> {
    let mut ids = HashSet::new();
    for stage in stages {
        if !ids.insert(stage.id()) {
            let mut error = ValidationError::new("Stage ids are not unique.");
            error.message =
                Some(std::borrow::Cow::from(format!("Repeated stage id: {}", stage.id)));
            return Err(error);
        }
    }
    Ok(())
}
