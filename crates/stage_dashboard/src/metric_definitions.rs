//! Challenge server metrics the dashboard queries. Every metric carries a `stage` label.

#[cfg(test)]
#[path = "metric_definitions_test.rs"]
mod metric_definitions_test;

const HISTOGRAM_BUCKET_SUFFIX: &str = "_bucket";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricHistogram {
    name: &'static str,
    description: &'static str,
}

impl MetricHistogram {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }

    pub const fn get_name(&self) -> &'static str {
        self.name
    }

    pub const fn get_description(&self) -> &'static str {
        self.description
    }

    /// The name of the cumulative bucket series Prometheus exports for this histogram.
    pub fn get_bucket_name(&self) -> String {
        format!("{}{HISTOGRAM_BUCKET_SUFFIX}", self.name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MetricCounter {
    name: &'static str,
    description: &'static str,
}

impl MetricCounter {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }

    pub const fn get_name(&self) -> &'static str {
        self.name
    }

    pub const fn get_description(&self) -> &'static str {
        self.description
    }
}

pub const STAGE_PROCESSING_DURATION_MS: MetricHistogram = MetricHistogram::new(
    "challenge_server_stage_processing_duration_ms",
    "Time spent processing a stage",
);

pub const MERGE_DURATION_MS: MetricHistogram =
    MetricHistogram::new("challenge_server_merge_duration_ms", "Time spent merging client events");

pub const STAGE_EVENT_PAYLOAD_PER_CLIENT_BYTES: MetricHistogram = MetricHistogram::new(
    "challenge_server_stage_event_payload_per_client_bytes",
    "Average payload size per client for stage events",
);

pub const MERGE_ALERTS: MetricCounter =
    MetricCounter::new("challenge_server_merge_alerts_total", "Merge alert counts");

pub const CLIENT_ANOMALIES: MetricCounter =
    MetricCounter::new("challenge_server_client_anomalies_total", "Client anomaly occurrences");

pub const ALL_HISTOGRAMS: [MetricHistogram; 3] =
    [STAGE_PROCESSING_DURATION_MS, MERGE_DURATION_MS, STAGE_EVENT_PAYLOAD_PER_CLIENT_BYTES];

pub const ALL_COUNTERS: [MetricCounter; 2] = [MERGE_ALERTS, CLIENT_ANOMALIES];
