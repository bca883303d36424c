//! Generates the challenge stage processing Grafana dashboard from a catalog of monitored stages.

pub mod config;
pub mod dashboard;
pub mod dashboard_definitions;
pub mod dumping;
pub mod errors;
pub mod metric_definitions;
mod panels;
mod query_builder;
pub mod tracing_utils;
