use std::sync::OnceLock;

use time::macros::format_description;
use tracing::metadata::LevelFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::INFO;

// Ensures the subscriber is installed only once per process.
static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs a compact, UTC-timestamped subscriber. `RUST_LOG` directives take precedence over
/// `level`.
pub fn configure_tracing(level: LevelFilter) {
    TRACING_INITIALIZED.get_or_init(|| {
        // Use default time formatting with subsecond precision limited to three digits.
        let time_format = format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        );
        let timer = UtcTime::new(time_format);

        let fmt_layer = fmt::layer()
            .compact()
            .with_timer(timer)
            .with_target(false) // No module name.
            // Instead, file name and line number.
            .with_file(true)
            .with_line_number(true);

        let filter_layer =
            EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();

        tracing_subscriber::registry().with(fmt_layer).with(filter_layer).init();
        tracing::debug!("Tracing has been successfully initialized.");
    });
}
