use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stage_dashboard::config::DashboardConfig;
use stage_dashboard::dashboard_definitions::{build_dashboard_from_config, DEV_JSON_PATH};
use stage_dashboard::dumping::{
    check_file_is_up_to_date,
    project_relative_path,
    serialize_to_file,
};
use stage_dashboard::errors::DashboardGeneratorResult;
use stage_dashboard::tracing_utils::{configure_tracing, DEFAULT_LEVEL};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[clap(about = "Generates the challenge stage processing Grafana dashboard.")]
struct Args {
    /// Output file. Defaults to the committed dashboard under the project root.
    #[clap(short = 'o', long)]
    output_path: Option<PathBuf>,
    /// A json file with a `stages` list of `{id, label}` entries. Defaults to the production
    /// stage catalog.
    #[clap(long)]
    catalog_path: Option<PathBuf>,
    /// Verify the output file matches the generated dashboard instead of writing it.
    #[clap(long, default_value_t = false)]
    check: bool,
    #[clap(long, default_value_t = DEFAULT_LEVEL)]
    log_level: LevelFilter,
}

fn run(args: Args) -> DashboardGeneratorResult<()> {
    let config = match &args.catalog_path {
        Some(catalog_path) => DashboardConfig::load(catalog_path)?,
        None => DashboardConfig::default(),
    };
    let output_path = args.output_path.unwrap_or_else(|| project_relative_path(DEV_JSON_PATH));
    let dashboard = build_dashboard_from_config(&config);

    if args.check {
        check_file_is_up_to_date(&dashboard, &output_path)?;
        info!("Stage dashboard file is up to date: {output_path:?}");
    } else {
        serialize_to_file(&dashboard, &output_path)?;
        info!("Generated stage dashboard file: {output_path:?}");
    }
    Ok(())
}

/// Creates the dashboard json file.
fn main() -> ExitCode {
    let args = Args::parse();
    configure_tracing(args.log_level);
    info!("Starting stage dashboard generator with args: {args:?}");

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
