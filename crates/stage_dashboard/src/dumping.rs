//! Writing generated json documents to disk and checking committed ones are up to date.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::errors::{DashboardGeneratorError, DashboardGeneratorResult};

#[cfg(test)]
#[path = "dumping_test.rs"]
mod dumping_test;

/// Returns the path of `relative_path` under the project root.
pub fn project_relative_path(relative_path: &str) -> PathBuf {
    // The project root is two directories above the crate directory.
    let project_root: PathBuf = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Cannot navigate up")
        .into();
    project_root.join(relative_path)
}

fn io_error(
    operation: &'static str,
    path: &Path,
) -> impl FnOnce(std::io::Error) -> DashboardGeneratorError {
    let path = path.to_path_buf();
    move |source| DashboardGeneratorError::Io { operation, path, source }
}

/// Writes `data` as pretty json followed by a newline, creating missing parent directories.
pub fn serialize_to_file<T: Serialize>(
    data: &T,
    file_path: &Path,
) -> DashboardGeneratorResult<()> {
    if let Some(parent) = file_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error("create directory", parent))?;
    }

    // Create file writer.
    let file = File::create(file_path).map_err(io_error("create", file_path))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)?;
    // Add an extra newline after the JSON content.
    writer.write_all(b"\n").map_err(io_error("write", file_path))?;
    writer.flush().map_err(io_error("flush", file_path))?;

    info!("Wrote {file_path:?}.");
    Ok(())
}

fn read_json_file(file_path: &Path) -> DashboardGeneratorResult<Value> {
    let content = fs::read_to_string(file_path).map_err(io_error("read", file_path))?;
    Ok(serde_json::from_str(&content)?)
}

/// Checks the json stored at `file_path` equals the serialization of `data`. Object key order and
/// formatting are ignored, array order is not.
pub fn check_file_is_up_to_date<T: Serialize>(
    data: &T,
    file_path: &Path,
) -> DashboardGeneratorResult<()> {
    let expected = serde_json::to_value(data)?;
    let stored = read_json_file(file_path)?;
    if stored != expected {
        return Err(DashboardGeneratorError::OutOfDate { path: file_path.to_path_buf() });
    }
    debug!("{file_path:?} is up to date.");
    Ok(())
}

/// Asserts the json stored at `file_path` matches `data`, printing the difference and the command
/// that regenerates the file otherwise.
#[cfg(test)]
pub(crate) fn serialize_to_file_test<T: Serialize>(
    data: &T,
    file_path: &Path,
    fix_binary_name: &str,
) {
    use assert_json_diff::{assert_json_matches_no_panic, CompareMode, Config};

    let expected = serde_json::to_value(data).expect("Should be able to serialize the data.");
    let stored = read_json_file(file_path)
        .unwrap_or_else(|error| panic!("Failed to read {file_path:?}: {error}"));
    if let Err(error) =
        assert_json_matches_no_panic(&stored, &expected, Config::new(CompareMode::Strict))
    {
        panic!(
            "\n\n{file_path:?} is not up to date. To update it, run: cargo run --bin \
             {fix_binary_name} -q\n{error}\n\n"
        );
    }
}
