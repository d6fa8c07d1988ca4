//! File input and output.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::Params;
use crate::error::{GeogenError, Result};
use crate::geometry::Airfoil;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> GeogenError + '_ {
    move |source| GeogenError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Reads and validates a JSON parameter file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, a parse error for
/// malformed JSON, and a configuration error if validation fails.
pub fn load_config(path: &Path) -> Result<Params> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    let params = Params::from_json(&text)?;
    debug!(path = %path.display(), stations = params.stations(), "config loaded");
    Ok(params)
}

/// Reads one airfoil coordinate file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read and a parse or geometry
/// error if its content is not a usable profile.
pub fn read_airfoil(path: &Path) -> Result<Airfoil> {
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    let airfoil = Airfoil::parse(&text)?;
    debug!(path = %path.display(), points = airfoil.len(), "airfoil read");
    Ok(airfoil)
}

/// Writes `text` to `path`, creating the parent directory if needed.
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn write_geo(path: &Path, text: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(io_error(dir))?;
    }
    fs::write(path, text).map_err(io_error(path))
}
