//! Append-only measurement log, one fixed-width line per saved result. The
//! log is never read back by the program.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::config::Columns;
use crate::error::{FilmError, FilmResult};
use crate::models::Film;

/// Append one fixed-width measurement line to the log, creating the log on
/// first use. Measurements with an undefined thickness are refused before the
/// file is touched.
pub fn append_measurement(path: &Path, film: &Film, columns: &Columns) -> FilmResult<()> {
    let line = film.log_line(columns)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| FilmError::FileOpen {
            path: path.to_path_buf(),
            action: "appending",
            source,
        })?;
    writeln!(file, "{line}").map_err(|source| FilmError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("logged measurement of {} to {}", film.name(), path.display());
    Ok(())
}
