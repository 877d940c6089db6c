//! Session configuration. There are no flags or config files: the defaults
//! reproduce the classic layout, and tests point the paths at scratch
//! directories.

use std::path::PathBuf;

/// Library of named materials, two lines per record.
pub const DEFAULT_LIBRARY_FILE: &str = "films.txt";
/// Append-only measurement log.
pub const DEFAULT_LOG_FILE: &str = "data.txt";

/// Fixed column widths shared by the console tables and the measurement log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub material: usize,
    pub index: usize,
    pub maxima: usize,
    pub thickness: usize,
    /// Thickness column of the measurement log, which is narrower than the
    /// console column.
    pub log_thickness: usize,
    /// Width of the 1-based position printed before each library row.
    pub position: usize,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            material: 30,
            index: 10,
            maxima: 15,
            thickness: 20,
            log_thickness: 15,
            position: 2,
        }
    }
}

/// Runtime settings for a calculator session.
#[derive(Debug, Clone)]
pub struct Config {
    pub library_path: PathBuf,
    pub log_path: PathBuf,
    pub columns: Columns,
    /// Emit terminal styling around headings and errors.
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            library_path: PathBuf::from(DEFAULT_LIBRARY_FILE),
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
            columns: Columns::default(),
            color: false,
        }
    }
}
