//! Error type for the library store and the thickness calculator. The
//! session wraps these in `anyhow` errors; `main` decides which are fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the library store and the thickness calculator.
#[derive(Error, Debug)]
pub enum FilmError {
    /// The library or log file could not be opened for the given action.
    #[error("File {} failed to open for {action}.", path.display())]
    FileOpen {
        path: PathBuf,
        action: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read {}.", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not write to {}.", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An index line in the library file is not a finite decimal number.
    #[error("{}:{line}: expected a refractive index, found {content:?}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("Thickness is undefined for a refractive index below 1 (got {index:.2}).")]
    IndexBelowUnity { index: f64 },

    /// Standard input reached end of file; the session treats this like
    /// choosing exit.
    #[error("input closed")]
    InputClosed,
}

pub type FilmResult<T> = Result<T, FilmError>;
