//! Core library surface for the thin film thickness calculator.
//!
//! The binary only wires these pieces together: load the material library,
//! then hand it to the interactive session. Keeping them in a library lets
//! the store and the calculator be exercised without a terminal.
pub mod calc;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;

pub use config::{Columns, Config};
pub use error::{FilmError, FilmResult};

/// The two domain types every layer passes around.
pub use models::{Film, Library};

pub use store::{append_film, append_measurement, load_library, save_library};

/// The interactive entry point, its state container, and the formatter
/// `main` uses for fatal errors.
pub use ui::{describe_error, run_app, Session};
