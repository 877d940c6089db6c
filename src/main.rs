//! Binary entry point: load the material library from the working directory
//! and run the menu loop on stdin/stdout until the user exits.
use std::process::ExitCode;

use anyhow::Result;
use thin_film_calc::{describe_error, load_library, run_app, Config};

fn run() -> Result<()> {
    let config = Config::default();
    let library = load_library(&config.library_path)?;
    run_app(config, library)
}

/// Fatal errors (a library or log file that cannot be opened, for example)
/// are printed on stdout, where the user is looking, before exiting with a
/// failure status.
fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:?}");
            println!("{}", describe_error(&err));
            ExitCode::FAILURE
        }
    }
}
