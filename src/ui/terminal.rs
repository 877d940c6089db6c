use std::io::{self, IsTerminal};

use anyhow::Result;

use crate::config::Config;
use crate::models::Library;

use super::session::Session;

/// Drive a session over the process's standard input and output. Styling is
/// only switched on when stdout is an interactive terminal.
pub fn run_app(mut config: Config, library: Library) -> Result<()> {
    let stdout = io::stdout();
    config.color = config.color || stdout.is_terminal();

    let mut session = Session::new(config, library, io::stdin().lock(), stdout.lock());
    session.run()
}
