//! The menu state machine: MENU leads to CALCULATE, LIST, ADD or DELETE and
//! back, until EXIT. Each operation is a method on `Session`; prompts loop on
//! invalid input instead of failing.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};

use crate::config::Config;
use crate::error::FilmError;
use crate::models::{Film, Library};
use crate::store::{append_film, append_measurement, save_library};

use super::forms::{parse_number, parse_position, parse_yes};
use super::helpers::{
    emphasize, library_header, material_header, measurement_header, numbered_row, warn_style,
};
use super::menu::{menu_text, MenuChoice};

const NAME_PROMPT: &str = "Enter the name of the film: ";
const INDEX_PROMPT: &str = "Enter the refractive index of the film: ";
const RANGE_PROMPT: &str =
    "Enter the spectral bandwidth over which the spectra was acquired in nm: ";
const MAXIMA_PROMPT: &str = "Enter the number of maxima within the spectral range: ";
const POSITION_PROMPT: &str = "Enter the number preceding the name of the thin film material: ";
const SAVE_FILM_PROMPT: &str = "Save material and index of this film (y/n)? ";
const SAVE_MEASUREMENT_PROMPT: &str = "Would you like to save this measurement result (y/n)? ";
const FROM_LIBRARY_PROMPT: &str = "Read material data from library? (y/n): ";
const ANOTHER_PROMPT: &str = "Enter another thin film? (y/n): ";

/// Menu-driven calculator session. Owns the in-memory library for its whole
/// lifetime and talks to the user through any line reader and writer, which
/// keeps the flows scriptable in tests.
pub struct Session<R, W> {
    config: Config,
    library: Library,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Build a session around an already loaded library. Nothing is printed
    /// until [`Session::run`] is called.
    pub fn new(config: Config, library: Library, input: R, output: W) -> Self {
        Self {
            config,
            library,
            input,
            output,
        }
    }

    /// The live library, including additions and deletions made so far.
    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Hand back the writer, mostly so tests can inspect the transcript.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Show the menu until the user picks `0` or input runs out. Store
    /// failures are returned to the caller, which treats them as fatal.
    pub fn run(&mut self) -> Result<()> {
        let banner = emphasize("Thin Film Calculator", self.config.color);
        write!(self.output, "\n{banner}\n")?;

        loop {
            match self.step() {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) if is_input_closed(&err) => {
                    debug!("input closed, leaving the menu");
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        let farewell = emphasize("Goodbye!", self.config.color);
        write!(self.output, "\n{farewell}\n")?;
        self.output.flush().context("failed to flush output")
    }

    /// Run one menu round. Returns `false` once the user asks to exit.
    fn step(&mut self) -> Result<bool> {
        let answer = self.prompt(&menu_text())?;
        let choice = match MenuChoice::parse(&answer) {
            Ok(choice) => choice,
            Err(err) => {
                warn!("invalid menu choice {answer:?}");
                self.complain(&err.to_string())?;
                return Ok(true);
            }
        };

        debug!("menu choice: {choice:?}");
        match choice {
            MenuChoice::Exit => return Ok(false),
            MenuChoice::Calculate => self.calculate()?,
            MenuChoice::List => self.list()?,
            MenuChoice::Add => self.add()?,
            MenuChoice::Delete => self.delete()?,
        }
        Ok(true)
    }

    /// Compute thicknesses until the user declines another film.
    fn calculate(&mut self) -> Result<()> {
        loop {
            let mut from_library = self.prompt_yes(FROM_LIBRARY_PROMPT)?;
            if from_library && self.library.is_empty() {
                self.complain("The thin film library is empty; enter the film manually.")?;
                from_library = false;
            }

            if from_library {
                let (_, mut film) = self.select_film()?;
                film.set_spectral_range(self.prompt_number(RANGE_PROMPT)?);
                film.set_maxima(self.prompt_number(MAXIMA_PROMPT)?);
                self.show_measurement(&film)?;
                self.offer_measurement_log(&film)?;
            } else {
                let film = self.read_measurement()?;
                self.show_measurement(&film)?;
                if self.prompt_yes(SAVE_FILM_PROMPT)? {
                    self.add_to_library(&film)?;
                }
                self.offer_measurement_log(&film)?;
            }

            if !self.prompt_yes(ANOTHER_PROMPT)? {
                return Ok(());
            }
        }
    }

    /// Print the numbered library table.
    fn list(&mut self) -> Result<()> {
        let columns = self.config.columns;
        let title = emphasize("THIN FILM LIBRARY", self.config.color);
        writeln!(self.output, "\n{title}")?;
        writeln!(self.output, "{}", library_header(&columns))?;
        for (idx, film) in self.library.iter().enumerate() {
            let row = numbered_row(idx + 1, &film.library_row(&columns), &columns);
            writeln!(self.output, "{row}")?;
        }
        Ok(())
    }

    /// Ask for a name and index and optionally store them.
    fn add(&mut self) -> Result<()> {
        let name = self.prompt_name()?;
        let film = Film::new(name, self.prompt_number(INDEX_PROMPT)?);

        let columns = self.config.columns;
        writeln!(self.output)?;
        writeln!(self.output, "{}", material_header(&columns))?;
        writeln!(self.output, "{}", film.library_row(&columns))?;
        writeln!(self.output)?;

        if self.prompt_yes(SAVE_FILM_PROMPT)? {
            self.add_to_library(&film)?;
        }
        Ok(())
    }

    /// Remove one entry and rewrite the library file from memory.
    fn delete(&mut self) -> Result<()> {
        if self.library.is_empty() {
            return self.complain("The thin film library is empty.");
        }

        let (position, _) = self.select_film()?;
        let removed = self
            .library
            .remove(position)
            .ok_or_else(|| anyhow!("no film at position {position}"))?;
        save_library(&self.config.library_path, &self.library)?;

        info!("deleted {} from position {position}", removed.name());
        writeln!(self.output, "Deleted {removed} from the library.")?;
        Ok(())
    }

    /// Append the film's name and index to the library file and the live
    /// list, so it shows up in listings right away.
    fn add_to_library(&mut self, film: &Film) -> Result<()> {
        let entry = Film::new(film.name(), film.index());
        append_film(&self.config.library_path, &entry)?;
        self.library.push(entry);
        Ok(())
    }

    fn offer_measurement_log(&mut self, film: &Film) -> Result<()> {
        if let Err(err) = film.thickness() {
            return self.complain(&format!("{err} Measurement not saved."));
        }
        if self.prompt_yes(SAVE_MEASUREMENT_PROMPT)? {
            append_measurement(&self.config.log_path, film, &self.config.columns)?;
        }
        Ok(())
    }

    fn show_measurement(&mut self, film: &Film) -> Result<()> {
        let columns = self.config.columns;
        writeln!(self.output)?;
        writeln!(self.output, "{}", measurement_header(&columns))?;
        writeln!(self.output, "{}", film.display_row(&columns))?;
        Ok(())
    }

    fn read_measurement(&mut self) -> Result<Film> {
        let name = self.prompt_name()?;
        let index = self.prompt_number(INDEX_PROMPT)?;
        let spectral_range = self.prompt_number(RANGE_PROMPT)?;
        let maxima = self.prompt_number(MAXIMA_PROMPT)?;
        Ok(Film::measurement(name, index, spectral_range, maxima))
    }

    /// List the library and return the chosen position with a copy of its
    /// film. Callers make sure the library is not empty.
    fn select_film(&mut self) -> Result<(usize, Film)> {
        self.list()?;
        loop {
            let answer = self.prompt(POSITION_PROMPT)?;
            let chosen = parse_position(&answer, self.library.len())
                .map(|position| (position, self.library.get(position).cloned()));
            match chosen {
                Ok((position, Some(film))) => return Ok((position, film)),
                Ok((position, None)) => return Err(anyhow!("no film at position {position}")),
                Err(err) => self.complain(&err.to_string())?,
            }
        }
    }

    /// Blank lines are skipped until a name is typed.
    fn prompt_name(&mut self) -> Result<String> {
        let mut name = self.prompt(NAME_PROMPT)?;
        while name.is_empty() {
            name = self.read_line()?;
        }
        Ok(name)
    }

    fn prompt_number(&mut self, text: &str) -> Result<f64> {
        loop {
            let answer = self.prompt(text)?;
            match parse_number(&answer) {
                Ok(value) => return Ok(value),
                Err(err) => self.complain(&err.to_string())?,
            }
        }
    }

    fn prompt_yes(&mut self, text: &str) -> Result<bool> {
        let answer = self.prompt(text)?;
        Ok(parse_yes(&answer))
    }

    fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush().context("failed to flush output")?;
        self.read_line()
    }

    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so
    /// a stray encoding never ends the session.
    fn read_line(&mut self) -> Result<String> {
        let mut raw = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut raw)
            .context("failed to read input")?;
        if read == 0 {
            return Err(FilmError::InputClosed.into());
        }
        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }

    fn complain(&mut self, message: &str) -> Result<()> {
        let styled = warn_style(message, self.config.color);
        writeln!(self.output, "{styled}")?;
        Ok(())
    }
}

fn is_input_closed(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<FilmError>(), Some(FilmError::InputClosed))
}
