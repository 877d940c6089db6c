//! Flat-file persistence split across logical submodules: the material
//! library (`films.txt` by default) and the measurement log (`data.txt`).
//! Every function returns a [`FilmError`](crate::error::FilmError) instead
//! of exiting, leaving the fatal-exit decision to `main`.

mod library;
mod measurements;

pub use library::{
    append_film, load_library, parse_library, parse_records, render_library, save_library,
    ParsedLibrary,
};
pub use measurements::append_measurement;
