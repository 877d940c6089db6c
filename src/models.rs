//! Domain models shared by the store and the interactive session. A `Film`
//! doubles as a library entry (name and refractive index) and as a single
//! measurement once a spectral range and fringe count are attached.

use std::fmt;

use crate::calc;
use crate::config::Columns;
use crate::error::FilmResult;

/// Replace negative (or NaN) input with zero.
fn clamp_non_negative(value: f64) -> f64 {
    if value >= 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// A thin film material. Only `name` and `index` are persisted in the
/// library; the spectral range and maxima count live for one calculation.
pub struct Film {
    name: String,
    /// Real part of the refractive index.
    index: f64,
    /// Bandwidth in nm over which the maxima were counted.
    spectral_range: f64,
    /// Number of interference maxima inside the spectral range.
    maxima: f64,
}

impl Film {
    /// Library entry with no measurement attached.
    pub fn new(name: impl Into<String>, index: f64) -> Self {
        let mut film = Self {
            name: name.into(),
            ..Self::default()
        };
        film.set_index(index);
        film
    }

    /// Fully specified measurement.
    pub fn measurement(
        name: impl Into<String>,
        index: f64,
        spectral_range: f64,
        maxima: f64,
    ) -> Self {
        let mut film = Self::new(name, index);
        film.set_spectral_range(spectral_range);
        film.set_maxima(maxima);
        film
    }

    /// Material name as typed by the user; not necessarily unique.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Refractive index, never negative.
    pub fn index(&self) -> f64 {
        self.index
    }

    /// Spectral bandwidth in nm; zero for plain library entries.
    pub fn spectral_range(&self) -> f64 {
        self.spectral_range
    }

    /// Counted interference maxima; zero for plain library entries.
    pub fn maxima(&self) -> f64 {
        self.maxima
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Setters below clamp negative and NaN input to zero rather than
    /// rejecting it, so a film never holds a negative quantity.
    pub fn set_index(&mut self, index: f64) {
        self.index = clamp_non_negative(index);
    }

    pub fn set_spectral_range(&mut self, spectral_range: f64) {
        self.spectral_range = clamp_non_negative(spectral_range);
    }

    pub fn set_maxima(&mut self, maxima: f64) {
        self.maxima = clamp_non_negative(maxima);
    }

    /// Film thickness in nm, see [`calc::thickness`].
    pub fn thickness(&self) -> FilmResult<f64> {
        calc::thickness(self.index, self.spectral_range, self.maxima)
    }

    /// Full measurement row: name, index, maxima and thickness. A thickness
    /// that cannot be computed renders as `undefined`.
    pub fn display_row(&self, columns: &Columns) -> String {
        let thickness = match self.thickness() {
            Ok(value) => format!("{value:.1}"),
            Err(_) => "undefined".to_string(),
        };
        format!(
            "{:<mat$}{:>idx$.2}{:>max$.2}{:>thk$}",
            self.name,
            self.index,
            self.maxima,
            thickness,
            mat = columns.material,
            idx = columns.index,
            max = columns.maxima,
            thk = columns.thickness,
        )
    }

    /// Library row: name and index only.
    pub fn library_row(&self, columns: &Columns) -> String {
        format!(
            "{:<mat$}{:>idx$.2}",
            self.name,
            self.index,
            mat = columns.material,
            idx = columns.index,
        )
    }

    /// Fixed-width line for the measurement log. Fails when the thickness is
    /// undefined so the log never records a meaningless value.
    pub fn log_line(&self, columns: &Columns) -> FilmResult<String> {
        let thickness = self.thickness()?;
        Ok(format!(
            "{:<mat$}{:>idx$.2}{:>thk$.1}",
            self.name,
            self.index,
            thickness,
            mat = columns.material,
            idx = columns.index,
            thk = columns.log_thickness,
        ))
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (n = {:.2})", self.name, self.index)
    }
}

/// Ordered in-memory copy of the material library. Users address entries by
/// their 1-based position, which is the only identifier they ever see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Library {
    films: Vec<Film>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of films; the highest valid position.
    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }

    /// Films in library order, position 1 first.
    pub fn iter(&self) -> impl Iterator<Item = &Film> {
        self.films.iter()
    }

    /// Add a film at the next position.
    pub fn push(&mut self, film: Film) {
        self.films.push(film);
    }

    /// Look up a film by 1-based position.
    pub fn get(&self, position: usize) -> Option<&Film> {
        position.checked_sub(1).and_then(|idx| self.films.get(idx))
    }

    /// Remove the film at a 1-based position, shifting later entries left.
    /// Out-of-range positions leave the library untouched.
    pub fn remove(&mut self, position: usize) -> Option<Film> {
        let idx = position.checked_sub(1)?;
        if idx < self.films.len() {
            Some(self.films.remove(idx))
        } else {
            None
        }
    }
}

impl From<Vec<Film>> for Library {
    fn from(films: Vec<Film>) -> Self {
        Self { films }
    }
}

impl FromIterator<Film> for Library {
    fn from_iter<I: IntoIterator<Item = Film>>(iter: I) -> Self {
        Self {
            films: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FilmError;

    fn sample() -> Library {
        Library::from(vec![
            Film::new("SiO2", 1.46),
            Film::new("Si3N4", 2.05),
            Film::new("TiO2", 2.49),
        ])
    }

    #[test]
    fn setters_clamp_negative_values() {
        let mut film = Film::measurement("Oxide", -1.5, -20.0, -3.0);
        assert_eq!(film.index(), 0.0);
        assert_eq!(film.spectral_range(), 0.0);
        assert_eq!(film.maxima(), 0.0);

        film.set_index(1.7);
        film.set_spectral_range(f64::NAN);
        assert_eq!(film.index(), 1.7);
        assert_eq!(film.spectral_range(), 0.0);
    }

    #[test]
    fn new_film_has_no_measurement() {
        let film = Film::new("SiO2", 1.46);
        assert_eq!(film.spectral_range(), 0.0);
        assert_eq!(film.maxima(), 0.0);
        assert_eq!(film.thickness().unwrap(), 0.0);
    }

    #[test]
    fn display_row_uses_fixed_columns() {
        let film = Film::measurement("Si3N4", 2.05, 50.0, 3.0);
        let row = film.display_row(&Columns::default());
        assert_eq!(row.len(), 30 + 10 + 15 + 20);
        assert!(row.starts_with("Si3N4 "));
        assert!(row.ends_with("134.2"));
        assert!(row.contains("      2.05"));
        assert!(row.contains("           3.00"));
    }

    #[test]
    fn display_row_marks_undefined_thickness() {
        let film = Film::measurement("Air gap", 0.5, 50.0, 3.0);
        assert!(film.display_row(&Columns::default()).ends_with("undefined"));
    }

    #[test]
    fn library_row_and_log_line() {
        let columns = Columns::default();
        let film = Film::measurement("SiO2", 1.46, 100.0, 4.0);
        assert_eq!(
            film.library_row(&columns),
            format!("{:<30}{:>10}", "SiO2", "1.46")
        );
        let expected = format!("{:<30}{:>10}{:>15}", "SiO2", "1.46", "212.8");
        assert_eq!(film.log_line(&columns).unwrap(), expected);

        let below = Film::measurement("Vacuum", 0.9, 100.0, 4.0);
        assert!(matches!(
            below.log_line(&columns),
            Err(FilmError::IndexBelowUnity { .. })
        ));
    }

    #[test]
    fn positions_are_one_based() {
        let library = sample();
        assert!(library.get(0).is_none());
        assert_eq!(library.get(1).unwrap().name(), "SiO2");
        assert_eq!(library.get(3).unwrap().name(), "TiO2");
        assert!(library.get(4).is_none());
    }

    #[test]
    fn remove_shifts_later_entries_left() {
        let mut library = sample();
        let removed = library.remove(2).unwrap();
        assert_eq!(removed.name(), "Si3N4");
        let names: Vec<_> = library.iter().map(Film::name).collect();
        assert_eq!(names, ["SiO2", "TiO2"]);
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut library = sample();
        assert!(library.remove(0).is_none());
        assert!(library.remove(4).is_none());
        assert_eq!(library, sample());
    }
}
