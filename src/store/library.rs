//! The material library file: two lines per film, a name followed by its
//! refractive index, in library order. Loading is all-or-nothing; deletes
//! rewrite the whole file while additions are appended to the end.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::error::{FilmError, FilmResult};
use crate::models::{Film, Library};

/// Result of parsing library text, including a trailing name that had no
/// index after it. Such a leftover is invisible to the user, but a plain
/// append would pair it with the next name written to the file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedLibrary {
    pub library: Library,
    pub dropped_name: Option<String>,
}

/// Read the whole library file. A missing or unreadable file is fatal for the
/// caller; there is no empty-library fallback.
pub fn load_library(path: &Path) -> FilmResult<Library> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::InvalidData => FilmError::Read {
            path: path.to_path_buf(),
            source,
        },
        _ => FilmError::FileOpen {
            path: path.to_path_buf(),
            action: "reading",
            source,
        },
    })?;
    let parsed = parse_records(path, &text)?;
    if let Some(name) = &parsed.dropped_name {
        warn!(
            "{}: ignoring {name:?}, no refractive index follows it",
            path.display()
        );
    }
    info!("loaded {} films from {}", parsed.library.len(), path.display());
    Ok(parsed.library)
}

/// Parse alternating name / index lines. Blank lines before a name or an
/// index are skipped, and a name left without an index at end of input is
/// dropped. `path` is only used in error messages.
pub fn parse_library(path: &Path, text: &str) -> FilmResult<Library> {
    parse_records(path, text).map(|parsed| parsed.library)
}

/// Same as [`parse_library`] but also reports a dropped trailing name.
pub fn parse_records(path: &Path, text: &str) -> FilmResult<ParsedLibrary> {
    let mut library = Library::new();
    let mut pending_name: Option<String> = None;

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        match pending_name.take() {
            None => pending_name = Some(line.to_string()),
            Some(name) => {
                let malformed = || FilmError::Malformed {
                    path: path.to_path_buf(),
                    line: idx + 1,
                    content: line.to_string(),
                };
                let index = line.parse::<f64>().map_err(|_| malformed())?;
                if !index.is_finite() {
                    return Err(malformed());
                }
                library.push(Film::new(name, index));
            }
        }
    }

    if let Some(name) = &pending_name {
        debug!("dropping {name:?}: no refractive index follows it");
    }
    Ok(ParsedLibrary {
        library,
        dropped_name: pending_name,
    })
}

/// Serialize the library as two lines per film.
pub fn render_library(library: &Library) -> String {
    library.iter().map(record_lines).collect()
}

fn record_lines(film: &Film) -> String {
    format!("{}\n{}\n", film.name(), film.index())
}

/// Replace the library file with the in-memory list. The records are written
/// to a temporary file beside the target and renamed over it, so a failed
/// save leaves the previous library intact. An existing file keeps its
/// permissions.
pub fn save_library(path: &Path, library: &Library) -> FilmResult<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut tmp = NamedTempFile::new_in(&parent).map_err(|source| FilmError::FileOpen {
        path: path.to_path_buf(),
        action: "writing",
        source,
    })?;

    let write_error = |source| FilmError::Write {
        path: path.to_path_buf(),
        source,
    };
    tmp.write_all(render_library(library).as_bytes())
        .map_err(write_error)?;
    tmp.flush().map_err(write_error)?;
    if let Ok(metadata) = fs::metadata(path) {
        tmp.as_file()
            .set_permissions(metadata.permissions())
            .map_err(write_error)?;
    }
    tmp.persist(path).map_err(|err| write_error(err.error))?;

    info!("saved {} films to {}", library.len(), path.display());
    Ok(())
}

/// Add a single film to the end of the library file, creating it if needed.
///
/// A missing final newline is written first so the new name starts on its
/// own line. If the file ends with a name that has no index, appending would
/// pair the two, so the file is rewritten from its parsed records plus the
/// new film instead.
pub fn append_film(path: &Path, film: &Film) -> FilmResult<()> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(source) if source.kind() == ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(FilmError::FileOpen {
                path: path.to_path_buf(),
                action: "appending",
                source,
            })
        }
    };

    let parsed = parse_records(path, &existing)?;
    if parsed.dropped_name.is_some() {
        let mut library = parsed.library;
        library.push(film.clone());
        info!("rewriting {} to drop an incomplete record", path.display());
        return save_library(path, &library);
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| FilmError::FileOpen {
            path: path.to_path_buf(),
            action: "appending",
            source,
        })?;
    let separator = if existing.is_empty() || existing.ends_with('\n') {
        ""
    } else {
        "\n"
    };
    write!(file, "{separator}{}", record_lines(film)).map_err(|source| FilmError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!("appended {} to {}", film.name(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn names(library: &Library) -> Vec<&str> {
        library.iter().map(Film::name).collect()
    }

    #[test]
    fn parses_name_index_pairs_in_order() {
        let text = "SiO2\n1.46\nSi3N4\n2.05\n";
        let library = parse_library(Path::new("films.txt"), text).unwrap();
        assert_eq!(names(&library), ["SiO2", "Si3N4"]);
        assert_eq!(library.get(2).unwrap().index(), 2.05);
    }

    #[test]
    fn names_may_contain_spaces_and_blank_lines_are_skipped() {
        let text = "\n  Silicon dioxide (thermal)\n\n1.46\r\n";
        let library = parse_library(Path::new("films.txt"), text).unwrap();
        assert_eq!(names(&library), ["Silicon dioxide (thermal)"]);
    }

    #[test]
    fn trailing_name_without_index_is_dropped_and_reported() {
        let text = "SiO2\n1.46\nOrphan\n";
        let parsed = parse_records(Path::new("films.txt"), text).unwrap();
        assert_eq!(names(&parsed.library), ["SiO2"]);
        assert_eq!(parsed.dropped_name.as_deref(), Some("Orphan"));

        let complete = parse_records(Path::new("films.txt"), "SiO2\n1.46").unwrap();
        assert!(complete.dropped_name.is_none());
    }

    #[test]
    fn negative_index_in_file_is_clamped() {
        let library = parse_library(Path::new("films.txt"), "Odd\n-2\n").unwrap();
        assert_eq!(library.get(1).unwrap().index(), 0.0);
    }

    #[test]
    fn unparsable_index_reports_line() {
        let err = parse_library(Path::new("films.txt"), "SiO2\n1.46\nSi3N4\nabc\n").unwrap_err();
        match err {
            FilmError::Malformed { line, content, .. } => {
                assert_eq!(line, 4);
                assert_eq!(content, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_finite_index_is_malformed() {
        for value in ["inf", "-inf", "NaN"] {
            let text = format!("SiO2\n1.46\nWeird\n{value}\n");
            let err = parse_library(Path::new("films.txt"), &text).unwrap_err();
            assert!(matches!(err, FilmError::Malformed { line: 4, .. }));
        }
    }

    #[test]
    fn missing_file_is_an_open_failure() {
        let dir = tempdir().unwrap();
        let err = load_library(&dir.path().join("films.txt")).unwrap_err();
        assert!(matches!(err, FilmError::FileOpen { action: "reading", .. }));
        assert!(err.to_string().contains("failed to open"));
    }

    #[test]
    fn save_rewrites_whole_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.txt");
        fs::write(&path, "Old\n1.1\nOlder\n1.2\nOldest\n1.3\n").unwrap();

        let library = Library::from(vec![Film::new("SiO2", 1.46), Film::new("Ta2O5", 2.0)]);
        save_library(&path, &library).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "SiO2\n1.46\nTa2O5\n2\n");
    }

    #[cfg(unix)]
    #[test]
    fn save_keeps_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("films.txt");
        fs::write(&path, "SiO2\n1.46\nSi3N4\n2.05\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut library = load_library(&path).unwrap();
        library.remove(2);
        save_library(&path, &library).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
        assert_eq!(fs::read_to_string(&path).unwrap(), "SiO2\n1.46\n");
    }

    #[test]
    fn save_into_missing_directory_fails_to_open() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("films.txt");
        let err = save_library(&path, &Library::new()).unwrap_err();
        assert!(matches!(err, FilmError::FileOpen { action: "writing", .. }));
    }

    #[test]
    fn append_adds_to_end() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.txt");
        fs::write(&path, "SiO2\n1.46\n").unwrap();

        append_film(&path, &Film::measurement("MgF2", 1.38, 300.0, 2.0)).unwrap();

        let library = load_library(&path).unwrap();
        assert_eq!(names(&library), ["SiO2", "MgF2"]);
        assert_eq!(library.get(2).unwrap().maxima(), 0.0);
    }

    #[test]
    fn append_creates_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.txt");

        append_film(&path, &Film::new("MgF2", 1.38)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "MgF2\n1.38\n");
    }

    #[test]
    fn append_after_missing_final_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.txt");
        fs::write(&path, "SiO2\n1.46").unwrap();

        append_film(&path, &Film::new("Ta2O5", 2.1)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "SiO2\n1.46\nTa2O5\n2.1\n");
        assert_eq!(names(&load_library(&path).unwrap()), ["SiO2", "Ta2O5"]);
    }

    #[test]
    fn append_after_incomplete_record_rewrites_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("films.txt");
        fs::write(&path, "SiO2\n1.46\nOrphan\n").unwrap();

        append_film(&path, &Film::new("Ta2O5", 2.1)).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "SiO2\n1.46\nTa2O5\n2.1\n");
        assert_eq!(names(&load_library(&path).unwrap()), ["SiO2", "Ta2O5"]);
    }
}
