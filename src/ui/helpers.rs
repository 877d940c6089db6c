//! Text layout shared by the session: table headers lined up with the rows
//! `Film` renders, optional terminal styling, and error formatting.

use anyhow::Error;
use crossterm::style::Stylize;

use crate::config::Columns;

/// Header over measurement rows produced by `Film::display_row`.
pub(crate) fn measurement_header(columns: &Columns) -> String {
    format!(
        "{:<mat$}{:>idx$}{:>max$}{:>thk$}",
        "Material",
        "Index",
        "# of maxima",
        "Thickness (nm)",
        mat = columns.material,
        idx = columns.index,
        max = columns.maxima,
        thk = columns.thickness,
    )
}

/// Header over a single unnumbered library row.
pub(crate) fn material_header(columns: &Columns) -> String {
    format!(
        "{:<mat$}{:>idx$}",
        "Material",
        "Index",
        mat = columns.material,
        idx = columns.index,
    )
}

/// Header over the numbered library listing; leaves room for the position.
pub(crate) fn library_header(columns: &Columns) -> String {
    format!("{:pos$} {}", "", material_header(columns), pos = columns.position)
}

/// One numbered library line.
pub(crate) fn numbered_row(position: usize, row: &str, columns: &Columns) -> String {
    format!("{:>pos$} {}", position, row, pos = columns.position)
}

/// Bold text when styling is enabled.
pub(crate) fn emphasize(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Red text when styling is enabled.
pub(crate) fn warn_style(text: &str, color: bool) -> String {
    if color {
        text.red().to_string()
    } else {
        text.to_string()
    }
}

/// Render an error with its full cause chain on one line, so a fatal
/// "failed to open" message still names both the file and the OS reason.
pub fn describe_error(err: &Error) -> String {
    format!("{err:#}")
}
