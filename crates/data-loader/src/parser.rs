//! Parser for the movie metadata CSV.
//!
//! The file has a header row and many columns (budget, homepage, popularity,
//! ...). Only the ones needed to build [`MovieRecord`]s are read:
//! `index, title, genres, keywords, tagline, cast, director`.
//!
//! Cells are free text and may contain commas and quotes, so the actual
//! tokenizing is left to the `csv` crate; this module adds the row-level
//! validation.

use crate::error::{DataLoadError, Result};
use crate::types::MovieRecord;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns that must be present in the header row
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "index", "title", "genres", "keywords", "tagline", "cast", "director",
];

/// Parse a movies CSV file from disk
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    parse_movies_from_reader(file, &file_name)
}

/// Parse movies from any reader (file, in-memory buffer, stdin, ...)
///
/// `source` only labels error messages.
pub fn parse_movies_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<MovieRecord>> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = reader.headers()?.clone();
    check_headers(&headers, source)?;

    let mut movies = Vec::new();
    for (position, result) in reader.records().enumerate() {
        let row = result?;
        // Header is line 1; quoted multi-line cells make the csv position the
        // only reliable line number.
        let line_no = row
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(position + 2);

        let movie = parse_row(&row, &headers, source, line_no)?;

        if movie.index != position {
            return Err(DataLoadError::IndexMismatch {
                expected: position,
                found: movie.index,
                line: line_no,
            });
        }

        movies.push(movie);
    }

    Ok(movies)
}

/// Make sure every required column is in the header row
fn check_headers(headers: &StringRecord, source: &str) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h.trim() == column) {
            return Err(DataLoadError::ParseError {
                file: source.to_string(),
                line: 1,
                reason: format!("Missing column '{}'", column),
            });
        }
    }
    Ok(())
}

/// Deserialize and validate one data row
fn parse_row(
    row: &StringRecord,
    headers: &StringRecord,
    source: &str,
    line_no: usize,
) -> Result<MovieRecord> {
    let movie: MovieRecord =
        row.deserialize(Some(headers))
            .map_err(|e| DataLoadError::ParseError {
                file: source.to_string(),
                line: line_no,
                reason: e.to_string(),
            })?;

    if movie.title.trim().is_empty() {
        return Err(DataLoadError::ParseError {
            file: source.to_string(),
            line: line_no,
            reason: "Missing title".to_string(),
        });
    }

    Ok(movie)
}
