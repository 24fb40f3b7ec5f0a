//! Parsers for the MovieLens 100K data files.
//!
//! - `u.data`: tab-separated `userId\tmovieId\trating\ttimestamp`
//! - `u.item`: pipe-separated, first two fields `movieId|title`
//!
//! `u.item` is ISO-8859-1 encoded, not UTF-8, so it is read byte-wise and
//! widened to Unicode code points. Any malformed line is an error carrying
//! the file name and line number; nothing is skipped silently.

use crate::error::{DataLoadError, Result};
use crate::types::{Movie, Rating};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a file with ISO-8859-1 (Latin-1) encoding.
///
/// ISO-8859-1 is a single-byte encoding where each byte directly maps to a
/// Unicode code point, so the conversion is a plain widening.
fn read_lines_latin1(path: &Path) -> Result<Vec<String>> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    let content: String = bytes.iter().map(|&b| b as char).collect();

    Ok(content.lines().map(|s| s.to_string()).collect())
}

/// Parse one `u.data` line: `userId\tmovieId\trating\ttimestamp`
fn parse_rating_line(line: &str, file: &str, line_no: usize) -> Result<Rating> {
    let mut parts = line.split('\t');

    let user_id = next_field(&mut parts, file, line_no, "userId")?;
    let movie_id = next_field(&mut parts, file, line_no, "movieId")?;
    let rating = next_field(&mut parts, file, line_no, "rating")?;
    let timestamp = next_field(&mut parts, file, line_no, "timestamp")?;

    Ok(Rating {
        user_id: parse_number(user_id, file, line_no, "userId")?,
        movie_id: parse_number(movie_id, file, line_no, "movieId")?,
        rating: parse_number(rating, file, line_no, "rating")?,
        timestamp: parse_number(timestamp, file, line_no, "timestamp")?,
    })
}

/// Parse one `u.item` line: `movieId|title|...`
///
/// Only the first two fields are used; the trailing release-date and genre
/// columns are ignored.
fn parse_movie_line(line: &str, file: &str, line_no: usize) -> Result<Movie> {
    let mut parts = line.split('|');

    let movie_id = next_field(&mut parts, file, line_no, "movieId")?;
    let title = next_field(&mut parts, file, line_no, "title")?;

    if title.is_empty() {
        return Err(DataLoadError::InvalidValue {
            field: "title".to_string(),
            value: String::new(),
        });
    }

    Ok(Movie {
        id: parse_number(movie_id, file, line_no, "movieId")?,
        title: title.to_string(),
    })
}

fn next_field<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    file: &str,
    line_no: usize,
    field: &str,
) -> Result<&'a str> {
    parts.next().ok_or_else(|| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Missing {}", field),
    })
}

fn parse_number<T: std::str::FromStr>(
    value: &str,
    file: &str,
    line_no: usize,
    field: &str,
) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid {}: {}", field, e),
    })
}

/// Parse the `u.data` ratings file
pub fn parse_ratings(path: &Path) -> Result<Vec<Rating>> {
    let file_name = "u.data";
    let lines = read_lines_latin1(path)?;
    let mut ratings = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }
        ratings.push(parse_rating_line(line_trimmed, file_name, line_no)?);
    }

    Ok(ratings)
}

/// Parse the `u.item` movie catalog file
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file_name = "u.item";
    let lines = read_lines_latin1(path)?;
    let mut movies = Vec::with_capacity(lines.len());

    for (idx, line) in lines.iter().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }
        movies.push(parse_movie_line(line_trimmed, file_name, line_no)?);
    }

    Ok(movies)
}
