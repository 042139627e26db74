//! The normalized result of processing one title identifier
//!
//! All non-identifier fields are optional because source pages vary in
//! completeness; a record with only id + URL populated is valid output.

use crate::config::TitleId;
use crate::crawler::ParsedTitle;

/// One normalized row of the output table
///
/// Invariant: list-valued fields are never `Some` with an empty vec; empty
/// lists are normalized to `None` on construction.
#[derive(Debug, Clone)]
pub struct Record {
    pub title_id: TitleId,
    pub url: String,
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub genres: Option<Vec<String>>,
    pub runtime_min: Option<u32>,
    pub certificate: Option<String>,
    pub directors: Option<Vec<String>>,
}

impl Record {
    /// Builds a record from the parsed page fields, attaching id and URL
    pub fn new(title_id: TitleId, url: String, parsed: ParsedTitle) -> Self {
        Self {
            title_id,
            url,
            title: parsed.title,
            year: parsed.year,
            rating: parsed.rating,
            votes: parsed.votes,
            genres: non_empty(parsed.genres),
            runtime_min: parsed.runtime_min,
            certificate: parsed.certificate,
            directors: non_empty(parsed.directors),
        }
    }

    /// First genre in the list, the "primary" genre
    pub fn primary_genre(&self) -> Option<&str> {
        self.genres.as_ref().map(|g| g[0].as_str())
    }

    /// Genres joined with `", "` for table output
    pub fn genres_joined(&self) -> Option<String> {
        self.genres.as_ref().map(|g| g.join(", "))
    }

    /// Directors joined with `", "` for table output
    pub fn directors_joined(&self) -> Option<String> {
        self.directors.as_ref().map(|d| d.join(", "))
    }
}

fn non_empty(list: Option<Vec<String>>) -> Option<Vec<String>> {
    list.filter(|v| !v.is_empty())
}
