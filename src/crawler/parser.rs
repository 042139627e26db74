//! Title page parser
//!
//! Parses one page's markup exactly once into a traversable document plus a
//! best-effort JSON-LD handle, then runs every field extractor against the
//! shared pair. Missing fields are never errors here; the result is a struct
//! of optionals.

use crate::extract::{
    extract_certificate, extract_directors, extract_genres, extract_rating_votes,
    extract_runtime_minutes, extract_title, extract_year, JsonLd,
};
use scraper::Html;

/// All extractable fields of one title page
///
/// Identifier and URL are attached by the caller, not by the parser.
#[derive(Debug, Clone, Default)]
pub struct ParsedTitle {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub genres: Option<Vec<String>>,
    pub runtime_min: Option<u32>,
    pub certificate: Option<String>,
    pub directors: Option<Vec<String>>,
}

/// Parses a raw title page into its extracted fields
///
/// Infallible by design: an unparseable or empty page simply yields a
/// `ParsedTitle` with every field absent.
pub fn parse_title_page(html: &str) -> ParsedTitle {
    let document = Html::parse_document(html);
    let ld = JsonLd::parse(&document);

    let (rating, votes) = extract_rating_votes(&ld);

    ParsedTitle {
        title: extract_title(&document, &ld),
        year: extract_year(&document, &ld),
        rating,
        votes,
        genres: extract_genres(&document, &ld),
        runtime_min: extract_runtime_minutes(&ld),
        certificate: extract_certificate(&document),
        directors: extract_directors(&document, &ld),
    }
}
