//! Field extraction from title pages
//!
//! Each output field has one extractor: a pure function over a shared parsed
//! document and JSON-LD handle, built as an ordered fallback chain. The
//! first chain step that yields a usable value wins; later steps are not
//! consulted. Chains always prefer the embedded JSON-LD block over rendered
//! markup, because structured data is stable across cosmetic template
//! changes while markup selectors drift.

mod fields;
mod jsonld;

pub use fields::{
    extract_certificate, extract_directors, extract_genres, extract_rating_votes,
    extract_runtime_minutes, extract_title, extract_year,
};
pub use jsonld::JsonLd;
