//! Embedded JSON-LD metadata block
//!
//! Catalog pages carry a `<script type="application/ld+json">` block
//! describing the page's subject independently of the visual markup. Parsing
//! is best-effort: a missing or malformed block yields an empty handle, never
//! a parse failure.

use scraper::{Html, Selector};
use serde_json::Value;

/// Read-only handle over a page's JSON-LD block
///
/// An empty handle answers `None` to every lookup, so extractors fall
/// through to their markup stages without special-casing.
#[derive(Debug, Clone)]
pub struct JsonLd(Value);

impl JsonLd {
    /// Extracts and parses the first JSON-LD block of a document
    pub fn parse(document: &Html) -> Self {
        let selector = match Selector::parse(r#"script[type="application/ld+json"]"#) {
            Ok(s) => s,
            Err(_) => return Self::empty(),
        };

        let raw = match document.select(&selector).next() {
            Some(el) => el.text().collect::<String>(),
            None => return Self::empty(),
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value @ Value::Object(_)) => Self(value),
            _ => Self::empty(),
        }
    }

    /// A handle with no data; every lookup returns `None`
    pub fn empty() -> Self {
        Self(Value::Null)
    }

    /// Wraps an already-parsed value (objects only carry data)
    pub fn from_value(value: Value) -> Self {
        match value {
            obj @ Value::Object(_) => Self(obj),
            _ => Self::empty(),
        }
    }

    /// Looks up a top-level key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Looks up a top-level key as a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }
}
