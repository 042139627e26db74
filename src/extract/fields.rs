//! Per-field extractors
//!
//! One function per output field. Each takes the shared parsed document
//! and/or JSON-LD handle and returns `Option` — absence is a normal,
//! representable outcome, not an error. Fields without a reliable markup
//! source (rating, votes, runtime) are JSON-LD only.

use super::JsonLd;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Title: JSON-LD `name`, else the hero heading element
pub fn extract_title(document: &Html, ld: &JsonLd) -> Option<String> {
    ld.get_str("name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .or_else(|| select_first_text(document, "h1[data-testid='hero-title-block__title']"))
}

/// Rating and vote count from the JSON-LD aggregate-rating object
///
/// No markup fallback; these fields have no reliable alternate source.
/// Values arrive as numbers or numeric strings; each parses independently
/// and falls to absent on its own.
pub fn extract_rating_votes(ld: &JsonLd) -> (Option<f64>, Option<u64>) {
    let Some(agg) = ld.get("aggregateRating").filter(|v| v.is_object()) else {
        return (None, None);
    };

    let rating = agg.get("ratingValue").and_then(value_as_f64);
    let votes = agg.get("ratingCount").and_then(value_as_u64);
    (rating, votes)
}

/// Release year: visible release-info link text, else JSON-LD `datePublished`
///
/// The markup stage takes the first 4-digit run anywhere in the link text
/// (handles forms like "1994 (USA)"); the JSON-LD stage requires the string
/// to lead with 4 digits.
pub fn extract_year(document: &Html, ld: &JsonLd) -> Option<i32> {
    let link_text = select_first_text(
        document,
        "ul[data-testid='hero-title-block__metadata'] li a[href*='releaseinfo']",
    );
    if let Some(year) = link_text.as_deref().and_then(four_digit_run) {
        return Some(year);
    }

    ld.get_str("datePublished").and_then(leading_four_digits)
}

/// Genres: JSON-LD `genre` (string or list), else genre-query anchors
pub fn extract_genres(document: &Html, ld: &JsonLd) -> Option<Vec<String>> {
    match ld.get("genre") {
        Some(Value::String(s)) if !s.trim().is_empty() => {
            return Some(vec![s.trim().to_string()]);
        }
        Some(Value::Array(items)) => {
            let genres: Vec<String> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !genres.is_empty() {
                return Some(genres);
            }
        }
        _ => {}
    }

    let found = select_all_texts(document, "a[href*='genres=']");
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

/// Runtime in minutes from the JSON-LD ISO-8601-like `duration` ("PT142M")
///
/// No markup fallback; runtime markup is unreliable on this site.
pub fn extract_runtime_minutes(ld: &JsonLd) -> Option<u32> {
    let duration = ld.get_str("duration")?;
    if !duration.starts_with("PT") {
        return None;
    }
    let re = Regex::new(r"PT(\d+)M").ok()?;
    re.captures(duration)?.get(1)?.as_str().parse().ok()
}

/// Content certificate from a fixed, ordered set of selectors
///
/// Certificate regions vary; try the storyline certificate, else a parental
/// guide link.
pub fn extract_certificate(document: &Html) -> Option<String> {
    select_first_text(
        document,
        "[data-testid='storyline-certificate'] a, a[href*='parentalguide']",
    )
}

/// Directors, via a three-stage fallback chain:
/// 1. JSON-LD `director` (single object or list of objects with `name`)
/// 2. JSON-LD `creator`, filtered to `@type == "Person"` entries
/// 3. The principal-credits list, first group whose label contains "Director"
///
/// The stage-3 label check is a literal substring match, so it accepts both
/// "Director" and "Directors" (and any other role text containing the word).
/// Names are trimmed; empty and "nan"-literal names are discarded.
pub fn extract_directors(document: &Html, ld: &JsonLd) -> Option<Vec<String>> {
    let mut names: Vec<String> = match ld.get("director") {
        Some(Value::Array(items)) => items.iter().filter_map(person_name).collect(),
        Some(obj @ Value::Object(_)) => person_name(obj).into_iter().collect(),
        _ => Vec::new(),
    };

    if names.is_empty() {
        if let Some(Value::Array(creators)) = ld.get("creator") {
            names = creators
                .iter()
                .filter(|c| c.get("@type").and_then(Value::as_str) == Some("Person"))
                .filter_map(person_name)
                .collect();
        }
    }

    if names.is_empty() {
        names = credits_directors(document);
    }

    let names: Vec<String> = names
        .into_iter()
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty() && !n.eq_ignore_ascii_case("nan"))
        .collect();

    if names.is_empty() {
        None
    } else {
        Some(names)
    }
}

/// Scans the principal-credits list for a director group
///
/// Stops at the first group whose label matches and yields names.
fn credits_directors(document: &Html) -> Vec<String> {
    let Ok(credit_sel) = Selector::parse("li[data-testid='title-pc-principal-credit']") else {
        return Vec::new();
    };
    let Ok(label_sel) = Selector::parse("span, h3") else {
        return Vec::new();
    };
    let Ok(name_sel) = Selector::parse("a[href*='/name/']") else {
        return Vec::new();
    };

    for credit in document.select(&credit_sel) {
        let label = credit
            .select(&label_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();

        if label.contains("Director") {
            let names: Vec<String> = credit
                .select(&name_sel)
                .map(element_text)
                .filter(|n| !n.is_empty())
                .collect();
            if !names.is_empty() {
                return names;
            }
        }
    }

    Vec::new()
}

fn person_name(value: &Value) -> Option<String> {
    value
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn value_as_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn value_as_u64(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn four_digit_run(text: &str) -> Option<i32> {
    let re = Regex::new(r"\d{4}").ok()?;
    re.find(text)?.as_str().parse().ok()
}

fn leading_four_digits(text: &str) -> Option<i32> {
    let re = Regex::new(r"^(\d{4})").ok()?;
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// First element matching `selector`, text-extracted and trimmed
fn select_first_text(document: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    document
        .select(&sel)
        .next()
        .map(element_text)
        .filter(|s| !s.is_empty())
}

/// All elements matching `selector`, text-extracted, empties dropped
fn select_all_texts(document: &Html, selector: &str) -> Vec<String> {
    let Ok(sel) = Selector::parse(selector) else {
        return Vec::new();
    };
    document
        .select(&sel)
        .map(element_text)
        .filter(|s| !s.is_empty())
        .collect()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
