//! CSV table output
//!
//! One row per successfully processed identifier; absent values serialize
//! as empty cells, list fields join with `", "`.

use crate::record::Record;
use crate::Result;
use std::fs;
use std::path::Path;

/// Output column order
pub const TABLE_COLUMNS: [&str; 10] = [
    "title_id",
    "url",
    "title",
    "year",
    "rating",
    "votes",
    "genres",
    "runtime_min",
    "certificate",
    "directors",
];

/// Writes the record table as CSV, creating parent directories as needed
pub fn write_table(path: &Path, records: &[Record]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(TABLE_COLUMNS)?;

    for record in records {
        writer.write_record(&[
            record.title_id.as_str().to_string(),
            record.url.clone(),
            record.title.clone().unwrap_or_default(),
            opt_field(record.year),
            opt_field(record.rating),
            opt_field(record.votes),
            record.genres_joined().unwrap_or_default(),
            opt_field(record.runtime_min),
            record.certificate.clone().unwrap_or_default(),
            record.directors_joined().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

fn opt_field<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
