//! Title identifier input handling
//!
//! Identifiers are opaque tokens read from a newline-delimited file; lines
//! not starting with the required prefix are silently discarded.

use crate::{ConfigError, ConfigResult};
use std::fmt;
use std::fs;
use std::path::Path;

/// Required prefix for a valid title identifier
pub const ID_PREFIX: &str = "tt";

/// A validated catalog title identifier (e.g. `tt0111161`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TitleId(String);

impl TitleId {
    /// Validates and wraps a raw token; trims surrounding whitespace
    ///
    /// Returns `None` for empty lines and lines without the `tt` prefix.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() > ID_PREFIX.len() && trimmed.starts_with(ID_PREFIX) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TitleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reads title ids from a file, one per line
///
/// Lines that do not validate are dropped. An empty result after filtering
/// is a configuration error; the caller aborts before any network activity.
pub fn read_ids(path: &Path) -> ConfigResult<Vec<TitleId>> {
    let text = fs::read_to_string(path)?;
    let ids: Vec<TitleId> = text.lines().filter_map(TitleId::new).collect();

    if ids.is_empty() {
        return Err(ConfigError::NoValidIds {
            path: path.to_path_buf(),
        });
    }

    Ok(ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_valid_id() {
        let id = TitleId::new("tt0111161").unwrap();
        assert_eq!(id.as_str(), "tt0111161");
        assert_eq!(id.to_string(), "tt0111161");
    }

    #[test]
    fn test_id_trims_whitespace() {
        let id = TitleId::new("  tt0068646\t").unwrap();
        assert_eq!(id.as_str(), "tt0068646");
    }

    #[test]
    fn test_rejects_wrong_prefix() {
        assert!(TitleId::new("nm0000338").is_none());
        assert!(TitleId::new("0111161").is_none());
    }

    #[test]
    fn test_rejects_empty_and_bare_prefix() {
        assert!(TitleId::new("").is_none());
        assert!(TitleId::new("   ").is_none());
        assert!(TitleId::new("tt").is_none());
    }

    #[test]
    fn test_read_ids_filters_invalid_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tt0111161").unwrap();
        writeln!(file, "# a comment").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  tt0068646  ").unwrap();
        writeln!(file, "nm0000338").unwrap();

        let ids = read_ids(file.path()).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].as_str(), "tt0111161");
        assert_eq!(ids[1].as_str(), "tt0068646");
    }

    #[test]
    fn test_read_ids_no_valid_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not-an-id").unwrap();
        writeln!(file, "also not").unwrap();

        let err = read_ids(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::NoValidIds { .. }));
    }

    #[test]
    fn test_read_ids_missing_file() {
        let err = read_ids(Path::new("/nonexistent/ids.txt")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
