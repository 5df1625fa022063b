//! Index file loading for random-access traversal.
//!
//! An index file lists one record per line as `<identifier> <label>`. The
//! label is everything after the *last* space on the line, so identifiers
//! (typically relative image paths) may themselves contain spaces. Line
//! order defines the positional ordering used for random access and is
//! never mutated after loading.

use crate::error::{DatumError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One `(identifier, label)` pair from an index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub identifier: String,
    pub label: i32,
}

/// Load all entries from an index file, preserving line order.
///
/// Blank lines are skipped. A line without a space-separated integer label
/// is a [`DatumError::CorruptIndex`].
pub fn load_index(path: &Path) -> Result<Vec<IndexEntry>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut entries = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let split = line.rfind(' ').ok_or_else(|| {
            DatumError::CorruptIndex(format!(
                "{}:{}: no label field on line",
                path.display(),
                lineno + 1
            ))
        })?;

        let label = line[split + 1..].parse::<i32>().map_err(|_| {
            DatumError::CorruptIndex(format!(
                "{}:{}: label {:?} is not an integer",
                path.display(),
                lineno + 1,
                &line[split + 1..]
            ))
        })?;

        entries.push(IndexEntry {
            identifier: line[..split].to_string(),
            label,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_index(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_preserves_order() {
        let file = write_index("b.jpg 1\na.jpg 0\nc.jpg 2\n");
        let entries = load_index(file.path()).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].identifier, "b.jpg");
        assert_eq!(entries[0].label, 1);
        assert_eq!(entries[1].identifier, "a.jpg");
        assert_eq!(entries[2].label, 2);
    }

    #[test]
    fn test_identifier_with_spaces() {
        // Split on the last space: everything before it is the identifier
        let file = write_index("my photos/cat 1.jpg -3\n");
        let entries = load_index(file.path()).unwrap();
        assert_eq!(entries[0].identifier, "my photos/cat 1.jpg");
        assert_eq!(entries[0].label, -3);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let file = write_index("a.jpg 0\n\nb.jpg 1\n");
        let entries = load_index(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_bad_label_is_corrupt() {
        let file = write_index("a.jpg zero\n");
        let err = load_index(file.path()).unwrap_err();
        assert!(matches!(err, DatumError::CorruptIndex(_)), "{err}");
    }

    #[test]
    fn test_missing_label_is_corrupt() {
        let file = write_index("a.jpg\n");
        let err = load_index(file.path()).unwrap_err();
        assert!(matches!(err, DatumError::CorruptIndex(_)), "{err}");
    }

    #[test]
    fn test_missing_file_is_io() {
        let err = load_index(Path::new("/nonexistent/index.txt")).unwrap_err();
        assert!(matches!(err, DatumError::Io(_)), "{err}");
    }
}
