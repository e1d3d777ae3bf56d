//! ZIP expansion into individual file items
//!
//! Archives are traversed exactly one level deep. Nested archives are
//! reported as skipped rather than expanded, which bounds processing time
//! and blocks zip-bomb style amplification.

use std::io::{Cursor, Read};

use crate::error::{Error, Result};
use crate::types::item::is_archive;
use crate::types::{FileItem, FileKind};

/// An archive entry that was not turned into a file item
#[derive(Debug, Clone)]
pub struct SkippedEntry {
    /// Entry name inside the archive
    pub name: String,
    /// Why it was skipped
    pub reason: String,
}

/// The outcome of expanding one archive
#[derive(Debug, Default)]
pub struct Expansion {
    /// Extractable entries, in archive iteration order
    pub items: Vec<FileItem>,
    /// Entries dropped with a reason (nested archives, unknown extensions)
    pub skipped: Vec<SkippedEntry>,
}

/// Flatten a ZIP into file items, one level deep
pub fn expand(name: &str, archive_bytes: &[u8]) -> Result<Expansion> {
    let cursor = Cursor::new(archive_bytes);
    let mut archive =
        zip::ZipArchive::new(cursor).map_err(|e| Error::corrupt(name, e.to_string()))?;

    let mut expansion = Expansion::default();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| Error::corrupt(name, e.to_string()))?;

        if entry.is_dir() {
            continue;
        }

        let entry_name = entry.name().to_string();

        if is_archive(&entry_name) {
            tracing::warn!("Skipping nested archive in {}: {}", name, entry_name);
            expansion.skipped.push(SkippedEntry {
                name: entry_name,
                reason: "nested archives are not expanded".to_string(),
            });
            continue;
        }

        if FileKind::from_name(&entry_name) == FileKind::Unsupported {
            tracing::warn!("Skipping unsupported entry in {}: {}", name, entry_name);
            expansion.skipped.push(SkippedEntry {
                name: entry_name,
                reason: "unsupported file format".to_string(),
            });
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        if let Err(e) = entry.read_to_end(&mut bytes) {
            expansion.skipped.push(SkippedEntry {
                name: entry_name,
                reason: format!("unreadable entry: {}", e),
            });
            continue;
        }

        expansion.items.push(FileItem::new(entry_name, bytes));
    }

    Ok(expansion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for (name, data) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_nested_archive_is_skipped_not_expanded() {
        let inner = build_zip(&[("hidden.txt", b"inside")]);
        let outer = build_zip(&[("report.pdf", b"%PDF-1.4"), ("inner.zip", &inner)]);

        let expansion = expand("outer.zip", &outer).unwrap();

        assert_eq!(expansion.items.len(), 1);
        assert_eq!(expansion.items[0].name, "report.pdf");
        assert_eq!(expansion.skipped.len(), 1);
        assert_eq!(expansion.skipped[0].name, "inner.zip");
    }

    #[test]
    fn test_unsupported_entries_are_skipped_with_reason() {
        let data = build_zip(&[("notes.txt", b"text"), ("tool.exe", b"MZ")]);
        let expansion = expand("bundle.zip", &data).unwrap();

        assert_eq!(expansion.items.len(), 1);
        assert_eq!(expansion.items[0].name, "notes.txt");
        assert_eq!(expansion.skipped.len(), 1);
        assert!(expansion.skipped[0].reason.contains("unsupported"));
    }

    #[test]
    fn test_directories_are_ignored() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.add_directory("docs/", options).unwrap();
        writer.start_file("docs/a.txt", options).unwrap();
        writer.write_all(b"a").unwrap();
        let data = writer.finish().unwrap().into_inner();

        let expansion = expand("tree.zip", &data).unwrap();
        assert_eq!(expansion.items.len(), 1);
        assert_eq!(expansion.items[0].name, "docs/a.txt");
        assert!(expansion.skipped.is_empty());
    }

    #[test]
    fn test_entries_keep_archive_iteration_order() {
        let data = build_zip(&[("z.txt", b"last name first"), ("a.txt", b"first name last")]);
        let expansion = expand("ordered.zip", &data).unwrap();

        // Iteration order, whatever the archive stored; not sorted
        let names: Vec<&str> = expansion.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["z.txt", "a.txt"]);
    }

    #[test]
    fn test_unreadable_archive_is_corrupt_input() {
        let err = expand("bad.zip", b"this is not a zip").unwrap_err();
        assert!(matches!(err, Error::CorruptInput { .. }));
    }
}
