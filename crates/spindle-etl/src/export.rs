//! JSON-lines export of normalized rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use spindle_core::model::NormalizedRecord;

use crate::error::NormalizeResult;

/// Write one JSON object per record, newline-terminated.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized or the writer fails.
pub fn write_json_lines<W: Write>(
    mut writer: W,
    records: &[NormalizedRecord],
) -> NormalizeResult<()> {
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write records to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn export_to_path(path: &Path, records: &[NormalizedRecord]) -> NormalizeResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    write_json_lines(BufWriter::new(file), records)?;

    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(())
}

/// Export path used when none is given: next to the input, with a
/// `.normalized.jsonl` extension.
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("normalized.jsonl")
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle_core::model::RawRecord;

    use crate::normalize::RecordNormalizer;

    fn rows() -> Vec<NormalizedRecord> {
        let normalizer = RecordNormalizer::default();
        [
            RawRecord::new(1, "One")
                .with_country("US")
                .with_artists(["A"])
                .with_pressing("Black")
                .with_descriptors(["LP"]),
            RawRecord::new(2, "Two")
                .with_country("UK")
                .with_artists(["B (3)"])
                .with_pressing("Clear")
                .with_descriptors(["7\""]),
        ]
        .iter()
        .map(|raw| normalizer.normalize(raw))
        .collect()
    }

    #[test]
    fn test_write_json_lines() {
        let mut buffer = Vec::new();
        write_json_lines(&mut buffer, &rows()).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["id"], 2);
        assert_eq!(second["color_category"], "Clear");
        assert_eq!(second["artist_display"], "[B]");
    }

    #[test]
    fn test_write_empty_batch() {
        let mut buffer = Vec::new();
        write_json_lines(&mut buffer, &[]).unwrap();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_export_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("rows.jsonl");

        export_to_path(&path, &rows()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_default_output_path() {
        assert_eq!(
            default_output_path(Path::new("/data/collection.json")),
            PathBuf::from("/data/collection.normalized.jsonl")
        );
    }
}
