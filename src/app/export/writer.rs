//! # Zipped CSV Writer
//!
//! Writes an [`Export`] as a zip archive with one CSV entry per section.

use super::{Export, Section};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write the export to `path`, one `<section>.csv` entry per section
pub fn write_zipped_csv(export: &Export, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("failed to create export directory '{}'", parent.display())
        })?;
    }

    let file = File::create(path)
        .with_context(|| format!("failed to create export archive '{}'", path.display()))?;
    let mut archive = ZipWriter::new(file);

    for section in &export.sections {
        archive.start_file(
            format!("{}.csv", entry_name(&section.name)),
            SimpleFileOptions::default(),
        )?;

        let header = csv_line(section.columns.iter().map(String::as_str));
        archive.write_all(header.as_bytes())?;

        for row in &section.rows {
            let line = csv_line(
                section
                    .columns
                    .iter()
                    .map(|column| Section::cell(row, column)),
            );
            archive.write_all(line.as_bytes())?;
        }
    }

    archive.finish()?;
    tracing::debug!(
        "Wrote {} sections to '{}'",
        export.sections.len(),
        path.display()
    );
    Ok(())
}

/// Archive entry name for a section, with path separators sanitized
fn entry_name(name: &str) -> String {
    name.replace(['/', '\\'], "-")
}

fn csv_line<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut line = fields.map(csv_field).collect::<Vec<_>>().join(",");
    line.push_str("\r\n");
    line
}

/// Quote a field when it contains a delimiter, quote, or line break
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::export::ExportBuilder;
    use serde_json::json;
    use std::io::Read;

    fn read_entry(path: &Path, name: &str) -> String {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    fn entry_names(path: &Path) -> Vec<String> {
        let file = File::open(path).unwrap();
        let archive = zip::ZipArchive::new(file).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    #[test]
    fn writer_should_produce_one_entry_per_section() {
        let definition = json!({
            "id_string": "survey",
            "children": [
                {"name": "who", "label": "Who", "type": "text"},
                {
                    "name": "visits",
                    "type": "repeat",
                    "children": [{"name": "day", "label": "Day", "type": "text"}],
                },
            ],
        });
        let export = ExportBuilder::new(&definition)
            .unwrap()
            .build(&[json!({
                "who": "alice",
                "visits": [{"visits/day": "monday"}],
            })])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.zip");
        write_zipped_csv(&export, &path).unwrap();

        let mut names = entry_names(&path);
        names.sort();
        assert_eq!(names, vec!["survey.csv", "visits.csv"]);
    }

    #[test]
    fn writer_should_emit_header_and_rows() {
        let definition = json!({
            "id_string": "survey",
            "children": [{"name": "who", "label": "Who", "type": "text"}],
        });
        let export = ExportBuilder::new(&definition)
            .unwrap()
            .build(&[json!({"who": "alice"}), json!({"who": "bob"})])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.zip");
        write_zipped_csv(&export, &path).unwrap();

        let content = read_entry(&path, "survey.csv");
        assert_eq!(content, "Who\r\nalice\r\nbob\r\n");
    }

    #[test]
    fn writer_should_fill_missing_cells_with_empty_values() {
        let definition = json!({"id_string": "survey", "children": []});
        let export = ExportBuilder::new(&definition)
            .unwrap()
            .build(&[json!({"a": "1"}), json!({"b": "2"})])
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("survey.zip");
        write_zipped_csv(&export, &path).unwrap();

        let content = read_entry(&path, "survey.csv");
        assert_eq!(content, "a,b\r\n1,\r\n,2\r\n");
    }

    #[test]
    fn csv_field_should_quote_delimiters_and_quotes() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn entry_name_should_sanitize_separators() {
        assert_eq!(entry_name("group/repeat"), "group-repeat");
        assert_eq!(entry_name("plain"), "plain");
    }
}
