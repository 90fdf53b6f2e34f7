//! # Export Builder
//!
//! Turns a form's raw submission records into tabular sections ready for the
//! CSV writer. Three transformations are applied, driven by the form
//! definition:
//!
//! - grouped field paths are reduced to their final segment, with numeric
//!   suffixes on collisions
//! - values of select fields are replaced by their option labels
//! - repeat groups are split into their own sections, one row per repeated
//!   entry, linked to the parent record by index

pub mod writer;

pub use writer::write_zipped_csv;

use anyhow::Result;
use serde_json::Value;
use std::collections::HashMap;

/// Column linking a repeat-section row back to its parent record
pub const PARENT_INDEX_COLUMN: &str = "_parent_index";

/// A select field and its option catalog
#[derive(Debug, Clone)]
struct SelectField {
    multiple: bool,
    /// (option name, option label) pairs in definition order
    options: Vec<(String, String)>,
}

impl SelectField {
    /// Label for a single option name, or the raw name when unknown
    fn label_for(&self, name: &str) -> String {
        match self.options.iter().find(|(n, _)| n == name) {
            Some((_, label)) => label.clone(),
            None => {
                tracing::debug!("Select option '{name}' not found in definition");
                name.to_string()
            }
        }
    }

    /// Map a stored value to display labels
    fn map_value(&self, value: &str) -> String {
        if self.multiple {
            value
                .split_whitespace()
                .map(|name| self.label_for(name))
                .collect::<Vec<_>>()
                .join(", ")
        } else {
            self.label_for(value)
        }
    }
}

/// The parts of a form definition the export builder needs
#[derive(Debug, Clone)]
struct FormDefinition {
    name: String,
    /// Local field name -> display title
    titles: HashMap<String, String>,
    /// Full field path -> select catalog
    selects: HashMap<String, SelectField>,
    /// Full paths of repeat groups, in definition order
    repeats: Vec<String>,
}

impl FormDefinition {
    fn parse(definition: &Value) -> Result<Self> {
        let name = definition
            .get("id_string")
            .or_else(|| definition.get("name"))
            .or_else(|| definition.get("title"))
            .and_then(Value::as_str)
            .unwrap_or("export")
            .to_string();

        let mut parsed = Self {
            name,
            titles: HashMap::new(),
            selects: HashMap::new(),
            repeats: Vec::new(),
        };
        if let Some(children) = definition.get("children").and_then(Value::as_array) {
            parsed.walk(children, "");
        }
        Ok(parsed)
    }

    fn walk(&mut self, children: &[Value], prefix: &str) {
        for child in children {
            let Some(name) = child.get("name").and_then(Value::as_str) else {
                continue;
            };
            let path = if prefix.is_empty() {
                name.to_string()
            } else {
                format!("{prefix}/{name}")
            };

            if let Some(label) = label_text(child.get("label")) {
                self.titles.insert(name.to_string(), label);
            }

            match child.get("type").and_then(Value::as_str).unwrap_or("") {
                "group" | "repeat" => {
                    if child.get("type").and_then(Value::as_str) == Some("repeat") {
                        self.repeats.push(path.clone());
                    }
                    if let Some(kids) = child.get("children").and_then(Value::as_array) {
                        self.walk(kids, &path);
                    }
                }
                "select one" | "select1" => {
                    self.insert_select(path, child, false);
                }
                "select all that apply" | "select" => {
                    self.insert_select(path, child, true);
                }
                _ => {}
            }
        }
    }

    fn insert_select(&mut self, path: String, field: &Value, multiple: bool) {
        let options = field
            .get("children")
            .and_then(Value::as_array)
            .map(|options| {
                options
                    .iter()
                    .filter_map(|option| {
                        let name = option.get("name").and_then(Value::as_str)?;
                        let label =
                            label_text(option.get("label")).unwrap_or_else(|| name.to_string());
                        Some((name.to_string(), label))
                    })
                    .collect()
            })
            .unwrap_or_default();
        self.selects.insert(path, SelectField { multiple, options });
    }
}

/// Extract a display label: plain strings pass through, language maps prefer English
fn label_text(label: Option<&Value>) -> Option<String> {
    match label? {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("English")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| map.values().find_map(Value::as_str).map(str::to_string)),
        _ => None,
    }
}

/// One flattened row: (column, value) pairs in insertion order
pub type Row = Vec<(String, String)>;

/// One tabular section of the export
#[derive(Debug, Clone)]
pub struct Section {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Section {
    fn new(name: String) -> Self {
        Self {
            name,
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn push_row(&mut self, row: Row) {
        for (column, _) in &row {
            if !self.columns.iter().any(|c| c == column) {
                self.columns.push(column.clone());
            }
        }
        self.rows.push(row);
    }

    /// Cell value for a column in a row, empty when absent
    pub fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
        row.iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }
}

/// A complete tabular export
#[derive(Debug, Clone)]
pub struct Export {
    pub sections: Vec<Section>,
}

/// Builds tabular exports from raw records using a form definition
pub struct ExportBuilder {
    definition: FormDefinition,
}

impl ExportBuilder {
    /// Parse the form definition the records will be interpreted against
    pub fn new(definition: &Value) -> Result<Self> {
        Ok(Self {
            definition: FormDefinition::parse(definition)?,
        })
    }

    /// Flatten the records into sections: the root section plus one section
    /// per repeat group that produced rows
    pub fn build(&self, records: &[Value]) -> Result<Export> {
        let mut root = Section::new(self.definition.name.clone());
        let mut repeat_sections: Vec<(String, Section)> = self
            .definition
            .repeats
            .iter()
            .map(|path| {
                let name = path.rsplit('/').next().unwrap_or(path).to_string();
                (path.clone(), Section::new(name))
            })
            .collect();

        for (index, record) in records.iter().enumerate() {
            let Some(object) = record.as_object() else {
                tracing::debug!("Skipping non-object record at index {index}");
                continue;
            };

            let mut row = Row::new();
            for (key, value) in object {
                if let Some((_, section)) = repeat_sections
                    .iter_mut()
                    .find(|(path, _)| path == key)
                {
                    self.push_repeat_rows(section, value, index);
                } else {
                    self.flatten_entry(&mut row, key, value);
                }
            }
            root.push_row(row);
        }

        let mut sections = vec![root];
        sections.extend(
            repeat_sections
                .into_iter()
                .filter(|(_, section)| !section.rows.is_empty())
                .map(|(_, section)| section),
        );
        Ok(Export { sections })
    }

    fn push_repeat_rows(&self, section: &mut Section, value: &Value, parent_index: usize) {
        let Some(entries) = value.as_array() else {
            return;
        };
        for entry in entries {
            let Some(object) = entry.as_object() else {
                continue;
            };
            let mut row = Row::new();
            row.push((
                PARENT_INDEX_COLUMN.to_string(),
                (parent_index + 1).to_string(),
            ));
            for (key, value) in object {
                self.flatten_entry(&mut row, key, value);
            }
            section.push_row(row);
        }
    }

    fn flatten_entry(&self, row: &mut Row, key: &str, value: &Value) {
        let rendered = match (value, self.definition.selects.get(key)) {
            (Value::String(s), Some(select)) => select.map_value(s),
            _ => value_text(value),
        };

        let simplified = key.rsplit('/').next().unwrap_or(key);
        let title = self
            .definition
            .titles
            .get(simplified)
            .cloned()
            .unwrap_or_else(|| simplified.to_string());

        let column = unique_column(row, title);
        row.push((column, rendered));
    }
}

/// Render a JSON value as a CSV cell
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Resolve a column name collision with a numeric suffix
fn unique_column(row: &Row, title: String) -> String {
    if !row.iter().any(|(c, _)| *c == title) {
        return title;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{title} ({n})");
        if !row.iter().any(|(c, _)| *c == candidate) {
            return candidate;
        }
        n += 1;
    }
}
