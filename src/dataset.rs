//! Tabular dataset loading, validation and filtering.
//!
//! Rows arrive as a JSON array of objects, one per student, exported by the
//! (out-of-scope) spreadsheet ingestion layer. Column names are trimmed on
//! load. Schema validation happens once, up front, and reports every missing
//! column instead of failing piecemeal during processing.

use indexmap::IndexMap;
use log::info;
use serde_json::Value;
use std::path::Path;

use crate::constants::column;
use crate::error::{Error, Result};
use crate::record::StudentRecord;

/// Outcome of the up-front schema check.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub missing: Vec<String>,
}

impl ValidationResult {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<StudentRecord>,
}

impl Dataset {
    pub fn from_records(rows: Vec<StudentRecord>) -> Self {
        Self { rows }
    }

    /// Loads a dataset from a JSON array of row objects, trimming column
    /// names as the spreadsheets routinely carry stray whitespace.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: Vec<IndexMap<String, Value>> = serde_json::from_str(&content)?;
        let rows = raw
            .into_iter()
            .map(|row| {
                StudentRecord::from_fields(
                    row.into_iter().map(|(k, v)| (k.trim().to_string(), v)).collect(),
                )
            })
            .collect();
        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[StudentRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in first-seen order across all rows.
    pub fn columns(&self) -> Vec<String> {
        let mut columns: IndexMap<String, ()> = IndexMap::new();
        for row in &self.rows {
            for name in row.field_names() {
                columns.entry(name.to_string()).or_insert(());
            }
        }
        columns.into_keys().collect()
    }

    /// When the dataset has no `FECHA` column but does have
    /// `FECHA EXPEDICIÓN`, the former is created from the latter.
    pub fn backfill_fecha(&mut self) {
        let columns = self.columns();
        let has_fecha = columns.iter().any(|c| c == column::FECHA);
        let has_expedicion = columns.iter().any(|c| c == column::FECHA_EXPEDICION);
        if has_fecha || !has_expedicion {
            return;
        }
        info!("'FECHA' column missing, backfilling from 'FECHA EXPEDICIÓN'");
        for row in &mut self.rows {
            let value =
                row.get(column::FECHA_EXPEDICION).cloned().unwrap_or(Value::Null);
            row.set(column::FECHA, value);
        }
    }

    /// Single schema-validation step; reports every missing required column
    /// in the required order.
    pub fn validate_columns(&self, required: &[String]) -> ValidationResult {
        let columns = self.columns();
        let missing = required
            .iter()
            .filter(|name| !columns.iter().any(|c| c == *name))
            .cloned()
            .collect();
        ValidationResult { missing }
    }

    /// Drops fully empty rows and rows missing the identifier or the
    /// credential serial; those cannot name or number a credential.
    pub fn drop_incomplete(&mut self, id_column: &str, serial_column: &str) {
        self.rows.retain(|row| {
            !row.is_empty_row()
                && !row.is_blank(id_column)
                && !row.is_blank(serial_column)
        });
    }

    /// Drops rows whose delivered-flag column is affirmative. A dataset
    /// without the column is left as-is, matching the reference behavior.
    pub fn retain_pending(&mut self, delivered_column: &str) {
        if !self.columns().iter().any(|c| c == delivered_column) {
            info!(
                "column '{}' not found, not filtering delivered credentials",
                delivered_column
            );
            return;
        }
        self.rows.retain(|row| !is_affirmative(&row.text(delivered_column)));
    }

    /// Unique full names, sorted, for selection prompts.
    pub fn full_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .rows
            .iter()
            .map(StudentRecord::full_name)
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();
        names
    }

    /// First row whose full name matches, case-insensitively.
    pub fn find_by_full_name(&self, name: &str) -> Option<&StudentRecord> {
        let wanted = name.trim().to_lowercase();
        self.rows.iter().find(|row| row.full_name().to_lowercase() == wanted)
    }

    /// Fails with the structured missing-columns error when validation
    /// does not pass.
    pub fn require_columns(&self, required: &[String]) -> Result<()> {
        let validation = self.validate_columns(required);
        if validation.is_ok() {
            Ok(())
        } else {
            Err(Error::MissingColumns { missing: validation.missing.join(", ") })
        }
    }
}

/// Whether a raw cell value means "yes", tolerating case and the accented
/// `sí` of the source spreadsheets.
pub fn is_affirmative(raw: &str) -> bool {
    let normalized = raw.trim().to_lowercase().replace('í', "i");
    matches!(normalized.as_str(), "si" | "yes" | "true" | "verdadero" | "1")
}
