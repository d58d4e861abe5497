//! Student rows and field normalization.
//!
//! A [`StudentRecord`] is one row of the tabular dataset: an ordered map from
//! column name to raw JSON value. Normalization turns raw values into the
//! display text that gets substituted into templates; it never fails, the
//! worst case for malformed input is a poorly formatted string in the output
//! document.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{column, DATE_FORMAT};

/// One row of tabular student data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentRecord {
    fields: IndexMap<String, Value>,
}

impl StudentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields(fields: IndexMap<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: Value) {
        self.fields.insert(field.into(), value);
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Normalized display text of a field; absent fields yield an empty string.
    pub fn text(&self, field: &str) -> String {
        normalize(self.get(field))
    }

    /// Whether a field is absent or normalizes to empty text.
    pub fn is_blank(&self, field: &str) -> bool {
        self.text(field).is_empty()
    }

    /// Whether every field of the row normalizes to empty text.
    pub fn is_empty_row(&self) -> bool {
        self.fields.values().all(|v| normalize(Some(v)).is_empty())
    }

    /// `NOMBRE` and `APELLIDOS` joined with a single space, used for
    /// selecting a student from the dataset.
    pub fn full_name(&self) -> String {
        let name = self.text(column::NOMBRE);
        let surname = self.text(column::APELLIDOS);
        format!("{name} {surname}").trim().to_string()
    }
}

/// Normalizes a raw field value into display text.
///
/// Missing or null values become an empty string; strings are trimmed;
/// numbers and booleans use their literal form.
pub fn normalize(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Normalizes a date-typed field value into `DD/MM/YYYY`.
///
/// Values that cannot be interpreted as a calendar date fall back to their
/// literal trimmed string form rather than failing.
pub fn normalize_date(value: Option<&Value>) -> String {
    let literal = normalize(value);
    if literal.is_empty() {
        return literal;
    }
    match parse_date(&literal) {
        Some(date) => date.format(DATE_FORMAT).to_string(),
        None => literal,
    }
}

/// Interprets the common date shapes of the source spreadsheets. The calendar
/// date is taken as written, without time-zone conversion.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_fields_normalize_to_empty() {
        let mut record = StudentRecord::new();
        record.set("NOMBRE", Value::Null);
        assert_eq!(record.text("NOMBRE"), "");
        assert_eq!(record.text("APELLIDOS"), "");
        assert!(record.is_blank("DNI ALUMNO"));
    }

    #[test]
    fn strings_are_trimmed() {
        assert_eq!(normalize(Some(&json!("  Ana  "))), "Ana");
        assert_eq!(normalize(Some(&json!(12345))), "12345");
        assert_eq!(normalize(Some(&json!(true))), "true");
    }

    #[test]
    fn iso_dates_format_as_day_month_year() {
        assert_eq!(normalize_date(Some(&json!("2024-03-05"))), "05/03/2024");
        assert_eq!(
            normalize_date(Some(&json!("2024-03-05 00:00:00"))),
            "05/03/2024"
        );
        assert_eq!(
            normalize_date(Some(&json!("2024-03-05T10:30:00+02:00"))),
            "05/03/2024"
        );
    }

    #[test]
    fn already_formatted_dates_pass_through() {
        assert_eq!(normalize_date(Some(&json!("05/03/2024"))), "05/03/2024");
    }

    #[test]
    fn unparseable_dates_fall_back_to_the_literal() {
        assert_eq!(normalize_date(Some(&json!(" pending "))), "pending");
        assert_eq!(normalize_date(None), "");
        assert_eq!(normalize_date(Some(&Value::Null)), "");
    }

    #[test]
    fn full_name_joins_and_trims_name_parts() {
        let mut record = StudentRecord::new();
        record.set("NOMBRE", json!(" Ana "));
        record.set("APELLIDOS", json!("García Pérez"));
        assert_eq!(record.full_name(), "Ana García Pérez");

        let empty = StudentRecord::new();
        assert_eq!(empty.full_name(), "");
    }

    #[test]
    fn empty_row_detection() {
        let mut record = StudentRecord::new();
        record.set("NOMBRE", json!("   "));
        record.set("DNI ALUMNO", Value::Null);
        assert!(record.is_empty_row());

        record.set("DNI ALUMNO", json!("12345678A"));
        assert!(!record.is_empty_row());
    }
}
