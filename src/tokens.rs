//! Declarative token table and token-map building.
//!
//! The mapping from `{{TOKEN}}` literals to dataset columns is data, not
//! code: extending the recognized token set means adding a [`TokenSpec`] row,
//! never touching the substitution engine.

use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::constants::{column, token, NAME_FONT_SIZE_PT};
use crate::error::{Error, Result};
use crate::record::{normalize_date, StudentRecord};

/// How a token's source field is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    #[default]
    Text,
    Date,
}

/// One row of the token table: a token literal, the dataset column it reads,
/// and an optional font size forced onto the run that receives the value.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSpec {
    pub token: String,
    pub field: String,
    #[serde(default)]
    pub kind: TokenKind,
    #[serde(default)]
    pub font_size: Option<f32>,
}

impl TokenSpec {
    pub fn text(token: &str, field: &str) -> Self {
        Self {
            token: token.to_string(),
            field: field.to_string(),
            kind: TokenKind::Text,
            font_size: None,
        }
    }

    pub fn date(token: &str, field: &str) -> Self {
        Self { kind: TokenKind::Date, ..Self::text(token, field) }
    }

    pub fn with_font_size(mut self, points: f32) -> Self {
        self.font_size = Some(points);
        self
    }
}

/// The value substituted for one token, plus its optional size override.
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub text: String,
    pub font_size: Option<f32>,
}

/// Token literal to replacement, in table order.
pub type TokenMap = IndexMap<String, Replacement>;

/// The fixed eight-token table of the credential domain. The name tokens
/// carry the large font size the templates expect.
pub fn default_token_table() -> Vec<TokenSpec> {
    vec![
        TokenSpec::text(token::NOMBRE, column::NOMBRE)
            .with_font_size(NAME_FONT_SIZE_PT),
        TokenSpec::text(token::APELLIDOS, column::APELLIDOS)
            .with_font_size(NAME_FONT_SIZE_PT),
        TokenSpec::text(token::DNI, column::DNI),
        TokenSpec::text(token::TITULO, column::TITULO),
        TokenSpec::text(token::PROMOCION, column::PROMOCION),
        TokenSpec::date(token::FECHA_EXPEDICION, column::FECHA_EXPEDICION),
        TokenSpec::date(token::FECHA, column::FECHA),
        TokenSpec::text(token::NUMERO_TITULO, column::NUMERO_TITULO),
    ]
}

/// Checks that every token literal has the `{{...}}` shape and that no
/// literal appears twice. Used when a table arrives from configuration.
pub fn validate_token_table(specs: &[TokenSpec]) -> Result<()> {
    let shape = Regex::new(r"^\{\{[^{}]+\}\}$").expect("token shape regex");
    let mut seen = indexmap::IndexSet::new();
    for spec in specs {
        if !shape.is_match(&spec.token) {
            return Err(Error::ValidationError(format!(
                "token literal '{}' does not have the {{{{NAME}}}} shape",
                spec.token
            )));
        }
        if !seen.insert(spec.token.clone()) {
            return Err(Error::ValidationError(format!(
                "token literal '{}' appears more than once",
                spec.token
            )));
        }
    }
    Ok(())
}

/// Builds the token map for one student, normalizing every value through the
/// field normalizer. Absent fields degrade to empty replacements.
pub fn build_token_map(record: &StudentRecord, specs: &[TokenSpec]) -> TokenMap {
    let mut map = TokenMap::with_capacity(specs.len());
    for spec in specs {
        let text = match spec.kind {
            TokenKind::Text => record.text(&spec.field),
            TokenKind::Date => normalize_date(record.get(&spec.field)),
        };
        debug!("token {} -> '{}'", spec.token, text);
        map.insert(
            spec.token.clone(),
            Replacement { text, font_size: spec.font_size },
        );
    }
    map
}
