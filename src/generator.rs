//! Document generation orchestration and output naming.
//!
//! One call: load a fresh copy of the template, build the token map for one
//! student, substitute, persist under the deterministic name, then hand the
//! artifact to the optional format converter. Each invocation produces its
//! own output file; nothing is cached, deduplicated, or cleaned up here.

use log::{info, warn};
use std::path::{Path, PathBuf};

use crate::constants::{
    token, DEFAULT_CATEGORY, DEFAULT_PREFIX, DOCUMENT_EXT, FALLBACK_ID,
};
use crate::convert::FormatConverter;
use crate::document::Document;
use crate::error::Result;
use crate::record::StudentRecord;
use crate::substitute::substitute;
use crate::tokens::{build_token_map, TokenSpec};

/// Caller-supplied knobs for one generation call.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Filename prefix, `TITULO` by default.
    pub prefix: String,
    /// Variant tag, uppercased into the filename; `SIN_TIPO` when absent.
    pub category: Option<String>,
    /// Destination directory for the artifact.
    pub output_dir: PathBuf,
    /// The token whose normalized value names the file, `{{DNI}}` by default.
    pub id_token: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            category: None,
            output_dir: std::env::temp_dir(),
            id_token: token::DNI.to_string(),
        }
    }
}

/// The artifact of one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedDocument {
    pub path: PathBuf,
    /// Whether the path points at the converted page-layout format rather
    /// than the intermediate document.
    pub converted: bool,
    /// Runs that received a replacement.
    pub replacements: usize,
}

/// Deterministic `{PREFIX}_{CATEGORY}_{ID}.{ext}` filename for the
/// intermediate document.
pub fn output_file_name(prefix: &str, category: Option<&str>, id: &str) -> String {
    let category = category
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_uppercase)
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let id = if id.is_empty() { FALLBACK_ID } else { id };
    format!("{prefix}_{category}_{id}.{DOCUMENT_EXT}")
}

/// Generates one credential document for one student.
///
/// Only genuine I/O failures are fatal (template missing or unreadable,
/// destination unwritable). Missing fields degrade to blank text, an
/// unmatched template is saved unchanged, and a failing converter falls back
/// to the unconverted document.
pub fn generate(
    record: &StudentRecord,
    template_path: &Path,
    token_table: &[TokenSpec],
    options: &GenerateOptions,
    converter: Option<&dyn FormatConverter>,
) -> Result<GeneratedDocument> {
    let mut document = Document::load(template_path)?;
    let tokens = build_token_map(record, token_table);
    let replacements = substitute(&mut document, &tokens);
    if replacements == 0 {
        info!(
            "no tokens matched in '{}', saving an unmodified copy",
            template_path.display()
        );
    }

    let id = tokens
        .get(&options.id_token)
        .map(|r| r.text.clone())
        .unwrap_or_default();
    let file_name =
        output_file_name(&options.prefix, options.category.as_deref(), &id);
    let path = options.output_dir.join(file_name);
    document.save(&path)?;
    info!("generated '{}' ({replacements} replacements)", path.display());

    if let Some(converter) = converter {
        match converter.convert(&path) {
            Ok(Some(converted)) => {
                return Ok(GeneratedDocument {
                    path: converted,
                    converted: true,
                    replacements,
                });
            }
            Ok(None) => {
                warn!("conversion unavailable, keeping '{}'", path.display());
            }
            Err(e) => {
                warn!("conversion failed ({e}), keeping '{}'", path.display());
            }
        }
    }

    Ok(GeneratedDocument { path, converted: false, replacements })
}
