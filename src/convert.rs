//! Optional page-layout format conversion boundary.
//!
//! Conversion is an opaque, possibly-unavailable external capability. The
//! generator treats every failure here as non-fatal and falls back to the
//! unconverted intermediate document.

use log::warn;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::Result;

/// Converts a generated document into a fixed page-layout format.
///
/// `Ok(Some(path))` is a successful conversion, `Ok(None)` means the
/// capability is unavailable or produced nothing. Callers must treat both
/// `Ok(None)` and `Err` as "keep the unconverted document".
pub trait FormatConverter {
    fn convert(&self, source: &Path) -> Result<Option<PathBuf>>;
}

/// Drives an external converter command, e.g.
/// `soffice --headless --convert-to pdf --outdir <dir> <source>`.
///
/// The command is expected to drop its output next to the source with the
/// configured extension. There is no timeout; the external tool may take
/// unbounded time.
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
    extension: String,
}

impl CommandConverter {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self { program: program.into(), args, extension: extension.into() }
    }

    /// The desktop-automation variant: an office suite binary converting to
    /// PDF in headless mode.
    pub fn page_layout(program: impl Into<String>) -> Self {
        Self::new(
            program,
            vec![
                "--headless".to_string(),
                "--convert-to".to_string(),
                "pdf".to_string(),
                "--outdir".to_string(),
            ],
            "pdf",
        )
    }
}

impl FormatConverter for CommandConverter {
    fn convert(&self, source: &Path) -> Result<Option<PathBuf>> {
        let out_dir = source.parent().unwrap_or_else(|| Path::new("."));
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(out_dir)
            .arg(source)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Err(e) => {
                warn!("converter '{}' could not be started: {e}", self.program);
                Ok(None)
            }
            Ok(status) if !status.success() => {
                warn!("converter '{}' exited with {status}", self.program);
                Ok(None)
            }
            Ok(_) => {
                let produced = source.with_extension(&self.extension);
                if produced.exists() {
                    Ok(Some(produced))
                } else {
                    warn!(
                        "converter '{}' succeeded but '{}' was not produced",
                        self.program,
                        produced.display()
                    );
                    Ok(None)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_converter_binary_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("TITULO_SIN_TIPO_sin_dni.json");
        std::fs::write(&source, "{}").unwrap();

        let converter = CommandConverter::page_layout("definitely-not-a-binary");
        assert_eq!(converter.convert(&source).unwrap(), None);
    }

    #[test]
    fn successful_command_without_output_file_degrades_to_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("doc.json");
        std::fs::write(&source, "{}").unwrap();

        // `true` exits 0 but produces no doc.pdf next to the source.
        let converter = CommandConverter::new("true", vec![], "pdf");
        assert_eq!(converter.convert(&source).unwrap(), None);
    }
}
