//! Per-department declarative configuration.
//!
//! The expedition flow is identical across departments; only the required
//! columns, the variant-to-template table, the human-readable alias labels,
//! and the optional delivered-flag column differ. Those live in one config
//! record per department, shipped as data files under `departments/`.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::tokens::{validate_token_table, TokenSpec};

#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentConfig {
    /// Short department identifier, e.g. `CIBERSEGURIDAD`.
    pub name: String,
    /// Heading shown to the operator.
    #[serde(default)]
    pub heading: String,
    /// Columns the dataset must carry before any processing proceeds.
    pub required_columns: Vec<String>,
    /// Template variant key to template path.
    pub templates: IndexMap<String, PathBuf>,
    /// Variant key to the label the operator sees. Variants without an
    /// alias are shown by their key.
    #[serde(default)]
    pub aliases: IndexMap<String, String>,
    /// Column marking credentials already handed to the student; rows with
    /// an affirmative value are skipped when present.
    #[serde(default)]
    pub delivered_flag_column: Option<String>,
    /// Token table overriding the fixed domain table. Adding a token to a
    /// department is a config change, not a code change.
    #[serde(default)]
    pub tokens: Option<Vec<TokenSpec>>,
}

impl DepartmentConfig {
    /// Loads a department config from a YAML or JSON file, by extension.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::ConfigValidation("name must not be empty".into()));
        }
        if self.templates.is_empty() {
            return Err(Error::ConfigValidation(format!(
                "department '{}' declares no templates",
                self.name
            )));
        }
        for variant in self.aliases.keys() {
            if !self.templates.contains_key(variant) {
                return Err(Error::ConfigValidation(format!(
                    "alias '{}' does not name a template variant",
                    variant
                )));
            }
        }
        if let Some(tokens) = &self.tokens {
            validate_token_table(tokens)?;
        }
        Ok(())
    }

    /// The label shown for a variant: its alias, or the key itself.
    pub fn label_for<'a>(&'a self, variant: &'a str) -> &'a str {
        self.aliases.get(variant).map(String::as_str).unwrap_or(variant)
    }

    /// Labels in template-table order, for selection prompts.
    pub fn labels(&self) -> Vec<&str> {
        self.templates.keys().map(|v| self.label_for(v)).collect()
    }

    /// Resolves operator input back to a variant key; accepts either the
    /// raw key or the visible alias label.
    pub fn variant_for_label(&self, label: &str) -> Option<&str> {
        if let Some((variant, _)) = self.templates.get_key_value(label) {
            return Some(variant);
        }
        self.aliases
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(variant, _)| variant.as_str())
    }

    pub fn template_for(&self, variant: &str) -> Option<&Path> {
        self.templates.get(variant).map(PathBuf::as_path)
    }

    /// Template paths are resolved relative to the config file's directory.
    pub fn resolve_template(&self, config_path: &Path, variant: &str) -> Option<PathBuf> {
        let template = self.template_for(variant)?;
        if template.is_absolute() {
            return Some(template.to_path_buf());
        }
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        Some(base.join(template))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIBER_YAML: &str = r#"
name: CIBERSEGURIDAD
heading: "Expedición título - Ciberseguridad"
required_columns:
  - NOMBRE
  - APELLIDOS
  - DNI ALUMNO
templates:
  NORMAL: templates/TITULO_CIBER_NORMAL.json
  CUALIFICAN: templates/TITULO_CIBER_CUALIFICAN.json
aliases:
  NORMAL: Sin Cualificam
  CUALIFICAN: Con Cualificam
delivered_flag_column: ENTREGADO AL ALUMNO/A
"#;

    fn write_config(content: &str, name: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn loads_a_yaml_department_config() {
        let (_dir, path) = write_config(CIBER_YAML, "ciber.yaml");
        let config = DepartmentConfig::load(&path).unwrap();
        assert_eq!(config.name, "CIBERSEGURIDAD");
        assert_eq!(config.templates.len(), 2);
        assert_eq!(
            config.delivered_flag_column.as_deref(),
            Some("ENTREGADO AL ALUMNO/A")
        );
    }

    #[test]
    fn missing_config_path_is_reported() {
        let err = DepartmentConfig::load(Path::new("/no/such/config.yaml"));
        assert!(matches!(err, Err(Error::ConfigNotFound { .. })));
    }

    #[test]
    fn alias_inversion_accepts_labels_and_keys() {
        let (_dir, path) = write_config(CIBER_YAML, "ciber.yaml");
        let config = DepartmentConfig::load(&path).unwrap();
        assert_eq!(config.variant_for_label("Con Cualificam"), Some("CUALIFICAN"));
        assert_eq!(config.variant_for_label("NORMAL"), Some("NORMAL"));
        assert_eq!(config.variant_for_label("desconocido"), None);
        assert_eq!(config.labels(), vec!["Sin Cualificam", "Con Cualificam"]);
    }

    #[test]
    fn alias_without_a_template_fails_validation() {
        let yaml = r#"
name: RRHH
required_columns: [NOMBRE]
templates:
  NORMAL: templates/TITULO_RRHH_NORMAL.json
aliases:
  CUALIFICAN: Con Cualificam
"#;
        let (_dir, path) = write_config(yaml, "rrhh.yaml");
        assert!(matches!(
            DepartmentConfig::load(&path),
            Err(Error::ConfigValidation(_))
        ));
    }

    #[test]
    fn empty_template_table_fails_validation() {
        let yaml = "name: BIM\nrequired_columns: [NOMBRE]\ntemplates: {}\n";
        let (_dir, path) = write_config(yaml, "bim.yaml");
        assert!(matches!(
            DepartmentConfig::load(&path),
            Err(Error::ConfigValidation(_))
        ));
    }

    #[test]
    fn templates_resolve_relative_to_the_config_file() {
        let (_dir, path) = write_config(CIBER_YAML, "ciber.yaml");
        let config = DepartmentConfig::load(&path).unwrap();
        let resolved = config.resolve_template(&path, "NORMAL").unwrap();
        assert!(resolved.ends_with("templates/TITULO_CIBER_NORMAL.json"));
        assert!(resolved.starts_with(path.parent().unwrap()));
    }

    #[test]
    fn custom_token_tables_are_validated_on_load() {
        let yaml = r#"
name: EERR
required_columns: [NOMBRE]
templates:
  NORMAL: templates/TITULO_EERR_NORMAL.json
tokens:
  - token: "{{NOMBRE}}"
    field: NOMBRE
    font_size: 37.0
  - token: "CENTRO"
    field: CENTRO DE FORMACIÓN
"#;
        let (_dir, path) = write_config(yaml, "eerr.yaml");
        assert!(matches!(
            DepartmentConfig::load(&path),
            Err(Error::ValidationError(_))
        ));

        let yaml = yaml.replace("\"CENTRO\"", "\"{{CENTRO}}\"");
        let (_dir, path) = write_config(&yaml, "eerr.yaml");
        let config = DepartmentConfig::load(&path).unwrap();
        let tokens = config.tokens.unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].font_size, Some(37.0));
    }

    #[test]
    fn json_configs_load_too() {
        let json = r#"{
  "name": "PYTHON",
  "required_columns": ["NOMBRE"],
  "templates": { "NORMAL": "templates/TITULO_PYTHON.json" }
}"#;
        let (_dir, path) = write_config(json, "python.json");
        let config = DepartmentConfig::load(&path).unwrap();
        assert_eq!(config.name, "PYTHON");
        // no alias: the key doubles as the label
        assert_eq!(config.labels(), vec!["NORMAL"]);
    }
}
