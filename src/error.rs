use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Cannot proceed: template '{template_path}' does not exist.")]
    TemplateNotFound { template_path: String },

    #[error("Failed to parse template '{template_path}'. Original error: {e}")]
    TemplateParseError { template_path: String, e: String },

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("No department config found at '{path}'.")]
    ConfigNotFound { path: String },

    #[error("Department config error: {0}.")]
    ConfigValidation(String),

    /// Raised after schema validation, listing every missing column at once.
    #[error("Dataset is missing required columns: {missing}.")]
    MissingColumns { missing: String },

    #[error("No student matches '{name}'.")]
    UnknownStudent { name: String },

    #[error("Unknown template variant '{variant}'. Available: {available}.")]
    UnknownVariant { variant: String, available: String },

    /// Represents validation failures in user input or data
    #[error("Validation error: {0}.")]
    ValidationError(String),

    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with expedidor's Error as the error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{}", err);
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
