use crate::constants::{exit_codes, verbosity, DEFAULT_PREFIX};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// CLI arguments for expedidor.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON dataset with one row object per student.
    #[arg(value_name = "DATASET")]
    pub dataset: PathBuf,

    /// Department configuration file (YAML or JSON).
    #[arg(value_name = "DEPARTMENT")]
    pub department: PathBuf,

    /// Directory for generated documents (system temp dir by default).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Student to generate for, matched by full name.
    #[arg(short, long)]
    pub student: Option<String>,

    /// Template variant, by key or by visible label.
    #[arg(long)]
    pub variant: Option<String>,

    /// Filename prefix for generated documents.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    pub prefix: String,

    /// External converter command for the page-layout format (e.g. `soffice`).
    #[arg(long)]
    pub convert_with: Option<String>,

    /// Disable interactive prompts; requires --student, and --variant when
    /// the department has more than one template.
    #[arg(long = "non-interactive")]
    pub non_interactive: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments with custom handling for missing required inputs.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
