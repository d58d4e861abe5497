use dialoguer::{FuzzySelect, Select};
use log::info;

use crate::cli::Args;
use crate::constants::{column, token};
use crate::convert::{CommandConverter, FormatConverter};
use crate::dataset::Dataset;
use crate::department::DepartmentConfig;
use crate::error::{Error, Result};
use crate::generator::{generate, GenerateOptions};
use crate::record::StudentRecord;
use crate::tokens::default_token_table;

/// Drives one expedition: load config and dataset, validate, filter, resolve
/// the student and template variant, generate, print the artifact path.
pub fn run(args: Args) -> Result<()> {
    let config = DepartmentConfig::load(&args.department)?;
    if !config.heading.is_empty() {
        info!("{}", config.heading);
    }

    let mut dataset = Dataset::load(&args.dataset)?;
    dataset.backfill_fecha();
    dataset.require_columns(&config.required_columns)?;
    if let Some(delivered) = &config.delivered_flag_column {
        dataset.retain_pending(delivered);
    }
    dataset.drop_incomplete(column::DNI, column::NUMERO_TITULO);
    if dataset.is_empty() {
        return Err(Error::ValidationError(
            "no pending records in the dataset".to_string(),
        ));
    }
    info!("{} pending records", dataset.len());

    let student = resolve_student(&dataset, &args)?;
    let variant = resolve_variant(&config, &args)?;
    let template_path = config
        .resolve_template(&args.department, &variant)
        .ok_or_else(|| unknown_variant(&config, &variant))?;

    let options = GenerateOptions {
        prefix: args.prefix.clone(),
        category: Some(variant),
        output_dir: args
            .output_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir),
        id_token: token::DNI.to_string(),
    };
    let token_table =
        config.tokens.clone().unwrap_or_else(default_token_table);
    let converter = args
        .convert_with
        .as_ref()
        .map(|program| CommandConverter::page_layout(program.clone()));
    let generated = generate(
        student,
        &template_path,
        &token_table,
        &options,
        converter.as_ref().map(|c| c as &dyn FormatConverter),
    )?;

    println!("{}", generated.path.display());
    Ok(())
}

fn unknown_variant(config: &DepartmentConfig, variant: &str) -> Error {
    Error::UnknownVariant {
        variant: variant.to_string(),
        available: config.labels().join(", "),
    }
}

fn resolve_student<'a>(
    dataset: &'a Dataset,
    args: &Args,
) -> Result<&'a StudentRecord> {
    if let Some(name) = &args.student {
        return dataset
            .find_by_full_name(name)
            .ok_or_else(|| Error::UnknownStudent { name: name.clone() });
    }
    if args.non_interactive {
        return Err(Error::ValidationError(
            "--student is required with --non-interactive".to_string(),
        ));
    }
    let names = dataset.full_names();
    let index = FuzzySelect::new()
        .with_prompt("Selecciona un alumno")
        .items(&names)
        .interact()?;
    dataset
        .find_by_full_name(&names[index])
        .ok_or_else(|| Error::UnknownStudent { name: names[index].clone() })
}

fn resolve_variant(config: &DepartmentConfig, args: &Args) -> Result<String> {
    if let Some(label) = &args.variant {
        return config
            .variant_for_label(label)
            .map(str::to_string)
            .ok_or_else(|| unknown_variant(config, label));
    }
    // A single-template department needs no choice.
    if config.templates.len() == 1 {
        return Ok(config.templates.keys().next().cloned().unwrap_or_default());
    }
    if args.non_interactive {
        return Err(Error::ValidationError(
            "--variant is required with --non-interactive".to_string(),
        ));
    }
    let labels = config.labels();
    let index = Select::new()
        .with_prompt("Selecciona tipo de plantilla")
        .items(&labels)
        .default(0)
        .interact()?;
    config
        .variant_for_label(labels[index])
        .map(str::to_string)
        .ok_or_else(|| unknown_variant(config, labels[index]))
}
