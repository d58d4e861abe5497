/// Handles argument parsing and the expedition runner.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants used across the application.
pub mod constants;

/// Student rows and field normalization.
pub mod record;

/// Declarative token table and token-map building.
pub mod tokens;

/// In-memory document model with JSON persistence.
pub mod document;

/// Token substitution over paragraphs and nested tables.
pub mod substitute;

/// Document generation orchestration and output naming.
pub mod generator;

/// Optional page-layout format conversion boundary.
pub mod convert;

/// Per-department declarative configuration.
pub mod department;

/// Tabular dataset loading, validation and filtering.
pub mod dataset;

/// A set of helpers for working with the file system.
pub mod ioutils;
