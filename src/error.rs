//! Error handling for labsmith.
//! Defines the crate-wide error type and result alias.

use serde::Serialize;
use std::fmt;
use std::io;
use thiserror::Error;

/// One schema violation, addressed by its field path (`variables[0].key`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

impl FieldError {
    pub fn new<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self { path: path.into(), message: message.into() }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Custom error types for labsmith operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// The recipe document does not match the schema. Every violation is listed.
    #[error("Validation error: {}.", join_field_errors(.0))]
    ValidationError(Vec<FieldError>),

    /// Generation is blocked until these variables get a value
    #[error("Missing required variables: {}.", .keys.join(", "))]
    MissingRequiredVariable { keys: Vec<String> },

    /// A rendered file path resolved outside of its project directory
    #[error("Path '{path}' escapes the project directory '{base}'.")]
    PathEscape { path: String, base: String },

    #[error("Invalid project name '{name}': use lowercase letters, digits and hyphens.")]
    InvalidProjectName { name: String },

    #[error("Invalid recipe id '{id}'.")]
    InvalidRecipeId { id: String },

    #[error("Recipe '{id}' not found.")]
    RecipeNotFound { id: String },

    /// The project name is already taken in the generation index
    #[error("Project '{name}' has already been generated.")]
    ProjectExists { name: String },

    #[error("YAML error: {0}.")]
    YamlError(#[from] serde_yaml::Error),

    #[error("JSON error: {0}.")]
    JsonError(#[from] serde_json::Error),

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Interactive input failed or was aborted
    #[error("Prompt error: {0}.")]
    PromptError(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
