//! labsmith manages a catalog of declarative lab recipes and renders them
//! into project scaffolds: a compose file, an env file, a README and optional
//! seed and extra files.
//!
//! The pipeline is: [`schema::validate`] a parsed document, bind variables
//! with [`binder`], then render and write through [`processor::Processor`],
//! which checks every write target with [`sandbox::resolve_within`].

/// Variable binding, required-variable checks and secret redaction
pub mod binder;

/// Recipe catalog store with backup-on-edit history
pub mod catalog;

/// Command-line interface module for labsmith
pub mod cli;

/// Path configuration for catalog, history and output directories
/// Supports JSON and YAML formats (labsmith.json, labsmith.yml, labsmith.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Error types and handling for labsmith
pub mod error;

/// Append-only index of generated projects
pub mod index;

/// Core project materialization
pub mod processor;

/// User input and interaction handling
pub mod prompt;

/// Recipe data model
pub mod recipe;

/// `{{TOKEN}}` placeholder rendering
pub mod renderer;

/// Containment checks for rendered file paths
pub mod sandbox;

/// Recipe document schema validation
pub mod schema;
