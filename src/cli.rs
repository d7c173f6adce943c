//! Command-line interface implementation for labsmith.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line arguments structure for labsmith.
#[derive(Parser, Debug)]
#[command(author, version, about = "labsmith: recipe catalog and lab scaffolding tool", long_about = None)]
pub struct Args {
    /// Directory holding the catalog, history and generated projects
    #[arg(short, long, value_name = "DIR", default_value = ".", global = true)]
    pub root: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the recipes in the catalog
    List,

    /// Validate a recipe document and report every schema violation
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Validate a recipe document and store it in the catalog
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Replace an existing recipe with the same id (the old one is kept in history)
        #[arg(short, long)]
        force: bool,
    },

    /// Render the compose, env and readme documents without writing anything
    Preview {
        /// Recipe id from the catalog, or a path to a recipe file
        #[arg(value_name = "RECIPE")]
        recipe: String,

        /// Project name made available as PROJECT_NAME
        #[arg(short, long)]
        project: Option<String>,

        /// Variable override, may be repeated
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,
    },

    /// Generate a project directory from a recipe
    Generate {
        /// Recipe id from the catalog, or a path to a recipe file
        #[arg(value_name = "RECIPE")]
        recipe: String,

        /// Name of the generated project directory
        #[arg(value_name = "PROJECT")]
        project: String,

        /// Variable override, may be repeated
        #[arg(long = "var", value_name = "KEY=VALUE")]
        vars: Vec<String>,

        /// Read variable overrides as a JSON object from stdin
        #[arg(short, long)]
        stdin: bool,

        /// Fail instead of prompting for missing required variables
        #[arg(long)]
        no_input: bool,

        /// Generate even if the project name was used before
        #[arg(short, long)]
        force: bool,
    },

    /// Show the generation history, newest first
    History,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
