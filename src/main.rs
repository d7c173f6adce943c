//! labsmith's main application entry point.
//! Handles command-line argument parsing and drives the catalog, binding,
//! materialization and index components for each subcommand.

use std::io::Read;
use std::path::Path;

use labsmith::{
    binder::{overrides_from_json, parse_overrides, redact},
    catalog::{load_recipe_file, Catalog},
    cli::{get_args, Args, Command},
    config::Config,
    error::{default_error_handler, Error, Result},
    index::{GeneratedRecord, GenerationIndex},
    processor::Processor,
    prompt::{prompt_missing, DialoguerPrompter},
    recipe::{Context, Recipe},
    renderer::PlaceholderRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Resolves a recipe reference: an existing file path, otherwise a catalog id.
fn resolve_recipe(catalog: &Catalog, reference: &str) -> Result<Recipe> {
    let path = Path::new(reference);
    if path.is_file() {
        load_recipe_file(path)
    } else {
        catalog.get(reference)
    }
}

fn read_stdin_overrides() -> Result<Context> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    let buffer = buffer.trim();
    if buffer.is_empty() {
        return Ok(Context::new());
    }
    overrides_from_json(&serde_json::from_str(buffer)?)
}

fn print_rendered(compose: &str, env: &str, readme: &str) {
    println!("--- docker-compose.yml\n{compose}");
    println!("--- .env\n{env}");
    println!("--- README.md\n{readme}");
}

/// Main application logic execution.
fn run(args: Args) -> Result<()> {
    let config = Config::load(&args.root)?;
    let catalog = Catalog::from_config(&config);
    let index = GenerationIndex::new(&config.index_file);
    let engine = PlaceholderRenderer::new();

    match args.command {
        Command::List => {
            for recipe in catalog.list()? {
                println!(
                    "{:<24} {:<8} {} [{}]",
                    recipe.id,
                    recipe.difficulty,
                    recipe.name,
                    recipe.tags.join(", ")
                );
            }
        }
        Command::Validate { file } => {
            load_recipe_file(&file)?;
            println!("OK: '{}' is a valid recipe.", file.display());
        }
        Command::Import { file, force } => {
            let recipe = load_recipe_file(&file)?;
            if catalog.contains(&recipe.id) && !force {
                return Err(Error::ConfigError(format!(
                    "recipe '{}' already exists, use --force to replace it",
                    recipe.id
                )));
            }
            let path = catalog.save(&recipe)?;
            println!("Imported '{}' to '{}'.", recipe.id, path.display());
        }
        Command::Preview { recipe, project, vars } => {
            let recipe = resolve_recipe(&catalog, &recipe)?;
            let overrides = parse_overrides(&vars)?;
            let processor = Processor::new(&engine, &config.generated_dir);
            let rendered = processor.preview(&recipe, project.as_deref(), &overrides);
            print_rendered(&rendered.compose, &rendered.env, &rendered.readme);
        }
        Command::Generate { recipe, project, vars, stdin, no_input, force } => {
            let recipe = resolve_recipe(&catalog, &recipe)?;
            if !force && index.contains(&project)? {
                return Err(Error::ProjectExists { name: project });
            }

            let mut overrides = if stdin { read_stdin_overrides()? } else { Context::new() };
            overrides.extend(parse_overrides(&vars)?);
            if !no_input {
                overrides = prompt_missing(&DialoguerPrompter::new(), &recipe, &overrides)?;
            }

            let processor = Processor::new(&engine, &config.generated_dir);
            let generated = processor.generate(&recipe, &project, &overrides)?;
            for file in &generated.files {
                println!("Wrote: '{}'", file.display());
            }

            index.record(GeneratedRecord::new(
                &project,
                &recipe.id,
                &generated.path,
                redact(&recipe, &overrides),
            ))?;
            println!("Project '{}' generated in {}.", project, generated.path.display());
        }
        Command::History => {
            for record in index.load()? {
                println!(
                    "{}  {:<24} {:<24} {}",
                    record.created_at.to_rfc3339(),
                    record.project_name,
                    record.recipe_id,
                    record.path.display()
                );
            }
        }
    }

    Ok(())
}
