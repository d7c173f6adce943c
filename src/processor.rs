//! Project materialization.
//! Renders every template of a recipe and writes the result below the
//! generation root, passing each write target through the path sandbox.

use log::debug;
use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::{
    binder::{effective_context, missing_required},
    constants::{
        COMPOSE_FILE, ENV_FILE, PROJECT_NAME_KEY, PROJECT_NAME_PATTERN, README_FILE, SEED_DIR,
    },
    error::{Error, Result},
    recipe::{Context, Recipe},
    renderer::TemplateRenderer,
    sandbox::resolve_within,
};

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROJECT_NAME_PATTERN).expect("project name pattern is valid"));

pub fn is_valid_project_name(name: &str) -> bool {
    PROJECT_NAME.is_match(name)
}

/// The three primary documents of a project, rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedProject {
    pub compose: String,
    pub env: String,
    pub readme: String,
}

/// Outcome of a successful generation.
#[derive(Debug)]
pub struct GeneratedProject {
    /// Directory the project was written to
    pub path: PathBuf,
    pub rendered: RenderedProject,
    /// Every file written, in write order
    pub files: Vec<PathBuf>,
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(Error::IoError)?;
    }
    debug!("Writing file: {}", path.display());
    fs::write(path, content).map_err(Error::IoError)
}

/// Renders recipes into project directories below `output_root`.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    output_root: PathBuf,
}

impl<'a> Processor<'a> {
    pub fn new<P: AsRef<Path>>(engine: &'a dyn TemplateRenderer, output_root: P) -> Self {
        Self { engine, output_root: output_root.as_ref().to_path_buf() }
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    fn render_documents(&self, recipe: &Recipe, context: &Context) -> RenderedProject {
        RenderedProject {
            compose: self.engine.render(&recipe.compose_template, context),
            env: self.engine.render(&recipe.env_template, context),
            readme: self.engine.render(&recipe.readme_template, context),
        }
    }

    /// Renders compose, env and readme without touching the filesystem.
    /// Never fails; unbound placeholders render empty.
    pub fn preview(
        &self,
        recipe: &Recipe,
        project_name: Option<&str>,
        overrides: &Context,
    ) -> RenderedProject {
        let mut context = effective_context(recipe, overrides);
        if let Some(name) = project_name {
            context.insert(PROJECT_NAME_KEY.to_string(), name.to_string());
        }
        self.render_documents(recipe, &context)
    }

    /// Materializes `recipe` as `<output_root>/<project_name>`.
    ///
    /// Files are written in order: compose, env, readme, seed files under
    /// `seed/` (which they may not leave), then extra files. Existing files are
    /// overwritten. A failing write aborts the remaining ones and leaves
    /// earlier files in place.
    ///
    /// # Errors
    /// * `Error::InvalidProjectName` if the name does not match the project grammar
    /// * `Error::MissingRequiredVariable` if required variables have no value
    /// * `Error::PathEscape` if a rendered path leaves the project directory,
    ///   or `seed/` for seed files
    /// * `Error::IoError` on filesystem failures
    pub fn generate(
        &self,
        recipe: &Recipe,
        project_name: &str,
        overrides: &Context,
    ) -> Result<GeneratedProject> {
        if !is_valid_project_name(project_name) {
            return Err(Error::InvalidProjectName { name: project_name.to_string() });
        }

        let missing = missing_required(recipe, overrides);
        if !missing.is_empty() {
            return Err(Error::MissingRequiredVariable { keys: missing });
        }

        let mut context = effective_context(recipe, overrides);
        context.insert(PROJECT_NAME_KEY.to_string(), project_name.to_string());

        let project_dir = self.output_root.join(project_name);
        debug!("Generating '{}' from recipe '{}'", project_dir.display(), recipe.id);
        fs::create_dir_all(&project_dir).map_err(Error::IoError)?;

        let rendered = self.render_documents(recipe, &context);
        let mut files = Vec::new();

        for (name, content) in [
            (COMPOSE_FILE, &rendered.compose),
            (ENV_FILE, &rendered.env),
            (README_FILE, &rendered.readme),
        ] {
            let target = resolve_within(&project_dir, name)?;
            write_file(&target, content)?;
            files.push(target);
        }

        // Seed files are confined to `seed/`, extra files to the project directory.
        let seed_dir = project_dir.join(SEED_DIR);
        let seed_files = recipe.seed_files.iter().map(|file| (&seed_dir, file));
        let extra_files = recipe.extra_files.iter().map(|file| (&project_dir, file));
        for (base, file) in seed_files.chain(extra_files) {
            let rendered_path = self.engine.render(&file.path, &context);
            let target = resolve_within(base, &rendered_path)?;
            let content = self.engine.render(&file.content, &context);
            write_file(&target, &content)?;
            files.push(target);
        }

        Ok(GeneratedProject { path: project_dir, rendered, files })
    }
}
