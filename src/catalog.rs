//! Recipe catalog store.
//! Recipes live as one YAML document per id in the recipes directory. Edits
//! and deletions first copy the previous document into the history directory.

use chrono::Utc;
use log::{debug, warn};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

use crate::{
    config::Config,
    constants::RECIPE_EXTENSIONS,
    error::{Error, Result},
    recipe::Recipe,
    schema::{is_valid_recipe_id, parse_document, to_yaml, validate},
};

const SNAPSHOT_STAMP: &str = "%Y%m%dT%H%M%S%.6fZ";

static SNAPSHOT_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{8}T\d{6}\.\d{6}Z\.(yaml|yml|json)$").expect("snapshot pattern is valid")
});

/// Reads and validates a recipe document from any path.
pub fn load_recipe_file<P: AsRef<Path>>(path: P) -> Result<Recipe> {
    let path = path.as_ref();
    debug!("Loading recipe from {}", path.display());
    let content = fs::read_to_string(path).map_err(Error::IoError)?;
    validate(&parse_document(&content)?)
}

fn has_recipe_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| RECIPE_EXTENSIONS.contains(&ext))
}

pub struct Catalog {
    recipes_dir: PathBuf,
    history_dir: PathBuf,
}

impl Catalog {
    pub fn new<P: AsRef<Path>, H: AsRef<Path>>(recipes_dir: P, history_dir: H) -> Self {
        Self {
            recipes_dir: recipes_dir.as_ref().to_path_buf(),
            history_dir: history_dir.as_ref().to_path_buf(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.recipes_dir, &config.history_dir)
    }

    fn check_id(id: &str) -> Result<()> {
        if is_valid_recipe_id(id) {
            Ok(())
        } else {
            Err(Error::InvalidRecipeId { id: id.to_string() })
        }
    }

    fn canonical_path(&self, id: &str) -> PathBuf {
        self.recipes_dir.join(format!("{id}.yaml"))
    }

    /// Existing document for `id`, whichever supported extension it uses.
    fn existing_path(&self, id: &str) -> Option<PathBuf> {
        RECIPE_EXTENSIONS
            .iter()
            .map(|ext| self.recipes_dir.join(format!("{id}.{ext}")))
            .find(|path| path.is_file())
    }

    /// All valid recipes sorted by name, then id. Invalid documents are skipped.
    pub fn list(&self) -> Result<Vec<Recipe>> {
        let mut recipes = Vec::new();
        if !self.recipes_dir.exists() {
            return Ok(recipes);
        }

        for entry in WalkDir::new(&self.recipes_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !has_recipe_extension(path) {
                continue;
            }
            match load_recipe_file(path) {
                Ok(recipe) => recipes.push(recipe),
                Err(e) => warn!("Skipping recipe {}: {}", path.display(), e),
            }
        }

        recipes.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(recipes)
    }

    pub fn contains(&self, id: &str) -> bool {
        is_valid_recipe_id(id) && self.existing_path(id).is_some()
    }

    /// # Errors
    /// * `Error::InvalidRecipeId` if `id` is not a valid recipe id
    /// * `Error::RecipeNotFound` if no document exists for `id`
    pub fn get(&self, id: &str) -> Result<Recipe> {
        Self::check_id(id)?;
        let path = self
            .existing_path(id)
            .ok_or_else(|| Error::RecipeNotFound { id: id.to_string() })?;
        load_recipe_file(path)
    }

    /// Stores `recipe` as `<id>.yaml`, snapshotting any previous document first.
    /// Returns the written path.
    pub fn save(&self, recipe: &Recipe) -> Result<PathBuf> {
        Self::check_id(&recipe.id)?;
        let yaml = to_yaml(recipe)?;

        if let Some(previous) = self.existing_path(&recipe.id) {
            self.backup(&recipe.id, &previous)?;
            if previous != self.canonical_path(&recipe.id) {
                fs::remove_file(&previous).map_err(Error::IoError)?;
            }
        }

        fs::create_dir_all(&self.recipes_dir).map_err(Error::IoError)?;
        let path = self.canonical_path(&recipe.id);
        debug!("Writing recipe '{}' to {}", recipe.id, path.display());
        fs::write(&path, yaml).map_err(Error::IoError)?;
        Ok(path)
    }

    /// Removes the document for `id` after snapshotting it.
    pub fn delete(&self, id: &str) -> Result<()> {
        Self::check_id(id)?;
        let path = self
            .existing_path(id)
            .ok_or_else(|| Error::RecipeNotFound { id: id.to_string() })?;
        self.backup(id, &path)?;
        fs::remove_file(&path).map_err(Error::IoError)
    }

    fn backup(&self, id: &str, source: &Path) -> Result<PathBuf> {
        fs::create_dir_all(&self.history_dir).map_err(Error::IoError)?;
        let ext = source.extension().and_then(|ext| ext.to_str()).unwrap_or("yaml");
        let stamp = Utc::now().format(SNAPSHOT_STAMP);
        let target = self.history_dir.join(format!("{id}-{stamp}.{ext}"));
        debug!("Backing up {} to {}", source.display(), target.display());
        fs::copy(source, &target).map_err(Error::IoError)?;
        Ok(target)
    }

    /// History snapshots of `id`, newest first.
    pub fn snapshots(&self, id: &str) -> Result<Vec<PathBuf>> {
        Self::check_id(id)?;
        let mut snapshots = Vec::new();
        if !self.history_dir.exists() {
            return Ok(snapshots);
        }

        let prefix = format!("{id}-");
        for entry in WalkDir::new(&self.history_dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| Error::IoError(e.into()))?;
            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            // Ids may themselves end in `-<digits>`, so match the whole stamp.
            let is_snapshot =
                name.strip_prefix(&prefix).is_some_and(|rest| SNAPSHOT_SUFFIX.is_match(rest));
            if entry.file_type().is_file() && is_snapshot {
                snapshots.push(entry.into_path());
            }
        }

        snapshots.sort();
        snapshots.reverse();
        Ok(snapshots)
    }
}
