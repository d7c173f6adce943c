//! Path configuration for the catalog, history and generation output.
//! Paths are resolved once at startup and passed explicitly to every
//! component that touches the filesystem.

use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Resolved filesystem layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Recipe source documents, one per id
    pub recipes_dir: PathBuf,
    /// Pre-edit snapshots of recipe documents
    pub history_dir: PathBuf,
    /// Root under which projects are generated
    pub generated_dir: PathBuf,
    /// JSON generation index
    pub index_file: PathBuf,
}

/// On-disk form of the configuration file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
struct ConfigFile {
    recipes_dir: Option<PathBuf>,
    history_dir: Option<PathBuf>,
    generated_dir: Option<PathBuf>,
    index_file: Option<PathBuf>,
}

impl Config {
    /// Default layout below `root`.
    pub fn from_root<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            recipes_dir: root.join("recipes"),
            history_dir: root.join("history"),
            generated_dir: root.join("generated"),
            index_file: root.join("generated.json"),
        }
    }

    /// Loads the layout for `root`, applying the first configuration file found
    /// (labsmith.json, labsmith.yml, labsmith.yaml). Relative paths in the file
    /// are resolved against `root`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the configuration file cannot be parsed
    pub fn load<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        let mut config = Self::from_root(root);

        let Some(content) = load_config(root, &CONFIG_FILES)? else {
            return Ok(config);
        };

        let file: ConfigFile = match serde_json::from_str(&content) {
            Ok(file) => file,
            Err(_) => serde_yaml::from_str::<Option<ConfigFile>>(&content)
                .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}")))?
                .unwrap_or_default(),
        };

        let apply = |target: &mut PathBuf, value: Option<PathBuf>| {
            if let Some(value) = value {
                *target = root.join(value);
            }
        };
        apply(&mut config.recipes_dir, file.recipes_dir);
        apply(&mut config.history_dir, file.history_dir);
        apply(&mut config.generated_dir, file.generated_dir);
        apply(&mut config.index_file, file.index_file);

        Ok(config)
    }
}

/// Returns the contents of the first configuration file that exists in `root`.
pub fn load_config<P: AsRef<Path>>(root: P, config_files: &[&str]) -> Result<Option<String>> {
    for file in config_files {
        let config_path = root.as_ref().join(file);
        if config_path.is_file() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(Some(std::fs::read_to_string(&config_path).map_err(Error::IoError)?));
        }
    }
    debug!("No configuration file found (tried: {})", config_files.join(", "));
    Ok(None)
}
