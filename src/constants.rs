//! Common constants used throughout labsmith.

/// Supported configuration file names, tried in order
pub const CONFIG_FILES: [&str; 3] = ["labsmith.json", "labsmith.yml", "labsmith.yaml"];

/// Extensions accepted for recipe documents in the catalog
pub const RECIPE_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// Rendered output file names inside a generated project
pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const ENV_FILE: &str = ".env";
pub const README_FILE: &str = "README.md";
pub const SEED_DIR: &str = "seed";

/// Context key under which the project name is exposed to templates
pub const PROJECT_NAME_KEY: &str = "PROJECT_NAME";

/// Replaces secret values in persisted or displayed bindings
pub const REDACTION_MARKER: &str = "********";

/// Maximum number of records kept in the generation index
pub const HISTORY_LIMIT: usize = 100;

pub const RECIPE_ID_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";
pub const VARIABLE_KEY_PATTERN: &str = r"^[A-Z][A-Z0-9_]*$";
pub const PROJECT_NAME_PATTERN: &str = r"^[a-z0-9][a-z0-9-]*$";
pub const PLACEHOLDER_PATTERN: &str = r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}";
