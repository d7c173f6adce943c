#![allow(dead_code)]

use labsmith::recipe::{Context, Difficulty, Recipe, RecipeFile, Variable};
use serde_json::{json, Value};

pub fn variable(key: &str, default: &str, required: bool) -> Variable {
    Variable {
        key: key.to_string(),
        label: key.to_lowercase(),
        default: default.to_string(),
        required,
        options: None,
        secret: false,
        description: None,
    }
}

pub fn recipe(variables: Vec<Variable>) -> Recipe {
    Recipe {
        id: "postgres-lab".to_string(),
        name: "Postgres lab".to_string(),
        description: "A single Postgres container".to_string(),
        tags: vec!["database".to_string(), "sql".to_string()],
        difficulty: Difficulty::Easy,
        variables,
        compose_template: "image: postgres:{{TAG}}".to_string(),
        env_template: "POSTGRES_PASSWORD={{DB_PASS}}".to_string(),
        readme_template: "# {{PROJECT_NAME}}".to_string(),
        seed_files: Vec::new(),
        extra_files: Vec::new(),
    }
}

pub fn file(path: &str, content: &str) -> RecipeFile {
    RecipeFile { path: path.to_string(), content: content.to_string() }
}

pub fn context(pairs: &[(&str, &str)]) -> Context {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

pub fn document() -> Value {
    json!({
        "id": "redis-cache",
        "name": "Redis cache",
        "description": "Redis with persistence",
        "tags": ["cache", "nosql"],
        "difficulty": "medium",
        "variables": [
            {"key": "REDIS_TAG", "label": "Image tag", "default": "7", "required": true,
             "options": ["6", "7"]},
            {"key": "REDIS_PASSWORD", "label": "Password", "default": "", "required": true,
             "secret": true, "description": "requirepass value"}
        ],
        "composeTemplate": "services:\n  redis:\n    image: redis:{{REDIS_TAG}}\n",
        "envTemplate": "REDIS_PASSWORD={{REDIS_PASSWORD}}\n",
        "readmeTemplate": "# {{PROJECT_NAME}}\n",
        "seedFiles": [{"path": "init.redis", "content": ""}],
        "extraFiles": [{"path": "conf/redis.conf", "content": "requirepass {{REDIS_PASSWORD}}\n"}]
    })
}
