//! Generation index.
//! A JSON array of receipts, one per successful generation, newest first.

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::HISTORY_LIMIT;
use crate::error::{Error, Result};
use crate::recipe::Context;

/// Immutable receipt of one materialization. `variables` are redacted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecord {
    pub project_name: String,
    pub recipe_id: String,
    pub created_at: DateTime<Utc>,
    pub path: PathBuf,
    pub variables: Context,
}

impl GeneratedRecord {
    pub fn new<P: AsRef<Path>>(
        project_name: &str,
        recipe_id: &str,
        path: P,
        variables: Context,
    ) -> Self {
        Self {
            project_name: project_name.to_string(),
            recipe_id: recipe_id.to_string(),
            created_at: Utc::now(),
            path: path.as_ref().to_path_buf(),
            variables,
        }
    }
}

pub struct GenerationIndex {
    path: PathBuf,
    limit: usize,
}

impl GenerationIndex {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf(), limit: HISTORY_LIMIT }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// All records, newest first. A missing index file is an empty index.
    pub fn load(&self) -> Result<Vec<GeneratedRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path).map_err(Error::IoError)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn contains(&self, project_name: &str) -> Result<bool> {
        Ok(self.load()?.iter().any(|record| record.project_name == project_name))
    }

    /// Prepends `record` and truncates the index to its limit.
    pub fn record(&self, record: GeneratedRecord) -> Result<()> {
        let mut records = self.load()?;
        records.insert(0, record);
        if records.len() > self.limit {
            debug!("Truncating generation index to {} entries", self.limit);
            records.truncate(self.limit);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(Error::IoError)?;
        }
        let content = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, content).map_err(Error::IoError)
    }
}
