//! Dashboard configuration: `project-lens.json` (schemaVersion=1).
//!
//! Looked up at `$PROJECT_LENS_CONFIG`, falling back to `./project-lens.json`.
//! A missing file means defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::clean::{CleanConfig, DEFAULT_SEPARATOR};
use crate::data::schema;

pub const CONFIG_FILE_NAME: &str = "project-lens.json";
pub const CONFIG_ENV: &str = "PROJECT_LENS_CONFIG";
pub const SCHEMA_VERSION_V1: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported schemaVersion {0}")]
    UnsupportedSchemaVersion(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub schema_version: u32,
    /// Directory scanned for workbooks and sheet directories.
    pub data_dir: PathBuf,
    /// Source opened on start-up, relative to `data_dir` unless absolute.
    pub default_source: Option<PathBuf>,
    /// Resources CSV, relative to the selected source's directory unless absolute.
    pub resources_file: PathBuf,
    /// Row marker dropped during cleaning.
    pub separator: String,
    /// Sheets to load, in order.
    pub sheets: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: SCHEMA_VERSION_V1,
            data_dir: PathBuf::from("."),
            default_source: None,
            resources_file: PathBuf::from("Resources.csv"),
            separator: DEFAULT_SEPARATOR.to_string(),
            sheets: schema::SHEETS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Config {
    /// Load from the environment-selected path or the working directory.
    pub fn load() -> Result<Config, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
        Ok(Self::from_path(&path)?.unwrap_or_default())
    }

    /// `Ok(None)` when the file does not exist.
    pub fn from_path(path: &Path) -> Result<Option<Config>, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let cfg: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if cfg.schema_version != SCHEMA_VERSION_V1 {
            return Err(ConfigError::UnsupportedSchemaVersion(cfg.schema_version));
        }
        Ok(Some(cfg))
    }

    pub fn clean_config(&self) -> CleanConfig {
        CleanConfig {
            separator: self.separator.clone(),
        }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(String::as_str).collect()
    }

    pub fn default_source_path(&self) -> Option<PathBuf> {
        self.default_source.as_ref().map(|p| resolve(&self.data_dir, p))
    }

    /// Where the resources file lives for a given source.
    pub fn resources_path(&self, source: &Path) -> PathBuf {
        let base = if source.is_dir() {
            source
        } else {
            source.parent().unwrap_or_else(|| Path::new("."))
        };
        resolve(base, &self.resources_file)
    }
}

fn resolve(base: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}
