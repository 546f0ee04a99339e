//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::config::schema::ConfigFile;
use crate::error::{ReqzError, Result};

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG: &str = ".requirementz.yml";

/// Paths to config files in merge order (later overrides earlier).
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.requirementz/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .requirementz.yml
    pub project: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: existing(project_root.join(PROJECT_CONFIG)),
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        existing(dirs::home_dir()?.join(".requirementz").join("config.yml"))
    }

    /// Existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.user_global.iter().chain(self.project.iter()).collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    path.exists().then_some(path)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let value = load_config_value(path)?;
    parse_value(value, path)
}

fn load_config_value(path: &Path) -> Result<Value> {
    debug!("Loading config {}", path.display());
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReqzError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReqzError::from_io(path, e)
        }
    })?;

    if content.trim().is_empty() {
        return Ok(Value::Mapping(Default::default()));
    }
    serde_yaml::from_str(&content).map_err(|e| ReqzError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn parse_value(value: Value, path: &Path) -> Result<ConfigFile> {
    serde_yaml::from_value(value).map_err(|e| ReqzError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge two YAML mappings key by key; `overlay` wins.
///
/// A null in `overlay` removes the key. Non-mapping values are replaced.
pub fn merge_values(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            let mut result = base_map.clone();
            for (key, value) in overlay_map {
                if value.is_null() {
                    result.remove(key);
                } else {
                    result.insert(key.clone(), value.clone());
                }
            }
            Value::Mapping(result)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// Load configuration, or only `config_override` when given.
///
/// Missing discovered files are skipped; with none present the default
/// (empty) config is returned.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ConfigFile> {
    if let Some(path) = config_override {
        return load_config_file(path);
    }

    let paths = ConfigPaths::discover(project_root);
    let mut merged = Value::Mapping(Default::default());
    let mut last = project_root.join(PROJECT_CONFIG);
    for path in paths.all_existing() {
        merged = merge_values(&merged, &load_config_value(path)?);
        last = path.clone();
    }
    parse_value(merged, &last)
}
