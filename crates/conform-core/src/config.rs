//! Configuration loading for conform
//!
//! Loads `conform.toml`, discovered by walking up from the analysed directory.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "conform.toml";

const KNOWN_TOP_LEVEL_KEYS: &[&str] = &["tsconfig", "exclude", "properties", "limits"];
const KNOWN_PROPERTIES_KEYS: &[&str] = &["disabled", "patterns"];
const KNOWN_LIMITS_KEYS: &[&str] = &[
    "component_lines",
    "jsx_min_pattern_length",
    "jsx_max_repeats",
    "component_dirs",
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid TOML in '{path}': {message}")]
    ParseError { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct ConfigResult {
    pub config: Config,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// tsconfig path relative to the project root. Defaults to `tsconfig.json`.
    pub tsconfig: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub properties: PropertiesConfig,
    pub limits: Limits,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct PropertiesConfig {
    pub disabled: Vec<String>,
    /// Glob override per property, keyed by id or name.
    pub patterns: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Limits {
    pub component_lines: usize,
    pub jsx_min_pattern_length: usize,
    pub jsx_max_repeats: usize,
    pub component_dirs: Vec<String>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            component_lines: 200,
            jsx_min_pattern_length: 30,
            jsx_max_repeats: 2,
            component_dirs: ["auth", "charts", "features", "providers", "species", "ui"]
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
        }
    }
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !current.pop() {
            return None;
        }
    }
}

fn read_config(path: &Path) -> Result<(Config, String), ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;

    Ok((config, content))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    read_config(path).map(|(config, _)| config)
}

pub fn load_config_with_warnings(path: &Path) -> Result<ConfigResult, ConfigError> {
    let (config, content) = read_config(path)?;
    let warnings = detect_unknown_keys(&content);

    Ok(ConfigResult { config, warnings })
}

fn detect_unknown_keys(content: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    let table: toml::Table = match content.parse() {
        Ok(t) => t,
        Err(_) => return warnings,
    };

    let known_top: HashSet<&str> = KNOWN_TOP_LEVEL_KEYS.iter().copied().collect();
    for key in table.keys() {
        if !known_top.contains(key.as_str()) {
            warnings.push(format!("Unknown config option: '{}'", key));
        }
    }

    for (section, known) in [
        ("properties", KNOWN_PROPERTIES_KEYS),
        ("limits", KNOWN_LIMITS_KEYS),
    ] {
        if let Some(toml::Value::Table(entries)) = table.get(section) {
            for key in entries.keys() {
                if !known.contains(&key.as_str()) {
                    warnings.push(format!("Unknown config option in [{}]: '{}'", section, key));
                }
            }
        }
    }

    warnings
}

/// Loads the nearest config, surfacing read/parse failures. A missing file
/// yields the defaults.
pub fn discover_config(start_dir: &Path) -> Result<ConfigResult, ConfigError> {
    match find_config_file(start_dir) {
        Some(path) => load_config_with_warnings(&path),
        None => Ok(ConfigResult::default()),
    }
}
