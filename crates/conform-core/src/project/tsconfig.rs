//! `tsconfig.json` loading: JSONC syntax, `extends` chains, and the subset of
//! compiler options the checks depend on.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

pub const TSCONFIG_FILENAME: &str = "tsconfig.json";

#[derive(Debug, thiserror::Error)]
pub enum TsConfigError {
    #[error("Failed to read tsconfig '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid tsconfig '{path}': {message}")]
    Parse { path: PathBuf, message: String },
    #[error("tsconfig extends cycle detected at '{path}'")]
    Cycle { path: PathBuf },
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TsConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    #[serde(default)]
    pub strict: Option<bool>,
    #[serde(default)]
    pub no_implicit_any: Option<bool>,
    #[serde(default)]
    pub no_unused_locals: Option<bool>,
    #[serde(default)]
    pub no_unused_parameters: Option<bool>,
    #[serde(default)]
    pub jsx: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub paths: Option<BTreeMap<String, Vec<String>>>,
}

impl CompilerOptions {
    /// `noImplicitAny` defaults to the value of `strict`.
    pub fn no_implicit_any(&self) -> bool {
        self.no_implicit_any
            .unwrap_or_else(|| self.strict.unwrap_or(false))
    }

    pub fn no_unused_locals(&self) -> bool {
        self.no_unused_locals.unwrap_or(false)
    }

    pub fn no_unused_parameters(&self) -> bool {
        self.no_unused_parameters.unwrap_or(false)
    }

    fn merge(base: CompilerOptions, child: CompilerOptions) -> CompilerOptions {
        CompilerOptions {
            strict: child.strict.or(base.strict),
            no_implicit_any: child.no_implicit_any.or(base.no_implicit_any),
            no_unused_locals: child.no_unused_locals.or(base.no_unused_locals),
            no_unused_parameters: child.no_unused_parameters.or(base.no_unused_parameters),
            jsx: child.jsx.or(base.jsx),
            base_url: child.base_url.or(base.base_url),
            paths: child.paths.or(base.paths),
        }
    }
}

pub fn parse_tsconfig(path: &Path, source: &str) -> Result<TsConfig, TsConfigError> {
    json5::from_str(source).map_err(|e| TsConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Loads `path` and every config it extends, child options taking precedence.
pub fn load_tsconfig(path: &Path) -> Result<TsConfig, TsConfigError> {
    let mut visited = HashSet::new();
    load_tsconfig_inner(path, &mut visited)
}

fn load_tsconfig_inner(
    path: &Path,
    visited: &mut HashSet<PathBuf>,
) -> Result<TsConfig, TsConfigError> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        return Err(TsConfigError::Cycle { path: canonical });
    }

    let source = std::fs::read_to_string(path).map_err(|e| TsConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut config = parse_tsconfig(path, &source)?;
    debug!(path = %path.display(), "Loaded tsconfig");

    if let Some(extends) = config.extends.take() {
        match resolve_extends_path(path, &extends) {
            Some(base_path) => {
                let base = load_tsconfig_inner(&base_path, visited)?;
                config.compiler_options =
                    CompilerOptions::merge(base.compiler_options, config.compiler_options);
            }
            None => warn!(extends = %extends, "Could not resolve extended tsconfig, ignoring it"),
        }
    }

    visited.remove(&canonical);
    Ok(config)
}

fn resolve_extends_path(current_path: &Path, extends: &str) -> Option<PathBuf> {
    let base_dir = current_path.parent()?;
    let mut candidate = PathBuf::from(extends);
    if candidate.extension().is_none() {
        candidate.set_extension("json");
    }

    if candidate.is_absolute() {
        return Some(candidate);
    }
    if extends.starts_with('.') {
        return Some(base_dir.join(candidate));
    }

    // Package specifiers are looked up in node_modules of each ancestor.
    base_dir
        .ancestors()
        .map(|dir| dir.join("node_modules").join(&candidate))
        .find(|path| path.is_file())
}
