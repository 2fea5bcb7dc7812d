//! Source project loading
//!
//! A [`Project`] owns the analysed root, the compiler options read once from
//! `tsconfig.json`, and a concurrent cache of parsed files. Cached entries are
//! immutable and live as long as the project.

pub mod tsconfig;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::config::Config;
use crate::files::relative_path;
use crate::parser::{ParseError, SourceFile};
use crate::semantic::{AnalysisOptions, SemanticModel};

pub use tsconfig::{CompilerOptions, TSCONFIG_FILENAME, TsConfig, TsConfigError};

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Project root '{path}' is not a directory")]
    InvalidRoot { path: PathBuf },
    #[error(transparent)]
    TsConfig(#[from] TsConfigError),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },
    #[error("Failed to parse '{path}': {source}")]
    Parse { path: PathBuf, source: ParseError },
}

impl LoadError {
    pub fn path(&self) -> &Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Parse { path, .. } => path,
        }
    }

    /// The failure without the path prefix.
    pub fn reason(&self) -> String {
        match self {
            LoadError::Io { source, .. } => source.to_string(),
            LoadError::Parse { source, .. } => source.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A compiler-style finding for one file. `code` follows the TypeScript
/// numbering (`6133`, `7006`, ...); syntax errors carry no code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerDiagnostic {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub severity: Severity,
    pub code: Option<u32>,
}

type Loaded = Result<Arc<SourceFile>, LoadError>;

pub struct Project {
    root: PathBuf,
    options: CompilerOptions,
    exclude: Vec<String>,
    files: DashMap<PathBuf, Loaded>,
    diagnostics: DashMap<PathBuf, Arc<Vec<CompilerDiagnostic>>>,
}

impl std::fmt::Debug for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Project")
            .field("root", &self.root)
            .field("options", &self.options)
            .field("cached_files", &self.files.len())
            .finish()
    }
}

impl Project {
    /// Opens the project at `root`, reading its tsconfig once. A missing
    /// default `tsconfig.json` yields default options; a configured tsconfig
    /// that cannot be read, or any invalid one, is an error.
    pub fn open(root: &Path, config: &Config) -> Result<Self, ProjectError> {
        if !root.is_dir() {
            return Err(ProjectError::InvalidRoot {
                path: root.to_path_buf(),
            });
        }
        let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());

        let tsconfig_path = root.join(
            config
                .tsconfig
                .as_deref()
                .unwrap_or(Path::new(TSCONFIG_FILENAME)),
        );
        let options = if config.tsconfig.is_none() && !tsconfig_path.exists() {
            debug!(
                root = %root.display(),
                "No tsconfig.json found, using default compiler options"
            );
            CompilerOptions::default()
        } else {
            tsconfig::load_tsconfig(&tsconfig_path)?.compiler_options
        };

        Ok(Self {
            root,
            options,
            exclude: config.exclude.clone(),
            files: DashMap::new(),
            diagnostics: DashMap::new(),
        })
    }

    pub fn with_options(root: impl Into<PathBuf>, options: CompilerOptions) -> Self {
        Self {
            root: root.into(),
            options,
            exclude: Vec::new(),
            files: DashMap::new(),
            diagnostics: DashMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn compiler_options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    pub fn relative(&self, path: &Path) -> String {
        relative_path(&self.root, path)
    }

    fn normalize(&self, path: &Path) -> PathBuf {
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        joined.canonicalize().unwrap_or(joined)
    }

    /// Parses `path` on first use; later calls return the cached result.
    pub fn load(&self, path: &Path) -> Result<Arc<SourceFile>, LoadError> {
        let key = self.normalize(path);
        if let Some(cached) = self.files.get(&key) {
            trace!(path = %key.display(), "Parse cache hit");
            return cached.clone();
        }

        let loaded = Self::read_and_parse(&key);
        self.files.entry(key).or_insert(loaded).clone()
    }

    fn read_and_parse(path: &Path) -> Loaded {
        let source = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: Arc::new(e),
        })?;

        let file = SourceFile::from_path(path.to_path_buf(), &source);
        if let Some(error) = file.fatal_error() {
            return Err(LoadError::Parse {
                path: path.to_path_buf(),
                source: error.clone(),
            });
        }

        debug!(path = %path.display(), lines = file.metadata().line_count, "Parsed file");
        Ok(Arc::new(file))
    }

    /// Syntax errors plus the semantic diagnostics enabled by the compiler
    /// options. The same options apply to every file regardless of call order.
    pub fn diagnostics(&self, path: &Path) -> Result<Arc<Vec<CompilerDiagnostic>>, LoadError> {
        let file = self.load(path)?;
        Ok(self.diagnostics_for(&file))
    }

    /// Diagnostics for an already parsed file, cached by its path.
    pub fn diagnostics_for(&self, file: &SourceFile) -> Arc<Vec<CompilerDiagnostic>> {
        let key = file.path().to_path_buf();
        if let Some(cached) = self.diagnostics.get(&key) {
            return Arc::clone(&cached);
        }

        let computed = Arc::new(self.compute_diagnostics(file));
        Arc::clone(&self.diagnostics.entry(key).or_insert(computed))
    }

    fn analysis_options(&self, file: &SourceFile) -> AnalysisOptions {
        if !file.metadata().language.is_typescript() {
            return AnalysisOptions::default();
        }
        AnalysisOptions {
            no_implicit_any: self.options.no_implicit_any(),
            no_unused_locals: self.options.no_unused_locals(),
            no_unused_parameters: self.options.no_unused_parameters(),
        }
    }

    fn compute_diagnostics(&self, file: &SourceFile) -> Vec<CompilerDiagnostic> {
        let mut diagnostics: Vec<CompilerDiagnostic> = file
            .errors()
            .iter()
            .map(|error| CompilerDiagnostic {
                message: error.message.clone(),
                line: error.line,
                column: error.column,
                severity: Severity::Error,
                code: None,
            })
            .collect();

        let options = self.analysis_options(file);
        if let Some(module) = file.module() {
            let model = SemanticModel::build(module);
            diagnostics.extend(model.diagnostics(options).into_iter().map(|d| {
                let offset = file.offset(d.span.lo);
                CompilerDiagnostic {
                    message: d.message,
                    line: file.line_of(offset),
                    column: file.column_of(offset),
                    severity: Severity::Error,
                    code: Some(d.code),
                }
            }));
        }

        diagnostics
    }
}
