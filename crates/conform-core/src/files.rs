//! File set resolution: glob pattern plus ignore list to a sorted file list.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    ".next",
    "dist",
    "build",
    "out",
    "coverage",
    "__tests__",
    "__mocks__",
    "test",
    "tests",
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Glob relative to the root, with `{a,b}` alternation.
    pub pattern: String,
    /// Extra globs; a path matching any of them is dropped.
    pub ignore: Vec<String>,
}

impl FilterOptions {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ignore: Vec::new(),
        }
    }

    pub fn with_ignore(mut self, ignore: impl IntoIterator<Item = String>) -> Self {
        self.ignore.extend(ignore);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("Root directory '{path}' does not exist")]
    RootNotFound { path: PathBuf },
    #[error("Root '{path}' is not a directory")]
    NotADirectory { path: PathBuf },
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

fn compile_glob(pattern: &str) -> Result<Glob, ResolutionError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|e| ResolutionError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.kind().to_string(),
        })
}

fn compile_set(patterns: &[String]) -> Result<GlobSet, ResolutionError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| ResolutionError::InvalidPattern {
        pattern: patterns.join(", "),
        message: e.to_string(),
    })
}

fn is_excluded_dir(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || EXCLUDED_DIRS.contains(&name.as_ref())
}

pub fn is_test_file(file_name: &str) -> bool {
    file_name.contains(".test.") || file_name.contains(".spec.")
}

/// Project-relative path with forward slashes, used for matching and display.
pub fn relative_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolves every file under `root` matching `options.pattern`, minus the
/// always-excluded locations and `options.ignore`. The result is sorted.
pub fn resolve(root: &Path, options: &FilterOptions) -> Result<Vec<PathBuf>, ResolutionError> {
    if !root.exists() {
        return Err(ResolutionError::RootNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ResolutionError::NotADirectory {
            path: root.to_path_buf(),
        });
    }

    let matcher = compile_glob(&options.pattern)?.compile_matcher();
    let ignore = compile_set(&options.ignore)?;

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_excluded_dir(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "Skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| !is_test_file(&entry.file_name().to_string_lossy()))
        .filter(|entry| {
            let relative = relative_path(root, entry.path());
            matcher.is_match(&relative) && !ignore.is_match(&relative)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    debug!(pattern = %options.pattern, count = files.len(), "Resolved file set");

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "export {};\n").unwrap();
    }

    fn resolved(root: &Path, options: &FilterOptions) -> Vec<String> {
        resolve(root, options)
            .unwrap()
            .iter()
            .map(|path| relative_path(root, path))
            .collect()
    }

    #[test]
    fn matches_brace_alternation_sorted() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "components/ui/Button.tsx");
        touch(dir.path(), "components/ui/util.ts");
        touch(dir.path(), "components/Header.tsx");
        touch(dir.path(), "components/readme.md");
        touch(dir.path(), "app/page.tsx");

        let files = resolved(dir.path(), &FilterOptions::new("components/**/*.{tsx,ts}"));

        assert_eq!(
            files,
            vec![
                "components/Header.tsx",
                "components/ui/Button.tsx",
                "components/ui/util.ts",
            ]
        );
    }

    #[test]
    fn single_star_does_not_cross_directories() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "app/page.tsx");
        touch(dir.path(), "app/blog/page.tsx");

        assert_eq!(
            resolved(dir.path(), &FilterOptions::new("app/*.tsx")),
            vec!["app/page.tsx"]
        );
    }

    #[test]
    fn always_excluded_locations_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "app/node_modules/pkg/index.tsx");
        touch(dir.path(), "app/.next/server/page.tsx");
        touch(dir.path(), "app/__tests__/page.tsx");
        touch(dir.path(), "app/page.test.tsx");
        touch(dir.path(), "app/page.spec.tsx");
        touch(dir.path(), "app/page.tsx");

        assert_eq!(
            resolved(dir.path(), &FilterOptions::new("app/**/*.tsx")),
            vec!["app/page.tsx"]
        );
    }

    #[test]
    fn ignore_globs_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "components/legacy/Old.tsx");
        touch(dir.path(), "components/New.tsx");

        let options = FilterOptions::new("components/**/*.tsx")
            .with_ignore(vec!["components/legacy/**".to_string()]);

        assert_eq!(resolved(dir.path(), &options), vec!["components/New.tsx"]);
    }

    #[test]
    fn empty_match_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let files = resolve(dir.path(), &FilterOptions::new("components/**/*.tsx")).unwrap();

        assert!(files.is_empty());
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = resolve(&missing, &FilterOptions::new("**/*.tsx")).unwrap_err();

        assert!(matches!(err, ResolutionError::RootNotFound { .. }));
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "file.tsx");

        let err =
            resolve(&dir.path().join("file.tsx"), &FilterOptions::new("**/*.tsx")).unwrap_err();

        assert!(matches!(err, ResolutionError::NotADirectory { .. }));
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = resolve(dir.path(), &FilterOptions::new("components/{a,b")).unwrap_err();

        assert!(matches!(err, ResolutionError::InvalidPattern { .. }));
    }

    #[test]
    fn relative_path_uses_forward_slashes() {
        let root = Path::new("/site");
        let path = root.join("components").join("ui").join("Button.tsx");

        assert_eq!(relative_path(root, &path), "components/ui/Button.tsx");
    }
}
