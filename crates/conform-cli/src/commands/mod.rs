//! CLI command implementations

pub mod check;
pub mod explain;
pub mod list;

pub use check::CheckArgs;
pub use explain::ExplainArgs;
pub use list::ListArgs;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use conform_core::Config;
use conform_core::config::discover_config;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run properties over a project and report violations
    Check(CheckArgs),

    /// List the available properties and whether they are enabled
    List(ListArgs),

    /// Show the rule, pattern and examples of one property
    Explain(ExplainArgs),
}

/// Loads `conform.toml` for `root`, printing unknown-option warnings.
pub(crate) fn load_config(root: &Path) -> Result<Config> {
    let result = discover_config(root)
        .with_context(|| format!("Failed to load configuration for '{}'", root.display()))?;
    for warning in &result.warnings {
        eprintln!("{} {}", "warning:".yellow().bold(), warning);
    }
    Ok(result.config)
}

pub(crate) fn root_or_cwd(path: Option<&PathBuf>) -> PathBuf {
    path.cloned().unwrap_or_else(|| PathBuf::from("."))
}

pub(crate) fn configure_colors(no_color: bool) {
    let no_color_env = std::env::var("NO_COLOR").is_ok();
    if no_color || no_color_env {
        colored::control::set_override(false);
    }
}
