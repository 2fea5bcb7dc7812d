//! Check command - runs properties over a project

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::{Args, ValueEnum};
use conform_core::{Harness, Project, PropertyResult, Summary};
use tracing::info;

use super::{configure_colors, load_config, root_or_cwd};
use crate::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Project root to analyze (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Property to run, by id or name; repeatable (defaults to all enabled)
    #[arg(short = 'p', long = "property", value_name = "ID|NAME")]
    pub properties: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// tsconfig file relative to the project root
    #[arg(long, value_name = "FILE")]
    pub tsconfig: Option<PathBuf>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl CheckArgs {
    /// Returns whether every selected property holds.
    pub fn run(&self) -> Result<bool> {
        configure_colors(self.no_color);

        let root = root_or_cwd(self.path.as_ref());
        let mut config = load_config(&root)?;
        if let Some(tsconfig) = &self.tsconfig {
            config.tsconfig = Some(tsconfig.clone());
        }

        let project = Project::open(&root, &config)
            .with_context(|| format!("Failed to open project at '{}'", root.display()))?;
        let harness = Harness::with_config(project, &config);

        let results = self.run_selected(&harness)?;
        let summary = Summary::new(results);
        info!(
            properties = summary.properties,
            failed = summary.failed,
            violations = summary.violations,
            "Check finished"
        );

        match self.format {
            OutputFormat::Text => output::text::print(&summary),
            OutputFormat::Json => {
                let analyzed = harness.project().root().display().to_string();
                println!("{}", output::json::format(&summary, &analyzed)?);
            }
        }

        Ok(summary.all_passed())
    }

    fn run_selected(&self, harness: &Harness) -> Result<Vec<PropertyResult>> {
        if self.properties.is_empty() {
            return Ok(harness.run_all()?);
        }

        self.properties
            .iter()
            .map(|requested| {
                let property = harness
                    .registry()
                    .get(requested)
                    .ok_or_else(|| anyhow!("Unknown property '{}'", requested))?;
                Ok(harness.run(property)?)
            })
            .collect()
    }
}
