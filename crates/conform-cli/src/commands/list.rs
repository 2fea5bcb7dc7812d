//! List command - shows every property with its status and pattern

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use conform_core::PropertyRegistry;

use super::{load_config, root_or_cwd};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Project root whose conform.toml is applied (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,
}

impl ListArgs {
    pub fn run(&self) -> Result<bool> {
        let root = root_or_cwd(self.path.as_ref());
        let config = load_config(&root)?;
        let mut registry = PropertyRegistry::with_defaults();
        registry.configure(&config.properties);

        for line in render(&registry) {
            println!("{}", line);
        }
        Ok(true)
    }
}

fn render(registry: &PropertyRegistry) -> Vec<String> {
    registry
        .properties()
        .map(|property| {
            let metadata = property.metadata();
            let status = if registry.is_enabled(metadata.id) {
                "enabled".green()
            } else {
                "disabled".red()
            };
            format!(
                "{}  {:<26} {:<8}  {}",
                metadata.id.bold(),
                metadata.name,
                status,
                registry.pattern_for(property).dimmed()
            )
        })
        .collect()
}
