//! Explain command - describes one property

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use conform_core::{PropertyMetadata, PropertyRegistry};

use super::load_config;

#[derive(Args, Debug)]
pub struct ExplainArgs {
    #[arg(
        value_name = "PROPERTY",
        help = "Property id or name to explain (e.g. \"P010\", \"dark-mode-support\")"
    )]
    pub property: String,
}

impl ExplainArgs {
    pub fn run(&self) -> Result<bool> {
        let cwd = std::env::current_dir()?;
        let config = load_config(&cwd)?;
        let mut registry = PropertyRegistry::with_defaults();
        registry.configure(&config.properties);

        let Some(property) = registry.get(&self.property) else {
            eprintln!(
                "{} unknown property '{}'",
                "error:".red().bold(),
                self.property
            );
            eprintln!();
            eprintln!("Available properties:");
            for property in registry.properties() {
                let metadata = property.metadata();
                eprintln!("  {} ({})", metadata.id, metadata.name);
            }
            return Ok(false);
        };

        let enabled = registry.is_enabled(&self.property);
        print!("{}", describe(property.metadata(), registry.pattern_for(property), enabled));
        Ok(true)
    }
}

fn describe(metadata: &PropertyMetadata, pattern: &str, enabled: bool) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{}\n\n", format!("Property {}", metadata.id).bold()));
    out.push_str(&format!("  {}: {}\n", "Name".cyan(), metadata.name));
    out.push_str(&format!("  {}: {}\n", "Description".cyan(), metadata.description));
    out.push_str(&format!("  {}: {}\n", "Category".cyan(), metadata.category));
    out.push_str(&format!("  {}: {}\n", "Pattern".cyan(), pattern));
    out.push_str(&format!("  {}: {}\n", "Rule".cyan(), metadata.rule));

    if let Some(examples) = metadata.examples {
        out.push('\n');
        out.push_str(&format!("  {}:\n", "Examples".cyan()));
        for line in examples.lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }

    out.push('\n');
    let status = if enabled {
        "enabled".green()
    } else {
        "disabled".red()
    };
    out.push_str(&format!("  {}: {}\n\n", "Status".cyan(), status));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describes_rule_pattern_and_examples() {
        colored::control::set_override(false);
        let registry = PropertyRegistry::with_defaults();
        let property = registry.get("dark-mode-support").unwrap();

        let text = describe(property.metadata(), registry.pattern_for(property), true);

        assert!(text.contains("Property P010"));
        assert!(text.contains("Category: styling"));
        assert!(text.contains("Pattern: {app,components}/**/*.tsx"));
        assert!(text.contains("    // Bad"));
        assert!(text.contains("Status: enabled"));
    }

    #[test]
    fn properties_without_examples_omit_the_section() {
        colored::control::set_override(false);
        let registry = PropertyRegistry::with_defaults();
        let property = registry.get("P016").unwrap();

        let text = describe(property.metadata(), registry.pattern_for(property), false);

        assert!(!text.contains("Examples"));
        assert!(text.contains("Status: disabled"));
    }
}
