//! Property harness
//!
//! Runs properties over the files of a [`Project`]: resolve the property's
//! file set, load and check the files in parallel, then collect the sorted
//! violations into a [`PropertyResult`].

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{Config, Limits};
use crate::files::{self, FilterOptions, ResolutionError};
use crate::project::Project;
use crate::properties::{CheckContext, Property, PropertyRegistry};
use crate::violation::{PropertyResult, SkippedFile, Violation, sort_violations};

enum FileOutcome {
    Checked(Vec<Violation>),
    Skipped(SkippedFile),
}

pub struct Harness {
    project: Project,
    registry: PropertyRegistry,
    limits: Limits,
}

impl Harness {
    pub fn new(project: Project, registry: PropertyRegistry) -> Self {
        Self {
            project,
            registry,
            limits: Limits::default(),
        }
    }

    /// Default properties configured from `config`.
    pub fn with_config(project: Project, config: &Config) -> Self {
        let mut registry = PropertyRegistry::with_defaults();
        registry.configure(&config.properties);
        Self::new(project, registry).with_limits(config.limits.clone())
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn registry(&self) -> &PropertyRegistry {
        &self.registry
    }

    pub fn run(&self, property: &dyn Property) -> Result<PropertyResult, ResolutionError> {
        let metadata = property.metadata();
        let filter = FilterOptions::new(self.registry.pattern_for(property))
            .with_ignore(self.project.exclude().iter().cloned());
        let paths = files::resolve(self.project.root(), &filter)?;
        debug!(property = metadata.id, files = paths.len(), "Checking property");

        let outcomes: Vec<FileOutcome> = paths
            .par_iter()
            .map(|path| self.check_file(property, path))
            .collect();

        let mut violations = Vec::new();
        let mut skipped = Vec::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::Checked(found) => violations.extend(found),
                FileOutcome::Skipped(file) => skipped.push(file),
            }
        }
        sort_violations(&mut violations);

        info!(
            property = metadata.id,
            files = paths.len(),
            violations = violations.len(),
            skipped = skipped.len(),
            "Property checked"
        );

        Ok(PropertyResult {
            id: metadata.id.to_string(),
            name: metadata.name.to_string(),
            files_checked: paths.len() - skipped.len(),
            violations,
            skipped,
        })
    }

    /// Every enabled property, in registry order. The first resolution error
    /// aborts the run.
    pub fn run_all(&self) -> Result<Vec<PropertyResult>, ResolutionError> {
        self.registry
            .enabled()
            .map(|property| self.run(property))
            .collect()
    }

    fn check_file(&self, property: &dyn Property, path: &Path) -> FileOutcome {
        let relative = self.project.relative(path);
        let ctx = CheckContext::new(&self.project, &self.limits, &relative);

        match self.project.load(path) {
            Ok(file) => FileOutcome::Checked(property.check(&file, &ctx)),
            Err(error) => match property.check_load_failure(&error, &ctx) {
                Some(violation) => FileOutcome::Checked(vec![violation]),
                None => {
                    warn!(
                        property = property.metadata().id,
                        file = %relative,
                        error = %error.reason(),
                        "Skipping file that failed to load"
                    );
                    FileOutcome::Skipped(SkippedFile {
                        file: relative.clone(),
                        reason: error.reason(),
                    })
                }
            },
        }
    }
}
