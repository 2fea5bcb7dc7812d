//! source-parseability property (P016): every checked file must parse
//!
//! Load failures are skipped by every other property. This one turns them
//! into violations, along with syntax errors the parser recovered from.

use crate::declare_property;
use crate::parser::SourceFile;
use crate::project::LoadError;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};

declare_property!(
    SourceParseability,
    id = "P016",
    name = "source-parseability",
    description = "Source files must be readable and syntactically valid",
    category = Hygiene,
    pattern = "{app,components,lib}/**/*.{tsx,ts}",
    rule = "A file that cannot be read or parsed, or that contains recoverable syntax errors, is a violation."
);

impl Property for SourceParseability {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let mut violations: Vec<Violation> = file
            .errors()
            .iter()
            .map(|error| ctx.violation(error.line, format!("Syntax error: {}", error.message)))
            .collect();

        sort_violations(&mut violations);
        violations
    }

    fn check_load_failure(&self, error: &LoadError, ctx: &CheckContext) -> Option<Violation> {
        let violation = match error {
            LoadError::Parse { source, .. } => ctx.violation(
                source.line,
                format!("File failed to parse: {}", source.message),
            ),
            LoadError::Io { source, .. } => {
                ctx.violation(1, format!("File could not be read: {}", source))
            }
        };
        Some(violation)
    }
}
