//! component-size property (P001): large component files must be split
//!
//! A file whose significant line count exceeds the configured limit has to
//! define more than one top-level function component.

use crate::declare_property;
use crate::detectors::significant_line_count;
use crate::navigator::top_level_components;
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::Violation;

declare_property!(
    ComponentSize,
    id = "P001",
    name = "component-size",
    description = "Large component files must be split into several components",
    category = Structure,
    pattern = "components/**/*.tsx",
    rule = "A file with more than 200 significant lines must define more than one top-level function or arrow-function component. Files at or under the limit are exempt.",
    examples = "// Bad: components/Dashboard.tsx, 340 lines, one component\nexport function Dashboard() { /* ... */ }\n\n// Good: extract sections\nfunction DashboardHeader() { /* ... */ }\nexport function Dashboard() { /* ... */ }"
);

impl Property for ComponentSize {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let limit = ctx.limits.component_lines;
        let lines = significant_line_count(file.source());
        if lines <= limit {
            return Vec::new();
        }

        let Some(module) = file.module() else {
            return Vec::new();
        };

        let components = top_level_components(module).len();
        if components > 1 {
            return Vec::new();
        }

        vec![
            ctx.violation(
                1,
                format!(
                    "File has {} significant lines (limit {}) but defines {} component(s); split it into smaller components",
                    lines, limit, components
                ),
            )
            .with_count(lines),
        ]
    }
}
