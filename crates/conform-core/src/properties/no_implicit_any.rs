//! no-implicit-any property (P014): compiler implicit-any findings

use crate::declare_property;
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};

const IMPLICIT_ANY_MARKER: &str = "implicitly has an 'any' type";

declare_property!(
    NoImplicitAny,
    id = "P014",
    name = "no-implicit-any",
    description = "Parameters must not implicitly have the any type",
    category = Typing,
    pattern = "{app,components,lib}/**/*.{tsx,ts}",
    rule = "Every compiler diagnostic reporting that a parameter or binding element implicitly has an 'any' type is a violation. Requires noImplicitAny (or strict) in tsconfig.json.",
    examples = "// Bad\nexport function format(value) { return String(value); }\n\n// Good\nexport function format(value: number) { return String(value); }"
);

impl Property for NoImplicitAny {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let diagnostics = ctx.project.diagnostics_for(file);

        let mut violations: Vec<Violation> = diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.message.contains(IMPLICIT_ANY_MARKER))
            .map(|diagnostic| ctx.violation(diagnostic.line, diagnostic.message.as_str()))
            .collect();

        sort_violations(&mut violations);
        violations
    }
}
