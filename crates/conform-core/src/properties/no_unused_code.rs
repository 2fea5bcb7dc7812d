//! no-unused-code property (P015): compiler unused-declaration findings

use crate::declare_property;
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};

// TS6192 ("All imports in import declaration are unused.") matches none of
// these, so an import whose specifiers are all unused is not reported.
const UNUSED_MARKERS: &[&str] = &["is declared but", "never used", "never read"];

declare_property!(
    NoUnusedCode,
    id = "P015",
    name = "no-unused-code",
    description = "Imports, locals and parameters must be used",
    category = Hygiene,
    pattern = "{app,components,lib}/**/*.{tsx,ts}",
    rule = "Every compiler diagnostic reporting a declaration that is never read or never used is a violation. Requires noUnusedLocals and/or noUnusedParameters in tsconfig.json.",
    examples = "// Bad\nimport { format } from 'date-fns';\nexport const today = () => new Date();\n\n// Good\nimport { format } from 'date-fns';\nexport const today = () => format(new Date(), 'yyyy-MM-dd');"
);

fn is_unused_diagnostic(message: &str) -> bool {
    UNUSED_MARKERS.iter().any(|marker| message.contains(marker))
}

impl Property for NoUnusedCode {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let diagnostics = ctx.project.diagnostics_for(file);

        let mut violations: Vec<Violation> = diagnostics
            .iter()
            .filter(|diagnostic| is_unused_diagnostic(&diagnostic.message))
            .map(|diagnostic| ctx.violation(diagnostic.line, diagnostic.message.as_str()))
            .collect();

        sort_violations(&mut violations);
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::CompilerOptions;
    use crate::properties::test_support::{check_source, check_source_with};

    fn unused_checks() -> CompilerOptions {
        CompilerOptions {
            no_unused_locals: Some(true),
            no_unused_parameters: Some(true),
            ..Default::default()
        }
    }

    fn check(path: &str, code: &str) -> Vec<Violation> {
        check_source_with(&NoUnusedCode::new(), path, code, unused_checks())
    }

    #[test]
    fn unused_import_and_local_violate() {
        let code = "import { format } from 'date-fns';\n\nexport function today() {\n  const now = new Date();\n  return 1;\n}\n";
        let violations = check("lib/dates.ts", code);
        let messages: Vec<_> = violations.iter().map(|v| (v.line, v.message.as_str())).collect();

        assert_eq!(
            messages,
            vec![
                (1, "'format' is declared but its value is never read."),
                (4, "'now' is declared but its value is never read."),
            ]
        );
    }

    #[test]
    fn unused_parameter_violates_unless_underscored() {
        let violations = check("lib/handlers.ts", "export function handle(event: Event, _extra: number) {\n  return 1;\n}\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "'event' is declared but its value is never read.");
    }

    #[test]
    fn wholly_unused_import_declaration_is_not_matched() {
        let code = "import { a, b } from './letters';\nexport const c = 1;\n";

        assert!(check("lib/letters.ts", code).is_empty());
        assert!(!is_unused_diagnostic("All imports in import declaration are unused."));
    }

    #[test]
    fn unused_type_violates() {
        let violations = check("lib/types.ts", "type Shape = { w: number };\nexport const n = 1;\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "'Shape' is declared but never used.");
    }

    #[test]
    fn react_import_is_used_by_jsx() {
        let code = "import React from 'react';\n\nexport function Hello() {\n  return <p>Hello</p>;\n}\n";
        assert!(check("components/ui/Hello.tsx", code).is_empty());
    }

    #[test]
    fn nothing_reported_without_unused_options() {
        let code = "import { format } from 'date-fns';\nexport const n = 1;\n";
        assert!(check_source(&NoUnusedCode::new(), "lib/dates.ts", code).is_empty());
    }

    #[test]
    fn implicit_any_messages_are_not_unused_findings() {
        assert!(!is_unused_diagnostic("Parameter 'x' implicitly has an 'any' type."));
        assert!(is_unused_diagnostic("'X' is declared but never used."));
    }
}
