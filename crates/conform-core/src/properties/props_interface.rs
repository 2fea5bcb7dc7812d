//! props-interface property (P004): component props must be typed

use crate::declare_property;
use crate::navigator::{pat_has_type_annotation, top_level_components};
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

declare_property!(
    PropsInterface,
    id = "P004",
    name = "props-interface",
    description = "Component props must have an explicit type",
    category = Typing,
    pattern = "components/**/*.tsx",
    rule = "The first parameter of a top-level function or arrow-function component must carry a type annotation. Components without parameters are exempt.",
    examples = "// Bad\nexport function Card({ title }) { /* ... */ }\n\n// Good\ninterface CardProps { title: string }\nexport function Card({ title }: CardProps) { /* ... */ }"
);

impl Property for PropsInterface {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let Some(module) = file.module() else {
            return Vec::new();
        };
        let visitor_ctx = VisitorContext::new(file);

        let mut violations: Vec<Violation> = top_level_components(module)
            .into_iter()
            .filter(|component| {
                component
                    .first_param()
                    .is_some_and(|param| !pat_has_type_annotation(param))
            })
            .map(|component| {
                ctx.violation(
                    visitor_ctx.line(component.span),
                    format!("Component '{}' has untyped props", component.name),
                )
                .with_name(component.name)
            })
            .collect();

        sort_violations(&mut violations);
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::test_support::check_source;

    fn check(code: &str) -> Vec<Violation> {
        check_source(&PropsInterface::new(), "components/ui/Card.tsx", code)
    }

    #[test]
    fn untyped_destructured_props_violate() {
        let violations = check("export function Card({ title }) {\n  return <h2>{title}</h2>;\n}\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
        assert_eq!(violations[0].message, "Component 'Card' has untyped props");
    }

    #[test]
    fn untyped_arrow_component_violates() {
        let code = "import React from 'react';\n\nexport const Badge = (props) => <span>{props.label}</span>;\n";
        let violations = check(code);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
        assert_eq!(violations[0].context.name.as_deref(), Some("Badge"));
    }

    #[test]
    fn typed_props_hold() {
        let code = r#"interface CardProps { title: string }
export function Card({ title }: CardProps) { return <h2>{title}</h2>; }
export const Badge = ({ label = "new" }: { label?: string }) => <span>{label}</span>;
"#;
        assert!(check(code).is_empty());
    }

    #[test]
    fn parameterless_components_are_exempt() {
        assert!(check("export default function Page() { return <main />; }").is_empty());
    }

    #[test]
    fn lowercase_functions_are_not_components() {
        assert!(check("export function format(value) { return String(value); }").is_empty());
    }
}
