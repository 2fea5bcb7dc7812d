//! tailwind-styling property (P011): static inline styles belong in classes
//!
//! Only object literals are judged, so `style={theme.card}` passes.

use swc_ecma_ast::Expr;

use crate::declare_property;
use crate::navigator::{find_jsx_attr, jsx_attr_expr, jsx_attr_string_value};
use crate::parser::SourceFile;
use crate::properties::helpers::for_each_jsx_element;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

const DYNAMIC_MARKERS: &[&str] = &["${", "props.", "state."];

declare_property!(
    TailwindStyling,
    id = "P011",
    name = "tailwind-styling",
    description = "Static inline styles should be Tailwind classes",
    category = Styling,
    pattern = "{app,components}/**/*.tsx",
    rule = "A style attribute holding an object literal is only allowed for dynamic values: its text must contain a template interpolation, props. or state.",
    examples = "// Bad\n<div style={{ marginTop: 16 }} />\n\n// Good\n<div className=\"mt-4\" />\n<div style={{ width: `${props.progress}%` }} />"
);

fn is_static_style(value: &str) -> bool {
    !DYNAMIC_MARKERS.iter().any(|marker| value.contains(marker))
}

impl Property for TailwindStyling {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let visitor_ctx = VisitorContext::new(file);
        let mut violations = Vec::new();

        for_each_jsx_element(module, &visitor_ctx, |element| {
            let Some(attr) = find_jsx_attr(&element.opening, "style") else {
                return;
            };
            if !matches!(jsx_attr_expr(attr), Some(Expr::Object(_))) {
                return;
            }
            let Some(value) = jsx_attr_string_value(attr, &visitor_ctx) else {
                return;
            };
            if is_static_style(value) {
                violations.push(ctx.violation(
                    visitor_ctx.line(attr.span),
                    "Inline style with static values; use Tailwind classes instead",
                ));
            }
        });

        sort_violations(&mut violations);
        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::test_support::check_source;

    fn check(code: &str) -> Vec<Violation> {
        check_source(&TailwindStyling::new(), "components/ui/Bar.tsx", code)
    }

    #[test]
    fn static_style_violates() {
        let violations = check("export const Bar = () => <div style={{ marginTop: 16, color: 'red' }} />;");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn interpolated_style_holds() {
        assert!(check("const a = <div style={{ width: `${pct}%` }} />;").is_empty());
    }

    #[test]
    fn props_and_state_references_hold() {
        assert!(check("const a = <div style={{ color: props.color }} />;").is_empty());
        assert!(check("const a = <div style={{ ...state.box, top: 0 }} />;").is_empty());
    }

    #[test]
    fn non_object_style_values_hold() {
        assert!(check("const a = <div style={s} />;").is_empty());
        assert!(check("const a = <div style={getStyle('card')} />;").is_empty());
    }

    #[test]
    fn parenthesized_object_is_judged() {
        assert_eq!(check("const a = <div style={({ margin: 0 })} />;").len(), 1);
    }

    #[test]
    fn elements_without_style_hold() {
        assert!(check("const a = <div className=\"mt-4\" />;").is_empty());
    }
}
