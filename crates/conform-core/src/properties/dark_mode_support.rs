//! dark-mode-support property (P010): colour utilities need a `dark:` pair
//!
//! The check is by utility prefix, not by colour value: `bg-primary` and
//! `bg-[#ff0000]` count the same as `bg-red-500`. Classes built on CSS
//! variables already follow the theme.

use std::sync::LazyLock;

use regex::Regex;

use crate::declare_property;
use crate::navigator::{find_jsx_attr, jsx_attr_string_value};
use crate::parser::SourceFile;
use crate::properties::helpers::for_each_jsx_element;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

const THEME_VARIABLE_MARKERS: &[&str] = &["var(--", "hsl(var(--"];

static COLOR_UTILITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^\w-])(?:bg|text|border|ring|divide|placeholder|from|via|to)-")
        .expect("Invalid regex pattern")
});

declare_property!(
    DarkModeSupport,
    id = "P010",
    name = "dark-mode-support",
    description = "Hard-coded colour classes must come with a dark mode variant",
    category = Styling,
    pattern = "{app,components}/**/*.tsx",
    rule = "A className containing a colour utility prefix (bg-, text-, border-, ring-, divide-, placeholder-, from-, via-, to-) must also contain a dark: variant. Classes using var(-- or hsl(var(-- are exempt.",
    examples = "// Bad\n<div className=\"bg-white text-gray-900\" />\n\n// Good\n<div className=\"bg-white text-gray-900 dark:bg-gray-900 dark:text-white\" />\n<div className=\"bg-[var(--surface)] text-[hsl(var(--ink))]\" />"
);

fn lacks_dark_variant(class_text: &str) -> bool {
    if class_text.contains("dark:") {
        return false;
    }
    if THEME_VARIABLE_MARKERS
        .iter()
        .any(|marker| class_text.contains(marker))
    {
        return false;
    }
    COLOR_UTILITY.is_match(class_text)
}

impl Property for DarkModeSupport {
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
            let Some(attr) = find_jsx_attr(&element.opening, "className") else {
                return;
            };
            let Some(class_text) = jsx_attr_string_value(attr, &visitor_ctx) else {
                return;
            };
            if lacks_dark_variant(class_text) {
                violations.push(ctx.violation(
                    visitor_ctx.line(attr.span),
                    "className uses colour utilities without a dark: variant",
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
        check_source(&DarkModeSupport::new(), "components/ui/Card.tsx", code)
    }

    #[test]
    fn bare_colour_violates() {
        let code = "export const Card = () => (\n  <div\n    className=\"rounded bg-white p-4\"\n  />\n);";
        let violations = check(code);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
    }

    #[test]
    fn dark_pair_holds() {
        assert!(check("const a = <p className=\"text-gray-900 dark:text-gray-100\" />;").is_empty());
    }

    #[test]
    fn css_variable_tokens_are_exempt() {
        assert!(check("const a = <p className=\"bg-[hsl(var(--card))] text-white\" />;").is_empty());
        assert!(check("const a = <p className=\"border-[var(--line)] border-red-500\" />;").is_empty());
    }

    #[test]
    fn classes_without_colour_prefixes_hold() {
        assert!(check("const a = <p className=\"p-4 font-bold rounded shadow-md\" />;").is_empty());
        assert!(check("const a = <p className=\"stroke-red-500 fill-current outline-none\" />;").is_empty());
    }

    #[test]
    fn any_value_after_a_colour_prefix_violates() {
        assert_eq!(check("const a = <p className=\"bg-[#ff0000]\" />;").len(), 1);
        assert_eq!(check("const a = <p className=\"bg-primary text-foreground\" />;").len(), 1);
        assert_eq!(check("const a = <p className=\"border-2 rounded\" />;").len(), 1);
    }

    #[test]
    fn prefix_must_start_a_class() {
        assert!(check("const a = <p className=\"grid-flow-col auto-cols-max\" />;").is_empty());
        assert!(check("const a = <p className=\"scroll-mt-4 snap-to-start\" />;").is_empty());
    }

    #[test]
    fn theme_token_example_holds() {
        assert!(check("const a = <p className=\"bg-[var(--accent)]\" />;").is_empty());
        assert_eq!(check("const a = <p className=\"bg-red-500\" />;").len(), 1);
    }

    #[test]
    fn expression_class_names_are_scanned() {
        let code = "const a = <p className={cn('text-red-600', active && 'font-bold')} />;";
        assert_eq!(check(code).len(), 1);
    }

    #[test]
    fn variant_prefixed_colours_need_dark() {
        assert_eq!(check("const a = <a className=\"hover:bg-blue-600\" />;").len(), 1);
        assert!(check("const a = <a className=\"hover:bg-blue-600 dark:hover:bg-blue-400\" />;").is_empty());
    }
}
