//! interactive-aria-labels property (P007): interactive elements need a name

use crate::declare_property;
use crate::navigator::{has_jsx_attr, has_text_child};
use crate::parser::SourceFile;
use crate::properties::helpers::{element_line, element_name, for_each_jsx_element};
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

const INTERACTIVE_ELEMENTS: &[&str] = &["button", "a", "input"];
const NAMING_ATTRS: &[&str] = &["aria-label", "aria-labelledby", "id"];

declare_property!(
    InteractiveAriaLabels,
    id = "P007",
    name = "interactive-aria-labels",
    description = "Buttons, links and inputs must have an accessible name",
    category = Accessibility,
    pattern = "{app,components}/**/*.tsx",
    rule = "A <button>, <a> or <input> element needs an aria-label, an aria-labelledby, visible text content or an id.",
    examples = "// Bad\n<button onClick={close}><XIcon /></button>\n\n// Good\n<button onClick={close} aria-label=\"Close dialog\"><XIcon /></button>"
);

impl Property for InteractiveAriaLabels {
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
            let name = element_name(element);
            if !INTERACTIVE_ELEMENTS.contains(&name.as_str()) {
                return;
            }

            let named = NAMING_ATTRS
                .iter()
                .any(|attr| has_jsx_attr(&element.opening, attr))
                || has_text_child(element);
            if named {
                return;
            }

            violations.push(
                ctx.violation(
                    element_line(element, &visitor_ctx),
                    format!("<{}> has no accessible name (aria-label, aria-labelledby, text or id)", name),
                )
                .with_name(name),
            );
        });

        sort_violations(&mut violations);
        violations
    }
}
