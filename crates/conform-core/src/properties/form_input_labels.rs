//! form-input-labels property (P008): form controls must be labelled

use crate::declare_property;
use crate::navigator::has_jsx_attr;
use crate::parser::SourceFile;
use crate::properties::helpers::{element_line, element_name, for_each_jsx_element};
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

const FORM_CONTROLS: &[&str] = &["input", "textarea", "select", "Input", "Textarea", "Select"];

declare_property!(
    FormInputLabels,
    id = "P008",
    name = "form-input-labels",
    description = "Form controls must be associated with a label",
    category = Accessibility,
    pattern = "{app,components}/**/*.tsx",
    rule = "input, textarea and select elements (and the Input, Textarea and Select components) need an aria-label or an id a <label htmlFor> can point at.",
    examples = "// Bad\n<input type=\"email\" />\n\n// Good\n<label htmlFor=\"email\">Email</label>\n<input id=\"email\" type=\"email\" />"
);

impl Property for FormInputLabels {
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
            if !FORM_CONTROLS.contains(&name.as_str()) {
                return;
            }
            if has_jsx_attr(&element.opening, "aria-label")
                || has_jsx_attr(&element.opening, "id")
            {
                return;
            }

            violations.push(
                ctx.violation(
                    element_line(element, &visitor_ctx),
                    format!("<{}> needs an aria-label or an id referenced by a <label>", name),
                )
                .with_name(name),
            );
        });

        sort_violations(&mut violations);
        violations
    }
}
