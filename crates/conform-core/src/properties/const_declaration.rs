//! const-declaration property (P013): `let` bindings that never change

use crate::declare_property;
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::semantic::{BindingKind, SemanticModel};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

declare_property!(
    ConstDeclaration,
    id = "P013",
    name = "const-declaration",
    description = "Bindings that are never reassigned must be declared with const",
    category = Hygiene,
    pattern = "{app,components,lib}/**/*.{tsx,ts}",
    rule = "A let binding that is never the target of an assignment or an increment/decrement must be const.",
    examples = "// Bad\nlet total = items.length;\n\n// Good\nconst total = items.length;\nlet count = 0;\ncount += 1;"
);

impl Property for ConstDeclaration {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let model = SemanticModel::build(module);
        let visitor_ctx = VisitorContext::new(file);

        let mut violations: Vec<Violation> = model
            .bindings
            .iter()
            .filter(|binding| binding.kind == BindingKind::Let && !binding.is_reassigned())
            .map(|binding| {
                ctx.violation(
                    visitor_ctx.line(binding.span),
                    format!("'{}' is never reassigned; use const instead", binding.name),
                )
                .with_name(binding.name.as_str())
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
        check_source(&ConstDeclaration::new(), "lib/totals.ts", code)
    }

    #[test]
    fn never_reassigned_let_violates() {
        let violations = check("export function total(items: number[]) {\n  let sum = items.length;\n  return sum;\n}\n");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].message, "'sum' is never reassigned; use const instead");
    }

    #[test]
    fn assignment_and_updates_count_as_reassignment() {
        let code = r#"let a = 1;
a = 2;
let b = 0;
b += 1;
let c = 0;
c++;
let d = 0;
--d;
export { a, b, c, d };
"#;
        assert!(check(code).is_empty());
    }

    #[test]
    fn destructuring_assignment_counts() {
        assert!(check("let x = 1, y = 2;\n[x, y] = [y, x];\nexport { x, y };").is_empty());
    }

    #[test]
    fn loop_counters_are_reassigned() {
        assert!(check("for (let i = 0; i < 3; i++) { console.log(i); }").is_empty());
    }

    #[test]
    fn shadowed_assignment_does_not_clear_outer_binding() {
        let code = r#"let value = 1;
function update() {
  let value = 0;
  value = 2;
  return value;
}
export { value, update };
"#;
        let violations = check(code);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 1);
    }

    #[test]
    fn const_and_var_are_ignored() {
        assert!(check("const a = 1;\nvar b = 2;\nexport { a, b };").is_empty());
    }
}
