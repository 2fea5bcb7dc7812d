//! state-type-annotation property (P005): `useState` must be typed or seeded

use std::ops::ControlFlow;

use swc_ecma_ast::{CallExpr, Callee, Expr, MemberProp};

use crate::declare_property;
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::{AstVisitor, VisitorContext, walk_ast};

declare_property!(
    StateTypeAnnotation,
    id = "P005",
    name = "state-type-annotation",
    description = "useState calls must declare a type or an initial value",
    category = Typing,
    pattern = "{app,components,hooks,lib}/**/*.{tsx,ts}",
    rule = "A useState call with neither a type argument nor an initial value infers `undefined` and is a violation.",
    examples = "// Bad\nconst [user, setUser] = useState();\n\n// Good\nconst [user, setUser] = useState<User | null>(null);\nconst [count, setCount] = useState(0);"
);

fn is_use_state(callee: &Callee) -> bool {
    let Callee::Expr(expr) = callee else {
        return false;
    };
    match expr.as_ref() {
        Expr::Ident(ident) => ident.sym.as_ref() == "useState",
        Expr::Member(member) => {
            matches!(&member.prop, MemberProp::Ident(prop) if prop.sym.as_ref() == "useState")
        }
        _ => false,
    }
}

struct UntypedStateFinder {
    lines: Vec<usize>,
}

impl AstVisitor for UntypedStateFinder {
    fn visit_call_expr(&mut self, node: &CallExpr, ctx: &VisitorContext) -> ControlFlow<()> {
        if is_use_state(&node.callee) && node.type_args.is_none() && node.args.is_empty() {
            self.lines.push(ctx.line(node.span));
        }
        ControlFlow::Continue(())
    }
}

impl Property for StateTypeAnnotation {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let visitor_ctx = VisitorContext::new(file);
        let mut finder = UntypedStateFinder { lines: Vec::new() };
        walk_ast(module, &mut finder, &visitor_ctx);

        let mut violations: Vec<Violation> = finder
            .lines
            .into_iter()
            .map(|line| {
                ctx.violation(
                    line,
                    "useState() has neither a type argument nor an initial value",
                )
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
        check_source(&StateTypeAnnotation::new(), "hooks/useToggle.ts", code)
    }

    #[test]
    fn bare_use_state_violates() {
        let code = "import { useState } from 'react';\n\nexport function useUser() {\n  const [user, setUser] = useState();\n  return { user, setUser };\n}\n";
        let violations = check(code);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 4);
        assert_eq!(violations[0].file, "hooks/useToggle.ts");
    }

    #[test]
    fn type_argument_holds() {
        assert!(check("const [n, setN] = useState<number>();").is_empty());
    }

    #[test]
    fn initial_value_holds() {
        assert!(check("const [n, setN] = useState(0);").is_empty());
    }

    #[test]
    fn namespaced_call_is_checked() {
        let code = "import React from 'react';\nconst [a, setA] = React.useState();\n";
        assert_eq!(check(code).len(), 1);
    }

    #[test]
    fn other_hooks_are_ignored() {
        assert!(check("const ref = useRef();\nconst ctx = useContext(Theme);").is_empty());
    }
}
