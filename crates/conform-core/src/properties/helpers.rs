//! Shared helper functions for property implementations.

use std::ops::ControlFlow;

use swc_ecma_ast::{JSXElement, Module};

use crate::navigator::jsx_element_name;
use crate::visitor::{AstVisitor, VisitorContext, walk_ast};

struct EachJsxElement<F> {
    f: F,
}

impl<F: FnMut(&JSXElement)> AstVisitor for EachJsxElement<F> {
    fn visit_jsx_element(&mut self, node: &JSXElement, _ctx: &VisitorContext) -> ControlFlow<()> {
        (self.f)(node);
        ControlFlow::Continue(())
    }
}

/// Calls `f` for every JSX element in the module, outermost first.
pub fn for_each_jsx_element(module: &Module, ctx: &VisitorContext, f: impl FnMut(&JSXElement)) {
    let mut visitor = EachJsxElement { f };
    walk_ast(module, &mut visitor, ctx);
}

pub fn element_name(element: &JSXElement) -> String {
    jsx_element_name(&element.opening.name)
}

/// 1-based line of the element's opening tag.
pub fn element_line(element: &JSXElement, ctx: &VisitorContext) -> usize {
    ctx.line(element.opening.span)
}
