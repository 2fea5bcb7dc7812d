//! Visitor pattern for AST traversal.
//!
//! Provides a uniform way to traverse AST nodes with context information.

mod context;
mod traits;

pub use context::VisitorContext;
pub use traits::AstVisitor;

use std::ops::ControlFlow;

use swc_ecma_ast::Module;
use swc_ecma_visit::{Visit, VisitWith};

struct Walker<'a, V: AstVisitor> {
    visitor: &'a mut V,
    ctx: &'a VisitorContext<'a>,
    stopped: bool,
}

macro_rules! forward {
    ($method:ident, $node:ty) => {
        fn $method(&mut self, node: &$node) {
            if self.stopped {
                return;
            }
            if let ControlFlow::Break(()) = self.visitor.$method(node, self.ctx) {
                self.stopped = true;
                return;
            }
            node.visit_children_with(self);
        }
    };
}

impl<V: AstVisitor> Visit for Walker<'_, V> {
    forward!(visit_function, swc_ecma_ast::Function);
    forward!(visit_fn_decl, swc_ecma_ast::FnDecl);
    forward!(visit_arrow_expr, swc_ecma_ast::ArrowExpr);
    forward!(visit_var_decl, swc_ecma_ast::VarDecl);
    forward!(visit_call_expr, swc_ecma_ast::CallExpr);
    forward!(visit_import_decl, swc_ecma_ast::ImportDecl);
    forward!(visit_jsx_element, swc_ecma_ast::JSXElement);
    forward!(visit_jsx_attr, swc_ecma_ast::JSXAttr);
}

pub fn walk_ast<V: AstVisitor>(module: &Module, visitor: &mut V, ctx: &VisitorContext) {
    let mut walker = Walker {
        visitor,
        ctx,
        stopped: false,
    };
    module.visit_with(&mut walker);
}
