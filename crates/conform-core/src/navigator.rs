//! Read-only structural queries over a parsed file.
//!
//! Nodes are identified positionally by their span. [`NodeIndex`] flattens the
//! tree into `(kind, span)` pairs in pre-order so that "all descendants of kind
//! K" and "nearest ancestor of kind K" become span containment queries.

use swc_common::Span;
use swc_ecma_ast::{
    ArrowExpr, CallExpr, Class, Decl, DefaultDecl, Expr, Function, ImportDecl, JSXAttr,
    JSXAttrName, JSXAttrOrSpread, JSXAttrValue, JSXElement, JSXElementChild, JSXElementName,
    JSXExpr, JSXMemberExpr, JSXObject, JSXOpeningElement, Module, ModuleDecl, ModuleItem, Pat,
    Stmt, VarDecl,
};
use swc_ecma_visit::{Visit, VisitWith};

use crate::parser::SourceFile;
use crate::visitor::VisitorContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Function,
    Arrow,
    Class,
    VarDecl,
    CallExpr,
    JsxElement,
    JsxAttr,
    ImportDecl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeRef {
    pub kind: NodeKind,
    pub span: Span,
}

impl NodeRef {
    fn contains(&self, span: Span) -> bool {
        self.span.lo <= span.lo && span.hi <= self.span.hi && self.span != span
    }
}

#[derive(Debug, Default)]
pub struct NodeIndex {
    nodes: Vec<NodeRef>,
}

impl NodeIndex {
    pub fn build(file: &SourceFile) -> Self {
        let mut collector = NodeCollector { nodes: Vec::new() };
        if let Some(module) = file.module() {
            module.visit_with(&mut collector);
        }
        Self {
            nodes: collector.nodes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn descendants(&self, kind: NodeKind) -> impl Iterator<Item = &NodeRef> + '_ {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    pub fn descendants_within(
        &self,
        span: Span,
        kind: NodeKind,
    ) -> impl Iterator<Item = &NodeRef> + '_ {
        self.nodes.iter().filter(move |node| {
            node.kind == kind
                && span.lo <= node.span.lo
                && node.span.hi <= span.hi
                && node.span != span
        })
    }

    pub fn nearest_ancestor(&self, span: Span, kind: NodeKind) -> Option<&NodeRef> {
        self.nodes
            .iter()
            .filter(|node| node.kind == kind && node.contains(span))
            .max_by_key(|node| (node.span.lo, std::cmp::Reverse(node.span.hi)))
    }
}

struct NodeCollector {
    nodes: Vec<NodeRef>,
}

impl NodeCollector {
    fn push(&mut self, kind: NodeKind, span: Span) {
        self.nodes.push(NodeRef { kind, span });
    }
}

impl Visit for NodeCollector {
    fn visit_function(&mut self, node: &Function) {
        self.push(NodeKind::Function, node.span);
        node.visit_children_with(self);
    }

    fn visit_arrow_expr(&mut self, node: &ArrowExpr) {
        self.push(NodeKind::Arrow, node.span);
        node.visit_children_with(self);
    }

    fn visit_class(&mut self, node: &Class) {
        self.push(NodeKind::Class, node.span);
        node.visit_children_with(self);
    }

    fn visit_var_decl(&mut self, node: &VarDecl) {
        self.push(NodeKind::VarDecl, node.span);
        node.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, node: &CallExpr) {
        self.push(NodeKind::CallExpr, node.span);
        node.visit_children_with(self);
    }

    fn visit_jsx_element(&mut self, node: &JSXElement) {
        self.push(NodeKind::JsxElement, node.span);
        node.visit_children_with(self);
    }

    fn visit_jsx_attr(&mut self, node: &JSXAttr) {
        self.push(NodeKind::JsxAttr, node.span);
        node.visit_children_with(self);
    }

    fn visit_import_decl(&mut self, node: &ImportDecl) {
        self.push(NodeKind::ImportDecl, node.span);
        node.visit_children_with(self);
    }
}

pub fn jsx_element_name(name: &JSXElementName) -> String {
    match name {
        JSXElementName::Ident(ident) => ident.sym.to_string(),
        JSXElementName::JSXMemberExpr(member) => jsx_member_name(member),
        JSXElementName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

fn jsx_member_name(member: &JSXMemberExpr) -> String {
    let object = match &member.obj {
        JSXObject::Ident(ident) => ident.sym.to_string(),
        JSXObject::JSXMemberExpr(inner) => jsx_member_name(inner),
    };
    format!("{}.{}", object, member.prop.sym)
}

pub fn jsx_attr_name(attr: &JSXAttr) -> String {
    match &attr.name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

pub fn jsx_attrs(opening: &JSXOpeningElement) -> impl Iterator<Item = &JSXAttr> {
    opening.attrs.iter().filter_map(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) => Some(attr),
        JSXAttrOrSpread::SpreadElement(_) => None,
    })
}

pub fn find_jsx_attr<'a>(opening: &'a JSXOpeningElement, name: &str) -> Option<&'a JSXAttr> {
    jsx_attrs(opening).find(|attr| jsx_attr_name(attr) == name)
}

pub fn has_jsx_attr(opening: &JSXOpeningElement, name: &str) -> bool {
    find_jsx_attr(opening, name).is_some()
}

/// Source text of an attribute's initializer, e.g. `"bg-red-500"` or
/// `{{ color: 'red' }}`. `None` for valueless attributes like `fill`.
pub fn jsx_attr_string_value<'a>(attr: &JSXAttr, ctx: &VisitorContext<'a>) -> Option<&'a str> {
    attr.value.as_ref()?;
    let text = ctx.get_source_text(attr.span)?;
    text.split_once('=').map(|(_, value)| value.trim())
}

/// Expression inside an attribute's `{...}` container, parentheses removed.
pub fn jsx_attr_expr(attr: &JSXAttr) -> Option<&Expr> {
    let Some(JSXAttrValue::JSXExprContainer(container)) = &attr.value else {
        return None;
    };
    let JSXExpr::Expr(expr) = &container.expr else {
        return None;
    };

    let mut expr = &**expr;
    while let Expr::Paren(paren) = expr {
        expr = &paren.expr;
    }
    Some(expr)
}

/// Direct children that render visible content: non-blank text or a
/// non-empty expression container.
pub fn has_text_child(element: &JSXElement) -> bool {
    element.children.iter().any(|child| match child {
        JSXElementChild::JSXText(text) => !text.value.trim().is_empty(),
        JSXElementChild::JSXExprContainer(container) => {
            !matches!(container.expr, JSXExpr::JSXEmptyExpr(_))
        }
        _ => false,
    })
}

/// A top-level function or arrow-function component.
#[derive(Debug)]
pub struct ComponentDecl<'a> {
    pub name: String,
    pub span: Span,
    pub params: Vec<&'a Pat>,
}

impl ComponentDecl<'_> {
    pub fn first_param(&self) -> Option<&Pat> {
        self.params.first().copied()
    }
}

/// Top-level functions and arrow functions that look like components: the
/// binding name starts with an uppercase letter, or the function is an
/// anonymous default export.
pub fn top_level_components(module: &Module) -> Vec<ComponentDecl<'_>> {
    let mut components = Vec::new();

    for item in &module.body {
        match item {
            ModuleItem::Stmt(Stmt::Decl(decl)) => collect_decl(decl, &mut components),
            ModuleItem::ModuleDecl(ModuleDecl::ExportDecl(export)) => {
                collect_decl(&export.decl, &mut components)
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => {
                if let DefaultDecl::Fn(fn_expr) = &export.decl {
                    let name = fn_expr
                        .ident
                        .as_ref()
                        .map(|ident| ident.sym.to_string())
                        .unwrap_or_else(|| "default".to_string());
                    components.push(function_component(name, &fn_expr.function));
                }
            }
            ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) => {
                if let Some(component) = expr_component("default".to_string(), &export.expr) {
                    components.push(component);
                }
            }
            _ => {}
        }
    }

    components
        .into_iter()
        .filter(|component| {
            component.name == "default"
                || component.name.starts_with(|c: char| c.is_ascii_uppercase())
        })
        .collect()
}

fn collect_decl<'a>(decl: &'a Decl, components: &mut Vec<ComponentDecl<'a>>) {
    match decl {
        Decl::Fn(fn_decl) => {
            components.push(function_component(
                fn_decl.ident.sym.to_string(),
                &fn_decl.function,
            ));
        }
        Decl::Var(var_decl) => {
            for declarator in &var_decl.decls {
                let (Pat::Ident(binding), Some(init)) = (&declarator.name, &declarator.init) else {
                    continue;
                };
                if let Some(component) = expr_component(binding.id.sym.to_string(), init) {
                    components.push(component);
                }
            }
        }
        _ => {}
    }
}

fn function_component(name: String, function: &Function) -> ComponentDecl<'_> {
    ComponentDecl {
        name,
        span: function.span,
        params: function.params.iter().map(|param| &param.pat).collect(),
    }
}

fn expr_component(name: String, expr: &Expr) -> Option<ComponentDecl<'_>> {
    match expr {
        Expr::Arrow(arrow) => Some(ComponentDecl {
            name,
            span: arrow.span,
            params: arrow.params.iter().collect(),
        }),
        Expr::Fn(fn_expr) => Some(function_component(name, &fn_expr.function)),
        Expr::Paren(paren) => expr_component(name, &paren.expr),
        _ => None,
    }
}

/// Whether a parameter pattern carries an explicit type annotation.
pub fn pat_has_type_annotation(pat: &Pat) -> bool {
    match pat {
        Pat::Ident(binding) => binding.type_ann.is_some(),
        Pat::Object(object) => object.type_ann.is_some(),
        Pat::Array(array) => array.type_ann.is_some(),
        Pat::Rest(rest) => rest.type_ann.is_some(),
        Pat::Assign(assign) => pat_has_type_annotation(&assign.left),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(code: &str) -> (SourceFile, NodeIndex) {
        let file = SourceFile::from_source("test.tsx", code);
        let index = NodeIndex::build(&file);
        (file, index)
    }

    #[test]
    fn empty_tree_yields_nothing() {
        let (_, index) = index("");

        assert!(index.is_empty());
        assert_eq!(index.descendants(NodeKind::JsxElement).count(), 0);
    }

    #[test]
    fn unparsable_file_yields_nothing() {
        let (file, index) = index("export function (");

        assert!(file.module().is_none());
        assert!(index.is_empty());
    }

    #[test]
    fn descendants_by_kind() {
        let (_, index) = index("const A = () => <div><span>a</span><img /></div>;\nfoo(bar());");

        assert_eq!(index.descendants(NodeKind::JsxElement).count(), 3);
        assert_eq!(index.descendants(NodeKind::CallExpr).count(), 2);
        assert_eq!(index.descendants(NodeKind::Arrow).count(), 1);
    }

    #[test]
    fn nearest_ancestor_picks_innermost() {
        let code = "function Outer() { const inner = () => { useState(); }; }";
        let (_, index) = index(code);
        let call = *index.descendants(NodeKind::CallExpr).next().unwrap();

        let arrow = index.nearest_ancestor(call.span, NodeKind::Arrow).unwrap();
        let function = index.nearest_ancestor(call.span, NodeKind::Function).unwrap();

        assert!(function.span.lo < arrow.span.lo);
        assert!(index.nearest_ancestor(call.span, NodeKind::Class).is_none());
    }

    #[test]
    fn descendants_within_excludes_outside_nodes() {
        let code = "const A = () => <ul><li>a</li></ul>;\nconst B = () => <p>b</p>;";
        let (_, index) = index(code);
        let first_arrow = *index.descendants(NodeKind::Arrow).next().unwrap();

        let inside = index
            .descendants_within(first_arrow.span, NodeKind::JsxElement)
            .count();

        assert_eq!(inside, 2);
    }

    #[test]
    fn top_level_components_are_detected() {
        let code = r#"
export function Header() { return <h1 />; }
const Footer = ({ year }: { year: number }) => <p>{year}</p>;
function helper(x) { return x; }
export default function () { return null; }
"#;
        let file = SourceFile::from_source("test.tsx", code);
        let components = top_level_components(file.module().unwrap());
        let names: Vec<_> = components.iter().map(|c| c.name.as_str()).collect();

        assert_eq!(names, vec!["Header", "Footer", "default"]);
        assert!(pat_has_type_annotation(components[1].first_param().unwrap()));
        assert!(components[0].first_param().is_none());
    }

    #[test]
    fn jsx_attribute_helpers() {
        let code = r#"const A = () => <button aria-label="Close" className="p-2" disabled>x</button>;"#;
        let file = SourceFile::from_source("test.tsx", code);
        let ctx = VisitorContext::new(&file);

        struct Grab<'a> {
            out: Vec<(String, Option<&'a str>)>,
            ctx: &'a VisitorContext<'a>,
        }
        impl Visit for Grab<'_> {
            fn visit_jsx_attr(&mut self, attr: &JSXAttr) {
                self.out
                    .push((jsx_attr_name(attr), jsx_attr_string_value(attr, self.ctx)));
            }
        }

        let mut grab = Grab {
            out: Vec::new(),
            ctx: &ctx,
        };
        file.module().unwrap().visit_with(&mut grab);

        assert_eq!(
            grab.out,
            vec![
                ("aria-label".to_string(), Some("\"Close\"")),
                ("className".to_string(), Some("\"p-2\"")),
                ("disabled".to_string(), None),
            ]
        );
    }
}
