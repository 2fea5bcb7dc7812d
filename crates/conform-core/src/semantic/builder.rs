//! Walks a module once, declaring bindings into their scopes and recording
//! every identifier reference for resolution after the walk.

use std::mem;

use swc_common::Span;
use swc_ecma_ast::{
    ArrayLit, ArrayPat, ArrowExpr, AssignExpr, AssignTarget, AssignTargetPat, BlockStmt,
    BlockStmtOrExpr, CallExpr, CatchClause, Class, ClassMethod, Constructor, Decl, Expr, ForHead,
    ForInStmt, ForOfStmt, ForStmt, Function, Ident, ImportDecl, ImportSpecifier, JSXAttr,
    JSXAttrValue, JSXElement, JSXElementName, JSXExpr, JSXFragment, JSXObject, MethodKind, Module,
    ModuleDecl, ModuleExportName, ModuleItem, NamedExport, NewExpr, ObjectLit, ObjectPat,
    ObjectPatProp, ParamOrTsParamProp, Pat, PrivateMethod, Prop, PropOrSpread, ReturnStmt,
    SimpleAssignTarget, TsEntityName, TsMethodSignature, TsModuleDecl, TsParamPropParam,
    TsPropertySignature, UpdateExpr, VarDecl, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};

use super::scope::{ScopeId, ScopeKind, ScopeTree};
use super::symbols::{Access, BindingId, BindingKind, BindingTable, Reference};
use super::{ImplicitAny, ImplicitAnyKind, ImportGroup, SemanticModel};
use crate::navigator::pat_has_type_annotation;

pub struct ScopeBuilder {
    tree: ScopeTree,
    bindings: BindingTable,
    current: ScopeId,
    references: Vec<Reference>,
    implicit_any: Vec<ImplicitAny>,
    import_groups: Vec<ImportGroup>,
    /// Set while visiting an expression whose type flows in from its
    /// position (call argument, return value, ...).
    contextual: bool,
    has_jsx: bool,
}

impl ScopeBuilder {
    pub fn build(module: &Module) -> SemanticModel {
        let mut tree = ScopeTree::new();
        let root = tree.create_scope(ScopeKind::Module, None, module.span);

        let mut builder = Self {
            tree,
            bindings: BindingTable::new(),
            current: root,
            references: Vec::new(),
            implicit_any: Vec::new(),
            import_groups: Vec::new(),
            contextual: false,
            has_jsx: false,
        };
        module.visit_children_with(&mut builder);

        let unresolved = builder
            .bindings
            .resolve(&builder.references, &builder.tree);

        SemanticModel {
            is_module: module
                .body
                .iter()
                .any(|item| matches!(item, ModuleItem::ModuleDecl(_))),
            has_jsx: builder.has_jsx,
            scope_tree: builder.tree,
            bindings: builder.bindings,
            unresolved,
            implicit_any: builder.implicit_any,
            import_groups: builder.import_groups,
        }
    }

    fn with_scope(&mut self, kind: ScopeKind, span: Span, f: impl FnOnce(&mut Self)) {
        let parent = self.current;
        self.current = self.tree.create_scope(kind, Some(parent), span);
        f(self);
        self.current = parent;
    }

    fn declare(
        &mut self,
        ident: &Ident,
        kind: BindingKind,
        exported: bool,
        ambient: bool,
    ) -> BindingId {
        let scope = if kind == BindingKind::Var {
            self.tree.hoisting_scope(self.current)
        } else {
            self.current
        };
        self.bindings
            .declare(&ident.sym, kind, scope, ident.span, exported, ambient)
    }

    fn declare_pat(&mut self, pat: &Pat, kind: BindingKind, exported: bool, ambient: bool) {
        match pat {
            Pat::Ident(binding) => {
                self.declare(&binding.id, kind, exported, ambient);
            }
            Pat::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.declare_pat(elem, kind, exported, ambient);
                }
            }
            Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => {
                            self.declare_pat(&kv.value, kind, exported, ambient)
                        }
                        ObjectPatProp::Assign(assign) => {
                            self.declare(&assign.key.id, kind, exported, ambient);
                        }
                        ObjectPatProp::Rest(rest) => {
                            self.declare_pat(&rest.arg, kind, exported, ambient)
                        }
                    }
                }
            }
            Pat::Assign(assign) => self.declare_pat(&assign.left, kind, exported, ambient),
            Pat::Rest(rest) => self.declare_pat(&rest.arg, kind, exported, ambient),
            Pat::Expr(_) | Pat::Invalid(_) => {}
        }
    }

    fn reference(&mut self, ident: &Ident, access: Access) {
        self.references.push(Reference {
            name: ident.sym.to_string(),
            scope: self.current,
            access,
            span: ident.span,
        });
    }

    fn declare_decl(&mut self, decl: &Decl, exported: bool) {
        match decl {
            Decl::Var(var) => self.var_decl(var, exported),
            Decl::Fn(fn_decl) => {
                let id = self.declare(
                    &fn_decl.ident,
                    BindingKind::Function,
                    exported,
                    fn_decl.declare || fn_decl.function.body.is_none(),
                );
                if fn_decl.function.body.is_some() {
                    self.bindings.set_body(id, fn_decl.function.span);
                }
                self.function(&fn_decl.function, true);
            }
            Decl::Class(class_decl) => {
                let id = self.declare(
                    &class_decl.ident,
                    BindingKind::Class,
                    exported,
                    class_decl.declare,
                );
                self.bindings.set_body(id, class_decl.class.span);
                class_decl.class.visit_with(self);
            }
            Decl::TsInterface(interface) => {
                self.declare(&interface.id, BindingKind::Type, exported, interface.declare);
                interface.visit_children_with(self);
            }
            Decl::TsTypeAlias(alias) => {
                self.declare(&alias.id, BindingKind::Type, exported, alias.declare);
                alias.visit_children_with(self);
            }
            Decl::TsEnum(ts_enum) => {
                self.declare(&ts_enum.id, BindingKind::Enum, exported, ts_enum.declare);
                ts_enum.visit_children_with(self);
            }
            Decl::TsModule(_) => {}
            other => other.visit_children_with(self),
        }
    }

    fn var_decl(&mut self, var: &VarDecl, exported: bool) {
        let kind = match var.kind {
            VarDeclKind::Var => BindingKind::Var,
            VarDeclKind::Let => BindingKind::Let,
            VarDeclKind::Const => BindingKind::Const,
        };

        for declarator in &var.decls {
            self.declare_pat(&declarator.name, kind, exported, var.declare);
            declarator.name.visit_with(self);

            if let Some(init) = &declarator.init {
                self.contextual = pat_has_type_annotation(&declarator.name);
                init.visit_with(self);
            }
        }
    }

    /// Declares parameters, reports untyped ones when `check_params`, and
    /// walks the body in a fresh function scope.
    fn function(&mut self, function: &Function, check_params: bool) {
        let ambient = function.body.is_none();

        self.with_scope(ScopeKind::Function, function.span, |this| {
            for param in &function.params {
                this.declare_pat(&param.pat, BindingKind::Parameter, false, ambient);
            }
            if check_params {
                this.check_params(function.params.iter().map(|param| &param.pat));
            }
            for param in &function.params {
                param.visit_with(this);
            }
            function.type_params.visit_with(this);
            function.return_type.visit_with(this);
            if let Some(body) = &function.body {
                for stmt in &body.stmts {
                    stmt.visit_with(this);
                }
            }
        });
    }

    fn check_params<'p>(&mut self, params: impl Iterator<Item = &'p Pat>) {
        for pat in params {
            match pat {
                Pat::Ident(binding) if binding.type_ann.is_none() && &*binding.id.sym != "this" => {
                    self.implicit_any.push(ImplicitAny {
                        kind: ImplicitAnyKind::Parameter,
                        name: binding.id.sym.to_string(),
                        span: binding.id.span,
                    });
                }
                Pat::Object(object) if object.type_ann.is_none() => {
                    self.untyped_object_elements(object);
                }
                Pat::Array(array) if array.type_ann.is_none() => {
                    self.untyped_array_elements(array);
                }
                Pat::Rest(rest) if rest.type_ann.is_none() => {
                    if let Pat::Ident(binding) = &*rest.arg {
                        self.implicit_any.push(ImplicitAny {
                            kind: ImplicitAnyKind::RestParameter,
                            name: binding.id.sym.to_string(),
                            span: binding.id.span,
                        });
                    }
                }
                _ => {}
            }
        }
    }

    fn untyped_binding_element(&mut self, ident: &Ident) {
        self.implicit_any.push(ImplicitAny {
            kind: ImplicitAnyKind::BindingElement,
            name: ident.sym.to_string(),
            span: ident.span,
        });
    }

    fn untyped_object_elements(&mut self, object: &ObjectPat) {
        for prop in &object.props {
            match prop {
                ObjectPatProp::KeyValue(kv) => self.untyped_element(&kv.value),
                ObjectPatProp::Assign(assign) if assign.value.is_none() => {
                    self.untyped_binding_element(&assign.key.id);
                }
                _ => {}
            }
        }
    }

    fn untyped_array_elements(&mut self, array: &ArrayPat) {
        for elem in array.elems.iter().flatten() {
            self.untyped_element(elem);
        }
    }

    fn untyped_element(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(binding) => self.untyped_binding_element(&binding.id),
            Pat::Object(object) => self.untyped_object_elements(object),
            Pat::Array(array) => self.untyped_array_elements(array),
            _ => {}
        }
    }

    fn assign_pat(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(binding) => self.reference(&binding.id, Access::Write),
            Pat::Expr(expr) => match &**expr {
                Expr::Ident(ident) => self.reference(ident, Access::Write),
                other => other.visit_with(self),
            },
            Pat::Array(array) => self.assign_array(array),
            Pat::Object(object) => self.assign_object(object),
            Pat::Assign(assign) => {
                self.assign_pat(&assign.left);
                assign.right.visit_with(self);
            }
            Pat::Rest(rest) => self.assign_pat(&rest.arg),
            Pat::Invalid(_) => {}
        }
    }

    fn assign_array(&mut self, array: &ArrayPat) {
        for elem in array.elems.iter().flatten() {
            self.assign_pat(elem);
        }
    }

    fn assign_object(&mut self, object: &ObjectPat) {
        for prop in &object.props {
            match prop {
                ObjectPatProp::KeyValue(kv) => {
                    kv.key.visit_with(self);
                    self.assign_pat(&kv.value);
                }
                ObjectPatProp::Assign(assign) => {
                    self.reference(&assign.key.id, Access::Write);
                    assign.value.visit_with(self);
                }
                ObjectPatProp::Rest(rest) => self.assign_pat(&rest.arg),
            }
        }
    }
}

impl Visit for ScopeBuilder {
    fn visit_import_decl(&mut self, import: &ImportDecl) {
        let mut group = Vec::with_capacity(import.specifiers.len());

        for specifier in &import.specifiers {
            let (local, type_only) = match specifier {
                ImportSpecifier::Named(named) => (&named.local, named.is_type_only),
                ImportSpecifier::Default(default) => (&default.local, false),
                ImportSpecifier::Namespace(namespace) => (&namespace.local, false),
            };
            let kind = BindingKind::Import {
                type_only: import.type_only || type_only,
            };
            group.push(self.declare(local, kind, false, false));
        }

        if !group.is_empty() {
            self.import_groups.push(ImportGroup {
                span: import.span,
                bindings: group,
            });
        }
    }

    fn visit_named_export(&mut self, export: &NamedExport) {
        if export.src.is_some() {
            return;
        }
        for specifier in &export.specifiers {
            if let swc_ecma_ast::ExportSpecifier::Named(named) = specifier {
                if let ModuleExportName::Ident(ident) = &named.orig {
                    self.reference(ident, Access::Export);
                }
            }
        }
    }

    fn visit_module_decl(&mut self, decl: &ModuleDecl) {
        match decl {
            ModuleDecl::ExportDecl(export) => self.declare_decl(&export.decl, true),
            other => other.visit_children_with(self),
        }
    }

    fn visit_decl(&mut self, decl: &Decl) {
        self.declare_decl(decl, false);
    }

    fn visit_var_decl(&mut self, var: &VarDecl) {
        self.var_decl(var, false);
    }

    fn visit_ts_module_decl(&mut self, _: &TsModuleDecl) {}

    fn visit_function(&mut self, function: &Function) {
        let contextual = mem::take(&mut self.contextual);
        self.function(function, !contextual);
    }

    fn visit_arrow_expr(&mut self, arrow: &ArrowExpr) {
        let contextual = mem::take(&mut self.contextual);

        self.with_scope(ScopeKind::ArrowFunction, arrow.span, |this| {
            for param in &arrow.params {
                this.declare_pat(param, BindingKind::Parameter, false, false);
            }
            if !contextual {
                this.check_params(arrow.params.iter());
            }
            for param in &arrow.params {
                param.visit_with(this);
            }
            arrow.type_params.visit_with(this);
            arrow.return_type.visit_with(this);
            match &*arrow.body {
                BlockStmtOrExpr::BlockStmt(body) => {
                    for stmt in &body.stmts {
                        stmt.visit_with(this);
                    }
                }
                BlockStmtOrExpr::Expr(expr) => {
                    this.contextual = true;
                    expr.visit_with(this);
                }
            }
        });
    }

    fn visit_class(&mut self, class: &Class) {
        self.contextual = false;
        self.with_scope(ScopeKind::Class, class.span, |this| {
            class.visit_children_with(this);
        });
    }

    fn visit_class_method(&mut self, method: &ClassMethod) {
        method.key.visit_with(self);
        for decorator in &method.function.decorators {
            decorator.visit_with(self);
        }
        self.function(&method.function, method.kind != MethodKind::Setter);
    }

    fn visit_private_method(&mut self, method: &PrivateMethod) {
        self.function(&method.function, method.kind != MethodKind::Setter);
    }

    fn visit_constructor(&mut self, ctor: &Constructor) {
        self.with_scope(ScopeKind::Function, ctor.span, |this| {
            let ambient = ctor.body.is_none();
            let mut plain_params = Vec::new();

            for param in &ctor.params {
                match param {
                    ParamOrTsParamProp::Param(param) => {
                        this.declare_pat(&param.pat, BindingKind::Parameter, false, ambient);
                        plain_params.push(&param.pat);
                    }
                    ParamOrTsParamProp::TsParamProp(prop) => {
                        if let TsParamPropParam::Ident(binding) = &prop.param {
                            if binding.type_ann.is_none() {
                                this.implicit_any.push(ImplicitAny {
                                    kind: ImplicitAnyKind::Parameter,
                                    name: binding.id.sym.to_string(),
                                    span: binding.id.span,
                                });
                            }
                        }
                    }
                }
            }
            this.check_params(plain_params.into_iter());

            ctor.params.visit_with(this);
            if let Some(body) = &ctor.body {
                for stmt in &body.stmts {
                    stmt.visit_with(this);
                }
            }
        });
    }

    fn visit_block_stmt(&mut self, block: &BlockStmt) {
        self.with_scope(ScopeKind::Block, block.span, |this| {
            block.visit_children_with(this);
        });
    }

    fn visit_for_stmt(&mut self, stmt: &ForStmt) {
        self.with_scope(ScopeKind::For, stmt.span, |this| {
            stmt.visit_children_with(this);
        });
    }

    fn visit_for_in_stmt(&mut self, stmt: &ForInStmt) {
        self.with_scope(ScopeKind::For, stmt.span, |this| {
            this.for_head(&stmt.left);
            stmt.right.visit_with(this);
            stmt.body.visit_with(this);
        });
    }

    fn visit_for_of_stmt(&mut self, stmt: &ForOfStmt) {
        self.with_scope(ScopeKind::For, stmt.span, |this| {
            this.for_head(&stmt.left);
            stmt.right.visit_with(this);
            stmt.body.visit_with(this);
        });
    }

    fn visit_catch_clause(&mut self, clause: &CatchClause) {
        self.with_scope(ScopeKind::Catch, clause.span, |this| {
            if let Some(param) = &clause.param {
                this.declare_pat(param, BindingKind::CatchParameter, false, false);
                param.visit_with(this);
            }
            for stmt in &clause.body.stmts {
                stmt.visit_with(this);
            }
        });
    }

    fn visit_expr(&mut self, expr: &Expr) {
        let contextual = mem::take(&mut self.contextual);

        match expr {
            Expr::Ident(ident) => {
                self.reference(ident, Access::Read);
                return;
            }
            Expr::Arrow(_) | Expr::Fn(_) | Expr::Paren(_) => self.contextual = contextual,
            Expr::Object(object) => {
                self.object_lit(object, contextual);
                return;
            }
            Expr::Cond(cond) => {
                cond.test.visit_with(self);
                self.contextual = contextual;
                cond.cons.visit_with(self);
                self.contextual = contextual;
                cond.alt.visit_with(self);
                return;
            }
            Expr::TsAs(_)
            | Expr::TsSatisfies(_)
            | Expr::TsTypeAssertion(_)
            | Expr::TsConstAssertion(_) => self.contextual = true,
            _ => {}
        }

        expr.visit_children_with(self);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        call.callee.visit_with(self);
        call.type_args.visit_with(self);
        for arg in &call.args {
            self.contextual = true;
            arg.expr.visit_with(self);
        }
    }

    fn visit_new_expr(&mut self, new: &NewExpr) {
        new.callee.visit_with(self);
        new.type_args.visit_with(self);
        for arg in new.args.iter().flatten() {
            self.contextual = true;
            arg.expr.visit_with(self);
        }
    }

    fn visit_array_lit(&mut self, array: &ArrayLit) {
        for elem in array.elems.iter().flatten() {
            self.contextual = true;
            elem.expr.visit_with(self);
        }
    }

    fn visit_return_stmt(&mut self, ret: &ReturnStmt) {
        if let Some(arg) = &ret.arg {
            self.contextual = true;
            arg.visit_with(self);
        }
    }

    fn visit_assign_expr(&mut self, assign: &AssignExpr) {
        match &assign.left {
            AssignTarget::Simple(SimpleAssignTarget::Ident(binding)) => {
                self.reference(&binding.id, Access::Write);
            }
            AssignTarget::Simple(other) => other.visit_with(self),
            AssignTarget::Pat(AssignTargetPat::Array(array)) => self.assign_array(array),
            AssignTarget::Pat(AssignTargetPat::Object(object)) => self.assign_object(object),
            AssignTarget::Pat(AssignTargetPat::Invalid(_)) => {}
        }
        assign.right.visit_with(self);
    }

    fn visit_update_expr(&mut self, update: &UpdateExpr) {
        match &*update.arg {
            Expr::Ident(ident) => self.reference(ident, Access::Write),
            other => other.visit_with(self),
        }
    }

    fn visit_jsx_element(&mut self, element: &JSXElement) {
        self.has_jsx = true;
        element.visit_children_with(self);
    }

    fn visit_jsx_fragment(&mut self, fragment: &JSXFragment) {
        self.has_jsx = true;
        fragment.visit_children_with(self);
    }

    fn visit_jsx_element_name(&mut self, name: &JSXElementName) {
        match name {
            JSXElementName::Ident(ident) => {
                // Lowercase names are intrinsic elements, not bindings.
                if ident.sym.starts_with(|c: char| c.is_ascii_uppercase()) {
                    self.reference(ident, Access::Read);
                }
            }
            JSXElementName::JSXMemberExpr(member) => {
                let mut object = &member.obj;
                while let JSXObject::JSXMemberExpr(inner) = object {
                    object = &inner.obj;
                }
                if let JSXObject::Ident(ident) = object {
                    self.reference(ident, Access::Read);
                }
            }
            JSXElementName::JSXNamespacedName(_) => {}
        }
    }

    fn visit_jsx_attr(&mut self, attr: &JSXAttr) {
        match &attr.value {
            Some(JSXAttrValue::JSXExprContainer(container)) => {
                if let JSXExpr::Expr(expr) = &container.expr {
                    self.contextual = true;
                    expr.visit_with(self);
                }
            }
            Some(other) => other.visit_with(self),
            None => {}
        }
    }

    fn visit_ts_entity_name(&mut self, name: &TsEntityName) {
        match name {
            TsEntityName::Ident(ident) => self.reference(ident, Access::Read),
            other => other.visit_children_with(self),
        }
    }

    fn visit_ts_property_signature(&mut self, signature: &TsPropertySignature) {
        if signature.computed {
            signature.key.visit_with(self);
        }
        signature.type_ann.visit_with(self);
    }

    fn visit_ts_method_signature(&mut self, signature: &TsMethodSignature) {
        if signature.computed {
            signature.key.visit_with(self);
        }
        signature.params.visit_with(self);
        signature.type_params.visit_with(self);
        signature.type_ann.visit_with(self);
    }
}

impl ScopeBuilder {
    /// Members are contextually typed only when the literal itself is.
    fn object_lit(&mut self, object: &ObjectLit, contextual: bool) {
        for prop in &object.props {
            match prop {
                PropOrSpread::Spread(spread) => spread.expr.visit_with(self),
                PropOrSpread::Prop(prop) => self.prop(prop, contextual),
            }
        }
    }

    fn prop(&mut self, prop: &Prop, contextual: bool) {
        match prop {
            Prop::Shorthand(ident) => self.reference(ident, Access::Read),
            Prop::KeyValue(kv) => {
                kv.key.visit_with(self);
                self.contextual = contextual;
                kv.value.visit_with(self);
            }
            Prop::Method(method) => {
                method.key.visit_with(self);
                self.function(&method.function, !contextual);
            }
            other => other.visit_children_with(self),
        }
    }

    fn for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::VarDecl(var) => self.var_decl(var, false),
            ForHead::Pat(pat) => self.assign_pat(pat),
            other => other.visit_with(self),
        }
    }
}
