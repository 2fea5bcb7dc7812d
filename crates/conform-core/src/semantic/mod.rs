//! Semantic analysis module
//!
//! Builds a scope tree with resolved bindings for one module and derives the
//! compiler-style diagnostics consumed by the unused-code and implicit-any
//! properties.

mod builder;
pub mod scope;
pub mod symbols;

pub use builder::ScopeBuilder;
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};
pub use symbols::{Access, Binding, BindingId, BindingKind, BindingTable, Reference};

use swc_common::Span;
use swc_ecma_ast::Module;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImplicitAnyKind {
    Parameter,
    BindingElement,
    RestParameter,
}

/// A parameter position that has no annotation and no type flowing in from
/// its context.
#[derive(Debug, Clone)]
pub struct ImplicitAny {
    pub kind: ImplicitAnyKind,
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ImportGroup {
    pub span: Span,
    pub bindings: Vec<BindingId>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub no_implicit_any: bool,
    pub no_unused_locals: bool,
    pub no_unused_parameters: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemanticDiagnostic {
    pub code: u32,
    pub message: String,
    pub span: Span,
}

pub struct SemanticModel {
    pub scope_tree: ScopeTree,
    pub bindings: BindingTable,
    pub unresolved: Vec<Reference>,
    pub implicit_any: Vec<ImplicitAny>,
    pub import_groups: Vec<ImportGroup>,
    /// The file has at least one import or export. Top-level bindings of a
    /// script are globals and never reported as unused.
    pub is_module: bool,
    pub has_jsx: bool,
}

impl SemanticModel {
    pub fn build(module: &Module) -> Self {
        ScopeBuilder::build(module)
    }

    pub fn root(&self) -> Option<ScopeId> {
        self.scope_tree.root()
    }

    pub fn lookup(&self, name: &str, scope: ScopeId) -> Option<&Binding> {
        self.bindings
            .lookup(name, scope, &self.scope_tree)
            .map(|id| self.bindings.get(id))
    }

    pub fn diagnostics(&self, options: AnalysisOptions) -> Vec<SemanticDiagnostic> {
        let mut diagnostics = Vec::new();

        if options.no_implicit_any {
            diagnostics.extend(self.implicit_any.iter().map(implicit_any_diagnostic));
        }
        if options.no_unused_locals || options.no_unused_parameters {
            diagnostics.extend(self.unused_diagnostics(options));
        }

        diagnostics.sort_by_key(|d| (d.span.lo, d.code));
        diagnostics
    }

    fn is_unused(&self, binding: &Binding, options: AnalysisOptions) -> bool {
        if binding.is_read() || binding.exported || binding.ambient {
            return false;
        }
        if !self.is_module && Some(binding.scope) == self.root() {
            return false;
        }

        match binding.kind {
            BindingKind::Parameter => {
                options.no_unused_parameters && !binding.name.starts_with('_')
            }
            BindingKind::CatchParameter => false,
            BindingKind::Import { .. } => {
                options.no_unused_locals && !(self.has_jsx && binding.name == "React")
            }
            _ => options.no_unused_locals,
        }
    }

    fn unused_diagnostics(&self, options: AnalysisOptions) -> Vec<SemanticDiagnostic> {
        let mut diagnostics = Vec::new();

        for group in &self.import_groups {
            let unused: Vec<&Binding> = group
                .bindings
                .iter()
                .map(|&id| self.bindings.get(id))
                .filter(|binding| self.is_unused(binding, options))
                .collect();

            if group.bindings.len() > 1 && unused.len() == group.bindings.len() {
                diagnostics.push(SemanticDiagnostic {
                    code: 6192,
                    message: "All imports in import declaration are unused.".to_string(),
                    span: group.span,
                });
            } else {
                diagnostics.extend(unused.into_iter().map(unused_binding_diagnostic));
            }
        }

        diagnostics.extend(
            self.bindings
                .iter()
                .filter(|binding| !matches!(binding.kind, BindingKind::Import { .. }))
                .filter(|binding| self.is_unused(binding, options))
                .map(unused_binding_diagnostic),
        );

        diagnostics
    }
}

fn unused_binding_diagnostic(binding: &Binding) -> SemanticDiagnostic {
    let never_used = matches!(
        binding.kind,
        BindingKind::Type | BindingKind::Import { type_only: true }
    );

    if never_used {
        SemanticDiagnostic {
            code: 6196,
            message: format!("'{}' is declared but never used.", binding.name),
            span: binding.span,
        }
    } else {
        SemanticDiagnostic {
            code: 6133,
            message: format!("'{}' is declared but its value is never read.", binding.name),
            span: binding.span,
        }
    }
}

fn implicit_any_diagnostic(implicit: &ImplicitAny) -> SemanticDiagnostic {
    let (code, message) = match implicit.kind {
        ImplicitAnyKind::Parameter => (
            7006,
            format!("Parameter '{}' implicitly has an 'any' type.", implicit.name),
        ),
        ImplicitAnyKind::BindingElement => (
            7031,
            format!(
                "Binding element '{}' implicitly has an 'any' type.",
                implicit.name
            ),
        ),
        ImplicitAnyKind::RestParameter => (
            7019,
            format!(
                "Rest parameter '{}' implicitly has an 'any[]' type.",
                implicit.name
            ),
        ),
    };

    SemanticDiagnostic {
        code,
        message,
        span: implicit.span,
    }
}
