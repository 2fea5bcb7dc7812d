//! Bindings declared in scopes and the references that resolve to them.

use std::collections::HashMap;

use id_arena::{Arena, Id};
use swc_common::Span;

use super::scope::{ScopeId, ScopeTree};

pub type BindingId = Id<Binding>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Import { type_only: bool },
    Var,
    Let,
    Const,
    Function,
    Class,
    Enum,
    Type,
    Parameter,
    CatchParameter,
}


#[derive(Debug)]
pub struct Binding {
    pub id: BindingId,
    pub name: String,
    pub kind: BindingKind,
    pub scope: ScopeId,
    /// Span of the declaring identifier.
    pub span: Span,
    pub exported: bool,
    /// Declared without a body to observe it: overload signatures, `declare`.
    pub ambient: bool,
    /// Body of a function or class declaration. Reads inside it are
    /// recursion, not uses.
    pub body: Option<Span>,
    pub reads: usize,
    pub writes: usize,
}

impl Binding {
    pub fn is_read(&self) -> bool {
        self.reads > 0
    }

    pub fn is_reassigned(&self) -> bool {
        self.writes > 0
    }

    fn encloses(&self, span: Span) -> bool {
        self.body
            .is_some_and(|body| body.lo <= span.lo && span.hi <= body.hi)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Export,
}

#[derive(Debug, Clone)]
pub struct Reference {
    pub name: String,
    pub scope: ScopeId,
    pub access: Access,
    pub span: Span,
}

#[derive(Default)]
pub struct BindingTable {
    arena: Arena<Binding>,
    by_scope: HashMap<(ScopeId, String), BindingId>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `name` in `scope`. Redeclaring a name in the same scope
    /// (`var x; var x;`, function overloads) returns the existing binding.
    pub fn declare(
        &mut self,
        name: &str,
        kind: BindingKind,
        scope: ScopeId,
        span: Span,
        exported: bool,
        ambient: bool,
    ) -> BindingId {
        if let Some(&existing) = self.by_scope.get(&(scope, name.to_string())) {
            let binding = &mut self.arena[existing];
            binding.exported |= exported;
            binding.ambient &= ambient;
            return existing;
        }

        let id = self.arena.alloc_with_id(|id| Binding {
            id,
            name: name.to_string(),
            kind,
            scope,
            span,
            exported,
            ambient,
            body: None,
            reads: 0,
            writes: 0,
        });
        self.by_scope.insert((scope, name.to_string()), id);
        id
    }

    pub fn set_body(&mut self, id: BindingId, body: Span) {
        self.arena[id].body = Some(body);
    }

    pub fn get(&self, id: BindingId) -> &Binding {
        &self.arena[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.arena.iter().map(|(_, binding)| binding)
    }

    /// Finds the binding `name` refers to from `scope`, innermost first.
    pub fn lookup(&self, name: &str, scope: ScopeId, tree: &ScopeTree) -> Option<BindingId> {
        let key = name.to_string();
        tree.ancestors(scope)
            .find_map(|s| self.by_scope.get(&(s.id, key.clone())).copied())
    }

    /// Applies references after the whole module has been declared, so uses
    /// that precede their (hoisted) declaration still resolve.
    pub fn resolve(&mut self, references: &[Reference], tree: &ScopeTree) -> Vec<Reference> {
        let mut unresolved = Vec::new();

        for reference in references {
            let Some(id) = self.lookup(&reference.name, reference.scope, tree) else {
                unresolved.push(reference.clone());
                continue;
            };
            let binding = &mut self.arena[id];
            match reference.access {
                Access::Read if binding.encloses(reference.span) => {}
                Access::Read => binding.reads += 1,
                Access::Write => binding.writes += 1,
                Access::Export => {
                    binding.exported = true;
                    binding.reads += 1;
                }
            }
        }

        unresolved
    }
}
