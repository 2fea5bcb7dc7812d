//! import-organization property (P012): imports are grouped in a fixed order
//!
//! Groups rank react, then third-party packages, then local modules, then
//! type-only imports. Only the first out-of-order import in a file is
//! reported.

use swc_ecma_ast::{ImportDecl, ModuleDecl, ModuleItem};

use crate::declare_property;
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::Violation;
use crate::visitor::VisitorContext;

declare_property!(
    ImportOrganization,
    id = "P012",
    name = "import-organization",
    description = "Imports must be ordered react, third-party, local, then types",
    category = Hygiene,
    pattern = "{app,components,lib}/**/*.{tsx,ts}",
    rule = "Import groups must appear in non-decreasing order: react, third-party packages, local modules (relative or @/), then type-only imports. The first import that breaks the order is reported.",
    examples = "// Bad\nimport { cn } from '@/lib/utils';\nimport { useState } from 'react';\n\n// Good\nimport { useState } from 'react';\nimport clsx from 'clsx';\nimport { cn } from '@/lib/utils';\nimport type { User } from '@/types';"
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ImportGroup {
    React,
    ThirdParty,
    Local,
    Type,
}

impl ImportGroup {
    fn label(self) -> &'static str {
        match self {
            ImportGroup::React => "react",
            ImportGroup::ThirdParty => "third-party",
            ImportGroup::Local => "local",
            ImportGroup::Type => "type",
        }
    }
}

fn is_react(source: &str) -> bool {
    ["react", "react-dom"].iter().any(|name| {
        source == *name || source.strip_prefix(name).is_some_and(|rest| rest.starts_with('/'))
    })
}

fn classify(import: &ImportDecl) -> ImportGroup {
    if import.type_only {
        return ImportGroup::Type;
    }

    let source = import.src.value.as_ref();
    if is_react(source) {
        ImportGroup::React
    } else if source.starts_with('.') || source.starts_with("@/") {
        ImportGroup::Local
    } else {
        ImportGroup::ThirdParty
    }
}

impl Property for ImportOrganization {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let Some(module) = file.module() else {
            return Vec::new();
        };

        let visitor_ctx = VisitorContext::new(file);
        let mut previous = ImportGroup::React;

        let imports = module.body.iter().filter_map(|item| match item {
            ModuleItem::ModuleDecl(ModuleDecl::Import(import)) => Some(import),
            _ => None,
        });

        for import in imports {
            let group = classify(import);
            if group < previous {
                let source = import.src.value.as_ref();
                return vec![
                    ctx.violation(
                        visitor_ctx.line(import.span),
                        format!(
                            "Import '{}' ({}) should come before {} imports",
                            source,
                            group.label(),
                            previous.label()
                        ),
                    )
                    .with_name(source),
                ];
            }
            previous = group;
        }

        Vec::new()
    }
}
