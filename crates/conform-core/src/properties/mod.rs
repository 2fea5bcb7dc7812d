//! Property system for architectural conformance
//!
//! A property is a structural invariant over a set of files selected by a glob.
//! Each property inspects one parsed file at a time and returns the violations
//! it found; the harness aggregates them per property.

pub mod helpers;

pub mod component_size;
pub mod const_declaration;
pub mod dark_mode_support;
pub mod directory_organization;
pub mod form_input_labels;
pub mod image_usage;
pub mod import_organization;
pub mod interactive_aria_labels;
pub mod jsx_reusability;
pub mod no_implicit_any;
pub mod no_unused_code;
pub mod props_interface;
pub mod server_component_default;
pub mod source_parseability;
pub mod state_type_annotation;
pub mod tailwind_styling;

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::config::{Limits, PropertiesConfig};
use crate::parser::SourceFile;
use crate::project::{LoadError, Project};
use crate::violation::Violation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Structure,
    Typing,
    Rendering,
    Accessibility,
    Styling,
    Hygiene,
}

impl std::fmt::Display for PropertyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PropertyCategory::Structure => "structure",
            PropertyCategory::Typing => "typing",
            PropertyCategory::Rendering => "rendering",
            PropertyCategory::Accessibility => "accessibility",
            PropertyCategory::Styling => "styling",
            PropertyCategory::Hygiene => "hygiene",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyMetadata {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: PropertyCategory,
    /// Glob relative to the project root selecting the files to check.
    pub pattern: &'static str,
    pub rule: &'static str,
    pub examples: Option<&'static str>,
}

/// Per-file inputs shared by every property check.
pub struct CheckContext<'a> {
    pub project: &'a Project,
    pub limits: &'a Limits,
    /// Project-relative path of the file being checked.
    pub relative_path: &'a str,
}

impl<'a> CheckContext<'a> {
    pub fn new(project: &'a Project, limits: &'a Limits, relative_path: &'a str) -> Self {
        Self {
            project,
            limits,
            relative_path,
        }
    }

    pub fn violation(&self, line: usize, message: impl Into<String>) -> Violation {
        Violation::new(self.relative_path, line, message)
    }
}

pub trait Property: Send + Sync {
    fn metadata(&self) -> &PropertyMetadata;

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation>;

    /// Files that fail to load are skipped unless a property turns the
    /// failure into a violation.
    fn check_load_failure(&self, _error: &LoadError, _ctx: &CheckContext) -> Option<Violation> {
        None
    }
}

pub struct PropertyRegistry {
    properties: Vec<Box<dyn Property>>,
    disabled: HashSet<String>,
    patterns: HashMap<String, String>,
}

impl PropertyRegistry {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            disabled: HashSet::new(),
            patterns: HashMap::new(),
        }
    }

    /// All built-in properties in id order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(component_size::ComponentSize::new()));
        registry.register(Box::new(jsx_reusability::JsxReusability::new()));
        registry.register(Box::new(directory_organization::DirectoryOrganization::new()));
        registry.register(Box::new(props_interface::PropsInterface::new()));
        registry.register(Box::new(state_type_annotation::StateTypeAnnotation::new()));
        registry.register(Box::new(server_component_default::ServerComponentDefault::new()));
        registry.register(Box::new(interactive_aria_labels::InteractiveAriaLabels::new()));
        registry.register(Box::new(form_input_labels::FormInputLabels::new()));
        registry.register(Box::new(image_usage::ImageUsage::new()));
        registry.register(Box::new(dark_mode_support::DarkModeSupport::new()));
        registry.register(Box::new(tailwind_styling::TailwindStyling::new()));
        registry.register(Box::new(import_organization::ImportOrganization::new()));
        registry.register(Box::new(const_declaration::ConstDeclaration::new()));
        registry.register(Box::new(no_implicit_any::NoImplicitAny::new()));
        registry.register(Box::new(no_unused_code::NoUnusedCode::new()));
        registry.register(Box::new(source_parseability::SourceParseability::new()));
        registry
    }

    pub fn register(&mut self, property: Box<dyn Property>) {
        self.properties.push(property);
    }

    pub fn configure(&mut self, config: &PropertiesConfig) {
        self.disabled = config.disabled.iter().cloned().collect();
        self.patterns = config.patterns.clone();
    }

    pub fn properties(&self) -> impl Iterator<Item = &dyn Property> {
        self.properties.iter().map(|p| p.as_ref())
    }

    pub fn enabled(&self) -> impl Iterator<Item = &dyn Property> {
        self.properties().filter(|p| !self.is_disabled(p.metadata()))
    }

    fn is_disabled(&self, metadata: &PropertyMetadata) -> bool {
        self.disabled.contains(metadata.id) || self.disabled.contains(metadata.name)
    }

    pub fn is_enabled(&self, id_or_name: &str) -> bool {
        self.get(id_or_name)
            .is_some_and(|property| !self.is_disabled(property.metadata()))
    }

    /// Looks a property up by id (`P001`) or name (`component-size`).
    pub fn get(&self, id_or_name: &str) -> Option<&dyn Property> {
        self.properties()
            .find(|p| p.metadata().id == id_or_name || p.metadata().name == id_or_name)
    }

    /// The configured glob override, or the property's default pattern.
    pub fn pattern_for<'a>(&'a self, property: &'a dyn Property) -> &'a str {
        let metadata = property.metadata();
        self.patterns
            .get(metadata.id)
            .or_else(|| self.patterns.get(metadata.name))
            .map(String::as_str)
            .unwrap_or(metadata.pattern)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl Default for PropertyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[macro_export]
macro_rules! declare_property {
    (
        $name:ident,
        id = $id:literal,
        name = $prop_name:literal,
        description = $desc:literal,
        category = $cat:ident,
        pattern = $pattern:literal,
        rule = $rule:literal
        $(, examples = $examples:literal)?
    ) => {
        pub struct $name {
            metadata: $crate::properties::PropertyMetadata,
        }

        impl $name {
            pub fn new() -> Self {
                Self {
                    metadata: $crate::properties::PropertyMetadata {
                        id: $id,
                        name: $prop_name,
                        description: $desc,
                        category: $crate::properties::PropertyCategory::$cat,
                        pattern: $pattern,
                        rule: $rule,
                        examples: declare_property!(@examples $($examples)?),
                    },
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
    (@examples $examples:literal) => { Some($examples) };
    (@examples) => { None };
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;

    use super::*;
    use crate::project::CompilerOptions;

    /// Runs `property` over in-memory `code` as if it lived at `path`.
    pub fn check_source(property: &dyn Property, path: &str, code: &str) -> Vec<Violation> {
        check_source_with(property, path, code, CompilerOptions::default())
    }

    pub fn check_source_with(
        property: &dyn Property,
        path: &str,
        code: &str,
        options: CompilerOptions,
    ) -> Vec<Violation> {
        let project = Project::with_options(PathBuf::from("/project"), options);
        let limits = Limits::default();
        let file = SourceFile::from_source(path, code);
        let ctx = CheckContext::new(&project, &limits, path);
        property.check(&file, &ctx)
    }
}
