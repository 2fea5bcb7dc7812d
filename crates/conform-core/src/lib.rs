//! conform-core: architectural conformance properties for TypeScript and
//! React source trees.
//!
//! A [`Project`] is opened once (tsconfig, parse cache), a [`Harness`] runs
//! registered [`Property`] checks over glob-selected files, and [`report`]
//! turns each [`PropertyResult`] into a readable message.

pub mod config;
pub mod detectors;
pub mod files;
pub mod harness;
pub mod navigator;
pub mod parser;
pub mod project;
pub mod properties;
pub mod report;
pub mod semantic;
pub mod violation;
pub mod visitor;

pub use config::{Config, ConfigError, Limits};
pub use files::{FilterOptions, ResolutionError};
pub use harness::Harness;
pub use parser::{ParseError, SourceFile};
pub use project::{CompilerDiagnostic, LoadError, Project, ProjectError};
pub use properties::{Property, PropertyCategory, PropertyMetadata, PropertyRegistry};
pub use report::{PropertyFailure, Report, Summary, report};
pub use violation::{PropertyResult, SkippedFile, Violation};
