//! Parser module for TypeScript/JavaScript source files
//!
//! Integrates with SWC for parsing source files into AST. Positions reported by
//! SWC are global to the `SourceMap` they were produced with, so every parsed
//! file remembers its start position and exposes file-relative offsets.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use swc_common::sync::Lrc;
use swc_common::{BytePos, FileName, SourceMap, Span, Spanned};
use swc_ecma_parser::{EsSyntax, Syntax, TsSyntax, parse_file_as_module};

pub use swc_ecma_ast::{EsVersion, Module};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
}

impl Language {
    pub fn is_typescript(self) -> bool {
        matches!(self, Language::TypeScript | Language::Tsx)
    }
}

pub fn detect_language(filename: &str) -> Language {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "ts" | "mts" | "cts" => Language::TypeScript,
        "tsx" => Language::Tsx,
        "jsx" => Language::Jsx,
        _ => Language::JavaScript,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {line}:{column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

#[derive(Debug)]
pub struct ParseResult {
    pub module: Option<Module>,
    pub errors: Vec<ParseError>,
    pub start_pos: BytePos,
}

impl ParseResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMetadata {
    pub filename: String,
    pub language: Language,
    pub line_count: usize,
    pub has_errors: bool,
}

/// A parsed source artifact: raw text plus its syntax tree.
///
/// Never mutated after construction. The tree borrows nothing from the
/// parser, so a `SourceFile` can be shared across threads behind an `Arc`.
pub struct SourceFile {
    path: PathBuf,
    source: String,
    metadata: FileMetadata,
    ast_module: Option<Module>,
    errors: Vec<ParseError>,
    start_pos: u32,
    line_starts: OnceLock<Vec<usize>>,
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("metadata", &self.metadata)
            .field("has_module", &self.ast_module.is_some())
            .field("error_count", &self.errors.len())
            .finish()
    }
}

impl SourceFile {
    pub fn from_source(filename: &str, source: &str) -> Self {
        Self::from_path(PathBuf::from(filename), source)
    }

    pub fn from_path(path: PathBuf, source: &str) -> Self {
        let filename = path.to_string_lossy().to_string();
        let language = detect_language(&filename);
        let parser = Parser::for_file(&filename);
        let parse_result = parser.parse_module_recovering(source);

        let line_count = if source.is_empty() {
            0
        } else {
            source.lines().count()
        };

        let metadata = FileMetadata {
            filename,
            language,
            line_count,
            has_errors: parse_result.has_errors(),
        };

        Self {
            path,
            source: source.to_string(),
            metadata,
            ast_module: parse_result.module,
            errors: parse_result.errors,
            start_pos: parse_result.start_pos.0,
            line_starts: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn metadata(&self) -> &FileMetadata {
        &self.metadata
    }

    pub fn module(&self) -> Option<&Module> {
        self.ast_module.as_ref()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// The error that prevented a tree from being built, if any.
    pub fn fatal_error(&self) -> Option<&ParseError> {
        if self.ast_module.is_some() {
            None
        } else {
            self.errors.last()
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Converts a SWC position into a byte offset into [`Self::source`].
    pub fn offset(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.start_pos) as usize).min(self.source.len())
    }

    pub fn span_range(&self, span: Span) -> Range<usize> {
        let lo = self.offset(span.lo);
        let hi = self.offset(span.hi).max(lo);
        lo..hi
    }

    /// 1-based line containing the byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        let starts = self.line_starts.get_or_init(|| self.build_line_starts());
        starts.partition_point(|&start| start <= offset).max(1)
    }

    /// 1-based column (in characters) of the byte offset.
    pub fn column_of(&self, offset: usize) -> usize {
        let starts = self.line_starts.get_or_init(|| self.build_line_starts());
        let line = self.line_of(offset);
        let line_start = starts[line - 1];
        let end = offset.min(self.source.len());
        self.source
            .get(line_start..end)
            .map(|prefix| prefix.chars().count() + 1)
            .unwrap_or(1)
    }

    fn build_line_starts(&self) -> Vec<usize> {
        let mut starts = vec![0];
        for (i, b) in self.source.bytes().enumerate() {
            if b == b'\n' {
                starts.push(i + 1);
            }
        }
        starts
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    jsx: bool,
    typescript: bool,
}

impl ParserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jsx(mut self, enabled: bool) -> Self {
        self.jsx = enabled;
        self
    }

    pub fn typescript(mut self, enabled: bool) -> Self {
        self.typescript = enabled;
        self
    }

    pub fn build(self) -> Parser {
        let syntax = if self.typescript {
            Syntax::Typescript(TsSyntax {
                tsx: self.jsx,
                ..Default::default()
            })
        } else {
            Syntax::Es(EsSyntax {
                jsx: self.jsx,
                ..Default::default()
            })
        };

        Parser { syntax }
    }
}

#[derive(Debug, Clone)]
pub struct Parser {
    syntax: Syntax,
}

impl Parser {
    pub fn new() -> Self {
        Self::builder().jsx(true).build()
    }

    /// Picks the syntax from the file extension. Plain `.js` files are parsed
    /// with JSX enabled since React projects routinely put JSX in them.
    pub fn for_file(filename: &str) -> Self {
        match detect_language(filename) {
            Language::JavaScript | Language::Jsx => Self::new(),
            Language::TypeScript => Self::builder().typescript(true).build(),
            Language::Tsx => Self::builder().typescript(true).jsx(true).build(),
        }
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::new()
    }

    pub fn parse_module_recovering(&self, code: &str) -> ParseResult {
        let source_map: Lrc<SourceMap> = Default::default();
        let fm = source_map
            .new_source_file(FileName::Custom("input.tsx".into()).into(), code.to_string());

        let mut recovered_errors = Vec::new();

        let result = parse_file_as_module(
            &fm,
            self.syntax,
            EsVersion::latest(),
            None,
            &mut recovered_errors,
        );

        let to_parse_error = |e: &swc_ecma_parser::error::Error| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            ParseError {
                line: loc.line,
                column: loc.col_display + 1,
                message: e.kind().msg().to_string(),
            }
        };

        let mut errors: Vec<ParseError> = recovered_errors.iter().map(to_parse_error).collect();

        match result {
            Ok(module) => ParseResult {
                module: Some(module),
                errors,
                start_pos: fm.start_pos,
            },
            Err(e) => {
                errors.push(to_parse_error(&e));
                ParseResult {
                    module: None,
                    errors,
                    start_pos: fm.start_pos,
                }
            }
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
