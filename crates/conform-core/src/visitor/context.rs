//! Visitor context providing file information during AST traversal.

use swc_common::Span;

use crate::parser::SourceFile;

pub struct VisitorContext<'a> {
    file: &'a SourceFile,
}

impl<'a> VisitorContext<'a> {
    pub fn new(file: &'a SourceFile) -> Self {
        Self { file }
    }

    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    /// 1-based line and column of the start of `span`.
    pub fn span_to_location(&self, span: Span) -> (usize, usize) {
        let offset = self.file.offset(span.lo);
        (self.file.line_of(offset), self.file.column_of(offset))
    }

    /// 1-based starting line of `span`.
    pub fn line(&self, span: Span) -> usize {
        self.file.line_of(self.file.offset(span.lo))
    }

    pub fn get_source_text(&self, span: Span) -> Option<&'a str> {
        self.file.source().get(self.file.span_range(span))
    }
}

#[cfg(test)]
mod tests {
    use swc_common::Spanned;

    use super::*;

    #[test]
    fn context_provides_file_reference() {
        let parsed = SourceFile::from_source("test.tsx", "const x = 1;");
        let ctx = VisitorContext::new(&parsed);

        assert_eq!(ctx.file().metadata().filename, "test.tsx");
    }

    #[test]
    fn span_to_location_second_line() {
        let parsed = SourceFile::from_source("test.ts", "const x = 1;\nconst y = 2;");
        let ctx = VisitorContext::new(&parsed);
        let second = parsed.module().unwrap().body[1].span();

        assert_eq!(ctx.span_to_location(second), (2, 1));
        assert_eq!(ctx.line(second), 2);
    }

    #[test]
    fn get_source_text_returns_span_content() {
        let parsed = SourceFile::from_source("test.ts", "let a = 1;\nconst b = a + 1;");
        let ctx = VisitorContext::new(&parsed);
        let second = parsed.module().unwrap().body[1].span();

        assert_eq!(ctx.get_source_text(second), Some("const b = a + 1;"));
    }

    #[test]
    fn lines_after_multibyte_text_stay_exact() {
        let code = "// ünïcödé ✓ comment\n\nconst z = '日本語';\nconst w = 2;";
        let parsed = SourceFile::from_source("test.ts", code);
        let ctx = VisitorContext::new(&parsed);
        let body = &parsed.module().unwrap().body;

        assert_eq!(ctx.line(body[0].span()), 3);
        assert_eq!(ctx.line(body[1].span()), 4);
    }
}
