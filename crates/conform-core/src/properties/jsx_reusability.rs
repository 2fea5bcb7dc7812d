//! jsx-reusability property (P002): repeated markup should be a component
//!
//! Every JSX element whose source text is long enough is normalized (variable
//! parts collapsed, truncated) and counted per file. A pattern seen more often
//! than the configured limit is reported once, at its first occurrence.

use std::collections::BTreeMap;

use crate::declare_property;
use crate::detectors::normalize_jsx_pattern;
use crate::navigator::{NodeIndex, NodeKind};
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::{Violation, sort_violations};
use crate::visitor::VisitorContext;

declare_property!(
    JsxReusability,
    id = "P002",
    name = "jsx-reusability",
    description = "Repeated JSX blocks should be extracted into reusable components",
    category = Structure,
    pattern = "{app,components}/**/*.tsx",
    rule = "A JSX element of at least 30 characters whose normalized form (expressions, numbers and strings collapsed, first 100 characters) occurs more than twice in one file is a violation, reported once per pattern with its count.",
    examples = "// Bad\n<li className=\"item\"><a href=\"/a\">{a}</a></li>\n<li className=\"item\"><a href=\"/b\">{b}</a></li>\n<li className=\"item\"><a href=\"/c\">{c}</a></li>\n\n// Good\n{links.map((link) => <NavItem key={link.href} {...link} />)}"
);

struct Occurrences {
    count: usize,
    first_line: usize,
}

impl Property for JsxReusability {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let min_length = ctx.limits.jsx_min_pattern_length;
        let visitor_ctx = VisitorContext::new(file);
        let index = NodeIndex::build(file);
        let mut patterns: BTreeMap<String, Occurrences> = BTreeMap::new();

        for element in index.descendants(NodeKind::JsxElement) {
            let Some(text) = visitor_ctx.get_source_text(element.span) else {
                continue;
            };
            if text.chars().count() < min_length {
                continue;
            }

            let line = visitor_ctx.line(element.span);
            patterns
                .entry(normalize_jsx_pattern(text))
                .and_modify(|seen| seen.count += 1)
                .or_insert(Occurrences {
                    count: 1,
                    first_line: line,
                });
        }

        let mut violations: Vec<Violation> = patterns
            .into_iter()
            .filter(|(_, seen)| seen.count > ctx.limits.jsx_max_repeats)
            .map(|(pattern, seen)| {
                ctx.violation(
                    seen.first_line,
                    format!(
                        "JSX pattern repeated {} times; extract it into a reusable component",
                        seen.count
                    ),
                )
                .with_pattern(pattern)
                .with_count(seen.count)
            })
            .collect();

        sort_violations(&mut violations);
        violations
    }
}
