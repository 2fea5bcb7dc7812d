//! Textual heuristics over raw file text.
//!
//! These are deliberately lexical: a hook name inside a comment or a string
//! still counts as a use.

use std::sync::LazyLock;

use regex::Regex;

const DIRECTIVE_LINES: usize = 5;
const MAX_PATTERN_CHARS: usize = 100;

const HOOK_NAMES: &[&str] = &[
    "useState",
    "useEffect",
    "useCallback",
    "useMemo",
    "useRef",
    "useContext",
    "useReducer",
    "useLayoutEffect",
];

static CLIENT_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:'use client'|"use client");?$"#).expect("Invalid regex pattern")
});

static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bon[A-Z]\w*=\{").expect("Invalid regex pattern"));

static BROWSER_API: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(window|document|localStorage|sessionStorage|navigator)\b")
        .expect("Invalid regex pattern")
});

static EXPRESSION_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^{}]*\}").expect("Invalid regex pattern"));

static NUMERIC_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\d+(?:\.\d+)?\b").expect("Invalid regex pattern"));

static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*"|'[^']*'"#).expect("Invalid regex pattern"));

/// `'use client'` as a freestanding statement within the first five lines.
pub fn has_client_directive(text: &str) -> bool {
    client_directive_line(text).is_some()
}

/// 1-based line of the client directive, if [`has_client_directive`].
pub fn client_directive_line(text: &str) -> Option<usize> {
    text.lines()
        .take(DIRECTIVE_LINES)
        .position(|line| CLIENT_DIRECTIVE.is_match(line.trim()))
        .map(|index| index + 1)
}

pub fn uses_hooks(text: &str) -> bool {
    HOOK_NAMES.iter().any(|hook| text.contains(hook))
}

pub fn has_event_handlers(text: &str) -> bool {
    EVENT_HANDLER.is_match(text)
}

pub fn uses_browser_apis(text: &str) -> bool {
    BROWSER_API.is_match(text)
}

/// Lines that are neither blank nor start with a comment marker.
///
/// Lines inside a block comment that do not begin with `*` are counted.
pub fn significant_line_count(text: &str) -> usize {
    text.lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("//")
                && !line.starts_with("/*")
                && !line.starts_with('*')
        })
        .count()
}

/// Collapses the variable parts of a JSX snippet so structurally identical
/// markup compares equal, then keeps the first 100 characters.
pub fn normalize_jsx_pattern(text: &str) -> String {
    let normalized = EXPRESSION_BLOCK.replace_all(text, "{expr}");
    let normalized = NUMERIC_LITERAL.replace_all(&normalized, "0");
    let normalized = STRING_LITERAL.replace_all(&normalized, "\"\"");
    normalized.chars().take(MAX_PATTERN_CHARS).collect()
}

/// Whether the text directly preceding a declaration ends in a `/** */` block.
pub fn has_jsdoc(text_before: &str) -> bool {
    let trimmed = text_before.trim_end();
    if !trimmed.ends_with("*/") {
        return false;
    }
    trimmed
        .rfind("/*")
        .is_some_and(|start| trimmed[start..].starts_with("/**") && trimmed.len() - start >= 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_directive_in_either_quote_style() {
        assert!(has_client_directive("'use client'\n\nexport default function A() {}"));
        assert!(has_client_directive("\"use client\";\nimport x from 'y';"));
    }

    #[test]
    fn client_directive_within_first_five_lines() {
        let text = "// header\n// more\n\n\n'use client';\nexport {}";
        assert!(has_client_directive(text));
    }

    #[test]
    fn client_directive_line_is_reported() {
        assert_eq!(client_directive_line("// header\n\"use client\"\n"), Some(2));
        assert_eq!(client_directive_line("export {}"), None);
    }

    #[test]
    fn client_directive_after_fifth_line_is_ignored() {
        let text = "\n\n\n\n\n'use client';\nexport {}";
        assert!(!has_client_directive(text));
    }

    #[test]
    fn client_directive_must_be_freestanding() {
        assert!(!has_client_directive("const mode = 'use client';"));
        assert!(!has_client_directive("// 'use client'"));
    }

    #[test]
    fn hooks_are_matched_textually() {
        assert!(uses_hooks("const [a, setA] = useState(0);"));
        assert!(uses_hooks("// we used to call useEffect here"));
        assert!(!uses_hooks("const state = createStore();"));
    }

    #[test]
    fn event_handlers() {
        assert!(has_event_handlers("<button onClick={() => go()}>"));
        assert!(has_event_handlers("<form onSubmit={submit}>"));
        assert!(!has_event_handlers("<button onclick=\"go()\">"));
        assert!(!has_event_handlers("<Comp reason={x} />"));
    }

    #[test]
    fn browser_apis() {
        assert!(uses_browser_apis("window.scrollTo(0, 0)"));
        assert!(uses_browser_apis("localStorage.getItem('k')"));
        assert!(!uses_browser_apis("const windowed = true;"));
    }

    #[test]
    fn blank_and_comment_only_text_has_no_significant_lines() {
        let text = "\n   \n// one\n/* two\n * three\n */\n";
        assert_eq!(significant_line_count(text), 0);
    }

    #[test]
    fn significant_lines_skip_comments() {
        let text = "import a from 'a';\n\n// note\nconst b = 1;\n/** doc */\nexport default b;";
        assert_eq!(significant_line_count(text), 3);
    }

    #[test]
    fn unprefixed_block_comment_body_counts() {
        let text = "/*\nplain text\n*/";
        assert_eq!(significant_line_count(text), 1);
    }

    #[test]
    fn normalize_replaces_variable_parts() {
        let text = r#"<Card title="Hello" count={items.length} size={3} width=42 />"#;
        assert_eq!(
            normalize_jsx_pattern(text),
            r#"<Card title="" count={expr} size={expr} width=0 />"#
        );
    }

    #[test]
    fn normalize_makes_equivalent_snippets_equal() {
        let a = r#"<li className="item"><a href="/one">{first}</a></li>"#;
        let b = r#"<li className="row"><a href='/two'>{second}</a></li>"#;
        assert_eq!(normalize_jsx_pattern(a), normalize_jsx_pattern(b));
    }

    #[test]
    fn normalize_truncates_to_one_hundred_chars() {
        let text = "<div>".repeat(40);
        assert_eq!(normalize_jsx_pattern(&text).chars().count(), 100);
    }

    #[test]
    fn jsdoc_detection() {
        assert!(has_jsdoc("/** Renders the header. */\n"));
        assert!(has_jsdoc("import x from 'x';\n\n/**\n * Docs\n */\n  "));
        assert!(!has_jsdoc("/* plain */\n"));
        assert!(!has_jsdoc("// line\n"));
        assert!(!has_jsdoc("/** done */ const a = 1;\n"));
    }
}
