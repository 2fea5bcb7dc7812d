//! Violations and per-property results.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViolationContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ViolationContext {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.pattern.is_none() && self.count.is_none()
    }
}

/// One breach of a property. `file` is project-relative with forward slashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub file: String,
    pub line: usize,
    pub message: String,
    #[serde(skip_serializing_if = "ViolationContext::is_empty")]
    pub context: ViolationContext,
}

impl Violation {
    pub fn new(file: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: line.max(1),
            message: message.into(),
            context: ViolationContext::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.context.name = Some(name.into());
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.context.pattern = Some(pattern.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.context.count = Some(count);
        self
    }
}

/// A file the property could not inspect because it failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub file: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyResult {
    pub id: String,
    pub name: String,
    pub files_checked: usize,
    pub violations: Vec<Violation>,
    pub skipped: Vec<SkippedFile>,
}

impl PropertyResult {
    pub fn holds(&self) -> bool {
        self.violations.is_empty()
    }

    /// Panics with the aggregated report when the property does not hold.
    pub fn assert_holds(&self) {
        let report = crate::report::report(self);
        assert!(report.passed, "{}", report.message);
    }
}

pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| {
        (a.file.as_str(), a.line, a.message.as_str())
            .cmp(&(b.file.as_str(), b.line, b.message.as_str()))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_context() {
        let violation = Violation::new("components/A.tsx", 3, "Repeated JSX")
            .with_pattern("<li>{expr}</li>")
            .with_count(3);

        assert_eq!(violation.context.pattern.as_deref(), Some("<li>{expr}</li>"));
        assert_eq!(violation.context.count, Some(3));
        assert!(violation.context.name.is_none());
    }

    #[test]
    fn line_is_at_least_one() {
        assert_eq!(Violation::new("a.tsx", 0, "x").line, 1);
    }

    #[test]
    fn sorting_is_by_file_line_message() {
        let mut violations = vec![
            Violation::new("b.tsx", 1, "z"),
            Violation::new("a.tsx", 9, "a"),
            Violation::new("a.tsx", 2, "b"),
            Violation::new("a.tsx", 2, "a"),
        ];

        sort_violations(&mut violations);

        let order: Vec<_> = violations
            .iter()
            .map(|v| (v.file.as_str(), v.line, v.message.as_str()))
            .collect();
        assert_eq!(
            order,
            vec![("a.tsx", 2, "a"), ("a.tsx", 2, "b"), ("a.tsx", 9, "a"), ("b.tsx", 1, "z")]
        );
    }

    #[test]
    fn empty_context_is_not_serialized() {
        let json = serde_json::to_value(Violation::new("a.tsx", 1, "m")).unwrap();
        assert!(json.get("context").is_none());
    }
}
