//! Human-readable and serialized reports of property results.

use std::fmt::Write as _;

use serde::Serialize;

use crate::violation::PropertyResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PropertyFailure {
    pub id: String,
    pub message: String,
}

impl Report {
    pub fn into_result(self) -> Result<(), PropertyFailure> {
        if self.passed {
            return Ok(());
        }
        let id = self
            .message
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        Err(PropertyFailure {
            id,
            message: self.message,
        })
    }
}

/// One header line, then `path:line: message` per violation, then a
/// `skipped` section when files failed to load.
pub fn report(result: &PropertyResult) -> Report {
    let passed = result.holds();
    let mut message = String::new();

    if passed {
        let _ = write!(
            message,
            "{} {}: holds ({} file(s) checked)",
            result.id, result.name, result.files_checked
        );
    } else {
        let _ = write!(
            message,
            "{} {}: {} violation(s) in {} file(s) checked",
            result.id,
            result.name,
            result.violations.len(),
            result.files_checked
        );
        for violation in &result.violations {
            let _ = write!(
                message,
                "\n{}:{}: {}",
                violation.file, violation.line, violation.message
            );
        }
    }

    if !result.skipped.is_empty() {
        let _ = write!(message, "\nskipped ({}):", result.skipped.len());
        for skipped in &result.skipped {
            let _ = write!(message, "\n{}: {}", skipped.file, skipped.reason);
        }
    }

    Report { passed, message }
}

/// Totals over a run of several properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub properties: usize,
    pub passed: usize,
    pub failed: usize,
    pub violations: usize,
    pub skipped_files: usize,
    pub results: Vec<PropertyResult>,
}

impl Summary {
    pub fn new(results: Vec<PropertyResult>) -> Self {
        let passed = results.iter().filter(|result| result.holds()).count();
        Self {
            properties: results.len(),
            passed,
            failed: results.len() - passed,
            violations: results.iter().map(|result| result.violations.len()).sum(),
            skipped_files: results.iter().map(|result| result.skipped.len()).sum(),
            results,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::violation::{SkippedFile, Violation};

    fn result(violations: Vec<Violation>, skipped: Vec<SkippedFile>) -> PropertyResult {
        PropertyResult {
            id: "P009".to_string(),
            name: "image-usage".to_string(),
            files_checked: 3,
            violations,
            skipped,
        }
    }

    #[test]
    fn passing_result_has_one_line() {
        let report = report(&result(Vec::new(), Vec::new()));

        assert!(report.passed);
        assert_eq!(report.message, "P009 image-usage: holds (3 file(s) checked)");
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn failing_result_lists_violations() {
        let report = report(&result(
            vec![
                Violation::new("app/page.tsx", 4, "Use the Image component"),
                Violation::new("components/ui/Hero.tsx", 12, "<Image> needs width and height, or fill"),
            ],
            Vec::new(),
        ));

        assert!(!report.passed);
        assert_eq!(
            report.message,
            "P009 image-usage: 2 violation(s) in 3 file(s) checked\n\
             app/page.tsx:4: Use the Image component\n\
             components/ui/Hero.tsx:12: <Image> needs width and height, or fill"
        );
    }

    #[test]
    fn skipped_files_are_a_separate_section() {
        let report = report(&result(
            Vec::new(),
            vec![SkippedFile {
                file: "components/ui/Broken.tsx".to_string(),
                reason: "Expected ident at 1:17".to_string(),
            }],
        ));

        assert!(report.passed);
        assert!(report.message.ends_with("\nskipped (1):\ncomponents/ui/Broken.tsx: Expected ident at 1:17"));
    }

    #[test]
    fn failure_carries_the_property_id() {
        let failure = report(&result(vec![Violation::new("a.tsx", 1, "m")], Vec::new()))
            .into_result()
            .unwrap_err();

        assert_eq!(failure.id, "P009");
        assert!(failure.to_string().contains("a.tsx:1: m"));
    }

    #[test]
    #[should_panic(expected = "a.tsx:1: m")]
    fn assert_holds_panics_with_report() {
        result(vec![Violation::new("a.tsx", 1, "m")], Vec::new()).assert_holds();
    }

    #[test]
    fn summary_counts() {
        let summary = Summary::new(vec![
            result(Vec::new(), Vec::new()),
            result(
                vec![Violation::new("a.tsx", 1, "m"), Violation::new("b.tsx", 2, "n")],
                vec![SkippedFile {
                    file: "c.tsx".to_string(),
                    reason: "bad".to_string(),
                }],
            ),
        ]);

        assert_eq!(summary.properties, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.violations, 2);
        assert_eq!(summary.skipped_files, 1);
        assert!(!summary.all_passed());

        let json: serde_json::Value = serde_json::from_str(&summary.to_json().unwrap()).unwrap();
        assert_eq!(json["results"][1]["violations"][0]["file"], "a.tsx");
    }
}
