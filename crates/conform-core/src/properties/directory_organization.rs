//! directory-organization property (P003): components live in known folders

use crate::declare_property;
use crate::parser::SourceFile;
use crate::properties::{CheckContext, Property, PropertyMetadata};
use crate::violation::Violation;

const COMPONENTS_DIR: &str = "components";

declare_property!(
    DirectoryOrganization,
    id = "P003",
    name = "directory-organization",
    description = "Component files must be grouped under an allowed feature directory",
    category = Structure,
    pattern = "components/**/*.{tsx,ts}",
    rule = "A file nested below components/ must sit under one of the allowed first-level directories (auth, charts, features, providers, species, ui by default). Files directly in components/ are exempt.",
    examples = "// Bad\ncomponents/widgets/Chart.tsx\n\n// Good\ncomponents/charts/Chart.tsx\ncomponents/Header.tsx"
);

/// First directory below `components/`, or `None` for files directly inside
/// it or outside it.
fn first_segment(relative_path: &str) -> Option<&str> {
    let mut segments = relative_path.split('/').skip_while(|s| *s != COMPONENTS_DIR);
    segments.next()?;
    let first = segments.next()?;
    segments.next().map(|_| first)
}

impl Property for DirectoryOrganization {
    fn metadata(&self) -> &PropertyMetadata {
        &self.metadata
    }

    fn check(&self, _file: &SourceFile, ctx: &CheckContext) -> Vec<Violation> {
        let Some(directory) = first_segment(ctx.relative_path) else {
            return Vec::new();
        };

        let allowed = &ctx.limits.component_dirs;
        if allowed.iter().any(|dir| dir == directory) {
            return Vec::new();
        }

        vec![
            ctx.violation(
                1,
                format!(
                    "'{}' is not an allowed directory under components/ (allowed: {})",
                    directory,
                    allowed.join(", ")
                ),
            )
            .with_name(directory),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::test_support::check_source;

    fn check(path: &str) -> Vec<Violation> {
        check_source(&DirectoryOrganization::new(), path, "export {};")
    }

    #[test]
    fn first_segment_extraction() {
        assert_eq!(first_segment("components/ui/Button.tsx"), Some("ui"));
        assert_eq!(first_segment("src/components/charts/deep/Bar.tsx"), Some("charts"));
        assert_eq!(first_segment("components/Header.tsx"), None);
        assert_eq!(first_segment("app/page.tsx"), None);
    }

    #[test]
    fn allowed_directories_hold() {
        assert!(check("components/ui/Button.tsx").is_empty());
        assert!(check("components/features/billing/Invoice.tsx").is_empty());
    }

    #[test]
    fn root_level_files_are_exempt() {
        assert!(check("components/Header.tsx").is_empty());
    }

    #[test]
    fn unknown_directory_violates() {
        let violations = check("components/widgets/Chart.tsx");

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].context.name.as_deref(), Some("widgets"));
        assert!(violations[0].message.starts_with("'widgets' is not an allowed directory"));
    }
}
