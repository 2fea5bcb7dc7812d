//! End-to-end runs of the property harness over on-disk fixture projects.

use std::fs;
use std::path::Path;

use conform_core::config::discover_config;
use conform_core::{Config, Harness, Project, Summary};
use insta::assert_json_snapshot;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn fixture_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write(
        root,
        "components/auth/SignIn.tsx",
        r#"export function SignIn() {
  return (
    <form>
      <input type="email" />
      <img src="/logo.png" alt="" />
    </form>
  );
}
"#,
    );
    write(
        root,
        "app/page.tsx",
        r#"import Image from 'next/image';

export default function Page() {
  return <Image src="/hero.png" alt="" fill />;
}
"#,
    );
    write(root, "components/ui/Broken.tsx", "export function (\n");
    write(
        root,
        "node_modules/pkg/components/Vendor.tsx",
        "export const Vendor = () => <img src=\"/v.png\" />;\n",
    );
    write(
        root,
        "components/auth/SignIn.test.tsx",
        "export const Fixture = () => <img src=\"/t.png\" />;\n",
    );

    dir
}

fn harness_for(root: &Path) -> Harness {
    let config = discover_config(root).unwrap().config;
    let project = Project::open(root, &config).unwrap();
    Harness::with_config(project, &config)
}

#[test]
fn form_and_image_properties_snapshot() {
    let dir = fixture_project();
    let harness = harness_for(dir.path());
    let registry = harness.registry();

    let results = ["form-input-labels", "image-usage"]
        .iter()
        .map(|name| harness.run(registry.get(name).unwrap()).unwrap())
        .collect();
    let summary = Summary::new(results);

    assert_json_snapshot!(summary, { ".results[].skipped[].reason" => "[reason]" }, @r###"
    {
      "properties": 2,
      "passed": 0,
      "failed": 2,
      "violations": 2,
      "skipped_files": 2,
      "results": [
        {
          "id": "P008",
          "name": "form-input-labels",
          "files_checked": 2,
          "violations": [
            {
              "file": "components/auth/SignIn.tsx",
              "line": 4,
              "message": "<input> needs an aria-label or an id referenced by a <label>",
              "context": {
                "name": "input"
              }
            }
          ],
          "skipped": [
            {
              "file": "components/ui/Broken.tsx",
              "reason": "[reason]"
            }
          ]
        },
        {
          "id": "P009",
          "name": "image-usage",
          "files_checked": 2,
          "violations": [
            {
              "file": "components/auth/SignIn.tsx",
              "line": 5,
              "message": "Use the Image component from next/image instead of <img>"
            }
          ],
          "skipped": [
            {
              "file": "components/ui/Broken.tsx",
              "reason": "[reason]"
            }
          ]
        }
      ]
    }
    "###);
}

#[test]
fn running_twice_gives_identical_results() {
    let dir = fixture_project();
    let harness = harness_for(dir.path());

    let first = harness.run_all().unwrap();
    let second = harness.run_all().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 16);
}

#[test]
fn only_parseability_reports_the_broken_file() {
    let dir = fixture_project();
    let harness = harness_for(dir.path());

    for result in harness.run_all().unwrap() {
        let flags_broken = result
            .violations
            .iter()
            .any(|violation| violation.file == "components/ui/Broken.tsx");
        assert_eq!(flags_broken, result.id == "P016", "{}", result.id);
    }
}

#[test]
fn conform_toml_configures_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "conform.toml",
        r#"
exclude = ["components/legacy/**"]

[properties]
disabled = ["P016"]

[properties.patterns]
image-usage = "src/**/*.tsx"

[limits]
component_dirs = ["ui", "widgets"]
"#,
    );
    write(root, "components/widgets/Chart.tsx", "export const Chart = () => null;\n");
    write(root, "components/legacy/Old.tsx", "export const Old = () => null;\n");
    write(root, "components/misc/Thing.tsx", "export const Thing = () => null;\n");
    write(root, "src/Logo.tsx", "export const Logo = () => <img src=\"/l.png\" />;\n");

    let harness = harness_for(root);
    let registry = harness.registry();

    assert!(!registry.is_enabled("source-parseability"));

    let directories = harness.run(registry.get("P003").unwrap()).unwrap();
    let files: Vec<_> = directories.violations.iter().map(|v| v.file.as_str()).collect();
    assert_eq!(files, vec!["components/misc/Thing.tsx"]);

    let images = harness.run(registry.get("P009").unwrap()).unwrap();
    assert_eq!(images.violations.len(), 1);
    assert_eq!(images.violations[0].file, "src/Logo.tsx");
}

#[test]
fn clean_project_holds_every_property() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(
        root,
        "components/ui/Button.tsx",
        r#"import type { ReactNode } from 'react';

interface ButtonProps {
  children: ReactNode;
}

export function Button({ children }: ButtonProps) {
  return <button className="rounded px-4 py-2">{children}</button>;
}
"#,
    );

    let harness = harness_for(root);

    for result in harness.run_all().unwrap() {
        result.assert_holds();
    }
}

#[test]
fn missing_root_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");

    assert!(Project::open(&missing, &Config::default()).is_err());
}
