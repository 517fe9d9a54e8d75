#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Filesystem round trips through `remediate_with`.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vulnfix_rules::{RuleConfig, RuleId};
use vulnfixc::{remediate, remediate_with, Config, DriverError, UnparsablePolicy};

const JOB: &str = "package com.acme;\n\npublic class Job {\n    public void run() {\n        System.out.println(\"Starting job\");\n    }\n}\n";

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

fn tree() -> (TempDir, TempDir) {
    let source = TempDir::new().unwrap();
    write(source.path(), "com/acme/Job.java", JOB);
    write(source.path(), "com/acme/Broken.java", "class {\n");
    write(source.path(), "README.md", "# docs\n");
    (source, TempDir::new().unwrap())
}

#[test]
fn java_files_land_at_mirrored_paths() {
    let (source, target) = tree();
    let summary = remediate(source.path(), target.path()).unwrap();

    let out = fs::read_to_string(target.path().join("com/acme/Job.java")).unwrap();
    assert!(out.contains("log.info(CONST_STARTING_JOB);"));
    assert!(out.contains("public static final String CONST_STARTING_JOB = \"Starting job\";"));
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.rules.count(RuleId::ConsoleRedirect), 1);
    assert_eq!(summary.rules.constants_added, 1);
}

#[test]
fn unparsable_files_are_skipped_by_default() {
    let (source, target) = tree();
    let summary = remediate(source.path(), target.path()).unwrap();

    assert!(!target.path().join("com/acme/Broken.java").exists());
    assert!(!target.path().join("README.md").exists());
    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_copied, 0);
    assert!(!summary.is_clean());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].stage, "parse");
    assert_eq!(
        summary.failures[0].path,
        Path::new("com").join("acme").join("Broken.java")
    );
}

#[test]
fn copy_policies_pass_files_through() {
    let (source, target) = tree();
    let config = Config {
        unparsable: UnparsablePolicy::Copy,
        copy_other: true,
        ..Config::default()
    };
    let summary = remediate_with(source.path(), target.path(), &config).unwrap();

    assert_eq!(
        fs::read_to_string(target.path().join("com/acme/Broken.java")).unwrap(),
        "class {\n"
    );
    assert_eq!(
        fs::read_to_string(target.path().join("README.md")).unwrap(),
        "# docs\n"
    );
    assert_eq!(summary.files_processed, 1);
    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_copied, 2);
}

#[test]
fn dedicated_pool_gives_the_same_output() {
    let source = TempDir::new().unwrap();
    for n in 0..8 {
        write(
            source.path(),
            &format!("pkg{}/Job{n}.java", n % 3),
            &JOB.replace("Job", &format!("Job{n}")),
        );
    }
    let shared = TempDir::new().unwrap();
    let pooled = TempDir::new().unwrap();
    remediate(source.path(), shared.path()).unwrap();
    let config = Config {
        jobs: Some(2),
        ..Config::default()
    };
    let summary = remediate_with(source.path(), pooled.path(), &config).unwrap();

    assert_eq!(summary.files_processed, 8);
    for n in 0..8 {
        let relative = format!("pkg{}/Job{n}.java", n % 3);
        assert_eq!(
            fs::read_to_string(pooled.path().join(&relative)).unwrap(),
            fs::read_to_string(shared.path().join(&relative)).unwrap()
        );
    }
}

#[test]
fn disabled_rules_are_honored() {
    let (source, target) = tree();
    let config = Config {
        rules: RuleConfig::default().disable(RuleId::ConsoleRedirect),
        ..Config::default()
    };
    let summary = remediate_with(source.path(), target.path(), &config).unwrap();

    let out = fs::read_to_string(target.path().join("com/acme/Job.java")).unwrap();
    assert!(!out.contains("CONST_STARTING_JOB"));
    assert!(out.contains("log.info(\"Starting job\");"));
    assert_eq!(summary.rules.count(RuleId::ConsoleRedirect), 0);
    assert_eq!(summary.rules.count(RuleId::ResidualConsole), 1);
}

#[test]
fn output_can_be_remediated_again_unchanged() {
    let (source, first) = tree();
    remediate(source.path(), first.path()).unwrap();
    let second = TempDir::new().unwrap();
    let summary = remediate(first.path(), second.path()).unwrap();

    assert_eq!(
        fs::read_to_string(second.path().join("com/acme/Job.java")).unwrap(),
        fs::read_to_string(first.path().join("com/acme/Job.java")).unwrap()
    );
    assert_eq!(summary.rules.total_rewrites(), 0);
}

#[test]
fn report_is_json() {
    let (source, target) = tree();
    let summary = remediate(source.path(), target.path()).unwrap();
    let report = target.path().join("report.json");
    summary.write_report(&report).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(json["files_processed"], 1);
    assert_eq!(json["files_failed"], 1);
    assert_eq!(json["rules"]["rewrites"]["console-redirect"], 1);
    assert_eq!(json["failures"][0]["stage"], "parse");
}

#[test]
fn missing_source_root_is_an_error() {
    let target = TempDir::new().unwrap();
    let missing = target.path().join("nope");
    assert!(matches!(
        remediate(&missing, target.path()),
        Err(DriverError::SourceRoot { .. })
    ));
}

#[test]
fn file_as_source_root_is_an_error() {
    let (source, target) = tree();
    let file = source.path().join("README.md");
    assert!(matches!(
        remediate(&file, target.path()),
        Err(DriverError::NotADirectory(_))
    ));
}
