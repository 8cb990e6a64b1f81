//! Library integration tests.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use hgd_validate::checks::{catalog, Check, CheckOutcome, CheckResult, Severity};
use hgd_validate::config::ValidatorConfig;
use hgd_validate::runner::{CheckGroup, ValidationRunner};
use hgd_validate::ui::{ConsoleReporter, RecordingReporter, Reporter, ValidateTheme};
use hgd_validate::ValidateError;

#[test]
fn error_types_are_public() {
    let err = ValidateError::MissingTool {
        tool: "ffmpeg".into(),
    };
    assert!(err.to_string().contains("ffmpeg"));

    let err = ValidateError::Timeout {
        command: "cmake --version".into(),
        timeout: Duration::from_secs(5),
    };
    assert!(err.to_string().contains("5s"));
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> hgd_validate::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn cli_types_are_public() {
    use clap::Parser;
    use hgd_validate::cli::Cli;

    assert!(Cli::try_parse_from(["hgd-validate"]).is_ok());
}

#[test]
fn all_required_passing_is_success() {
    let groups = vec![
        CheckGroup::new("Interpreter")
            .with_check(Check::required("Python version", || {
                CheckOutcome::pass("Python 3.11.4")
            })),
        CheckGroup::gated("Extension").with_check(Check::advisory("C++ extension", || {
            CheckOutcome::fail("not built")
        })),
        CheckGroup::new("Tools")
            .with_check(Check::advisory("CMake", || CheckOutcome::fail("missing"))),
    ];

    let mut reporter = RecordingReporter::new();
    let report = ValidationRunner::new("Test").run(&groups, &mut reporter);

    assert!(report.verdict());
    assert_eq!(report.exit_code(), 0);
    assert_eq!(report.failed_advisory(), vec!["C++ extension", "CMake"]);
    assert!(report.skipped().is_empty());
}

#[test]
fn required_failure_skips_later_gated_groups() {
    let gated_ran = Rc::new(Cell::new(false));
    let flag = Rc::clone(&gated_ran);

    let groups = vec![
        CheckGroup::new("Packages")
            .with_check(Check::required("numpy", || CheckOutcome::pass("ok")))
            .with_check(Check::required("scipy", || {
                CheckOutcome::fail("scipy is NOT installed")
            })),
        CheckGroup::gated("Simulation").with_check(Check::required("Minimal simulation", move || {
            flag.set(true);
            CheckOutcome::pass("ran")
        })),
        CheckGroup::new("Tools")
            .with_check(Check::advisory("ffmpeg", || CheckOutcome::pass("ok"))),
    ];

    let mut reporter = RecordingReporter::new();
    let report = ValidationRunner::new("Test").run(&groups, &mut reporter);

    assert!(!gated_ran.get());
    assert_eq!(reporter.groups(), vec!["Packages", "Tools"]);
    assert_eq!(report.skipped(), ["Simulation"]);
    assert_eq!(report.failed_required(), vec!["scipy"]);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn panicking_check_is_recorded_as_failure() {
    let groups = vec![CheckGroup::new("Broken").with_check(Check::required("explodes", || -> CheckOutcome {
        panic!("probe blew up")
    }))];

    let mut reporter = RecordingReporter::new();
    let report = ValidationRunner::new("Test").run(&groups, &mut reporter);

    let result: &CheckResult = &report.results()[0];
    assert!(!result.passed());
    assert!(result.message().contains("probe blew up"));
    assert!(!report.verdict());
}

#[test]
fn console_report_renders_run() {
    let groups = vec![CheckGroup::new("Checking required Python packages")
        .with_icon("📦")
        .with_check(Check::required("numpy", || {
            CheckOutcome::pass("numpy is installed")
        }))];

    let mut reporter = ConsoleReporter::new(Vec::new(), ValidateTheme::plain());
    let report = ValidationRunner::new(catalog::TITLE).run(&groups, &mut reporter);
    reporter.summary(report.verdict());

    let text = String::from_utf8(reporter.into_inner()).unwrap();
    assert!(text.contains("  HGD Installation Validation\n"));
    assert!(text.contains("📦 Checking required Python packages...\n"));
    assert!(text.contains("✓ PASS - numpy\n      numpy is installed\n"));
    assert!(text.contains("SUCCESS!"));
}

#[test]
fn catalog_is_built_from_config() {
    let config = ValidatorConfig::from_env_with(|key: &str| match key {
        "HGD_PYTHON" => Ok("/opt/venv/bin/python".to_string()),
        _ => Err(std::env::VarError::NotPresent),
    })
    .unwrap();

    let groups = catalog::hgd_groups(&config);
    assert_eq!(groups.len(), 6);

    let severities: Vec<Severity> = groups
        .iter()
        .flat_map(|g| g.checks())
        .map(|c| c.severity())
        .collect();
    assert_eq!(
        severities.iter().filter(|s| s.is_required()).count(),
        1 + catalog::REQUIRED_MODULES.len() + 1 + 1
    );
}
