//! Run contracts exercised through `sh -c` feature scripts.
#![cfg(unix)]

mod common;

use common::TestContext;
use predicates::prelude::*;

fn three_features(ctx: &TestContext, middle_install: &str) {
    ctx.write_shell_feature("01-a.toml", "name = \"A\"", None, "touch ran-a");
    ctx.write_shell_feature("02-b.toml", "name = \"B\"", None, middle_install);
    ctx.write_shell_feature("03-c.toml", "name = \"C\"", None, "touch ran-c");
}

#[test]
fn all_features_succeed() {
    let ctx = TestContext::new();
    three_features(&ctx, "touch ran-b");

    ctx.cli()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Summary: 3 succeeded, 0 failed, 0 skipped (3 total)"));

    assert!(ctx.marker_exists("ran-a") && ctx.marker_exists("ran-b") && ctx.marker_exists("ran-c"));
}

#[test]
fn failure_continues_by_default() {
    let ctx = TestContext::new();
    three_features(&ctx, "echo disk busy >&2; exit 1");

    ctx.cli()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("❌ b (B): install ended with exit status 1: disk busy"))
        .stdout(predicate::str::contains("Summary: 2 succeeded, 1 failed, 0 skipped (3 total)"));

    assert!(ctx.marker_exists("ran-c"));
}

#[test]
fn failure_stops_run_when_continue_disabled() {
    let ctx = TestContext::new();
    three_features(&ctx, "exit 1");

    ctx.cli()
        .args(["--continue-on-error", "false"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary: 1 succeeded, 1 failed, 1 skipped (3 total)"))
        .stdout(predicate::str::contains("c (C): Not attempted"));

    assert!(!ctx.marker_exists("ran-c"));
}

#[test]
fn unmet_prerequisites_skip_install() {
    let ctx = TestContext::new();
    ctx.write_shell_feature(
        "01-storage-spaces.toml",
        "name = \"Storage Spaces\"",
        Some("echo Only one data disk attached; echo Not running elevated"),
        "touch ran",
    );

    ctx.cli().assert().code(1).stdout(predicate::str::contains(
        "Prerequisites not met: Only one data disk attached; Not running elevated",
    ));

    assert!(!ctx.marker_exists("ran"));
}

#[test]
fn dry_run_invokes_no_feature_logic() {
    let ctx = TestContext::new();
    ctx.write_shell_feature("01-a.toml", "", Some("touch checked"), "touch ran");
    ctx.write_shell_feature("02-b.toml", "", None, "exit 1");

    ctx.cli()
        .arg("--dry-run")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains("0 succeeded, 0 failed, 2 skipped"));

    assert!(!ctx.marker_exists("checked"));
    assert!(!ctx.marker_exists("ran"));
}

#[test]
fn include_and_exclude_select_features() {
    let ctx = TestContext::new();
    three_features(&ctx, "touch ran-b");

    ctx.cli().args(["--include", "C,a", "--exclude", "missing"]).assert().code(0);

    assert!(ctx.marker_exists("ran-a"));
    assert!(!ctx.marker_exists("ran-b"));
    assert!(ctx.marker_exists("ran-c"));
}

#[test]
fn exclude_skips_feature() {
    let ctx = TestContext::new();
    three_features(&ctx, "touch ran-b");

    ctx.cli()
        .args(["-x", "b"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("(2 total)"));

    assert!(!ctx.marker_exists("ran-b"));
}

#[test]
fn unknown_include_is_structural_error() {
    let ctx = TestContext::new();
    three_features(&ctx, "true");

    ctx.cli()
        .args(["--include", "office"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Feature 'office' not found. Available: a, b, c"));

    assert!(!ctx.marker_exists("ran-a"));
}

#[test]
fn no_features_is_structural_error() {
    let ctx = TestContext::new();

    ctx.cli().assert().code(2).stderr(predicate::str::contains("No features discovered"));
}

#[test]
fn missing_features_directory_is_structural_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["-d", "elsewhere"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Features directory not found"));
}

#[test]
fn settings_override_only_declared_defaults() {
    let ctx = TestContext::new();
    ctx.write_shell_feature(
        "01-storage-spaces.toml",
        "config_section = \"Storage\"\n\n[defaults]\npool_name = \"DataPool\"\ndrive_letter = \"E\"",
        None,
        "echo \"$VMPREP_CFG_POOL_NAME:$VMPREP_CFG_DRIVE_LETTER:${VMPREP_CFG_INJECTED:-unset}\"",
    );
    ctx.write_config("[Storage]\npool_name = \"DevPool\"\ninjected = \"yes\"\n");

    ctx.cli()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("storage-spaces (01-storage-spaces): DevPool:E:unset"));
}

#[test]
fn yaml_settings_are_supported() {
    let ctx = TestContext::new();
    ctx.write_shell_feature(
        "01-windows-updates.toml",
        "[defaults]\ncategories = [\"Security\"]",
        None,
        "echo \"$VMPREP_CFG_CATEGORIES\"",
    );
    ctx.write_file("settings.yaml", "WindowsUpdates:\n  categories: [Security, Critical]\n");

    ctx.cli()
        .args(["--config", "settings.yaml"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Security,Critical"));
}

#[test]
fn unsupported_value_in_other_section_keeps_overrides() {
    let ctx = TestContext::new();
    ctx.write_shell_feature(
        "01-storage-spaces.toml",
        "config_section = \"Storage\"\n\n[defaults]\npool_name = \"DataPool\"",
        None,
        "echo \"$VMPREP_CFG_POOL_NAME\"",
    );
    ctx.write_config("[Storage]\npool_name = \"Pool01\"\n\n[Telemetry]\nsample_rate = 0.5\n");

    ctx.cli()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("storage-spaces (01-storage-spaces): Pool01"))
        .stderr(predicate::str::contains("sample_rate: float values are not supported"));
}

#[test]
fn colliding_feature_ids_all_run() {
    let ctx = TestContext::new();
    ctx.write_shell_feature("01-sdk.toml", "", None, "touch ran-first");
    ctx.write_shell_feature("09-sdk.toml", "", None, "touch ran-second");

    ctx.cli().assert().code(0).stdout(predicate::str::contains("(2 total)"));

    assert!(ctx.marker_exists("ran-first") && ctx.marker_exists("ran-second"));
}

#[test]
fn malformed_settings_fall_back_to_defaults() {
    let ctx = TestContext::new();
    ctx.write_shell_feature(
        "01-storage.toml",
        "[defaults]\npool_name = \"DataPool\"",
        None,
        "echo \"$VMPREP_CFG_POOL_NAME\"",
    );
    ctx.write_config("[Storage\npool_name = ");

    ctx.cli()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("storage (01-storage): DataPool"))
        .stderr(predicate::str::contains("malformed"));
}

#[test]
fn install_report_data_and_reboot_are_shown() {
    let ctx = TestContext::new();
    ctx.write_shell_feature(
        "01-storage.toml",
        "",
        None,
        r#"echo "{\"success\":true,\"message\":\"Pool created\",\"data\":{\"drive_letter\":\"E\"},\"reboot_required\":true}""#,
    );

    ctx.cli()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("storage (01-storage): Pool created"))
        .stdout(predicate::str::contains("drive_letter = \"E\""))
        .stdout(predicate::str::contains("Reboot required"));
}

#[test]
fn declared_reboot_is_ignored_when_feature_fails() {
    let ctx = TestContext::new();
    ctx.write_shell_feature("01-windows-updates.toml", "requires_reboot = true", None, "exit 2");

    ctx.cli()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Reboot required").not());
}

#[test]
fn enforce_dependencies_marks_dependents_not_run() {
    let ctx = TestContext::new();
    ctx.write_shell_feature("01-storage-spaces.toml", "", None, "exit 1");
    ctx.write_shell_feature(
        "02-source-directory.toml",
        "depends_on = [\"storage-spaces\"]",
        None,
        "touch ran-source",
    );

    ctx.cli()
        .arg("--enforce-dependencies")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Dependency 'storage-spaces' has not completed successfully"));
    assert!(!ctx.marker_exists("ran-source"));

    ctx.cli().assert().code(1);
    assert!(ctx.marker_exists("ran-source"));
}

#[test]
fn json_report_lists_every_selected_feature() {
    let ctx = TestContext::new();
    three_features(&ctx, "exit 1");

    let output = ctx
        .cli()
        .args(["--json", "--continue-on-error", "false"])
        .assert()
        .code(1)
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();

    assert_eq!(json["success_count"], 1);
    assert_eq!(json["failure_count"], 1);
    assert_eq!(json["skipped_count"], 1);
    let outcomes: Vec<&str> = json["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["outcome"].as_str().unwrap())
        .collect();
    assert_eq!(outcomes, vec!["success", "failure", "not_run"]);
}

#[test]
fn missing_install_command_fails_only_that_feature() {
    let ctx = TestContext::new();
    ctx.write_feature("01-incomplete.toml", "name = \"Incomplete\"\n");
    ctx.write_shell_feature("02-b.toml", "", None, "touch ran-b");

    ctx.cli()
        .assert()
        .code(1)
        .stdout(predicate::str::contains("does not declare an install command"));

    assert!(ctx.marker_exists("ran-b"));
}

#[test]
fn log_file_is_appended_across_runs() {
    let ctx = TestContext::new();
    ctx.write_shell_feature("01-a.toml", "", None, "true");

    ctx.cli().args(["--log-file", "logs/vmprep.log"]).assert().code(0);
    let first = ctx.read_file("logs/vmprep.log");
    assert!(first.contains("Running 1 of 1 feature(s)"));

    ctx.cli().args(["--log-file", "logs/vmprep.log"]).assert().code(0);
    let second = ctx.read_file("logs/vmprep.log");
    assert!(second.starts_with(&first));
    assert_eq!(second.matches("Running 1 of 1 feature(s)").count(), 2);
}

#[test]
fn log_settings_come_from_config_document() {
    let ctx = TestContext::new();
    ctx.write_shell_feature("01-a.toml", "", None, "true");
    ctx.write_config("[Logging]\npath = \"from-config.log\"\ntimestamps = false\n");

    ctx.cli().assert().code(0);

    let log = ctx.read_file("from-config.log");
    let first_line = log.lines().next().unwrap();
    assert!(first_line.trim_start().starts_with("INFO"), "unexpected line: {}", first_line);
}
