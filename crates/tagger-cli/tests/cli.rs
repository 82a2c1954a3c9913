use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Command isolated from the user's config file and tokens.
fn tagger(config_home: &tempfile::TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("TAGGER_USER__DEFAULT_REPO")
        .env_remove("GH_TOKEN")
        .env_remove("GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tagger"));
}

#[test]
fn test_help_contains_all_commands() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("issue"))
        .stdout(predicate::str::contains("label"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("prompt"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("completion"));
}

#[test]
fn test_issue_help_lists_queries() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.args(["issue", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unprocessed"))
        .stdout(predicate::str::contains("rank"))
        .stdout(predicate::str::contains("snapshot"));
}

#[test]
fn test_no_args_shows_help() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_invalid_command() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.arg("triage").assert().failure().code(2);
}

#[test]
fn test_invalid_output_format() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.args(["--output", "xml", "auth", "status"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_label_add_requires_target() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.args(["label", "add", "Pipeline:Triage"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("required"));
}

#[test]
fn test_label_add_all_conflicts_with_milestone() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.args([
        "label",
        "add",
        "Pipeline:Triage",
        "--all",
        "--milestone",
        "Sprint 42",
    ])
    .assert()
    .failure()
    .code(2);
}

#[test]
fn test_completion_generate_bash() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.args(["completion", "generate", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tagger"));
}

#[test]
fn test_completion_generate_zsh() {
    let mut cmd = cargo_bin_cmd!("tagger");
    cmd.args(["completion", "generate", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("compdef").or(predicate::str::contains("_tagger")));
}

#[test]
fn test_missing_repository_is_reported() {
    let home = tempfile::tempdir().unwrap();
    tagger(&home)
        .args(["issue", "unprocessed"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No repository selected"))
        .stderr(predicate::str::contains("default_repo"));
}

#[test]
fn test_invalid_repository_is_reported() {
    let home = tempfile::tempdir().unwrap();
    tagger(&home)
        .args(["report", "areas", "--repo", "NuGet"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid repository 'NuGet'"));
}

#[test]
fn test_invalid_config_is_reported() {
    let home = tempfile::tempdir().unwrap();
    let dir = home.path().join("tagger");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("config.toml"), "[bulk]\nconcurrency = \"many\"\n").unwrap();

    tagger(&home)
        .args(["label", "list", "--repo", "NuGet/Home"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"));
}

#[test]
fn test_auth_status_json_reports_flag_source() {
    let home = tempfile::tempdir().unwrap();
    let output = tagger(&home)
        .env("TAGGER_GITHUB__API_TIMEOUT_SECONDS", "2")
        .args(["auth", "status", "--pat", "ghp_not_a_real_token", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)
        .expect("auth status --output json should produce valid JSON");
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["method"], "flag");
}
