//! End-to-end tests for the riskmap binary.

use assert_cmd::Command;
use predicates::prelude::*;
use riskmap::io::{load_register, save_register};
use riskmap::register::{RiskId, ScoringPolicy};
use riskmap::testkit::scenario_register;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn riskmap(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("riskmap").unwrap();
    cmd.current_dir(dir)
        .env_remove("RISKMAP_REGISTER")
        .env_remove("RUST_LOG");
    cmd
}

/// Temp dir holding the three-risk, three-modality scenario register.
fn scenario_dir() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("risk-register.json");
    save_register(&path, &scenario_register()).unwrap();
    (temp_dir, path)
}

#[test]
fn test_cli_help() {
    let temp_dir = TempDir::new().unwrap();
    riskmap(temp_dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("contracting-modality"))
        .stdout(predicate::str::contains("evaluate"));
}

#[test]
fn test_init_creates_config_and_register() {
    let temp_dir = TempDir::new().unwrap();
    riskmap(temp_dir.path())
        .args(["init", "--project", "Regional HQ"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with 6 modalities"));
    assert!(temp_dir.path().join(".riskmap.toml").exists());

    riskmap(temp_dir.path())
        .args(["modality", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Build to Suit (federal land)"));

    riskmap(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn test_init_checks_register_before_writing_config() {
    let (temp_dir, path) = scenario_dir();
    let before = fs::read_to_string(&path).unwrap();
    riskmap(temp_dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    assert!(!temp_dir.path().join(".riskmap.toml").exists());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    // An existing config does not block creating a missing register
    let config = "[output]\ndefault_format = \"json\"\n";
    fs::write(temp_dir.path().join(".riskmap.toml"), config).unwrap();
    fs::remove_file(&path).unwrap();
    riskmap(temp_dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Keeping existing"));
    assert!(path.exists());
    let kept = fs::read_to_string(temp_dir.path().join(".riskmap.toml")).unwrap();
    assert_eq!(kept, config);
}

#[test]
fn test_risk_lifecycle() {
    let (temp_dir, path) = scenario_dir();
    riskmap(temp_dir.path())
        .args([
            "risk",
            "add",
            "--name",
            "Legal challenge",
            "--impact",
            "very_high",
            "--likelihood",
            "2",
            "--impact-justification",
            "Works may halt",
            "--likelihood-justification",
            "Solid legal basis",
            "--factor",
            "A=0.5",
            "--factor",
            "B=0.5",
            "--factor",
            "C=1",
            "--note",
            "B=Model already tested in court",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered risk R4: inherent risk 20.0 (Medium)"));

    riskmap(temp_dir.path())
        .args(["risk", "edit", "R4", "--impact", "low"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inherent risk 4.0 (Low)"));

    let register = load_register(&path, ScoringPolicy::default()).unwrap();
    let risk = register.risk(RiskId(4)).unwrap();
    assert_eq!(risk.inherent_risk, 4.0);
    let notes: Vec<&str> = risk
        .mitigation
        .values()
        .map(|m| m.justification.as_str())
        .collect();
    assert!(notes.contains(&"Model already tested in court"));

    riskmap(temp_dir.path())
        .args(["risk", "remove", "4"])
        .assert()
        .success();
    riskmap(temp_dir.path())
        .args(["risk", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deadline"))
        .stdout(predicate::str::contains("Legal challenge").not());
}

#[test]
fn test_failed_command_leaves_file_untouched() {
    let (temp_dir, path) = scenario_dir();
    let before = fs::read_to_string(&path).unwrap();

    riskmap(temp_dir.path())
        .args([
            "risk",
            "add",
            "--name",
            "Incomplete",
            "--impact",
            "high",
            "--likelihood",
            "high",
            "--impact-justification",
            "i",
            "--likelihood-justification",
            "p",
            "--factor",
            "A=0.5",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E050]"))
        .stderr(predicate::str::contains("B, C"));

    riskmap(temp_dir.path())
        .args(["reassess", "--factor", "A=0.2", "--factor", "B=1.4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E050]"));

    riskmap(temp_dir.path())
        .args(["modality", "add", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E051]"));

    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn test_note_without_matching_factor_is_rejected() {
    let (temp_dir, path) = scenario_dir();
    let before = fs::read_to_string(&path).unwrap();
    let add = |note: &str| {
        let mut cmd = riskmap(temp_dir.path());
        cmd.args([
            "risk",
            "add",
            "--name",
            "Legal challenge",
            "--impact",
            "high",
            "--likelihood",
            "low",
            "--impact-justification",
            "i",
            "--likelihood-justification",
            "p",
            "--factor",
            "A=0.5",
            "--factor",
            "B=0.5",
            "--factor",
            "C=1",
            "--note",
            note,
        ]);
        cmd
    };

    add("Typo=guarantees")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E052]"))
        .stderr(predicate::str::contains("Typo"));
    assert_eq!(fs::read_to_string(&path).unwrap(), before);

    add("B=guarantees").assert().success();
    let register = load_register(&path, ScoringPolicy::default()).unwrap();
    assert_eq!(register.risks().len(), 4);
}

#[test]
fn test_modality_management() {
    let (temp_dir, path) = scenario_dir();
    riskmap(temp_dir.path())
        .args(["modality", "add", "D"])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 existing risks received factor 1.00"));
    riskmap(temp_dir.path())
        .args(["modality", "rename", "D", "Payment in kind"])
        .assert()
        .success();
    riskmap(temp_dir.path())
        .args(["modality", "remove", "A"])
        .assert()
        .success();

    let register = load_register(&path, ScoringPolicy::default()).unwrap();
    assert_eq!(
        register.modalities().names(),
        vec!["B", "C", "Payment in kind"]
    );
    register.check_invariants().unwrap();
}

#[test]
fn test_reassess_and_project() {
    let (temp_dir, path) = scenario_dir();
    riskmap(temp_dir.path())
        .args(["reassess", "--factor", "C=0", "--factor", "A=1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reassessed 2 modalities across 3 risks"));
    riskmap(temp_dir.path())
        .args(["project", "--name", "Annex"])
        .assert()
        .success();

    let register = load_register(&path, ScoringPolicy::default()).unwrap();
    assert_eq!(register.project_name(), "Annex");
    assert_eq!(register.ranking().order(), vec!["C", "B", "A"]);
}

#[test]
fn test_evaluate_json_output_file() {
    let (temp_dir, _) = scenario_dir();
    let output = temp_dir.path().join("report.json");
    riskmap(temp_dir.path())
        .args(["evaluate", "--format", "json", "--output"])
        .arg(&output)
        .assert()
        .success();

    let json: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["summary"]["project_name"], "Regional HQ");
    assert_eq!(json["summary"]["best_modality"], "B");
    assert_eq!(json["ranking"]["entries"][2]["modality_name"], "C");
    assert_eq!(json["ranking"]["entries"][2]["is_least_recommended"], true);
}

#[test]
fn test_evaluate_markdown_and_terminal() {
    let (temp_dir, _) = scenario_dir();
    fs::write(
        temp_dir.path().join(".riskmap.toml"),
        "[report]\nanalyst = \"J. Silva\"\n",
    )
    .unwrap();

    riskmap(temp_dir.path())
        .args(["evaluate", "--format", "markdown"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "# Risk Assessment Report: Regional HQ",
        ))
        .stdout(predicate::str::contains("Analyst: J. Silva"))
        .stdout(predicate::str::contains("## Modality Ranking"));

    riskmap(temp_dir.path())
        .args(["evaluate", "--plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recommended: B (total residual 22.0)"));
}

#[test]
fn test_missing_register_reports_path() {
    let temp_dir = TempDir::new().unwrap();
    riskmap(temp_dir.path())
        .args(["--register", "nowhere.json", "risk", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nowhere.json"));
}

#[test]
fn test_catalog_listing() {
    let temp_dir = TempDir::new().unwrap();
    riskmap(temp_dir.path())
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("Delivery deadline missed"))
        .stdout(predicate::str::contains("Poor quality of delivered services"));
    riskmap(temp_dir.path())
        .args(["catalog", "--name", "Nonexistent"])
        .assert()
        .failure();
}
