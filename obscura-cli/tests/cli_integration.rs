//! CLI integration tests for obscura-cli.
//!
//! These tests verify the CLI behavior by running the actual binary
//! and checking outputs, exit codes, and file artifacts. Everything here
//! runs offline: registry-dependent paths are exercised against an
//! unreachable endpoint, and anchoring uses --dry-run.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use obscura_core::{commitment_digest, content_digest, Secret, Word};

/// Get a Command for the obscura binary.
fn obscura() -> Command {
    let mut cmd = Command::cargo_bin("obscura").unwrap();
    // Keep ambient configuration out of the tests
    cmd.env_remove("REGISTRY_URL").env_remove("OBSCURA_OWNER");
    cmd
}

/// Commit a fixture photo and return its receipt path.
fn commit_fixture(temp: &TempDir, content: &[u8]) -> std::path::PathBuf {
    let photo = temp.path().join("photo.jpg");
    fs::write(&photo, content).unwrap();

    obscura()
        .args(["commit", photo.to_str().unwrap()])
        .assert()
        .success();

    temp.path().join("photo.jpg.attest")
}

fn read_receipt(path: &Path) -> Value {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_displays_usage() {
    obscura()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Photo provenance attestation"))
        .stdout(predicate::str::contains("commit"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("prove"))
        .stdout(predicate::str::contains("anchor"));
}

#[test]
fn test_version_displays_version() {
    obscura()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("obscura"));
}

#[test]
fn test_help_shows_exit_codes() {
    obscura()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exit codes:"))
        .stdout(predicate::str::contains("65"))
        .stdout(predicate::str::contains("66"));
}

#[test]
fn test_commit_help_shows_options() {
    obscura()
        .args(["commit", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
}

#[test]
fn test_prove_help_shows_options() {
    obscura()
        .args(["prove", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--local"))
        .stdout(predicate::str::contains("--registry-url"));
}

#[test]
fn test_anchor_help_shows_options() {
    obscura()
        .args(["anchor", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--update-receipt"))
        .stdout(predicate::str::contains("--dry-run"));
}

// ============================================================================
// Commit Tests
// ============================================================================

#[test]
fn test_missing_file_returns_input_error() {
    // Exit code 66 = EX_NOINPUT
    obscura()
        .args(["commit", "nonexistent_photo.jpg"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn test_commit_creates_receipt_with_valid_binding() {
    let temp = TempDir::new().unwrap();
    let content = b"fake jpeg bytes for committing";
    let receipt_path = commit_fixture(&temp, content);

    assert!(receipt_path.exists(), "receipt file should be created");
    let receipt = read_receipt(&receipt_path);

    assert_eq!(receipt["version"], 1);

    // The receipt's hash is the keccak digest of the file bytes
    let expected_hash = content_digest(content);
    assert_eq!(receipt["photo_hash"], expected_hash.to_hex());

    // And the commitment opens with the stored secret
    let secret = Secret::from_hex(receipt["secret"].as_str().unwrap()).unwrap();
    let committed = Word::from_hex(receipt["commitment"].as_str().unwrap()).unwrap();
    assert_eq!(
        commitment_digest(&expected_hash, &secret.reveal()),
        committed
    );
}

#[test]
fn test_commit_refuses_to_overwrite_receipt() {
    let temp = TempDir::new().unwrap();
    let content = b"photo";
    let receipt_path = commit_fixture(&temp, content);
    let original = fs::read_to_string(&receipt_path).unwrap();

    let photo = temp.path().join("photo.jpg");
    obscura()
        .args(["commit", photo.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    // Untouched without --force
    assert_eq!(fs::read_to_string(&receipt_path).unwrap(), original);

    // --force replaces the receipt (and its secret)
    obscura()
        .args(["commit", photo.to_str().unwrap(), "--force"])
        .assert()
        .success();
    assert_ne!(fs::read_to_string(&receipt_path).unwrap(), original);
}

// ============================================================================
// Prove Tests
// ============================================================================

#[test]
fn test_prove_local_passes_for_intact_receipt() {
    let temp = TempDir::new().unwrap();
    let receipt_path = commit_fixture(&temp, b"intact photo");

    obscura()
        .args(["prove", receipt_path.to_str().unwrap(), "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Local check passed"));
}

#[test]
fn test_prove_local_fails_for_tampered_secret() {
    let temp = TempDir::new().unwrap();
    let receipt_path = commit_fixture(&temp, b"photo to tamper with");

    // Corrupt the secret in place
    let mut receipt = read_receipt(&receipt_path);
    receipt["secret"] = Value::String(hex::encode([0x99u8; 32]));
    fs::write(&receipt_path, receipt.to_string()).unwrap();

    // Exit code 65 = EX_DATAERR
    obscura()
        .args(["prove", receipt_path.to_str().unwrap(), "--local"])
        .assert()
        .code(65)
        .stderr(predicate::str::contains("does not open"));
}

#[test]
fn test_missing_receipt_returns_input_error() {
    obscura()
        .args(["prove", "nonexistent.attest", "--local"])
        .assert()
        .code(66)
        .stderr(predicate::str::contains("Failed to read receipt"));
}

#[test]
fn test_corrupt_receipt_is_rejected() {
    let temp = TempDir::new().unwrap();
    let receipt_path = temp.path().join("garbage.attest");
    fs::write(&receipt_path, b"not json at all").unwrap();

    obscura()
        .args(["prove", receipt_path.to_str().unwrap(), "--local"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse receipt"));
}

// ============================================================================
// Registry-Facing Tests (offline)
// ============================================================================

#[test]
fn test_register_against_unreachable_registry_is_network_error() {
    let temp = TempDir::new().unwrap();
    let receipt_path = commit_fixture(&temp, b"photo for registration");

    // Exit code 69 = EX_UNAVAILABLE; port 9 (discard) refuses quickly
    obscura()
        .args([
            "register",
            receipt_path.to_str().unwrap(),
            "--owner",
            &hex::encode([0x42u8; 20]),
            "--registry-url",
            "http://127.0.0.1:9",
        ])
        .assert()
        .code(69)
        .stderr(predicate::str::contains("Failed to reach registry"));
}

#[test]
fn test_register_rejects_malformed_owner() {
    let temp = TempDir::new().unwrap();
    let receipt_path = commit_fixture(&temp, b"photo");

    obscura()
        .args([
            "register",
            receipt_path.to_str().unwrap(),
            "--owner",
            "not-an-address",
            "--registry-url",
            "http://127.0.0.1:9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid owner address"));
}

#[test]
fn test_status_with_bad_target_fails() {
    obscura()
        .args(["status", "zzzz", "--registry-url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("neither"));
}

// ============================================================================
// Anchor Tests (offline)
// ============================================================================

#[test]
fn test_anchor_dry_run_prints_memo() {
    let temp = TempDir::new().unwrap();
    let receipt_path = commit_fixture(&temp, b"photo to anchor");
    let receipt = read_receipt(&receipt_path);

    let expected_memo = format!(
        "OBSCURA:{}:{}",
        receipt["photo_hash"].as_str().unwrap(),
        receipt["commitment"].as_str().unwrap()
    );

    obscura()
        .args(["anchor", receipt_path.to_str().unwrap(), "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains(&expected_memo));
}
