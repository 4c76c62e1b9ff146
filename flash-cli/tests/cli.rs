// Copyright 2025, Flash Contracts Developers.
// Licensed under either of MIT or Apache-2.0 at your option.

//! Command line behavior that needs no running node.

use std::{fs, path::PathBuf};

use assert_cmd::Command;

const DEV_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

fn fixtures() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn flash() -> Command {
    let mut cmd = Command::cargo_bin("flash").unwrap();
    cmd.current_dir(fixtures()).arg("--config").arg(fixtures().join("Flash.toml"));
    cmd
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn unknown_artifact_fails_without_output() {
    let output = flash().args(["deploy", "Missing"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("artifact not found"), "{}", stderr(&output));
}

#[test]
fn artifacts_dir_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = flash()
        .args(["deploy", "ERC20FlashTest", "--artifacts"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("artifact not found"));
}

#[test]
fn constructor_argument_mismatch_fails() {
    let output = flash()
        .args(["deploy", "ERC20FlashTest", "--constructor-args"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(
        stderr(&output).contains("mismatch number of constructor arguments"),
        "{}",
        stderr(&output)
    );
}

#[test]
fn unreachable_endpoint_fails_before_printing() {
    let output = flash()
        .args(["deploy", "ERC20FlashTest", "--endpoint", "http://127.0.0.1:1"])
        .args(["--private-key", DEV_PRIVATE_KEY])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("error"));
}

#[test]
fn zero_confirmations_rejected() {
    let output = flash()
        .args(["deploy", "ERC20FlashTest", "--confirmations", "0"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("--confirmations"), "{}", stderr(&output));
}

#[test]
fn unknown_network_fails() {
    let output = flash()
        .args(["deploy", "ERC20FlashTest", "--network", "mainnet"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("mainnet"));
}

#[test]
fn missing_secret_fails_config_load() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("Flash.toml");
    fs::write(
        &config,
        r#"
        [networks.kovan]
        url = "https://kovan.infura.io/v3/${FLASH_TEST_INFURA_KEY}"
        "#,
    )
    .unwrap();

    let output = Command::cargo_bin("flash")
        .unwrap()
        .env_remove("FLASH_TEST_INFURA_KEY")
        .arg("--config")
        .arg(&config)
        .arg("networks")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr(&output).contains("FLASH_TEST_INFURA_KEY"));
}

#[test]
fn duplicate_network_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("Flash.toml");
    fs::write(
        &config,
        r#"
        [networks.kovan]
        url = "http://127.0.0.1:8545"

        [networks.kovan]
        url = "http://127.0.0.1:8546"
        "#,
    )
    .unwrap();

    let output = Command::cargo_bin("flash")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg("networks")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn lists_networks() {
    let output = flash().arg("networks").output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("  coverage"));
    assert!(lines[1].starts_with("* localhost"));
}

#[test]
fn writes_bindings() {
    let dir = tempfile::tempdir().unwrap();
    let output = flash()
        .args(["bindings", "ERC20FlashTest", "--target", "solidity", "--out-dir"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let path = dir.path().join("IERC20FlashTest.sol");
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        path.display().to_string()
    );
    let source = fs::read_to_string(path).unwrap();
    assert!(source.contains("pragma solidity ^0.6.8;"));
    assert!(source.contains("interface ERC20FlashTest"));
}
