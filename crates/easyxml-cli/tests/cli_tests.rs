// Dweve EasyXML - Path-Keyed Streaming XML Dispatch
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn easyxml_cmd() -> Command {
    Command::cargo_bin("easyxml").expect("Failed to find easyxml binary")
}

fn catalog_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../easyxml/tests/fixtures/cd_catalog.xml")
}

fn create_temp_file(content: &str) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".xml")
        .tempfile()
        .expect("Failed to create temp file");
    fs::write(file.path(), content).expect("Failed to write temp file");
    file
}

// ===== Help and Version Tests =====

#[test]
fn test_help_output() {
    easyxml_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("path-keyed streaming XML dispatch"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_no_subcommand_fails() {
    easyxml_cmd().assert().failure();
}

// ===== Catalog Command Tests =====

#[test]
fn test_catalog_fixture_as_json() {
    let output = easyxml_cmd()
        .arg("catalog")
        .arg(catalog_fixture())
        .output()
        .expect("Failed to run easyxml");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    let cds = json["cds"].as_array().expect("cds array");
    assert_eq!(cds.len(), 26);
    assert_eq!(cds[0]["title"], "Empire Burlesque");
    assert_eq!(cds[0]["artist"], "Bob Dylan");
    assert_eq!(cds[0]["price"], 10.9);
    assert_eq!(cds[0]["year"], 1985);
    assert_eq!(cds[25]["title"], "Unchain my heart");
}

#[test]
fn test_catalog_pretty() {
    let file = create_temp_file("<catalog><cd><title>Eros</title><year>1997</year></cd></catalog>");

    easyxml_cmd()
        .arg("catalog")
        .arg(file.path())
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("\n    {\n"))
        .stdout(predicate::str::contains("\"title\": \"Eros\""))
        .stdout(predicate::str::contains("\"year\": 1997"));
}

#[test]
fn test_catalog_malformed_file() {
    let file = create_temp_file("<catalog><cd></catalog>");

    easyxml_cmd()
        .arg("catalog")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: XML error:"))
        .stderr(predicate::str::contains(".xml"));
}

#[test]
fn test_catalog_missing_file() {
    easyxml_cmd()
        .arg("catalog")
        .arg("no-such-catalog.xml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: could not read XML input no-such-catalog.xml"));
}

// ===== Bench Command Tests =====

#[test]
fn test_bench_report() {
    easyxml_cmd()
        .arg("bench")
        .arg(catalog_fixture())
        .arg("--iterations")
        .arg("3")
        .assert()
        .success()
        .stdout(predicate::str::contains("times in"))
        .stdout(predicate::str::contains("Total content parsed:"))
        .stdout(predicate::str::contains("Average throughput:"));
}

#[test]
fn test_bench_zero_iterations() {
    easyxml_cmd()
        .args(["bench", "whatever.xml", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("iterations must be at least 1"));
}

// ===== Logging Tests =====

#[test]
fn test_verbose_logs_to_stderr() {
    let file = create_temp_file("<catalog><cd><title>Eros</title></cd></catalog>");

    easyxml_cmd()
        .env_remove("RUST_LOG")
        .arg("-vv")
        .arg("catalog")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"Eros\""))
        .stderr(predicate::str::contains("entering child scope"));
}

#[test]
fn test_quiet_by_default() {
    let file = create_temp_file("<catalog/>");

    easyxml_cmd()
        .env_remove("RUST_LOG")
        .arg("catalog")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"cds\":[]}"))
        .stderr(predicate::str::is_empty());
}
