//
//  cms-client
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs `cms` against an isolated config file with no connection settings
/// inherited from the environment.
fn cms(config_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cms").unwrap();
    cmd.env("CMS_CONFIG", config_dir.path().join("config.toml"))
        .env_remove("CMS_BASE_PATH")
        .env_remove("CMS_PROJECT_ID")
        .env_remove("CMS_TOKEN")
        .env_remove("CMS_TIMEOUT_MS")
        .env_remove("CMS_PROFILE")
        .env_remove("CMS_DEBUG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    cms(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entry"))
        .stdout(predicate::str::contains("asset"))
        .stdout(predicate::str::contains("--base-path"));
}

#[test]
fn test_version() {
    let dir = TempDir::new().unwrap();
    cms(&dir)
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_configuration_exits_with_validation_code() {
    let dir = TempDir::new().unwrap();
    cms(&dir)
        .args(["collection", "list"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("base_path is required"))
        .stderr(predicate::str::contains("project_id is required"));
}

#[test]
fn test_config_set_then_get() {
    let dir = TempDir::new().unwrap();
    cms(&dir)
        .args(["config", "set", "project_id", "p-42"])
        .assert()
        .success();

    cms(&dir)
        .args(["config", "get", "project_id"])
        .assert()
        .success()
        .stdout("p-42\n");

    cms(&dir)
        .args(["config", "set", "colour", "blue"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_collection_list_as_json() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/collections")
        .match_header("project-id", "p-1")
        .match_header("authorization", "Bearer t0k")
        .with_status(200)
        .with_body(r#"{"data":[{"id":1,"name":"Blog","slug":"blog"}]}"#)
        .create();

    let dir = TempDir::new().unwrap();
    cms(&dir)
        .args(["--json", "collection", "list"])
        .args(["--base-path", &server.url(), "--project-id", "p-1"])
        .env("CMS_TOKEN", "t0k")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""slug": "blog""#));

    mock.assert();
}

#[test]
fn test_not_found_exits_with_not_found_code() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/blog/e-404")
        .with_status(404)
        .with_body(r#"{"message":"No query results"}"#)
        .create();

    let dir = TempDir::new().unwrap();
    cms(&dir)
        .args(["entry", "view", "blog", "e-404"])
        .args(["--base-path", &server.url(), "--project-id", "p-1"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("Entry 'e-404' not found"));
}

#[test]
fn test_profile_from_config_file_is_used() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/")
        .match_header("project-id", "p-prof")
        .with_status(200)
        .with_body(r#"{"data":{"id":"p-prof","name":"From profile"}}"#)
        .create();

    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "default_profile = \"local\"\n\n[profiles.local]\nbase_path = \"{}\"\nproject_id = \"p-prof\"\n",
            server.url()
        ),
    )
    .unwrap();

    cms(&dir)
        .args(["--json", "project", "view"])
        .assert()
        .success()
        .stdout(predicate::str::contains("From profile"));

    mock.assert();
}

#[test]
fn test_unknown_profile_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[profiles.prod]\nbase_path = \"https://cms.example.com/api\"\nproject_id = \"p-1\"\n",
    )
    .unwrap();

    cms(&dir)
        .args(["--profile", "prdo", "collection", "list"])
        .args(["--base-path", "https://env.example.com", "--project-id", "p-env"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Profile 'prdo' not found"));
}
