//! Exit statuses: 0 for completed sessions, 1 for usage, 2 for bad patterns

mod common;

use common::{DOCKER, TestFixture};
use predicates::prelude::*;

#[test]
fn test_missing_path_pattern() {
    let fix = TestFixture::new();
    fix.snip(&[])
        .code(1)
        .stderr(predicate::str::contains("PATH_PATTERN"));
}

#[test]
fn test_unknown_flag() {
    let fix = TestFixture::new();
    fix.snip(&["docker", "--no-such-flag"]).code(1);
}

#[test]
fn test_mode_flag_missing_path_pattern() {
    let fix = TestFixture::new();
    fix.snip(&["--titles"]).code(1);
    fix.snip(&["--resolve", "# x"]).code(1);
}

#[test]
fn test_help_and_version() {
    let fix = TestFixture::new();
    fix.snip(&["--help"]).success();
    fix.snip(&["--version"]).success();
}

#[test]
fn test_invalid_content_pattern() {
    let fix = TestFixture::new().selector(&["snip-no-such-selector"]);
    fix.add_file("containers/docker", DOCKER);

    fix.snip(&["docker", "docker("])
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Invalid content pattern"));

    fix.snip(&["--titles", "docker", "[unclosed"]).code(2);
}

#[test]
fn test_selector_failure() {
    let fix = TestFixture::new().selector(&["snip-no-such-selector"]);
    fix.add_file("containers/docker", DOCKER);

    fix.snip(&["docker"])
        .code(1)
        .stderr(predicate::str::contains("snip-no-such-selector"));
}

#[test]
fn test_missing_config_file() {
    let fix = TestFixture::new();
    std::fs::remove_file(fix.config_path()).unwrap();

    fix.snip(&["--titles", "docker"])
        .code(1)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn test_empty_corpus_is_success() {
    let fix = TestFixture::new();
    fix.snip(&["anything"])
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_show_config() {
    let fix = TestFixture::new();
    let stdout = fix.stdout(&["--show-config"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["resolve"], "title");
    assert_eq!(value["output"], "stdout");
    assert_eq!(value["selector"][0], "head");
}

#[test]
fn test_exclusive_modes() {
    let fix = TestFixture::new();
    fix.snip(&["docker", "--titles", "--show-config"]).code(1);
    fix.snip(&["docker", "--json"]).code(1);
}
