//! End-to-end tests of the yotpo-reviews binary
//!
//! Only `--dry-run` and argument errors are exercised; nothing here talks to
//! the network.

use assert_cmd::Command;
use predicates::prelude::*;

fn cli() -> Command {
    let mut cmd = Command::cargo_bin("yotpo-reviews").unwrap();
    cmd.env_remove("YOTPO_APP_KEY").env_remove("YOTPO_UTOKEN");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("site-bottomline"))
        .stdout(predicate::str::contains("convert"));
}

#[test]
fn test_dry_run_vote_prints_bare_path() {
    cli()
        .args(["--format", "json", "--dry-run", "vote", "123", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""path": "reviews/123/vote/1""#))
        .stdout(predicate::str::contains("params").not());
}

#[test]
fn test_dry_run_list_shows_defaults() {
    cli()
        .args(["--format", "json", "--dry-run", "--app-key", "key", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""path": "/v1/apps/key/reviews""#))
        .stdout(predicate::str::contains(r#""count": 20"#))
        .stdout(predicate::str::contains(r#""page": 1"#));
}

#[test]
fn test_missing_app_key_fails() {
    cli()
        .args(["--dry-run", "bottomline", "sku-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("app key is required"));
}

#[test]
fn test_usage_errors_exit_with_one() {
    cli()
        .arg("no-such-command")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no-such-command"));

    cli().args(["convert"]).assert().code(1);
}

#[test]
fn test_version_exits_cleanly() {
    cli().arg("--version").assert().success();
}
