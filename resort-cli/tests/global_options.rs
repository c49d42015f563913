//! Integration tests for global options, `init`, configuration and exit codes.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_show_data_dir_uses_flag() {
    let env = TestEnv::new();
    env.command()
        .arg("show-data-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("resort-data"));
}

#[test]
fn test_show_data_dir_uses_env() {
    let env = TestEnv::new();
    env.command_bare()
        .env("RESORT_DATA_DIR", env.path().join("from-env"))
        .arg("show-data-dir")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-env"));
}

#[test]
fn test_autoinit_creates_database() {
    let env = TestEnv::new();
    env.book_room("Asha Rao");
    assert!(env.data_dir.join("resort.db").exists());
}

#[test]
fn test_disable_autoinit_without_database() {
    let env = TestEnv::new();
    env.command()
        .args(["--disable-autoinit", "bookings", "room"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("resort init"));
    assert!(!env.data_dir.join("resort.db").exists());
}

#[test]
fn test_init_then_disable_autoinit_works() {
    let env = TestEnv::new();
    env.command()
        .args(["init", "--with-config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created database"));
    assert!(env.data_dir.join("config.yaml").exists());

    env.command()
        .args(["--disable-autoinit", "bookings", "event"])
        .assert()
        .success();
}

#[test]
fn test_init_refuses_to_overwrite() {
    let env = TestEnv::new();
    env.run(&["init"]);
    env.book_room("Asha Rao");

    env.command().arg("init").assert().code(1);

    env.command()
        .args(["init", "--overwrite"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recreated database"));
    assert_eq!(env.book_room("Li Wei"), "R0000000001");
}

#[test]
fn test_library_warnings_follow_log_level() {
    let env = TestEnv::new();
    env.run(&["init"]);

    env.command()
        .args(["init", "--overwrite"])
        .assert()
        .success()
        .stderr(predicate::str::contains("WARN: removed existing database"));

    env.command()
        .args(["--quiet", "init", "--overwrite"])
        .assert()
        .success()
        .stderr(predicate::str::contains("removed existing database").not());
}

#[test]
fn test_init_dry_run_creates_nothing() {
    let env = TestEnv::new();
    env.command()
        .args(["init", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Create database"));
    assert!(!env.data_dir.exists());
}

#[test]
fn test_output_format_from_user_config() {
    let env = TestEnv::new();
    env.run(&["init"]);
    std::fs::write(env.data_dir.join("config.yaml"), "output_format: csv\n").unwrap();
    env.book_room("Asha Rao");

    let out = env.run(&["bookings", "room"]);
    assert!(out.starts_with("id,code,status,name"));
}

#[test]
fn test_site_config_overrides_user_config() {
    let env = TestEnv::new();
    env.run(&["init"]);
    std::fs::write(env.data_dir.join("config.yaml"), "output_format: csv\n").unwrap();
    std::fs::write(env.path().join("resort.yaml"), "output_format: tsv\n").unwrap();

    let out = env.run(&["bookings", "room"]);
    assert!(out.starts_with("id\tcode\tstatus"));
}

#[test]
fn test_invalid_config_file() {
    let env = TestEnv::new();
    std::fs::write(env.path().join("resort.yaml"), "ports: 5000\n").unwrap();
    env.command().args(["bookings", "room"]).assert().code(7);
}

#[test]
fn test_invalid_env_override() {
    let env = TestEnv::new();
    env.command()
        .env("RESORT_OUTPUT_FORMAT", "xml")
        .args(["bookings", "room"])
        .assert()
        .code(7);
}

#[test]
fn test_invalid_format_flag() {
    let env = TestEnv::new();
    env.command()
        .args(["bookings", "room", "--format", "xml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("xml"));
}

#[test]
fn test_upload_limit_from_env() {
    let env = TestEnv::new();
    let file = env.write_file("big.png", common::PNG);
    env.command()
        .env("RESORT_MAX_UPLOAD_BYTES", "4")
        .args(["content", "upload", "gallery", file.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds"));
}

#[test]
fn test_completions() {
    let env = TestEnv::new();
    env.command_bare()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("resort"));
}

#[test]
fn test_help_lists_commands() {
    let env = TestEnv::new();
    env.command_bare()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("book-room"))
        .stdout(predicate::str::contains("content"));
}
