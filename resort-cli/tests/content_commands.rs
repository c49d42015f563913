//! Integration tests for the `content` command family.

mod common;

use common::{TestEnv, PNG};
use predicates::prelude::*;

fn ids(listing: &serde_json::Value) -> Vec<String> {
    listing
        .as_array()
        .expect("listing is an array")
        .iter()
        .map(|item| item["id"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_add_and_list() {
    let env = TestEnv::new();
    let first = env.add_gallery_image("Lake at dawn");
    let second = env.add_gallery_image("Pool");
    assert_eq!((first, second), (1, 2));

    let listing = env.list_json("gallery", &[]);
    assert_eq!(ids(&listing), vec!["1", "2"]);
    assert_eq!(listing[0]["title"], "Lake at dawn");
    assert_eq!(listing[0]["active"], "yes");
}

#[test]
fn test_gallery_title_defaults() {
    let env = TestEnv::new();
    env.run(&["content", "add", "gallery", "--image-url", "/uploads/gallery/a.jpg"]);
    assert_eq!(env.list_json("gallery", &[])[0]["title"], "Resort View");
}

#[test]
fn test_hidden_items_only_in_all_scope() {
    let env = TestEnv::new();
    env.run(&[
        "content",
        "add",
        "hero",
        "--title",
        "Sunrise",
        "--subtitle",
        "Over the hills",
        "--image-url",
        "/uploads/hero/sunrise.jpg",
        "--hidden",
    ]);

    assert!(ids(&env.list_json("hero", &[])).is_empty());
    assert_eq!(ids(&env.list_json("hero", &["--all"])), vec!["1"]);
}

#[test]
fn test_missing_required_fields_rejected() {
    let env = TestEnv::new();
    env.command()
        .args([
            "content",
            "add",
            "explore",
            "--title",
            "Boating",
            "--image-url",
            "/uploads/explore/boat.jpg",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("short_description"));
}

#[test]
fn test_soft_delete_moves_item_to_recycle_bin() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");
    env.add_gallery_image("Pool");

    env.run(&["content", "delete", "gallery", "1"]);

    assert_eq!(ids(&env.list_json("gallery", &[])), vec!["2"]);
    assert_eq!(ids(&env.list_json("gallery", &["--all"])), vec!["2"]);
    let bin = env.list_json("gallery", &["--deleted"]);
    assert_eq!(ids(&bin), vec!["1"]);
    assert!(!bin[0]["deleted_at"].as_str().unwrap_or_default().is_empty());
}

#[test]
fn test_second_soft_delete_is_a_warning() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");
    env.run(&["content", "delete", "gallery", "1"]);

    env.command()
        .args(["content", "delete", "gallery", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Warning"));
    assert_eq!(ids(&env.list_json("gallery", &["--deleted"])), vec!["1"]);
}

#[test]
fn test_restore_recreates_item_at_the_end() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");
    env.run(&["content", "update", "gallery", "1", "--order", "5"]);
    env.add_gallery_image("Pool");
    env.run(&["content", "update", "gallery", "2", "--order", "3"]);
    env.run(&["content", "update", "gallery", "1", "--hide"]);
    env.run(&["content", "delete", "gallery", "1"]);

    let restored = env.run(&["content", "restore", "gallery", "1"]);
    assert_eq!(restored, "3");

    let listing = env.list_json("gallery", &[]);
    assert_eq!(ids(&listing), vec!["2", "3"]);
    assert_eq!(listing[1]["order"], "4");
    assert_eq!(listing[1]["title"], "Lake");
    assert_eq!(listing[1]["active"], "yes");
    assert!(ids(&env.list_json("gallery", &["--deleted"])).is_empty());
}

#[test]
fn test_restore_requires_recycle_bin() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");
    env.command()
        .args(["content", "restore", "gallery", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_purge_only_from_recycle_bin() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");

    env.command()
        .args(["content", "purge", "gallery", "1"])
        .assert()
        .code(1);

    env.run(&["content", "delete", "gallery", "1"]);
    assert_eq!(env.run(&["content", "purge", "gallery", "1"]), "1");
    assert!(ids(&env.list_json("gallery", &["--deleted"])).is_empty());
    assert!(ids(&env.list_json("gallery", &["--all"])).is_empty());
}

#[test]
fn test_update_of_deleted_item_fails() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");
    env.run(&["content", "delete", "gallery", "1"]);

    env.command()
        .args(["content", "update", "gallery", "1", "--title", "Renamed"])
        .assert()
        .code(1);
}

#[test]
fn test_update_rejects_fields_of_other_kinds() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");
    env.command()
        .args(["content", "update", "gallery", "1", "--subtitle", "Nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("subtitle"));
}

#[test]
fn test_delete_dry_run_changes_nothing() {
    let env = TestEnv::new();
    env.add_gallery_image("Lake");
    env.command()
        .args(["content", "delete", "gallery", "1", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Dry run"));
    assert_eq!(ids(&env.list_json("gallery", &[])), vec!["1"]);
}

#[test]
fn test_upload_stores_file_and_prints_url() {
    let env = TestEnv::new();
    let file = env.write_file("sunset.png", PNG);

    let url = env.run(&["content", "upload", "hero", file.to_str().unwrap()]);
    assert!(url.starts_with("/uploads/hero/hero_"));
    assert!(url.ends_with(".png"));

    let name = url.rsplit('/').next().unwrap();
    let stored = env.data_dir.join("uploads").join("hero").join(name);
    assert_eq!(std::fs::read(stored).unwrap(), PNG);
}

#[test]
fn test_upload_rejects_non_images() {
    let env = TestEnv::new();
    let file = env.write_file("notes.png", b"just some text");
    env.command()
        .args(["content", "upload", "gallery", file.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid file type"));
}

#[test]
fn test_add_with_image_file() {
    let env = TestEnv::new();
    let file = env.write_file("pool.png", PNG);
    env.run(&[
        "content",
        "add",
        "gallery",
        "--title",
        "Pool",
        "--image",
        file.to_str().unwrap(),
    ]);

    let listing = env.list_json("gallery", &[]);
    let url = listing[0]["image_url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/gallery/gallery_"));
}
