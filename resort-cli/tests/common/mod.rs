//! Common test utilities for CLI integration tests.
//!
//! Every test runs the `resort` binary against its own temporary data
//! directory, with `RESORT_*` variables from the outer environment removed.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_VARS: [&str; 11] = [
    "RESORT_DATA_DIR",
    "RESORT_BUSY_TIMEOUT",
    "RESORT_DISABLE_AUTOINIT",
    "RESORT_MAXIMUM_LOCK_WAIT_SECONDS",
    "RESORT_OUTPUT_FORMAT",
    "RESORT_UPLOADS_DIR",
    "RESORT_MAX_UPLOAD_BYTES",
    "RESORT_NOTIFICATIONS",
    "RESORT_ADMIN_EMAIL",
    "RESORT_NAME",
    "RESORT_LOG_MODE",
];

/// A minimal PNG header, enough for format detection.
#[allow(dead_code)]
pub const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the resort data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("resort-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// The binary with a clean environment and no global flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("resort").expect("Failed to find resort binary");
        for var in ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.current_dir(&self.temp_path);
        cmd
    }

    /// The binary with `--data-dir` pointing into this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temporary directory.
    pub fn write_file(&self, name: &str, contents: &[u8]) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run a command that must succeed and return its trimmed stdout.
    pub fn run(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run resort");
        assert!(
            output.status.success(),
            "resort {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }

    /// Book a two-night room stay for `name` and return the code.
    pub fn book_room(&self, name: &str) -> String {
        self.run(&[
            "book-room",
            "--name",
            name,
            "--phone",
            "+91 90000 00000",
            "--email",
            "guest@example.com",
            "--check-in",
            "2099-03-10",
            "--check-out",
            "2099-03-12",
            "--guests",
            "2",
        ])
    }

    /// Book a wedding for `name` and return the code.
    pub fn book_event(&self, name: &str) -> String {
        self.run(&[
            "book-event",
            "--name",
            name,
            "--phone",
            "+91 90000 00001",
            "--email",
            "organizer@example.com",
            "--date",
            "2099-06-01",
            "--event-type",
            "wedding",
            "--guests",
            "150",
            "--budget",
            "above_200k",
        ])
    }

    /// Add a gallery image and return its id.
    pub fn add_gallery_image(&self, title: &str) -> i64 {
        self.run(&[
            "content",
            "add",
            "gallery",
            "--title",
            title,
            "--image-url",
            "/uploads/gallery/view.jpg",
        ])
        .parse()
        .expect("Output is not an item id")
    }

    /// List a collection as JSON.
    pub fn list_json(&self, kind: &str, extra: &[&str]) -> serde_json::Value {
        let mut args = vec!["content", "list", kind, "--format", "json"];
        args.extend_from_slice(extra);
        serde_json::from_str(&self.run(&args)).expect("Invalid JSON listing")
    }

    /// List bookings of a kind as JSON.
    pub fn bookings_json(&self, kind: &str) -> serde_json::Value {
        serde_json::from_str(&self.run(&["bookings", kind, "--format", "json"]))
            .expect("Invalid JSON listing")
    }
}
