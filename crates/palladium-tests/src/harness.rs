//! Test harness utilities for running CLI commands against temp files.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::TempDir;

use palladium_model::{ProjectMeta, Scene, SceneSnapshot};

/// A test harness owning a scratch directory for CLI inputs and outputs.
pub struct TestHarness {
    /// Working directory for test files.
    pub work_dir: TempDir,
}

impl TestHarness {
    /// Create a new test harness.
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Get the working directory path.
    pub fn path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Path of `name` inside the working directory, as a string.
    pub fn file(&self, name: &str) -> String {
        self.path().join(name).to_string_lossy().into_owned()
    }

    /// Write `content` to `name` and return the path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Read `name` from the working directory.
    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path().join(name)).expect("Failed to read test file")
    }

    /// Capture `scene` as a snapshot file and return its path.
    pub fn write_snapshot(&self, name: &str, scene: &Scene, meta: ProjectMeta) -> String {
        let json = SceneSnapshot::capture(scene, meta)
            .to_json_pretty()
            .expect("Failed to serialize snapshot");
        self.write(name, &json);
        self.file(name)
    }

    /// Restore a snapshot file written by the `load` command.
    pub fn read_snapshot(&self, name: &str) -> (Scene, ProjectMeta) {
        SceneSnapshot::from_json(&self.read(name))
            .and_then(|snapshot| snapshot.restore())
            .expect("Failed to restore snapshot")
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Assert that a command returned success.
pub fn assert_success(result: anyhow::Result<ExitCode>) {
    match result {
        Ok(code) => assert_eq!(code, ExitCode::SUCCESS, "command returned failure"),
        Err(e) => panic!("command failed: {:#}", e),
    }
}
