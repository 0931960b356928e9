//! Shared testing utilities for vmprep CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment with an empty `features/` directory.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(work_dir.join("features")).expect("Failed to create features directory");
        Self { root, work_dir }
    }

    /// Path to the directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn features_dir(&self) -> PathBuf {
        self.work_dir.join("features")
    }

    /// Build a command for invoking the compiled `vmprep` binary within the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("vmprep").expect("Failed to locate vmprep binary");
        cmd.current_dir(self.work_dir()).env_remove("RUST_LOG");
        cmd
    }

    /// Write a manifest into `features/`.
    pub fn write_feature(&self, file_name: &str, content: &str) {
        fs::write(self.features_dir().join(file_name), content).expect("Failed to write manifest");
    }

    /// Write a manifest whose check and install steps are `sh -c` scripts.
    ///
    /// Scripts must not contain single quotes.
    pub fn write_shell_feature(&self, file_name: &str, header: &str, check: Option<&str>, install: &str) {
        let mut content = format!("{}\n", header);
        if let Some(check) = check {
            content.push_str(&format!("\n[check]\nprogram = \"sh\"\nargs = [\"-c\", '{}']\n", check));
        }
        content.push_str(&format!("\n[install]\nprogram = \"sh\"\nargs = [\"-c\", '{}']\n", install));
        self.write_feature(file_name, &content);
    }

    /// Write `vmprep.toml` in the work directory.
    pub fn write_config(&self, content: &str) {
        self.write_file("vmprep.toml", content);
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    pub fn read_file(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir.join(relative)).expect("Failed to read file")
    }

    /// Whether an install script left `features/<name>` behind.
    pub fn marker_exists(&self, name: &str) -> bool {
        self.features_dir().join(name).exists()
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }
}
