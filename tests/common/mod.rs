//! Shared testing utilities for appindex CLI and library tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;

/// Testing harness providing an isolated repository with a `configs/` directory.
pub struct TestContext {
    root: TempDir,
}

impl TestContext {
    /// Create a new isolated repository.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        root.child("configs").create_dir_all().expect("Failed to create configs directory");
        Self { root }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.root.path().join("configs")
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.path().join("index.json")
    }

    /// Build a command for invoking the compiled `appindex` binary at the repository root.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("appindex").expect("Failed to locate appindex binary");
        cmd.current_dir(self.root()).env_remove("APPINDEX_ROOT").env_remove("RUST_LOG");
        cmd
    }

    /// Write raw content to `configs/<file>`.
    pub fn write_document(&self, file: &str, content: &str) {
        self.root
            .child("configs")
            .child(file)
            .write_str(content)
            .expect("Failed to write document");
    }

    /// Write a valid document for `name` into `configs/<name>.json`.
    pub fn write_app(&self, name: &str) {
        self.write_document(&format!("{name}.json"), &app_document(name, &format!("dl/{name}")));
    }

    /// Write a file relative to the repository root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) {
        self.root.child(relative).write_str(content).expect("Failed to write file");
    }

    pub fn read_document(&self, file: &str) -> Vec<u8> {
        fs::read(self.configs_dir().join(file)).expect("Failed to read document")
    }

    pub fn read_index_bytes(&self) -> Vec<u8> {
        fs::read(self.index_path()).expect("Failed to read index.json")
    }

    pub fn read_index(&self) -> serde_json::Value {
        serde_json::from_slice(&self.read_index_bytes()).expect("index.json is not valid JSON")
    }

    /// Assert no staging files were left next to the index.
    pub fn assert_no_temp_files(&self) {
        let leftovers: Vec<String> = fs::read_dir(self.root())
            .expect("Failed to list repository root")
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "leftover temp files: {:?}", leftovers);
    }
}

/// A valid document body for `name`.
pub fn app_document(name: &str, download_dir: &str) -> String {
    format!(
        r#"{{
  "name": "{name}",
  "url": "https://github.com/x/{lower}",
  "pattern": "{name}.*\\.AppImage$",
  "download_dir": "{download_dir}"
}}
"#,
        lower = name.to_lowercase()
    )
}
