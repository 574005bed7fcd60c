//! # Test Harness
//!
//! Provides a scratch temp directory and shell-script editor doubles for
//! driving vipe without a real editor or terminal.
//!
//! Copyright (c) 2025 Dominic Rodemer. All rights reserved.
//! Licensed under the MIT License.

#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;
use vipe::{EditorEnv, TerminalSource, Vipe};

/// Shell snippet that sets `$last` to the final argument (the file path).
pub const LAST_ARG: &str = "for last; do :; done";

/// Test environment with its own temp-file directory and a work directory
/// for editor scripts and their logs.
pub struct TestEnv {
    /// Directory vipe creates its temp file in
    pub temp_dir: TempDir,
    /// Directory for editor scripts and anything they record
    pub work_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            work_dir: TempDir::new().expect("Failed to create work dir"),
        }
    }

    /// Writes an editor script and returns an `$EDITOR` value that runs it.
    ///
    /// Scripts are run through `sh` rather than executed directly, which
    /// avoids "text file busy" races with other tests writing scripts.
    pub fn editor_script(&self, name: &str, body: &str) -> String {
        let path = self.work_path(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write editor script");
        format!("sh '{}'", path.display())
    }

    /// Path inside the work directory.
    pub fn work_path(&self, name: &str) -> PathBuf {
        self.work_dir.path().join(name)
    }

    /// A vipe run using `visual` as `$VISUAL` and `/dev/null` as the terminal.
    pub fn vipe(&self, visual: &str) -> Vipe {
        Vipe::new()
            .env(EditorEnv::from_vars([("VISUAL", visual)]))
            .terminal(TerminalSource::Device(PathBuf::from("/dev/null")))
            .temp_dir(self.temp_dir.path())
    }

    /// Files currently in the temp-file directory.
    pub fn temp_files(&self) -> Vec<PathBuf> {
        list_files(self.temp_dir.path())
    }

    /// Asserts the temp-file directory is empty.
    pub fn assert_no_temp_files(&self) {
        let leftover = self.temp_files();
        assert!(leftover.is_empty(), "temp files left behind: {leftover:?}");
    }
}

fn list_files(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|e| e.path())
        .collect()
}
