use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// A scratch directory for CLI input files, removed on drop.
pub struct Inputs {
    dir: TempDir,
}

impl Inputs {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Write `contents` to `name` and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("write input file");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}
