#![allow(dead_code)]

use shelfsort_lib::{GroupConfig, GroupForest, Result, SortOptions};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch source tree plus a destination next to it.
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub src: PathBuf,
    pub dst: PathBuf,
}

impl TestFixture {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let src = temp_dir.path().join("library");
        let dst = temp_dir.path().join("sorted");
        fs::create_dir_all(&src)?;

        Ok(Self { temp_dir, src, dst })
    }

    /// Create `relative` under the source tree with `contents`.
    pub fn add_file(&self, relative: &str, contents: &[u8]) -> PathBuf {
        let path = self.src.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    pub fn options(&self) -> SortOptions {
        SortOptions::new(&self.src, &self.dst)
    }

    pub fn sorted(&self, relative: &str) -> PathBuf {
        self.dst.join(relative)
    }
}

pub fn demo_forest() -> GroupForest {
    GroupForest::from_config(&GroupConfig::demo().unwrap()).unwrap()
}

pub fn forest_from_yaml(yaml: &str) -> GroupForest {
    GroupForest::from_config(&GroupConfig::from_yaml(yaml).unwrap()).unwrap()
}

/// Every file below `root`, relative to it, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
