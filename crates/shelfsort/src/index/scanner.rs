use crate::error::{Result, SortError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub files_found: usize,
    pub dirs_scanned: usize,
    pub bytes_found: u64,
    pub errors: usize,
}

/// Options for walking the source tree
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub follow_symlinks: bool,
    pub max_depth: Option<usize>,
    pub include_hidden: bool,
    /// Directories pruned from the walk, e.g. a destination inside the source.
    pub exclude_dirs: Vec<PathBuf>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            max_depth: None,
            include_hidden: true,
            exclude_dirs: Vec::new(),
        }
    }
}

/// A regular file found under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
}

/// Walks `path` recursively and collects every regular file.
///
/// Symlinks to files are included (their target is what gets copied).
/// Excluded directories and, unless `include_hidden` is set, dot-entries are
/// pruned together with everything below them. Unreadable entries are
/// logged and counted, not fatal.
pub fn scan_directory<P: AsRef<Path>>(
    path: P,
    options: &ScanOptions,
) -> Result<(Vec<SourceFile>, ScanStats)> {
    let path = path.as_ref();
    if !path.is_dir() {
        return Err(SortError::FileNotFound(path.to_path_buf()));
    }

    let root = path.canonicalize()?;
    let excluded: Vec<PathBuf> = options
        .exclude_dirs
        .iter()
        .filter_map(|dir| dir.canonicalize().ok())
        .collect();

    let mut walker = WalkDir::new(&root)
        .follow_links(options.follow_symlinks)
        .sort_by_file_name();
    if let Some(max_depth) = options.max_depth {
        walker = walker.max_depth(max_depth);
    }

    let mut files = Vec::new();
    let mut stats = ScanStats::default();

    let entries = walker
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, options, &excluded));

    for entry in entries {
        match entry {
            Ok(entry) => {
                if let Some(file) = process_entry(&entry, &root, &mut stats) {
                    files.push(file);
                }
            }
            Err(e) => {
                log::warn!("Walk error: {}", e);
                stats.errors += 1;
            }
        }
    }

    log::debug!(
        "Scanned {}: {} files in {} directories",
        root.display(),
        stats.files_found,
        stats.dirs_scanned
    );

    Ok((files, stats))
}

fn keep_entry(entry: &DirEntry, options: &ScanOptions, excluded: &[PathBuf]) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if !options.include_hidden && entry.file_name().to_string_lossy().starts_with('.') {
        return false;
    }
    if entry.file_type().is_dir() && excluded.iter().any(|dir| dir == entry.path()) {
        log::debug!("Skipping excluded directory {}", entry.path().display());
        return false;
    }
    true
}

fn process_entry(entry: &DirEntry, root: &Path, stats: &mut ScanStats) -> Option<SourceFile> {
    let path = entry.path();
    let file_type = entry.file_type();

    if file_type.is_dir() {
        stats.dirs_scanned += 1;
        return None;
    }

    let is_file = file_type.is_file() || (file_type.is_symlink() && path.is_file());
    if !is_file {
        return None;
    }

    let size_bytes = match std::fs::metadata(path) {
        Ok(m) => m.len(),
        Err(e) => {
            log::warn!("Failed to get metadata for {}: {}", path.display(), e);
            stats.errors += 1;
            return None;
        }
    };

    stats.files_found += 1;
    stats.bytes_found += size_bytes;

    Some(SourceFile {
        path: path.to_path_buf(),
        relative_path: path.strip_prefix(root).unwrap_or(path).to_path_buf(),
        file_name: entry.file_name().to_string_lossy().to_string(),
        size_bytes,
    })
}
