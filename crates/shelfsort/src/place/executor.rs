//! Filesystem side of a sort run: copies, hardlinks and deferred deletes.

use crate::error::{Result, SortError};
use crate::place::hash;
use crate::place::planner::PlacementPaths;
use crate::util::paths::long_path;
use filetime::{set_file_mtime, FileTime};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DistributorOptions {
    pub dry_run: bool,
    /// Delete each source once all of its placements succeeded.
    pub move_sources: bool,
    /// Compare BLAKE3 hashes of the source and its primary copy.
    pub verify_hashes: bool,
    /// Result of the per-run volume check; `false` copies secondaries outright.
    pub hardlinks_supported: bool,
}

impl Default for DistributorOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            move_sources: false,
            verify_hashes: false,
            hardlinks_supported: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DistributionStats {
    pub primary_copies: usize,
    pub hardlinks: usize,
    pub copy_fallbacks: usize,
    pub failed: usize,
    pub deleted: usize,
    pub delete_failures: usize,
    pub bytes_copied: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryOutcome {
    Hardlinked,
    Copied,
}

type LinkFn = fn(&Path, &Path) -> io::Result<()>;

pub struct Distributor {
    options: DistributorOptions,
    stats: DistributionStats,
    pending_deletes: Vec<PathBuf>,
    link: LinkFn,
}

impl Distributor {
    pub fn new(options: DistributorOptions) -> Self {
        Self {
            options,
            stats: DistributionStats::default(),
            pending_deletes: Vec::new(),
            link: replace_with_hardlink,
        }
    }

    pub fn stats(&self) -> &DistributionStats {
        &self.stats
    }

    /// Sources waiting for deletion in move mode.
    pub fn pending_deletes(&self) -> &[PathBuf] {
        &self.pending_deletes
    }

    /// Place one source file at its primary and secondary destinations.
    ///
    /// A failure is counted and returned; the caller logs it and moves on to
    /// the next file. The source is never queued for deletion in that case.
    pub fn distribute(&mut self, source: &Path, paths: &PlacementPaths) -> Result<()> {
        match self.place_all(source, paths) {
            Ok(()) => {
                if self.options.move_sources {
                    self.pending_deletes.push(source.to_path_buf());
                }
                Ok(())
            }
            Err(e) => {
                self.stats.failed += 1;
                Err(e)
            }
        }
    }

    fn place_all(&mut self, source: &Path, paths: &PlacementPaths) -> Result<()> {
        let bytes = self.copy_primary(source, &paths.primary)?;
        self.stats.primary_copies += 1;
        self.stats.bytes_copied += bytes;

        for (index, link_path) in paths.secondaries.iter().enumerate() {
            if *link_path == paths.primary || paths.secondaries[..index].contains(link_path) {
                log::debug!("Already placed at {}", link_path.display());
                continue;
            }
            match self.place_secondary(&paths.primary, link_path)? {
                SecondaryOutcome::Hardlinked => self.stats.hardlinks += 1,
                SecondaryOutcome::Copied => self.stats.copy_fallbacks += 1,
            }
        }

        Ok(())
    }

    fn ensure_parent(&self, path: &Path) -> Result<()> {
        let Some(parent) = path.parent() else {
            return Ok(());
        };
        if self.options.dry_run {
            log::info!("[dry-run] mkdir {}", parent.display());
            return Ok(());
        }
        fs::create_dir_all(long_path(parent)).map_err(|e| SortError::placement(parent, e))
    }

    fn copy_primary(&self, source: &Path, dest: &Path) -> Result<u64> {
        if !source.exists() {
            return Err(SortError::FileNotFound(source.to_path_buf()));
        }
        self.ensure_parent(dest)?;

        if self.options.dry_run {
            log::info!("[dry-run] copy {} -> {}", source.display(), dest.display());
            return Ok(fs::metadata(source).map(|m| m.len()).unwrap_or(0));
        }

        if dest.exists() && same_file(source, dest) {
            return Err(SortError::placement(
                dest,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "source and destination are the same file",
                ),
            ));
        }

        let bytes = copy_with_mtime(source, dest).map_err(|e| SortError::placement(dest, e))?;
        if self.options.verify_hashes {
            hash::verify_copy(source, dest)?;
        }
        log::debug!("Copied {} -> {}", source.display(), dest.display());
        Ok(bytes)
    }

    fn place_secondary(&self, primary: &Path, link_path: &Path) -> Result<SecondaryOutcome> {
        self.ensure_parent(link_path)?;

        if !self.options.hardlinks_supported {
            if self.options.dry_run {
                log::info!(
                    "[dry-run] copy fallback {} -> {}",
                    primary.display(),
                    link_path.display()
                );
            } else if !same_file(primary, link_path) {
                copy_with_mtime(primary, link_path)
                    .map_err(|e| SortError::placement(link_path, e))?;
            }
            return Ok(SecondaryOutcome::Copied);
        }

        if self.options.dry_run {
            log::info!(
                "[dry-run] link {} -> {}",
                primary.display(),
                link_path.display()
            );
            return Ok(SecondaryOutcome::Hardlinked);
        }

        match (self.link)(primary, link_path) {
            Ok(()) => {
                log::info!("Hardlink: {}", link_path.display());
                Ok(SecondaryOutcome::Hardlinked)
            }
            Err(e) => {
                log::warn!("Hardlink failed, copying: {}: {}", link_path.display(), e);
                copy_with_mtime(primary, link_path)
                    .map_err(|e| SortError::placement(link_path, e))?;
                Ok(SecondaryOutcome::Copied)
            }
        }
    }

    /// Delete queued sources (move mode) and return the final counters.
    ///
    /// A failed delete is logged and counted; it never aborts the run.
    pub fn finish(&mut self) -> DistributionStats {
        for source in std::mem::take(&mut self.pending_deletes) {
            if self.options.dry_run {
                log::info!("[dry-run] delete {}", source.display());
                self.stats.deleted += 1;
                continue;
            }
            match fs::remove_file(long_path(&source)) {
                Ok(()) => {
                    log::info!("Deleted: {}", source.display());
                    self.stats.deleted += 1;
                }
                Err(e) => {
                    log::error!("Failed to delete {}: {}", source.display(), e);
                    self.stats.delete_failures += 1;
                }
            }
        }
        self.stats.clone()
    }
}

/// Byte copy that also carries over the modification time.
///
/// The timestamp is set by path, so a read-only copy still gets it. Failing
/// to set it only costs the timestamp.
fn copy_with_mtime(source: &Path, dest: &Path) -> io::Result<u64> {
    let source = long_path(source);
    let dest = long_path(dest);
    // A copy of a read-only source is read-only too and cannot be overwritten in place.
    if fs::metadata(&dest).is_ok_and(|m| m.permissions().readonly()) {
        fs::remove_file(&dest)?;
    }
    let bytes = fs::copy(&source, &dest)?;

    match fs::metadata(&source) {
        Ok(metadata) => {
            let modified = FileTime::from_last_modification_time(&metadata);
            if let Err(e) = set_file_mtime(&dest, modified) {
                log::warn!("Failed to set modification time on {}: {}", dest.display(), e);
            }
        }
        Err(e) => log::warn!("Failed to read metadata of {}: {}", source.display(), e),
    }

    Ok(bytes)
}

fn replace_with_hardlink(primary: &Path, link_path: &Path) -> io::Result<()> {
    if link_path.exists() {
        if same_file(primary, link_path) {
            return Ok(());
        }
        fs::remove_file(long_path(link_path))?;
    }
    fs::hard_link(long_path(primary), long_path(link_path))
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}
