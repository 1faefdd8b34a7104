//! One sort run over a source tree.

use crate::classify::{Classifier, GroupForest};
use crate::error::{Result, SortError};
use crate::index::{scan_directory, ScanOptions, ScanStats, SourceFile};
use crate::place::{
    check_same_volume, plan, DistributionStats, Distributor, DistributorOptions, Placement,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct SortOptions {
    pub src_dir: PathBuf,
    pub dst_dir: PathBuf,
    pub dry_run: bool,
    pub move_sources: bool,
    pub verify_hashes: bool,
    pub scan: ScanOptions,
}

impl SortOptions {
    pub fn new(src_dir: impl Into<PathBuf>, dst_dir: impl Into<PathBuf>) -> Self {
        Self {
            src_dir: src_dir.into(),
            dst_dir: dst_dir.into(),
            dry_run: false,
            move_sources: false,
            verify_hashes: false,
            scan: ScanOptions::default(),
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
    pub dry_run: bool,
    pub hardlinks_supported: bool,
    pub files_seen: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub scan: ScanStats,
    pub distribution: DistributionStats,
}

/// What happened to one source file.
#[derive(Debug)]
pub enum FileOutcome {
    Unmatched,
    Placed(Placement),
    Failed(SortError),
}

pub struct Sorter<'a> {
    classifier: Classifier<'a>,
    options: SortOptions,
    distributor: Distributor,
    hardlinks_supported: bool,
    started_at: DateTime<Utc>,
    timer: Instant,
    scan: ScanStats,
    files_seen: usize,
    matched: usize,
    unmatched: usize,
}

impl<'a> Sorter<'a> {
    /// Prepare a run. The volume check happens here, once.
    pub fn new(forest: &'a GroupForest, options: SortOptions) -> Self {
        let hardlinks_supported = check_same_volume(&options.src_dir, &options.dst_dir);
        let distributor = Distributor::new(DistributorOptions {
            dry_run: options.dry_run,
            move_sources: options.move_sources,
            verify_hashes: options.verify_hashes,
            hardlinks_supported,
        });

        Self {
            classifier: Classifier::new(forest),
            options,
            distributor,
            hardlinks_supported,
            started_at: Utc::now(),
            timer: Instant::now(),
            scan: ScanStats::default(),
            files_seen: 0,
            matched: 0,
            unmatched: 0,
        }
    }

    pub fn hardlinks_supported(&self) -> bool {
        self.hardlinks_supported
    }

    /// Collect the source files, leaving out the destination tree.
    pub fn scan(&mut self) -> Result<Vec<SourceFile>> {
        let mut scan_options = self.options.scan.clone();
        scan_options.exclude_dirs.push(self.options.dst_dir.clone());

        let (files, stats) = scan_directory(&self.options.src_dir, &scan_options)?;
        self.scan = stats;
        Ok(files)
    }

    /// Classify, plan and place one file. Failures are logged, never raised.
    pub fn sort_file(&mut self, file: &SourceFile) -> FileOutcome {
        self.files_seen += 1;

        let forest = self.classifier.forest();
        let matches = self.classifier.match_file(&file.file_name);
        let Some(placement) = plan(forest, &matches) else {
            log::debug!("No matching group: {}", file.path.display());
            self.unmatched += 1;
            return FileOutcome::Unmatched;
        };
        self.matched += 1;

        let file_name = file
            .path
            .file_name()
            .map(Path::new)
            .unwrap_or_else(|| Path::new(&file.file_name));
        let paths = placement.destinations(forest, &self.options.dst_dir, file_name);

        match self.distributor.distribute(&file.path, &paths) {
            Ok(()) => {
                log::debug!(
                    "{} -> {} (+{} links)",
                    file.path.display(),
                    forest.display_name(placement.primary),
                    placement.secondaries.len()
                );
                FileOutcome::Placed(placement)
            }
            Err(e) => {
                log::error!("Failed to place {}: {}", file.path.display(), e);
                FileOutcome::Failed(e)
            }
        }
    }

    /// Run deferred deletes and produce the report.
    pub fn finish(mut self) -> SortReport {
        let distribution = self.distributor.finish();
        SortReport {
            started_at: self.started_at,
            elapsed_ms: self.timer.elapsed().as_millis() as u64,
            dry_run: self.options.dry_run,
            hardlinks_supported: self.hardlinks_supported,
            files_seen: self.files_seen,
            matched: self.matched,
            unmatched: self.unmatched,
            scan: self.scan,
            distribution,
        }
    }
}

/// Sort a whole source tree without progress reporting.
pub fn sort_directory(forest: &GroupForest, options: SortOptions) -> Result<SortReport> {
    let mut sorter = Sorter::new(forest, options);
    for file in sorter.scan()? {
        sorter.sort_file(&file);
    }
    Ok(sorter.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroupConfig;
    use std::fs;
    use tempfile::TempDir;

    fn forest() -> GroupForest {
        let yaml = r#"
groups:
  - name: Kids
    include: [kids]
  - name: Science
    groups:
      - name: Biology
        include: [kids, bio]
"#;
        GroupForest::from_config(&GroupConfig::from_yaml(yaml).unwrap()).unwrap()
    }

    #[test]
    fn test_sort_file_outcomes() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("kids_encyclopedia.pdf"), b"k").unwrap();
        fs::write(src.join("cooking.pdf"), b"c").unwrap();

        let forest = forest();
        let mut sorter = Sorter::new(&forest, SortOptions::new(&src, temp_dir.path().join("out")));
        let files = sorter.scan().unwrap();
        assert_eq!(files.len(), 2);

        let outcomes: Vec<FileOutcome> = files.iter().map(|f| sorter.sort_file(f)).collect();
        assert!(matches!(outcomes[0], FileOutcome::Unmatched));
        match &outcomes[1] {
            FileOutcome::Placed(placement) => {
                assert_eq!(forest.display_name(placement.primary), "Kids")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let report = sorter.finish();
        assert_eq!(report.files_seen, 2);
        assert_eq!(report.matched, 1);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.distribution.primary_copies, 1);
        assert_eq!(report.distribution.hardlinks, 1);
    }

    #[test]
    fn test_destination_inside_source_is_not_resorted() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path();
        fs::write(src.join("biology_basics.pdf"), b"b").unwrap();

        let forest = forest();
        let options = SortOptions::new(src, src.join("sorted"));
        let first = sort_directory(&forest, options.clone()).unwrap();
        assert_eq!(first.matched, 1);

        let second = sort_directory(&forest, options).unwrap();
        assert_eq!(second.files_seen, 1);
        assert!(src.join("sorted/Science/Biology/biology_basics.pdf").exists());
    }
}
