pub mod scanner;

pub use scanner::{scan_directory, ScanOptions, ScanStats, SourceFile};
