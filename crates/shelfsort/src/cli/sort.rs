use clap::Args;
use console::style;
use shelfsort_lib::util::{
    create_progress_bar, create_spinner, format_bytes, format_duration, format_rate,
};
use shelfsort_lib::{FileOutcome, Result, ScanOptions, SortOptions, SortReport, Sorter};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct SortArgs {
    #[arg(long, short = 'c', help = "Path to group config (YAML or TOML)")]
    pub config: Option<PathBuf>,

    #[arg(long, short = 's', default_value = ".", help = "Source directory")]
    pub src: PathBuf,

    #[arg(long, short = 'd', default_value = "./sorted", help = "Destination directory")]
    pub dst: PathBuf,

    #[arg(long, help = "Log what would happen without touching any file")]
    pub dry_run: bool,

    #[arg(long = "move", help = "Delete sources after they were placed")]
    pub move_files: bool,

    #[arg(long, help = "Verify primary copies with BLAKE3")]
    pub verify: bool,

    #[arg(long, help = "Ignore dot-files and dot-directories")]
    pub skip_hidden: bool,

    #[arg(long, help = "Follow symlinked directories")]
    pub follow_symlinks: bool,

    #[arg(long, help = "Maximum directory depth to descend")]
    pub max_depth: Option<usize>,

    #[arg(long, help = "Print the run report as JSON")]
    pub json: bool,
}

pub fn handle_sort_command(args: SortArgs, verbose: bool, quiet: bool) -> Result<()> {
    let forest = super::load_forest(args.config)?;

    let options = SortOptions {
        src_dir: args.src,
        dst_dir: args.dst,
        dry_run: args.dry_run,
        move_sources: args.move_files,
        verify_hashes: args.verify,
        scan: ScanOptions {
            follow_symlinks: args.follow_symlinks,
            max_depth: args.max_depth,
            include_hidden: !args.skip_hidden,
            exclude_dirs: Vec::new(),
        },
    };

    if !quiet {
        println!(
            "{} Sorting {} -> {}{}",
            style(">>>").cyan(),
            options.src_dir.display(),
            options.dst_dir.display(),
            if options.dry_run { " (dry run)" } else { "" }
        );
    }

    let show_progress = !verbose && !quiet && !args.json;
    let mut sorter = Sorter::new(&forest, options);
    if !sorter.hardlinks_supported() && !quiet {
        println!(
            "{} Source and destination are on different volumes, secondary placements will be copies",
            style("!").yellow()
        );
    }

    let spinner = show_progress.then(|| create_spinner("Scanning source files"));
    let files = sorter.scan()?;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let pb = show_progress.then(|| create_progress_bar(files.len() as u64));

    for file in &files {
        if let Some(pb) = &pb {
            pb.set_message(file.file_name.clone());
        }
        let outcome = sorter.sort_file(file);
        if let Some(pb) = &pb {
            pb.inc(1);
        }

        if verbose {
            match outcome {
                FileOutcome::Placed(placement) => {
                    let links: Vec<String> = placement
                        .secondaries
                        .iter()
                        .map(|id| forest.display_name(*id))
                        .collect();
                    println!(
                        "  {}: {} -> {}{}",
                        style("✓").green(),
                        file.relative_path.display(),
                        forest.display_name(placement.primary),
                        if links.is_empty() {
                            String::new()
                        } else {
                            format!(" (+ {})", links.join(", "))
                        }
                    );
                }
                FileOutcome::Unmatched => {
                    println!(
                        "  {}: {} (no matching group)",
                        style("·").dim(),
                        file.relative_path.display()
                    );
                }
                FileOutcome::Failed(e) => {
                    println!(
                        "  {}: {} ({})",
                        style("✗").red(),
                        file.relative_path.display(),
                        e
                    );
                }
            }
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let report = sorter.finish();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !quiet {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &SortReport) {
    let stats = &report.distribution;

    println!("\n{} Sort complete", style("✓").green());
    println!("  Files scanned: {}", style(report.files_seen).cyan());
    println!("  Sorted: {}", style(report.matched).green());
    println!("  Unmatched: {}", style(report.unmatched).yellow());
    println!(
        "  Copies: {} ({})",
        stats.primary_copies,
        format_bytes(stats.bytes_copied)
    );
    println!("  Hardlinks: {}", stats.hardlinks);
    if stats.copy_fallbacks > 0 {
        println!("  Copied instead of linked: {}", stats.copy_fallbacks);
    }
    if stats.failed > 0 {
        println!("  Failed: {}", style(stats.failed).red());
    }
    if stats.deleted > 0 || stats.delete_failures > 0 {
        println!("  Sources deleted: {}", stats.deleted);
    }
    if stats.delete_failures > 0 {
        println!("  Delete failures: {}", style(stats.delete_failures).red());
    }
    if report.scan.errors > 0 {
        println!("  Unreadable entries: {}", style(report.scan.errors).red());
    }
    let elapsed = Duration::from_millis(report.elapsed_ms);
    println!(
        "  Elapsed: {} ({})",
        format_duration(elapsed),
        format_rate(report.files_seen, elapsed)
    );

    if report.dry_run {
        println!("\n{}", style("Dry run: no files were changed").yellow());
    }
}
