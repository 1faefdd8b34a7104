pub mod demo;
pub mod explain;
pub mod groups;
pub mod sort;

use clap::{Parser, Subcommand};
use console::style;
use shelfsort_lib::config::DEMO_CONFIG_FILE;
use shelfsort_lib::{Config, GroupForest, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelfsort")]
#[command(about = "Sort files into category folders by name rules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Also write log records to this file")]
    pub log: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = "info",
        help = "Log level (error, warn, info, debug, trace)"
    )]
    pub log_level: String,

    #[arg(long, short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, short = 'q', global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// `--verbose` / `--quiet` adjust the level only when it was left at its default.
    pub fn effective_log_level(&self) -> String {
        if self.log_level.eq_ignore_ascii_case("info") {
            if self.verbose {
                return "debug".to_string();
            }
            if self.quiet {
                return "error".to_string();
            }
        }
        self.log_level.clone()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sort a source tree into category folders")]
    Sort(sort::SortArgs),

    #[command(about = "Show which groups file names would be sorted into")]
    Explain {
        #[arg(long, short = 'c', help = "Path to group config (YAML or TOML)")]
        config: Option<PathBuf>,

        #[arg(required = true, help = "File names to classify")]
        names: Vec<String>,

        #[arg(long, help = "Print decisions as JSON")]
        json: bool,
    },

    #[command(about = "List configured groups and their rules")]
    Groups {
        #[arg(long, short = 'c', help = "Path to group config (YAML or TOML)")]
        config: Option<PathBuf>,
    },

    #[command(about = "Write an example group config")]
    DemoConfig {
        #[arg(long, short = 'o', default_value = DEMO_CONFIG_FILE, help = "Output path (.yaml or .toml)")]
        output: PathBuf,

        #[arg(long, help = "Overwrite an existing file")]
        force: bool,
    },
}

/// Resolve, parse and build the group forest, warning about broken regex rules.
pub fn load_forest(config_path: Option<PathBuf>) -> Result<GroupForest> {
    let config = Config::new(config_path)?;
    log::info!("Loading groups from {}", config.config_path.display());

    let forest = GroupForest::from_config(&config.load()?)?;
    for (group, warning) in forest.pattern_warnings() {
        eprintln!(
            "{} {}: invalid rule '{}' never matches ({})",
            style("warning:").yellow(),
            group,
            warning.alternative,
            warning.message
        );
    }
    Ok(forest)
}
