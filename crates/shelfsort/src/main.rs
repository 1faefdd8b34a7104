mod cli;

use clap::Parser;
use shelfsort_lib::util::init_logging;
use shelfsort_lib::Result;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    init_logging(&cli.effective_log_level(), cli.log.as_deref())?;

    match cli.command {
        cli::Commands::Sort(args) => cli::sort::handle_sort_command(args, cli.verbose, cli.quiet),

        cli::Commands::Explain {
            config,
            names,
            json,
        } => cli::explain::handle_explain_command(config, &names, json),

        cli::Commands::Groups { config } => cli::groups::handle_groups_command(config),

        cli::Commands::DemoConfig { output, force } => {
            cli::demo::handle_demo_config_command(&output, force, cli.quiet)
        }
    }
}
