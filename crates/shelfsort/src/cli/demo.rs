use console::style;
use shelfsort_lib::{write_demo_config, Result, SortError};
use std::path::Path;

pub fn handle_demo_config_command(output: &Path, force: bool, quiet: bool) -> Result<()> {
    if output.exists() && !force {
        return Err(SortError::Config(format!(
            "{} already exists (use --force to overwrite)",
            output.display()
        )));
    }

    write_demo_config(output)?;
    log::info!("Demo config '{}' created", output.display());

    if !quiet {
        println!(
            "{} Demo config written to {}",
            style("✓").green(),
            output.display()
        );
    }
    Ok(())
}
