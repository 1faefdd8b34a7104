use console::style;
use shelfsort_lib::{explain, Classifier, Decision, Result};
use std::path::PathBuf;

pub fn handle_explain_command(config: Option<PathBuf>, names: &[String], json: bool) -> Result<()> {
    let forest = super::load_forest(config)?;
    let classifier = Classifier::new(&forest);

    let decisions: Vec<Decision> = names.iter().map(|name| explain(&classifier, name)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&decisions)?);
        return Ok(());
    }

    for decision in &decisions {
        println!("{}", style(&decision.file).bold());
        println!("  normalized: {}", style(&decision.normalized).dim());
        match &decision.primary {
            Some(primary) => {
                println!("  primary: {}", style(primary).green());
                for secondary in &decision.secondaries {
                    println!("  link: {}", style(secondary).cyan());
                }
            }
            None => println!("  {}", style("no matching group").yellow()),
        }
    }

    Ok(())
}
