use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use console::style;
use shelfsort_lib::{GroupForest, Pattern, Result};
use std::path::PathBuf;

pub fn handle_groups_command(config: Option<PathBuf>) -> Result<()> {
    let forest = super::load_forest(config)?;

    if forest.is_empty() {
        println!("{}", style("No groups configured").yellow());
        return Ok(());
    }

    println!("{}", render_table(&forest));
    println!(
        "\n{} groups, {} roots",
        style(forest.len()).cyan(),
        style(forest.roots().len()).cyan()
    );
    Ok(())
}

fn render_table(forest: &GroupForest) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Group").fg(Color::Cyan),
        Cell::new("Include").fg(Color::Cyan),
        Cell::new("Exclude").fg(Color::Cyan),
        Cell::new("Priority").fg(Color::Cyan),
    ]);

    for (id, group) in forest.iter() {
        let include = join_patterns(&group.include_patterns);
        let name = if group.include_patterns.is_empty() {
            Cell::new(forest.display_name(id)).fg(Color::DarkGrey)
        } else {
            Cell::new(forest.display_name(id)).fg(Color::White)
        };
        table.add_row(vec![
            name,
            Cell::new(include),
            Cell::new(join_patterns(&group.exclude_patterns)),
            Cell::new(group.max_priority()),
        ]);
    }

    table
}

fn join_patterns(patterns: &[Pattern]) -> String {
    patterns
        .iter()
        .map(Pattern::raw)
        .collect::<Vec<_>>()
        .join(", ")
}
