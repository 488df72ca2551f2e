use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let ws = super::open(dir)?;

    if ws.manager.is_empty() {
        println!("  No groups configured.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Worlds", "Shares", "Spawn"]);

    for group in ws.manager.groups() {
        let worlds: Vec<&str> = group.worlds().collect();
        table.add_row(vec![
            group.name().to_string(),
            worlds.join(", "),
            super::describe_shares(group),
            super::describe_spawn(group),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} groups", ws.manager.len());
    if ws.report.has_skipped() {
        println!(
            "  {} groups could not be loaded (run `mvi check` for details)",
            ws.report.skipped.len()
        );
    }

    Ok(())
}
