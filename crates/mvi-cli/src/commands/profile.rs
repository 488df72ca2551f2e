//! Show the values a group holds for one player.

use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use mvi_core::serializer::serialize_value;

pub fn run(dir: &Path, group: &str, player: &str) -> Result<(), String> {
    let mut ws = super::open(dir)?;
    let profile = ws
        .manager
        .profile(group, player)
        .map_err(|e| e.to_string())?;

    if profile.is_empty() {
        println!("  No stored values for {player} in group '{group}'.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Sharable", "Value"]);
    for (sharable, value) in profile.iter() {
        let stored = serialize_value(sharable, value).map_err(|e| e.to_string())?;
        table.add_row(vec![sharable.token().to_string(), stored.to_string()]);
    }
    println!("{table}");
    println!("  {} values", profile.len().to_string().bold());
    Ok(())
}
