use std::path::Path;

use colored::Colorize;
use mvi_core::{GroupError, ShareGrouping};

pub fn run(dir: &Path, name: &str) -> Result<(), String> {
    let ws = super::open(dir)?;

    let group = ws
        .manager
        .group(name)
        .ok_or_else(|| GroupError::NotFound(name.to_string()).to_string())?;

    let count = group.world_count();
    let label = format!("{count} world{}", if count == 1 { "" } else { "s" });
    println!("  {} [{}]", group.name().bold(), label.dimmed());
    println!();

    let worlds: Vec<&str> = group.worlds().collect();
    println!("  worlds:   {}", worlds.join(", "));
    for world in &worlds {
        let others: Vec<&str> = ws
            .manager
            .groups_for_world(world)
            .into_iter()
            .map(|g| g.name())
            .filter(|other| *other != group.name())
            .collect();
        if !others.is_empty() {
            println!("            {world} is also in {}", others.join(", "));
        }
    }

    println!("  shares:   {}", super::describe_shares(group));
    let groupings: Vec<&str> = ShareGrouping::ALL
        .into_iter()
        .filter(|grouping| grouping.members().iter().all(|s| group.is_sharing(*s)))
        .map(ShareGrouping::token)
        .collect();
    if !groupings.is_empty() && !group.shares().is_sharing_all() {
        println!("            includes {}", groupings.join(", "));
    }

    match group.spawn_world() {
        None => println!("  spawn:    {}", "not set".dimmed()),
        Some(world) => {
            println!("  spawn:    {world}");
            println!("  priority: {}", group.spawn_priority());
            println!(
                "  override: {}",
                if group.is_overriding_spawn() { "yes" } else { "no" }
            );
        }
    }

    Ok(())
}
