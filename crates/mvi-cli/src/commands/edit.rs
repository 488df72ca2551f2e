//! Group lifecycle commands: create, delete, rename, and world membership.

use std::path::Path;

use colored::Colorize;

pub fn create(dir: &Path, name: &str, worlds: &[String]) -> Result<(), String> {
    let mut ws = super::open(dir)?;
    let group = ws
        .manager
        .create_group(name, worlds.iter().cloned())
        .map_err(|e| e.to_string())?;
    println!("Created group {}", group.summary());

    for world in group.worlds() {
        if !ws.settings.known_worlds.iter().any(|w| w == world) {
            eprintln!("{} world {world} is not a known world", "warning:".yellow());
        }
    }
    Ok(())
}

pub fn delete(dir: &Path, name: &str) -> Result<(), String> {
    let mut ws = super::open(dir)?;
    let removed = ws.manager.remove_group(name).map_err(|e| e.to_string())?;
    println!("Deleted group '{}'", removed.name());
    Ok(())
}

pub fn rename(dir: &Path, name: &str, new_name: &str) -> Result<(), String> {
    let mut ws = super::open(dir)?;
    ws.manager
        .rename_group(name, new_name)
        .map_err(|e| e.to_string())?;
    println!("Renamed group '{name}' to '{}'", new_name.trim());
    Ok(())
}

pub fn add_world(dir: &Path, name: &str, world: &str) -> Result<(), String> {
    let mut ws = super::open(dir)?;
    let added = ws
        .manager
        .add_world(name, world)
        .map_err(|e| e.to_string())?;
    if added {
        println!("Added {world} to group '{name}'");
    } else {
        println!("  {world} is already in group '{name}'");
    }
    Ok(())
}

pub fn remove_world(dir: &Path, name: &str, world: &str) -> Result<(), String> {
    let mut ws = super::open(dir)?;
    let removed = ws
        .manager
        .remove_world(name, world)
        .map_err(|e| e.to_string())?;
    if removed {
        println!("Removed {world} from group '{name}'");
    } else {
        println!("  {world} is not in group '{name}'");
    }
    Ok(())
}
