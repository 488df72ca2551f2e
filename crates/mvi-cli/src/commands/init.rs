use std::path::Path;

use mvi_core::Settings;
use mvi_core::settings::SETTINGS_FILE;

pub fn run(dir: &Path) -> Result<(), String> {
    if dir.join(SETTINGS_FILE).exists() {
        println!("Using existing {}", dir.join(SETTINGS_FILE).display());
    } else {
        let path = Settings::default()
            .save(dir)
            .map_err(|e| format!("cannot write settings: {e}"))?;
        println!("Created {}", path.display());
    }

    let mut ws = super::open(dir)?;
    if !ws.settings.create_default_group {
        println!("  Default group creation is disabled in settings.");
        return Ok(());
    }

    let created = ws
        .manager
        .first_run(&ws.registry)
        .map_err(|e| e.to_string())?
        .map(|group| group.summary());
    match created {
        Some(summary) => println!("Created group {summary}"),
        None if ws.manager.is_empty() => {
            println!("  No known worlds in settings; no default group created.")
        }
        None => println!("  {} groups already configured", ws.manager.len()),
    }

    println!();
    println!("Get started:");
    println!("  mvi list                        # List all groups");
    println!("  mvi create <group> <worlds...>  # Create a group");
    println!("  mvi shares <group> <tokens...>  # Choose what a group shares");
    Ok(())
}
