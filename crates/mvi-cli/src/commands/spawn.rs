use std::path::Path;

use colored::Colorize;
use mvi_core::SpawnPriority;

pub fn run(
    dir: &Path,
    name: &str,
    world: Option<String>,
    priority: Option<&str>,
    overriding: bool,
) -> Result<(), String> {
    let priority = priority
        .map(|p| SpawnPriority::parse(p).ok_or_else(|| format!("unknown spawn priority \"{p}\"")))
        .transpose()?;
    if world.is_none() && (priority.is_some() || overriding) {
        return Err("a spawn world is required to set a priority or override".into());
    }

    let mut ws = super::open(dir)?;
    let outside = ws
        .manager
        .edit(name, |group| {
            match world {
                Some(world) => {
                    let outside = !group.contains_world(&world);
                    group.set_spawn_world(Some(world));
                    group.set_overriding_spawn(overriding);
                    if let Some(priority) = priority {
                        group.set_spawn_priority(priority);
                    }
                    outside
                }
                None => {
                    group.set_spawn_world(None);
                    group.set_overriding_spawn(false);
                    group.set_spawn_priority(SpawnPriority::default());
                    false
                }
            }
        })
        .map_err(|e| e.to_string())?;

    if let Some(group) = ws.manager.group(name) {
        if outside {
            eprintln!(
                "{} spawn world is not part of group '{}'",
                "warning:".yellow(),
                group.name()
            );
        }
        println!("Spawn for '{}': {}", group.name(), super::describe_spawn(group));
    }
    Ok(())
}
