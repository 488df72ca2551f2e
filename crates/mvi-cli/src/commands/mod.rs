pub mod check;
pub mod edit;
pub mod info;
pub mod init;
pub mod list;
pub mod potions;
pub mod profile;
pub mod shares;
pub mod spawn;

use std::path::Path;

use mvi_core::{
    GroupManager, JsonGroupStore, KnownWorlds, LoadReport, ProfileStore, Settings, WorldGroup,
};

use crate::logging;

/// Everything a command needs from a data directory.
pub struct Workspace {
    pub settings: Settings,
    pub registry: KnownWorlds,
    pub manager: GroupManager<JsonGroupStore>,
    pub report: LoadReport,
}

/// Load settings from `dir` and start logging at the configured level.
fn load_settings(dir: &Path) -> Result<Settings, String> {
    let settings = Settings::load(dir).map_err(|e| e.to_string())?;
    logging::init(&settings.log_level);
    Ok(settings)
}

/// Load settings and every group in `dir`, with profiles stored under the
/// configured profile root. Groups that fail to parse are left out and
/// recorded in the report.
fn open(dir: &Path) -> Result<Workspace, String> {
    let settings = load_settings(dir)?;
    let registry = settings.registry();
    let store = JsonGroupStore::new(settings.groups_path(dir));
    let (manager, report) = GroupManager::load(store, &registry).map_err(|e| e.to_string())?;
    let manager = manager.with_profile_store(ProfileStore::new(settings.profiles_path(dir)));
    Ok(Workspace {
        settings,
        registry,
        manager,
        report,
    })
}

/// Short spawn description for tables and summaries.
fn describe_spawn(group: &WorldGroup) -> String {
    match group.spawn_world() {
        None => "—".to_string(),
        Some(world) if group.is_overriding_spawn() => {
            format!("{world} ({}, override)", group.spawn_priority())
        }
        Some(world) => format!("{world} ({})", group.spawn_priority()),
    }
}

fn describe_shares(group: &WorldGroup) -> String {
    let shares = group.shares();
    if shares.is_empty() {
        "—".to_string()
    } else if shares.is_sharing_all() {
        "all".to_string()
    } else {
        shares.to_string()
    }
}
