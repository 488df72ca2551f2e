use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::error::{DeserializationError, GroupError, GroupResult, StoreError};
use crate::group::WorldGroup;
use crate::profile::PlayerProfile;
use crate::registry::WorldRegistry;
use crate::shares::Shares;
use crate::spawn::SpawnPriority;
use crate::store::{GroupStore, ProfileStore};
use crate::warning::LoadWarning;

/// Outcome of [`GroupManager::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Names of the groups that loaded.
    pub loaded: Vec<String>,
    /// Groups rejected by a fatal error, with that error.
    pub skipped: Vec<(String, DeserializationError)>,
    /// Non-fatal problems; defaults were applied for each.
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// Whether any group was rejected.
    pub fn has_skipped(&self) -> bool {
        !self.skipped.is_empty()
    }

    /// Whether every group loaded without a warning.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.warnings.is_empty()
    }
}

/// Owns every world group and persists each mutation through its store.
///
/// Groups are looked up by name case-insensitively. Every mutating call
/// works on a copy of the group and only replaces the in-memory group once
/// the store has accepted it. Every group keeps at least one world.
///
/// With a [`ProfileStore`] attached, player profiles are read into their
/// group on first use and written back on capture. A group's stored profiles
/// move with it on rename and are deleted with it.
#[derive(Debug)]
pub struct GroupManager<S: GroupStore> {
    // Keyed by lower-cased group name.
    groups: BTreeMap<String, WorldGroup>,
    store: S,
    profiles: Option<ProfileStore>,
}

impl<S: GroupStore> GroupManager<S> {
    /// A manager with no groups and no profile store.
    pub fn new(store: S) -> Self {
        Self {
            groups: BTreeMap::new(),
            store,
            profiles: None,
        }
    }

    /// Persist player profiles through `profiles`.
    pub fn with_profile_store(mut self, profiles: ProfileStore) -> Self {
        self.profiles = Some(profiles);
        self
    }

    /// Load every group in the store's document.
    ///
    /// A group that fails to parse, or whose name matches an already loaded
    /// group ignoring case, is skipped and recorded in the report; the rest
    /// still load. Only a failure to read the document at all is returned as
    /// an error.
    pub fn load(store: S, registry: &dyn WorldRegistry) -> Result<(Self, LoadReport), StoreError> {
        let document = store.load_document()?;
        let entries = document
            .as_map()
            .ok_or_else(|| StoreError::NotAMap("group document".to_string()))?;

        let mut manager = Self::new(store);
        let mut report = LoadReport::default();
        for (name, node) in entries {
            let key = group_key(name);
            let parsed = match manager.groups.get(&key) {
                Some(existing) => Err(DeserializationError::DuplicateGroup {
                    group: name.clone(),
                    existing: existing.name().to_string(),
                }),
                None => WorldGroup::from_document(name, node, registry, &mut report.warnings),
            };
            match parsed {
                Ok(group) => {
                    manager.groups.insert(key, group);
                    report.loaded.push(name.clone());
                }
                Err(e) => {
                    warn!(group = %name, error = %e, "skipping world group");
                    report.skipped.push((name.clone(), e));
                }
            }
        }
        info!(
            loaded = report.loaded.len(),
            skipped = report.skipped.len(),
            warnings = report.warnings.len(),
            "loaded world groups"
        );
        Ok((manager, report))
    }

    /// Create and persist the default group, holding every world the
    /// registry knows, if there are no groups yet. Nothing is created when
    /// the registry knows no worlds.
    pub fn first_run(&mut self, registry: &dyn WorldRegistry) -> GroupResult<Option<&WorldGroup>> {
        if !self.groups.is_empty() {
            return Ok(None);
        }
        let worlds = registry.worlds();
        if worlds.is_empty() {
            warn!("no known worlds, skipping default world group");
            return Ok(None);
        }
        let group = WorldGroup::default_group(worlds);
        info!(worlds = group.world_count(), "creating default world group");
        self.insert_new(group).map(Some)
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Look up a group by name, ignoring case.
    pub fn group(&self, name: &str) -> Option<&WorldGroup> {
        self.groups.get(&group_key(name))
    }

    /// Whether a group of this name exists, ignoring case.
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.contains_key(&group_key(name))
    }

    /// All groups, ordered by name.
    pub fn groups(&self) -> impl Iterator<Item = &WorldGroup> {
        self.groups.values()
    }

    /// Every group containing the world. Groups may overlap.
    pub fn groups_for_world(&self, world: &str) -> Vec<&WorldGroup> {
        self.groups
            .values()
            .filter(|g| g.contains_world(world))
            .collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The group store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The profile store, if one is attached.
    pub fn profile_store(&self) -> Option<&ProfileStore> {
        self.profiles.as_ref()
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Create and persist a group. At least one world is required.
    pub fn create_group<I, W>(&mut self, name: &str, worlds: I) -> GroupResult<&WorldGroup>
    where
        I: IntoIterator<Item = W>,
        W: Into<String>,
    {
        let name = validate_name(name)?;
        if self.has_group(name) {
            return Err(GroupError::AlreadyExists(name.to_string()));
        }
        let mut group = WorldGroup::new(name);
        for world in worlds {
            group.add_world(world);
        }
        if group.world_count() == 0 {
            return Err(GroupError::EmptyWorlds(name.to_string()));
        }
        self.insert_new(group)
    }

    /// Delete a group along with its stored profiles.
    ///
    /// Profiles are deleted first; if that fails the group is left in place.
    pub fn remove_group(&mut self, name: &str) -> GroupResult<WorldGroup> {
        let key = group_key(name);
        let stored_name = self
            .groups
            .get(&key)
            .map(|g| g.name().to_string())
            .ok_or_else(|| GroupError::NotFound(name.to_string()))?;
        if let Some(profiles) = &self.profiles {
            profiles.remove_group(&stored_name)?;
        }
        self.store.remove_world_group(&stored_name)?;
        let removed = self
            .groups
            .remove(&key)
            .ok_or_else(|| GroupError::NotFound(name.to_string()))?;
        info!(group = %stored_name, "removed world group");
        Ok(removed)
    }

    /// Apply `change` to a group and persist the result.
    ///
    /// The change is rejected if it leaves the group without worlds. Renames
    /// made by `change` are honored: the old store entry is removed and the
    /// stored profiles move to the new name. If either step fails, the store
    /// is restored to the old entry and the group keeps its old name.
    pub fn edit<R>(
        &mut self,
        name: &str,
        change: impl FnOnce(&mut WorldGroup) -> R,
    ) -> GroupResult<R> {
        let key = group_key(name);
        let original = self
            .groups
            .get(&key)
            .cloned()
            .ok_or_else(|| GroupError::NotFound(name.to_string()))?;
        let mut group = original.clone();
        let out = change(&mut group);

        if group.world_count() == 0 {
            return Err(GroupError::EmptyWorlds(original.name().to_string()));
        }
        let renamed = group.name() != original.name();
        let new_key = group_key(group.name());
        if renamed {
            if validate_name(group.name())? != group.name() {
                return Err(GroupError::InvalidName(group.name().to_string()));
            }
            if new_key != key && self.groups.contains_key(&new_key) {
                return Err(GroupError::AlreadyExists(group.name().to_string()));
            }
        }

        self.store.update_world_group(&group)?;
        if renamed {
            if let Err(e) = self.complete_rename(&original, &group) {
                self.roll_back_rename(&original, &group);
                return Err(e);
            }
            info!(from = %original.name(), to = %group.name(), "renamed world group");
        }
        self.groups.remove(&key);
        self.groups.insert(new_key, group);
        Ok(out)
    }

    fn complete_rename(&mut self, original: &WorldGroup, group: &WorldGroup) -> GroupResult<()> {
        self.store.remove_world_group(original.name())?;
        if let Some(profiles) = &self.profiles {
            profiles.rename_group(original.name(), group.name())?;
        }
        Ok(())
    }

    fn roll_back_rename(&mut self, original: &WorldGroup, group: &WorldGroup) {
        if let Err(e) = self.store.update_world_group(original) {
            warn!(group = %original.name(), error = %e, "could not restore world group");
        }
        if let Err(e) = self.store.remove_world_group(group.name()) {
            warn!(group = %group.name(), error = %e, "could not remove renamed world group");
        }
    }

    /// Returns true if the world was not already in the group.
    pub fn add_world(&mut self, name: &str, world: &str) -> GroupResult<bool> {
        self.edit(name, |g| g.add_world(world))
    }

    /// Returns true if the world was in the group. Removing the group's last
    /// world fails with [`GroupError::EmptyWorlds`].
    pub fn remove_world(&mut self, name: &str, world: &str) -> GroupResult<bool> {
        self.edit(name, |g| g.remove_world(world))
    }

    /// Replace what a group shares.
    pub fn set_shares(&mut self, name: &str, shares: Shares) -> GroupResult<()> {
        self.edit(name, |g| g.set_shares(shares))
    }

    /// Set or clear a group's spawn world.
    pub fn set_spawn_world(&mut self, name: &str, world: Option<String>) -> GroupResult<()> {
        self.edit(name, |g| g.set_spawn_world(world))
    }

    /// Set whether a group's spawn takes precedence over the host's.
    pub fn set_overriding_spawn(&mut self, name: &str, overriding: bool) -> GroupResult<()> {
        self.edit(name, |g| g.set_overriding_spawn(overriding))
    }

    /// Set a group's spawn priority.
    pub fn set_spawn_priority(&mut self, name: &str, priority: SpawnPriority) -> GroupResult<()> {
        self.edit(name, |g| g.set_spawn_priority(priority))
    }

    /// Rename a group. The new name must be free, ignoring case.
    pub fn rename_group(&mut self, name: &str, new_name: &str) -> GroupResult<()> {
        let new_name = validate_name(new_name)?;
        self.edit(name, |g| g.rename(new_name))
    }

    fn insert_new(&mut self, group: WorldGroup) -> GroupResult<&WorldGroup> {
        self.store.update_world_group(&group)?;
        info!(group = %group.name(), "created world group");
        let key = group_key(group.name());
        Ok(&*self.groups.entry(key).or_insert(group))
    }

    // -----------------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------------

    fn ensure_profile(&mut self, group: &str, player: &str) -> GroupResult<&mut WorldGroup> {
        let entry = self
            .groups
            .get_mut(&group_key(group))
            .ok_or_else(|| GroupError::NotFound(group.to_string()))?;
        if entry.profile(player).is_none() {
            let profile = match &self.profiles {
                Some(store) => store.load(entry.name(), player)?,
                None => PlayerProfile::new(player),
            };
            entry.insert_profile(profile);
        }
        Ok(entry)
    }

    /// A player's profile in a group, read from the profile store on first
    /// use. Players with nothing stored get an empty profile.
    pub fn profile(&mut self, group: &str, player: &str) -> GroupResult<&PlayerProfile> {
        let entry = self.ensure_profile(group, player)?;
        Ok(&*entry.profile_mut(player))
    }

    /// Copy the group's shared attributes from a player's live `snapshot`
    /// into the group profile and persist it. Returns how many values were
    /// copied.
    pub fn capture_profile(&mut self, group: &str, snapshot: &PlayerProfile) -> GroupResult<usize> {
        let player = snapshot.player();
        let entry = self.ensure_profile(group, player)?;
        let shares = entry.shares().clone();
        let group_name = entry.name().to_string();
        let profile = entry.profile_mut(player);
        let copied = profile.capture_from(snapshot, &shares);
        let profile = profile.clone();

        if let Some(store) = &self.profiles {
            store.save(&group_name, &profile)?;
        }
        Ok(copied)
    }

    /// Copy the group's shared attributes from the group profile into a
    /// player's live `snapshot`. Returns how many values were copied.
    pub fn apply_profile(&mut self, group: &str, snapshot: &mut PlayerProfile) -> GroupResult<usize> {
        let player = snapshot.player().to_string();
        let entry = self.ensure_profile(group, &player)?;
        let shares = entry.shares().clone();
        Ok(entry.profile_mut(&player).apply_to(snapshot, &shares))
    }

    /// Drop a player's profile from the group and the profile store. Returns
    /// whether anything was held or stored.
    pub fn forget_profile(&mut self, group: &str, player: &str) -> GroupResult<bool> {
        let entry = self
            .groups
            .get_mut(&group_key(group))
            .ok_or_else(|| GroupError::NotFound(group.to_string()))?;
        let held = entry.remove_profile(player).is_some();
        let stored = match &self.profiles {
            Some(store) => store.remove(entry.name(), player)?,
            None => false,
        };
        Ok(held || stored)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    /// Non-fatal consistency checks across all groups. Nothing is logged;
    /// the caller decides how to surface the result.
    pub fn validate(&self, registry: &dyn WorldRegistry) -> Vec<LoadWarning> {
        let mut warnings = Vec::new();

        for group in self.groups.values() {
            if let Some(world) = group.spawn_world().filter(|w| !group.contains_world(w)) {
                warnings.push(LoadWarning::SpawnWorldOutsideGroup {
                    group: group.name().to_string(),
                    world: world.to_string(),
                });
            }
        }

        for world in registry.worlds() {
            if self.groups_for_world(&world).is_empty() {
                warnings.push(LoadWarning::UngroupedWorld { world });
            }
        }

        let grouped: BTreeSet<&str> = self.groups.values().flat_map(|g| g.worlds()).collect();
        for world in grouped {
            let groups = self.groups_for_world(world);
            for (i, first) in groups.iter().enumerate() {
                for second in &groups[i + 1..] {
                    let shared = first.shares().intersection(second.shares());
                    if !shared.is_empty() {
                        warnings.push(LoadWarning::ConflictingShares {
                            world: world.to_string(),
                            first: first.name().to_string(),
                            second: second.name().to_string(),
                            shares: shared,
                        });
                    }
                }
            }
        }

        warnings
    }
}

fn group_key(name: &str) -> String {
    name.to_lowercase()
}

/// Group names double as directory names for stored profiles, so they must
/// be a single plain path segment.
fn validate_name(name: &str) -> GroupResult<&str> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed.contains("..")
        || trimmed.contains(['/', '\\'])
        || trimmed.chars().any(char::is_whitespace);
    if invalid {
        return Err(GroupError::InvalidName(name.to_string()));
    }
    Ok(trimmed)
}
