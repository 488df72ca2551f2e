use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::debug;

use crate::document::{Node, NodeMap};
use crate::error::{DeserializationError, DeserializeResult};
use crate::profile::PlayerProfile;
use crate::registry::WorldRegistry;
use crate::sharable::Sharable;
use crate::shares::Shares;
use crate::spawn::{SpawnPriority, SpawnSettings};
use crate::warning::LoadWarning;

/// Name of the group created on first run.
pub const DEFAULT_GROUP_NAME: &str = "default";

const KEY_WORLDS: &str = "worlds";
const KEY_SHARES: &str = "shares";
const KEY_SPAWN: &str = "spawn";
const KEY_SPAWN_WORLD: &str = "world";
const KEY_SPAWN_OVERRIDE: &str = "override_mv_spawn";
const KEY_SPAWN_PRIORITY: &str = "priority";

/// A named set of worlds sharing one set of player attributes and one spawn
/// configuration.
///
/// Setters only change the group in memory. Changes that should be persisted
/// go through [`GroupManager`](crate::manager::GroupManager), which writes
/// the group back after every mutation.
///
/// The group owns the profiles of the players it has seen. They are stored
/// separately from the group document, so equality only compares the
/// persisted settings: name, worlds, shares and spawn.
#[derive(Debug, Clone)]
pub struct WorldGroup {
    name: String,
    worlds: BTreeSet<String>,
    shares: Shares,
    spawn: SpawnSettings,
    // Keyed by lower-cased player name.
    profiles: BTreeMap<String, PlayerProfile>,
}

impl WorldGroup {
    /// An empty group. A group must gain at least one world before it is
    /// persisted.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            worlds: BTreeSet::new(),
            shares: Shares::new(),
            spawn: SpawnSettings::default(),
            profiles: BTreeMap::new(),
        }
    }

    /// The group created on first run: every given world, sharing everything.
    pub fn default_group<I, S>(worlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut group = Self::new(DEFAULT_GROUP_NAME);
        group.worlds = worlds.into_iter().map(Into::into).collect();
        group.shares = Shares::all();
        group
    }

    /// Build a group from its document node.
    ///
    /// `worlds` is required and must be a list with at least one entry;
    /// anything else rejects the group. Problems with the optional `shares` and `spawn` entries are
    /// pushed to `warnings` (and logged) and leave those settings at their
    /// defaults.
    pub fn from_document(
        name: &str,
        node: &Node,
        registry: &dyn WorldRegistry,
        warnings: &mut Vec<LoadWarning>,
    ) -> DeserializeResult<Self> {
        let map = node.as_map().ok_or_else(|| DeserializationError::MalformedGroup {
            group: name.to_string(),
        })?;

        let mut group = Self::new(name);
        group.read_worlds(map, registry)?;

        let mut emit = |warning: LoadWarning| {
            warning.log();
            warnings.push(warning);
        };
        if let Some(shares) = map.get(KEY_SHARES) {
            group.read_shares(shares, &mut emit);
        }
        if let Some(spawn) = map.get(KEY_SPAWN) {
            group.read_spawn(spawn, &mut emit);
        }
        Ok(group)
    }

    fn read_worlds(&mut self, map: &NodeMap, registry: &dyn WorldRegistry) -> DeserializeResult<()> {
        let worlds = match map.get(KEY_WORLDS) {
            None => {
                return Err(DeserializationError::MissingWorlds {
                    group: self.name.clone(),
                });
            }
            Some(Node::List(items)) => items,
            Some(_) => {
                return Err(DeserializationError::MalformedWorlds {
                    group: self.name.clone(),
                });
            }
        };
        for world in worlds.iter().filter(|w| **w != Node::Null) {
            let world = world.to_string();
            if !registry.world_exists(&world) {
                debug!(group = %self.name, world = %world, "world is not loaded");
            }
            self.worlds.insert(world);
        }
        if self.worlds.is_empty() {
            return Err(DeserializationError::EmptyWorlds {
                group: self.name.clone(),
            });
        }
        Ok(())
    }

    fn read_shares(&mut self, node: &Node, emit: &mut impl FnMut(LoadWarning)) {
        let Some(items) = node.as_list() else {
            emit(LoadWarning::MalformedShares {
                group: self.name.clone(),
            });
            return;
        };
        let (shares, unknown) = Shares::parse_tokens(items.iter().map(Node::to_string));
        for token in unknown {
            emit(LoadWarning::UnknownShare {
                group: self.name.clone(),
                token,
            });
        }
        self.shares = shares;
    }

    fn read_spawn(&mut self, node: &Node, emit: &mut impl FnMut(LoadWarning)) {
        let Some(props) = node.as_map() else {
            emit(LoadWarning::MalformedSpawn {
                group: self.name.clone(),
            });
            return;
        };
        if let Some(world) = props.get(KEY_SPAWN_WORLD).filter(|w| **w != Node::Null) {
            self.spawn.world = Some(world.to_string());
        }
        if let Some(overriding) = props.get(KEY_SPAWN_OVERRIDE) {
            self.spawn.overriding = overriding.to_bool_lenient();
        }
        if let Some(priority) = props.get(KEY_SPAWN_PRIORITY) {
            let name = priority.to_string();
            match SpawnPriority::parse(&name) {
                Some(priority) => self.spawn.priority = priority,
                None => emit(LoadWarning::UnknownPriority {
                    group: self.name.clone(),
                    priority: name,
                }),
            }
        }
    }

    /// Write the group back to a document node.
    ///
    /// `worlds` is always written. `shares` is written only when non-empty
    /// and `spawn` only when a spawn world is set: a missing entry means "not
    /// configured".
    pub fn to_document(&self) -> Node {
        let mut map = NodeMap::new();
        map.insert(
            KEY_WORLDS.to_string(),
            self.worlds.iter().map(|w| Node::from(w.as_str())).collect(),
        );
        if !self.shares.is_empty() {
            map.insert(
                KEY_SHARES.to_string(),
                self.shares.to_tokens().into_iter().map(Node::from).collect(),
            );
        }
        if let Some(world) = &self.spawn.world {
            let mut spawn = NodeMap::new();
            spawn.insert(KEY_SPAWN_WORLD.to_string(), Node::from(world.as_str()));
            spawn.insert(
                KEY_SPAWN_OVERRIDE.to_string(),
                Node::Boolean(self.spawn.overriding),
            );
            spawn.insert(
                KEY_SPAWN_PRIORITY.to_string(),
                Node::from(self.spawn.priority.name()),
            );
            map.insert(KEY_SPAWN.to_string(), Node::Map(spawn));
        }
        Node::Map(map)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The group's name, as written.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the group's name.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Member worlds in name order.
    pub fn worlds(&self) -> impl Iterator<Item = &str> {
        self.worlds.iter().map(String::as_str)
    }

    /// Number of member worlds.
    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Whether the world is a member. Names are case-sensitive.
    pub fn contains_world(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    /// Returns true if the world was not already a member.
    pub fn add_world(&mut self, world: impl Into<String>) -> bool {
        self.worlds.insert(world.into())
    }

    /// Returns true if the world was a member.
    pub fn remove_world(&mut self, world: &str) -> bool {
        self.worlds.remove(world)
    }

    /// What the group shares.
    pub fn shares(&self) -> &Shares {
        &self.shares
    }

    /// Replace what the group shares.
    pub fn set_shares(&mut self, shares: Shares) {
        self.shares = shares;
    }

    /// Whether the group shares one attribute.
    pub fn is_sharing(&self, sharable: Sharable) -> bool {
        self.shares.contains(sharable)
    }

    /// All spawn settings.
    pub fn spawn(&self) -> &SpawnSettings {
        &self.spawn
    }

    /// The configured spawn world, if any.
    pub fn spawn_world(&self) -> Option<&str> {
        self.spawn.world.as_deref()
    }

    /// Set or clear the spawn world.
    pub fn set_spawn_world(&mut self, world: Option<String>) {
        self.spawn.world = world;
    }

    /// Whether the group's spawn takes precedence over the host's.
    pub fn is_overriding_spawn(&self) -> bool {
        self.spawn.overriding
    }

    /// Set whether the group's spawn takes precedence over the host's.
    pub fn set_overriding_spawn(&mut self, overriding: bool) {
        self.spawn.overriding = overriding;
    }

    /// Priority of the group's spawn handling.
    pub fn spawn_priority(&self) -> SpawnPriority {
        self.spawn.priority
    }

    /// Set the priority of the group's spawn handling.
    pub fn set_spawn_priority(&mut self, priority: SpawnPriority) {
        self.spawn.priority = priority;
    }

    // -----------------------------------------------------------------------
    // Profiles
    // -----------------------------------------------------------------------

    /// The profile held in memory for a player (case-insensitive), if any.
    pub fn profile(&self, player: &str) -> Option<&PlayerProfile> {
        self.profiles.get(&player.to_lowercase())
    }

    /// The profile held in memory for a player, created empty if missing.
    pub fn profile_mut(&mut self, player: &str) -> &mut PlayerProfile {
        self.profiles
            .entry(player.to_lowercase())
            .or_insert_with(|| PlayerProfile::new(player))
    }

    /// Hold a profile, replacing any existing one for the same player.
    pub fn insert_profile(&mut self, profile: PlayerProfile) -> Option<PlayerProfile> {
        self.profiles
            .insert(profile.player().to_lowercase(), profile)
    }

    /// Drop a player's profile from memory.
    pub fn remove_profile(&mut self, player: &str) -> Option<PlayerProfile> {
        self.profiles.remove(&player.to_lowercase())
    }

    /// Every profile held in memory.
    pub fn profiles(&self) -> impl Iterator<Item = &PlayerProfile> {
        self.profiles.values()
    }

    /// One-line description for display: name, worlds and shares.
    pub fn summary(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for WorldGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let worlds: Vec<&str> = self.worlds().collect();
        write!(
            f,
            "{}: {{Worlds: [{}], Shares: [{}]}}",
            self.name,
            worlds.join(", "),
            self.shares
        )
    }
}

impl PartialEq for WorldGroup {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.worlds == other.worlds
            && self.shares == other.shares
            && self.spawn == other.spawn
    }
}
