use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::document::{Node, NodeMap};
use crate::error::StoreError;
use crate::group::WorldGroup;
use crate::profile::PlayerProfile;

/// Persistence collaborator for world groups.
///
/// The group document is a key-value map with one entry per group, keyed by
/// group name. [`GroupManager`](crate::manager::GroupManager) calls
/// [`update_world_group`](Self::update_world_group) after every mutation.
pub trait GroupStore {
    /// The whole group document. An empty store yields an empty map.
    fn load_document(&self) -> Result<Node, StoreError>;

    /// Write one group's entry, replacing any existing entry of that name.
    fn update_world_group(&mut self, group: &WorldGroup) -> Result<(), StoreError>;

    /// Delete one group's entry. Removing an absent entry is not an error.
    fn remove_world_group(&mut self, name: &str) -> Result<(), StoreError>;
}

/// Group store backed by a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonGroupStore {
    path: PathBuf,
}

impl JsonGroupStore {
    /// A store over `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<NodeMap, StoreError> {
        match read_json(&self.path)? {
            None => Ok(NodeMap::new()),
            Some(Node::Map(map)) => Ok(map),
            Some(_) => Err(StoreError::NotAMap(self.path.display().to_string())),
        }
    }
}

impl GroupStore for JsonGroupStore {
    fn load_document(&self) -> Result<Node, StoreError> {
        self.read_map().map(Node::Map)
    }

    fn update_world_group(&mut self, group: &WorldGroup) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        map.insert(group.name().to_string(), group.to_document());
        write_json(&self.path, &Node::Map(map))?;
        debug!(group = %group.name(), path = %self.path.display(), "saved world group");
        Ok(())
    }

    fn remove_world_group(&mut self, name: &str) -> Result<(), StoreError> {
        let mut map = self.read_map()?;
        if map.remove(name).is_some() {
            write_json(&self.path, &Node::Map(map))?;
            debug!(group = %name, path = %self.path.display(), "removed world group");
        }
        Ok(())
    }
}

/// Group store that keeps the document in memory and counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryGroupStore {
    document: NodeMap,
    updates: usize,
    removals: usize,
}

impl MemoryGroupStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with a group document.
    pub fn with_document(document: NodeMap) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The current document.
    pub fn document(&self) -> &NodeMap {
        &self.document
    }

    /// Number of `update_world_group` calls so far.
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Number of `remove_world_group` calls so far.
    pub fn removals(&self) -> usize {
        self.removals
    }
}

impl GroupStore for MemoryGroupStore {
    fn load_document(&self) -> Result<Node, StoreError> {
        Ok(Node::Map(self.document.clone()))
    }

    fn update_world_group(&mut self, group: &WorldGroup) -> Result<(), StoreError> {
        self.updates += 1;
        self.document
            .insert(group.name().to_string(), group.to_document());
        Ok(())
    }

    fn remove_world_group(&mut self, name: &str) -> Result<(), StoreError> {
        self.removals += 1;
        self.document.remove(name);
        Ok(())
    }
}

/// Player profiles stored as JSON files under
/// `<root>/<group>/<player>.json`. Player file names are lower-cased.
///
/// Group and player names must each be a single plain path segment; names
/// such as `..` or `a/b` are rejected with [`StoreError::InvalidName`].
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    /// A store rooted at `root`. Directories are created on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn group_dir(&self, group: &str) -> Result<PathBuf, StoreError> {
        Ok(self.root.join(file_segment(group)?))
    }

    fn path(&self, group: &str, player: &str) -> Result<PathBuf, StoreError> {
        let player = player.to_lowercase();
        let file = format!("{}.json", file_segment(&player)?);
        Ok(self.group_dir(group)?.join(file))
    }

    /// Load a player's profile for a group. A missing file yields an empty
    /// profile.
    pub fn load(&self, group: &str, player: &str) -> Result<PlayerProfile, StoreError> {
        match read_json(&self.path(group, player)?)? {
            None => Ok(PlayerProfile::new(player)),
            Some(node) => Ok(PlayerProfile::from_document(player, &node)?),
        }
    }

    /// Write a player's profile for a group, replacing any stored one.
    pub fn save(&self, group: &str, profile: &PlayerProfile) -> Result<(), StoreError> {
        let path = self.path(group, profile.player())?;
        write_json(&path, &profile.to_document()?)?;
        debug!(group = %group, player = %profile.player(), "saved player profile");
        Ok(())
    }

    /// Delete a stored profile. Returns whether a file was removed.
    pub fn remove(&self, group: &str, player: &str) -> Result<bool, StoreError> {
        let path = self.path(group, player)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// Delete every stored profile of a group. Returns whether the group had
    /// a profile directory.
    pub fn remove_group(&self, group: &str) -> Result<bool, StoreError> {
        let dir = self.group_dir(group)?;
        match fs::remove_dir_all(&dir) {
            Ok(()) => {
                debug!(group = %group, "removed group profiles");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io {
                path: dir.display().to_string(),
                source,
            }),
        }
    }

    /// Move a group's profiles to a new group name. Returns whether there
    /// was anything to move.
    pub fn rename_group(&self, from: &str, to: &str) -> Result<bool, StoreError> {
        let source_dir = self.group_dir(from)?;
        let target_dir = self.group_dir(to)?;
        if !source_dir.exists() {
            return Ok(false);
        }
        fs::rename(&source_dir, &target_dir).map_err(|source| StoreError::Io {
            path: target_dir.display().to_string(),
            source,
        })?;
        debug!(from = %from, to = %to, "moved group profiles");
        Ok(true)
    }
}

/// Accept `name` only if it is exactly one normal path component.
fn file_segment(name: &str) -> Result<&str, StoreError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None)
            if part.to_str() == Some(name) && !name.contains(['/', '\\']) =>
        {
            Ok(name)
        }
        _ => Err(StoreError::InvalidName(name.to_string())),
    }
}

fn read_json(path: &Path) -> Result<Option<Node>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    if content.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Json {
            path: path.display().to_string(),
            source,
        })
}

fn write_json(path: &Path, node: &Node) -> Result<(), StoreError> {
    let io_err = |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(node).map_err(|source| StoreError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json + "\n").map_err(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sharable::Sharable;
    use crate::shares::Shares;
    use crate::value::{Location, ProfileValue};
    use tempfile::TempDir;

    fn survival() -> WorldGroup {
        let mut group = WorldGroup::new("survival");
        group.add_world("world");
        group.set_shares(Shares::from_tokens(["inventories"]));
        group
    }

    #[test]
    fn missing_group_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonGroupStore::new(dir.path().join("groups.json"));
        assert_eq!(store.load_document().unwrap(), Node::empty_map());
    }

    #[test]
    fn json_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groups.json");
        let mut store = JsonGroupStore::new(&path);
        store.update_world_group(&survival()).unwrap();
        store.update_world_group(&WorldGroup::new("creative")).unwrap();

        let reopened = JsonGroupStore::new(&path);
        let doc = reopened.load_document().unwrap();
        let map = doc.as_map().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["survival"], survival().to_document());

        store.remove_world_group("creative").unwrap();
        let doc = reopened.load_document().unwrap();
        assert!(doc.get("creative").is_none());
    }

    #[test]
    fn non_map_group_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(&path, "[1, 2]").unwrap();
        let err = JsonGroupStore::new(&path).load_document().unwrap_err();
        assert!(matches!(err, StoreError::NotAMap(_)));
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("groups.json");
        fs::write(&path, "{ not json").unwrap();
        let err = JsonGroupStore::new(&path).load_document().unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[test]
    fn memory_store_counts_writes() {
        let mut store = MemoryGroupStore::new();
        store.update_world_group(&survival()).unwrap();
        store.update_world_group(&survival()).unwrap();
        store.remove_world_group("survival").unwrap();
        assert_eq!(store.updates(), 2);
        assert_eq!(store.removals(), 1);
        assert!(store.document().is_empty());
    }

    #[test]
    fn profile_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());

        let mut profile = PlayerProfile::new("Steve");
        profile
            .set(Sharable::Health, ProfileValue::Number(20.0))
            .unwrap();
        profile
            .set(
                Sharable::LastLocation,
                ProfileValue::Location(Location::new("world", 1.0, 64.0, 1.0)),
            )
            .unwrap();
        store.save("survival", &profile).unwrap();
        assert!(dir.path().join("survival").join("steve.json").exists());

        let loaded = store.load("survival", "Steve").unwrap();
        assert_eq!(loaded, profile);

        assert!(store.remove("survival", "steve").unwrap());
        assert!(!store.remove("survival", "steve").unwrap());
    }

    #[test]
    fn profile_names_must_be_plain_segments() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("profiles");
        let store = ProfileStore::new(&root);
        let profile = PlayerProfile::new("Steve");

        for group in ["../escaped", "a/b", "..", ".", "", "a\\b"] {
            assert!(
                matches!(store.save(group, &profile), Err(StoreError::InvalidName(_))),
                "group name {group:?} was accepted"
            );
        }
        assert!(matches!(
            store.load("survival", "../steve"),
            Err(StoreError::InvalidName(_))
        ));
        assert!(!dir.path().join("escaped").exists());
        assert!(!root.exists());
    }

    #[test]
    fn group_directories_move_and_disappear() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path());
        store.save("creative", &PlayerProfile::new("Alex")).unwrap();

        assert!(store.rename_group("creative", "build").unwrap());
        assert!(!dir.path().join("creative").exists());
        assert!(dir.path().join("build").join("alex.json").exists());

        assert!(store.remove_group("build").unwrap());
        assert!(!dir.path().join("build").exists());
        assert!(!store.remove_group("build").unwrap());
        assert!(!store.rename_group("missing", "other").unwrap());
    }

    #[test]
    fn missing_profile_is_empty() {
        let dir = TempDir::new().unwrap();
        let profile = ProfileStore::new(dir.path()).load("survival", "Alex").unwrap();
        assert_eq!(profile.player(), "Alex");
        assert!(profile.is_empty());
    }
}
