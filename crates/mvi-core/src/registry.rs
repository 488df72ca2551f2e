use std::collections::BTreeSet;

/// The host platform's view of which worlds exist.
///
/// Only consulted for diagnostics and validation. A group may list worlds
/// the registry does not know, e.g. worlds that are not loaded right now.
pub trait WorldRegistry {
    /// Whether the host knows a world of this exact name.
    fn world_exists(&self, world: &str) -> bool;

    /// Every world the host knows about, in a stable order.
    fn worlds(&self) -> Vec<String>;
}

/// A registry over a fixed list of world names, as read from settings.
#[derive(Debug, Clone, Default)]
pub struct KnownWorlds {
    worlds: BTreeSet<String>,
}

impl KnownWorlds {
    /// A registry holding exactly these worlds.
    pub fn new<I, S>(worlds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            worlds: worlds.into_iter().map(Into::into).collect(),
        }
    }
}

impl WorldRegistry for KnownWorlds {
    fn world_exists(&self, world: &str) -> bool {
        self.worlds.contains(world)
    }

    fn worlds(&self) -> Vec<String> {
        self.worlds.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_worlds_lookup() {
        let registry = KnownWorlds::new(["world", "world_nether"]);
        assert!(registry.world_exists("world"));
        assert!(!registry.world_exists("World"));
        assert_eq!(registry.worlds(), vec!["world", "world_nether"]);
    }
}
