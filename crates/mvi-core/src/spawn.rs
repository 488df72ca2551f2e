use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordering level used when several systems compete to set a player's spawn
/// point. Later levels run later and so win.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum SpawnPriority {
    /// Runs first.
    Lowest,
    /// Runs before `Normal`.
    Low,
    /// The default.
    #[default]
    Normal,
    /// Runs after `Normal`.
    High,
    /// Runs after `High`.
    Highest,
    /// Runs last; meant for observing the outcome.
    Monitor,
}

impl SpawnPriority {
    /// Every priority, lowest first.
    pub const ALL: [SpawnPriority; 6] = [
        Self::Lowest,
        Self::Low,
        Self::Normal,
        Self::High,
        Self::Highest,
        Self::Monitor,
    ];

    /// The upper-case name written to documents.
    pub fn name(self) -> &'static str {
        match self {
            Self::Lowest => "LOWEST",
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Highest => "HIGHEST",
            Self::Monitor => "MONITOR",
        }
    }

    /// Parse a priority name case-insensitively.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for SpawnPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where players entering a group spawn, and how that competes with the
/// host's own spawn handling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpawnSettings {
    /// When set, players entering the group spawn in this world.
    pub world: Option<String>,
    /// Take precedence over the host platform's spawn logic.
    pub overriding: bool,
    /// When the group's spawn handling runs.
    pub priority: SpawnPriority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priorities_are_ordered() {
        assert!(SpawnPriority::Lowest < SpawnPriority::Low);
        assert!(SpawnPriority::Normal < SpawnPriority::High);
        assert!(SpawnPriority::Highest < SpawnPriority::Monitor);
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!(SpawnPriority::parse("high"), Some(SpawnPriority::High));
        assert_eq!(SpawnPriority::parse("Monitor"), Some(SpawnPriority::Monitor));
        assert_eq!(SpawnPriority::parse("urgent"), None);
    }

    #[test]
    fn defaults() {
        let spawn = SpawnSettings::default();
        assert_eq!(spawn.world, None);
        assert!(!spawn.overriding);
        assert_eq!(spawn.priority, SpawnPriority::Normal);
    }
}
