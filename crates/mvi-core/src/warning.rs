use std::fmt;

use tracing::warn;

use crate::shares::Shares;

/// A non-fatal problem found while loading or validating groups. A safe
/// default has already been applied when one of these is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// `shares` was present but not a list; the group shares nothing.
    MalformedShares {
        /// Group the entry belongs to.
        group: String,
    },
    /// A share token matched no sharable or grouping.
    UnknownShare {
        /// Group the entry belongs to.
        group: String,
        /// The unrecognized token.
        token: String,
    },
    /// `spawn` was present but not a map; spawn settings left at defaults.
    MalformedSpawn {
        /// Group the entry belongs to.
        group: String,
    },
    /// `spawn.priority` named no known priority; left at `NORMAL`.
    UnknownPriority {
        /// Group the entry belongs to.
        group: String,
        /// The priority as written.
        priority: String,
    },
    /// The spawn world is not one of the group's worlds.
    SpawnWorldOutsideGroup {
        /// The group.
        group: String,
        /// Its spawn world.
        world: String,
    },
    /// A known world belongs to no group.
    UngroupedWorld {
        /// The world.
        world: String,
    },
    /// Two groups containing the same world share the same attributes, so
    /// the stored value depends on which group is consulted first.
    ConflictingShares {
        /// The world both groups contain.
        world: String,
        /// First group, by name.
        first: String,
        /// Second group, by name.
        second: String,
        /// Sharables both groups share.
        shares: Shares,
    },
}

impl LoadWarning {
    /// Emit this warning through `tracing`.
    pub fn log(&self) {
        warn!("{self}");
    }
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedShares { group } => {
                write!(f, "shares formatted incorrectly for group: {group}")
            }
            Self::UnknownShare { group, token } => {
                write!(f, "unknown share \"{token}\" in group: {group}")
            }
            Self::MalformedSpawn { group } => {
                write!(f, "spawn settings formatted incorrectly for group: {group}")
            }
            Self::UnknownPriority { group, priority } => {
                write!(f, "unknown spawn priority \"{priority}\" in group: {group}")
            }
            Self::SpawnWorldOutsideGroup { group, world } => {
                write!(f, "spawn world {world} is not part of group: {group}")
            }
            Self::UngroupedWorld { world } => write!(f, "world {world} is not in any group"),
            Self::ConflictingShares {
                world,
                first,
                second,
                shares,
            } => write!(
                f,
                "groups {first} and {second} both share [{shares}] in world {world}"
            ),
        }
    }
}
