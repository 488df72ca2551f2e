//! Core types for Multiverse Inventories: world groups, shared player
//! attributes, and their persisted form.
//!
//! A world group is a named set of worlds whose players share a chosen set of
//! attributes (inventory, health, experience, ...). This crate parses groups
//! from a JSON document tree, writes them back, and keeps them consistent
//! through the [`GroupManager`]. It knows nothing about a game server: the
//! host supplies the [`WorldRegistry`] and a [`GroupStore`].

/// Compact string codecs for potion effects and locations.
pub mod data_strings;
/// Generic document tree that groups and profiles are read from.
pub mod document;
/// Error types used throughout the crate.
pub mod error;
/// A single world group and its document form.
pub mod group;
/// Owner of all groups; persists every mutation.
pub mod manager;
/// Per-player attribute values and syncing through shares.
pub mod profile;
/// The host's view of which worlds exist.
pub mod registry;
/// Per-attribute value serializers.
pub mod serializer;
/// Application settings.
pub mod settings;
/// Shareable attributes and share groupings.
pub mod sharable;
/// The set of attributes a group shares.
pub mod shares;
/// Spawn settings and priorities.
pub mod spawn;
/// Group and profile persistence.
pub mod store;
/// Typed attribute values.
pub mod value;
/// Non-fatal load and validation findings.
pub mod warning;

/// Re-export the document tree.
pub use document::{Node, NodeMap};
/// Re-export error types.
pub use error::{
    DeserializationError, DeserializeResult, GroupError, GroupResult, ProfileError,
    SettingsError, StoreError,
};
/// Re-export group types.
pub use group::WorldGroup;
/// Re-export manager types.
pub use manager::{GroupManager, LoadReport};
/// Re-export profile types.
pub use profile::PlayerProfile;
/// Re-export registry types.
pub use registry::{KnownWorlds, WorldRegistry};
/// Re-export settings.
pub use settings::Settings;
/// Re-export sharable types.
pub use sharable::{ShareGrouping, ShareToken, Sharable};
/// Re-export shares.
pub use shares::Shares;
/// Re-export spawn types.
pub use spawn::{SpawnPriority, SpawnSettings};
/// Re-export store types.
pub use store::{GroupStore, JsonGroupStore, MemoryGroupStore, ProfileStore};
/// Re-export value types.
pub use value::{Location, PotionEffect, PotionFlags, ProfileValue};
/// Re-export warnings.
pub use warning::LoadWarning;
