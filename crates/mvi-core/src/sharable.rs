use std::fmt;

use serde::{Deserialize, Serialize};

/// One player attribute that a world group can share between its worlds.
///
/// Declaration order is the canonical order used whenever shares are listed
/// or written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sharable {
    /// Main inventory contents.
    Inventory,
    /// Equipped armor.
    Armor,
    /// The selected hotbar slot.
    HeldItem,
    /// Ender chest contents.
    EnderChest,
    /// Current health.
    Health,
    /// Food level.
    Hunger,
    /// Food saturation.
    Saturation,
    /// Food exhaustion.
    Exhaustion,
    /// Progress toward the next level.
    Experience,
    /// Experience level.
    Level,
    /// Active potion effects.
    PotionEffects,
    /// Economy balance.
    Economy,
    /// Bed spawn location.
    BedSpawn,
    /// Location the player was last seen at.
    LastLocation,
}

impl Sharable {
    /// Every sharable in canonical order.
    pub const ALL: [Sharable; 14] = [
        Self::Inventory,
        Self::Armor,
        Self::HeldItem,
        Self::EnderChest,
        Self::Health,
        Self::Hunger,
        Self::Saturation,
        Self::Exhaustion,
        Self::Experience,
        Self::Level,
        Self::PotionEffects,
        Self::Economy,
        Self::BedSpawn,
        Self::LastLocation,
    ];

    /// The token this sharable is written as.
    pub fn token(self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Armor => "armor",
            Self::HeldItem => "held_item",
            Self::EnderChest => "ender_chest",
            Self::Health => "health",
            Self::Hunger => "hunger",
            Self::Saturation => "saturation",
            Self::Exhaustion => "exhaustion",
            Self::Experience => "experience",
            Self::Level => "level",
            Self::PotionEffects => "potion_effects",
            Self::Economy => "economy",
            Self::BedSpawn => "bed_spawn",
            Self::LastLocation => "last_location",
        }
    }

    /// Look up a single sharable by token. Meta-groupings are not sharables;
    /// use [`ShareToken::parse`] to accept those too.
    pub fn from_token(token: &str) -> Option<Self> {
        let normalized = normalize(token);
        Self::ALL.into_iter().find(|s| s.token() == normalized)
    }
}

impl fmt::Display for Sharable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// A named bundle of sharables accepted wherever a share token is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareGrouping {
    /// Every sharable.
    All,
    /// Health, food, experience, and potion effects.
    Stats,
    /// Inventory, armor, held item, and ender chest.
    Inventories,
    /// Bed spawn and last location.
    Locations,
}

impl ShareGrouping {
    /// Every grouping.
    pub const ALL: [ShareGrouping; 4] = [Self::All, Self::Stats, Self::Inventories, Self::Locations];

    /// The token this grouping is written as.
    pub fn token(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Stats => "stats",
            Self::Inventories => "inventories",
            Self::Locations => "locations",
        }
    }

    /// The sharables this grouping stands for.
    pub fn members(self) -> &'static [Sharable] {
        match self {
            Self::All => &Sharable::ALL,
            Self::Stats => &[
                Sharable::Health,
                Sharable::Hunger,
                Sharable::Saturation,
                Sharable::Exhaustion,
                Sharable::Experience,
                Sharable::Level,
                Sharable::PotionEffects,
            ],
            Self::Inventories => &[
                Sharable::Inventory,
                Sharable::Armor,
                Sharable::HeldItem,
                Sharable::EnderChest,
            ],
            Self::Locations => &[Sharable::BedSpawn, Sharable::LastLocation],
        }
    }
}

/// What a share token resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareToken {
    /// A single sharable.
    One(Sharable),
    /// A named bundle.
    Grouping(ShareGrouping),
}

impl ShareToken {
    /// Parse a token case-insensitively. `-` and `_` are interchangeable.
    pub fn parse(token: &str) -> Option<Self> {
        if let Some(sharable) = Sharable::from_token(token) {
            return Some(Self::One(sharable));
        }
        let normalized = normalize(token);
        ShareGrouping::ALL
            .into_iter()
            .find(|g| g.token() == normalized)
            .map(Self::Grouping)
    }

    /// The sharables the token expands to.
    pub fn expand(self) -> &'static [Sharable] {
        match self {
            Self::One(sharable) => {
                let i = sharable as usize;
                &CANONICAL[i..=i]
            }
            Self::Grouping(grouping) => grouping.members(),
        }
    }
}

static CANONICAL: [Sharable; 14] = Sharable::ALL;

fn normalize(token: &str) -> String {
    token.trim().to_ascii_lowercase().replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        let mut tokens: Vec<&str> = Sharable::ALL.iter().map(|s| s.token()).collect();
        tokens.extend(ShareGrouping::ALL.iter().map(|g| g.token()));
        let count = tokens.len();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), count);
    }

    #[test]
    fn from_token_roundtrips_every_sharable() {
        for sharable in Sharable::ALL {
            assert_eq!(Sharable::from_token(sharable.token()), Some(sharable));
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(
            ShareToken::parse("Potion-Effects"),
            Some(ShareToken::One(Sharable::PotionEffects))
        );
        assert_eq!(
            ShareToken::parse("ALL"),
            Some(ShareToken::Grouping(ShareGrouping::All))
        );
        assert_eq!(ShareToken::parse("mana"), None);
    }

    #[test]
    fn single_token_expands_to_itself() {
        assert_eq!(
            ShareToken::One(Sharable::Economy).expand(),
            &[Sharable::Economy]
        );
    }

    #[test]
    fn all_is_declaration_order() {
        let mut sorted = Sharable::ALL;
        sorted.sort();
        assert_eq!(sorted, Sharable::ALL);
    }
}
