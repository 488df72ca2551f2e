use std::collections::BTreeMap;

use tracing::warn;

use crate::document::{Node, NodeMap};
use crate::error::ProfileError;
use crate::serializer::{self, ValueKind};
use crate::sharable::Sharable;
use crate::shares::Shares;
use crate::value::ProfileValue;

/// The stored attribute values of one player within one world group.
///
/// A profile doubles as a snapshot of a player's live state: the host
/// captures the player into a profile, and group profiles are copied to and
/// from it through the group's [`Shares`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerProfile {
    player: String,
    values: BTreeMap<Sharable, ProfileValue>,
}

impl PlayerProfile {
    /// An empty profile for `player`.
    pub fn new(player: impl Into<String>) -> Self {
        Self {
            player: player.into(),
            values: BTreeMap::new(),
        }
    }

    /// The player this profile belongs to.
    pub fn player(&self) -> &str {
        &self.player
    }

    /// The stored value for a sharable, if any.
    pub fn get(&self, sharable: Sharable) -> Option<&ProfileValue> {
        self.values.get(&sharable)
    }

    /// Store a value, returning the previous one. The value must be the kind
    /// the sharable stores.
    pub fn set(
        &mut self,
        sharable: Sharable,
        value: ProfileValue,
    ) -> Result<Option<ProfileValue>, ProfileError> {
        let kind = ValueKind::of(sharable);
        if !kind.accepts(&value) {
            return Err(ProfileError::KindMismatch {
                sharable,
                expected: kind.name(),
                found: value.kind_name(),
            });
        }
        Ok(self.values.insert(sharable, value))
    }

    /// Remove a stored value, returning it.
    pub fn clear(&mut self, sharable: Sharable) -> Option<ProfileValue> {
        self.values.remove(&sharable)
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Stored values in sharable order.
    pub fn iter(&self) -> impl Iterator<Item = (Sharable, &ProfileValue)> {
        self.values.iter().map(|(s, v)| (*s, v))
    }

    /// Copy every shared attribute present in `snapshot` into this profile.
    /// Returns how many values were copied.
    pub fn capture_from(&mut self, snapshot: &PlayerProfile, shares: &Shares) -> usize {
        copy_shared(&snapshot.values, &mut self.values, shares)
    }

    /// Copy every shared attribute stored in this profile into `snapshot`.
    /// Returns how many values were copied.
    pub fn apply_to(&self, snapshot: &mut PlayerProfile, shares: &Shares) -> usize {
        copy_shared(&self.values, &mut snapshot.values, shares)
    }

    /// Serialize every value through the serializer registered for its
    /// sharable.
    pub fn to_document(&self) -> Result<Node, ProfileError> {
        let mut map = NodeMap::new();
        for (sharable, value) in &self.values {
            map.insert(
                sharable.token().to_string(),
                serializer::serialize_value(*sharable, value)?,
            );
        }
        Ok(Node::Map(map))
    }

    /// Read a profile written by [`to_document`](Self::to_document). Keys
    /// that name no sharable are logged and skipped.
    pub fn from_document(player: impl Into<String>, node: &Node) -> Result<Self, ProfileError> {
        let mut profile = Self::new(player);
        let map = node
            .as_map()
            .ok_or_else(|| ProfileError::NotAMap(profile.player.clone()))?;
        for (key, raw) in map {
            let Some(sharable) = Sharable::from_token(key) else {
                warn!(player = %profile.player, key = %key, "skipping unknown profile entry");
                continue;
            };
            let value = serializer::deserialize_value(sharable, raw)?;
            profile.values.insert(sharable, value);
        }
        Ok(profile)
    }
}

fn copy_shared(
    from: &BTreeMap<Sharable, ProfileValue>,
    to: &mut BTreeMap<Sharable, ProfileValue>,
    shares: &Shares,
) -> usize {
    let mut copied = 0;
    for sharable in shares.iter() {
        if let Some(value) = from.get(&sharable) {
            to.insert(sharable, value.clone());
            copied += 1;
        }
    }
    copied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Location, PotionEffect};

    fn snapshot() -> PlayerProfile {
        let mut p = PlayerProfile::new("Steve");
        p.set(Sharable::Health, ProfileValue::Number(17.5)).unwrap();
        p.set(Sharable::Level, ProfileValue::Integer(30)).unwrap();
        p.set(
            Sharable::PotionEffects,
            ProfileValue::PotionEffects(vec![PotionEffect::new("SPEED", 1, 600)]),
        )
        .unwrap();
        p.set(
            Sharable::Inventory,
            ProfileValue::Raw(Node::List(vec![Node::from("STONE:64")])),
        )
        .unwrap();
        p
    }

    #[test]
    fn set_rejects_wrong_kind() {
        let mut p = PlayerProfile::new("Alex");
        let err = p
            .set(Sharable::BedSpawn, ProfileValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, ProfileError::KindMismatch { .. }));
        assert!(p.is_empty());
    }

    #[test]
    fn capture_copies_only_shared() {
        let mut group_profile = PlayerProfile::new("Steve");
        let shares = Shares::from_tokens(["health", "potion_effects", "economy"]);
        let copied = group_profile.capture_from(&snapshot(), &shares);
        assert_eq!(copied, 2);
        assert!(group_profile.get(Sharable::Health).is_some());
        assert!(group_profile.get(Sharable::PotionEffects).is_some());
        assert!(group_profile.get(Sharable::Level).is_none());
        assert!(group_profile.get(Sharable::Inventory).is_none());
    }

    #[test]
    fn apply_overwrites_shared_values() {
        let mut stored = PlayerProfile::new("Steve");
        stored.set(Sharable::Level, ProfileValue::Integer(5)).unwrap();
        stored.set(Sharable::Health, ProfileValue::Number(2.0)).unwrap();

        let mut live = snapshot();
        let copied = stored.apply_to(&mut live, &Shares::from_tokens(["level"]));
        assert_eq!(copied, 1);
        assert_eq!(live.get(Sharable::Level), Some(&ProfileValue::Integer(5)));
        assert_eq!(live.get(Sharable::Health), Some(&ProfileValue::Number(17.5)));
    }

    #[test]
    fn document_roundtrip() {
        let mut p = snapshot();
        p.set(
            Sharable::BedSpawn,
            ProfileValue::Location(Location::new("world", 10.5, 70.0, -3.25)),
        )
        .unwrap();
        let node = p.to_document().unwrap();
        assert_eq!(
            node.get("potion_effects"),
            Some(&Node::from("SPEED:1:600"))
        );
        assert_eq!(PlayerProfile::from_document("Steve", &node).unwrap(), p);
    }

    #[test]
    fn unknown_keys_are_skipped() {
        let node: Node = serde_json::from_str(r#"{"mana": 5, "level": 3}"#).unwrap();
        let p = PlayerProfile::from_document("Steve", &node).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.get(Sharable::Level), Some(&ProfileValue::Integer(3)));
    }

    #[test]
    fn malformed_value_fails_the_profile() {
        let node: Node = serde_json::from_str(r#"{"potion_effects": "SPEED:1"}"#).unwrap();
        let err = PlayerProfile::from_document("Steve", &node).unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Value {
                sharable: Sharable::PotionEffects,
                ..
            }
        ));
    }
}
