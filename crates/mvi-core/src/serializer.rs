//! Per-attribute conversion between typed values and document nodes.

use crate::data_strings;
use crate::document::Node;
use crate::error::{DeserializationError, DeserializeResult, ProfileError};
use crate::sharable::Sharable;
use crate::value::{Location, PotionEffect, ProfileValue};

/// Converts one attribute type to and from a node that can be embedded in a
/// persisted document.
///
/// `deserialize(&serialize(v))` must give back `v` exactly.
pub trait SharableSerializer {
    /// The typed value this serializer handles.
    type Value;

    /// Write a value as a document node.
    fn serialize(&self, value: &Self::Value) -> Node;

    /// Read a value back from a node.
    fn deserialize(&self, raw: &Node) -> DeserializeResult<Self::Value>;
}

/// Potion effect lists, stored as a DataStrings string.
#[derive(Debug, Clone, Copy, Default)]
pub struct PotionEffectSerializer;

impl SharableSerializer for PotionEffectSerializer {
    type Value = Vec<PotionEffect>;

    fn serialize(&self, value: &Self::Value) -> Node {
        Node::String(data_strings::encode_potion_effects(value))
    }

    fn deserialize(&self, raw: &Node) -> DeserializeResult<Self::Value> {
        data_strings::decode_potion_effects(expect_str(raw)?)
    }
}

/// Locations, stored as a DataStrings string.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationSerializer;

impl SharableSerializer for LocationSerializer {
    type Value = Location;

    fn serialize(&self, value: &Self::Value) -> Node {
        Node::String(data_strings::encode_location(value))
    }

    fn deserialize(&self, raw: &Node) -> DeserializeResult<Self::Value> {
        data_strings::decode_location(expect_str(raw)?)
    }
}

/// Floating-point stats. Integers in the document are widened.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumberSerializer;

impl SharableSerializer for NumberSerializer {
    type Value = f64;

    fn serialize(&self, value: &f64) -> Node {
        Node::Float(*value)
    }

    fn deserialize(&self, raw: &Node) -> DeserializeResult<f64> {
        match raw {
            Node::Float(n) => Ok(*n),
            Node::Integer(n) => Ok(*n as f64),
            other => Err(unexpected("number", other)),
        }
    }
}

/// Whole-number stats.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerSerializer;

impl SharableSerializer for IntegerSerializer {
    type Value = i64;

    fn serialize(&self, value: &i64) -> Node {
        Node::Integer(*value)
    }

    fn deserialize(&self, raw: &Node) -> DeserializeResult<i64> {
        match raw {
            Node::Integer(n) => Ok(*n),
            other => Err(unexpected("integer", other)),
        }
    }
}

/// Opaque payloads, stored as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSerializer;

impl SharableSerializer for RawSerializer {
    type Value = Node;

    fn serialize(&self, value: &Node) -> Node {
        value.clone()
    }

    fn deserialize(&self, raw: &Node) -> DeserializeResult<Node> {
        Ok(raw.clone())
    }
}

/// The kind of value each sharable stores, and the serializer that handles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// [`ProfileValue::Number`].
    Number,
    /// [`ProfileValue::Integer`].
    Integer,
    /// [`ProfileValue::PotionEffects`].
    PotionEffects,
    /// [`ProfileValue::Location`].
    Location,
    /// [`ProfileValue::Raw`].
    Raw,
}

impl ValueKind {
    /// The kind a sharable stores.
    pub fn of(sharable: Sharable) -> Self {
        match sharable {
            Sharable::Inventory | Sharable::Armor | Sharable::EnderChest | Sharable::Economy => {
                Self::Raw
            }
            Sharable::HeldItem | Sharable::Hunger | Sharable::Level => Self::Integer,
            Sharable::Health | Sharable::Saturation | Sharable::Exhaustion | Sharable::Experience => {
                Self::Number
            }
            Sharable::PotionEffects => Self::PotionEffects,
            Sharable::BedSpawn | Sharable::LastLocation => Self::Location,
        }
    }

    /// Same names as [`ProfileValue::kind_name`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Integer => "integer",
            Self::PotionEffects => "potion effects",
            Self::Location => "location",
            Self::Raw => "raw",
        }
    }

    /// Whether `value` is of this kind.
    pub fn accepts(self, value: &ProfileValue) -> bool {
        matches!(
            (self, value),
            (Self::Number, ProfileValue::Number(_))
                | (Self::Integer, ProfileValue::Integer(_))
                | (Self::PotionEffects, ProfileValue::PotionEffects(_))
                | (Self::Location, ProfileValue::Location(_))
                | (Self::Raw, ProfileValue::Raw(_))
        )
    }
}

/// Serialize a profile value with the serializer registered for `sharable`.
pub fn serialize_value(sharable: Sharable, value: &ProfileValue) -> Result<Node, ProfileError> {
    let kind = ValueKind::of(sharable);
    let node = match (kind, value) {
        (ValueKind::Number, ProfileValue::Number(n)) => NumberSerializer.serialize(n),
        (ValueKind::Integer, ProfileValue::Integer(n)) => IntegerSerializer.serialize(n),
        (ValueKind::PotionEffects, ProfileValue::PotionEffects(effects)) => {
            PotionEffectSerializer.serialize(effects)
        }
        (ValueKind::Location, ProfileValue::Location(loc)) => LocationSerializer.serialize(loc),
        (ValueKind::Raw, ProfileValue::Raw(node)) => RawSerializer.serialize(node),
        (kind, value) => {
            return Err(ProfileError::KindMismatch {
                sharable,
                expected: kind.name(),
                found: value.kind_name(),
            });
        }
    };
    Ok(node)
}

/// Deserialize a profile value with the serializer registered for `sharable`.
pub fn deserialize_value(sharable: Sharable, raw: &Node) -> Result<ProfileValue, ProfileError> {
    let value = match ValueKind::of(sharable) {
        ValueKind::Number => NumberSerializer.deserialize(raw).map(ProfileValue::Number),
        ValueKind::Integer => IntegerSerializer.deserialize(raw).map(ProfileValue::Integer),
        ValueKind::PotionEffects => PotionEffectSerializer
            .deserialize(raw)
            .map(ProfileValue::PotionEffects),
        ValueKind::Location => LocationSerializer.deserialize(raw).map(ProfileValue::Location),
        ValueKind::Raw => RawSerializer.deserialize(raw).map(ProfileValue::Raw),
    };
    value.map_err(|source| ProfileError::Value { sharable, source })
}

fn expect_str(raw: &Node) -> DeserializeResult<&str> {
    raw.as_str().ok_or_else(|| unexpected("encoded string", raw))
}

fn unexpected(expected: &'static str, found: &Node) -> DeserializationError {
    DeserializationError::UnexpectedNode {
        expected,
        found: found.type_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::PotionFlags;

    #[test]
    fn potion_serializer_roundtrip() {
        let effects = vec![
            PotionEffect::new("SPEED", 1, 600),
            PotionEffect::new("minecraft:luck", 0, -1).with_flags(PotionFlags {
                ambient: false,
                particles: true,
                icon: false,
            }),
        ];
        let node = PotionEffectSerializer.serialize(&effects);
        assert_eq!(node, Node::from(r"SPEED:1:600;minecraft\:luck:0:-1:p"));
        assert_eq!(PotionEffectSerializer.deserialize(&node).unwrap(), effects);
    }

    #[test]
    fn potion_serializer_rejects_non_strings() {
        let err = PotionEffectSerializer
            .deserialize(&Node::Integer(3))
            .unwrap_err();
        assert_eq!(
            err,
            DeserializationError::UnexpectedNode {
                expected: "encoded string",
                found: "integer".to_string(),
            }
        );
    }

    #[test]
    fn number_serializer_widens_integers() {
        assert_eq!(NumberSerializer.deserialize(&Node::Integer(20)).unwrap(), 20.0);
        assert!(NumberSerializer.deserialize(&Node::from("20")).is_err());
    }

    #[test]
    fn every_sharable_has_a_kind_that_roundtrips() {
        for sharable in Sharable::ALL {
            let value = match ValueKind::of(sharable) {
                ValueKind::Number => ProfileValue::Number(19.5),
                ValueKind::Integer => ProfileValue::Integer(7),
                ValueKind::PotionEffects => {
                    ProfileValue::PotionEffects(vec![PotionEffect::new("HASTE", 2, 40)])
                }
                ValueKind::Location => ProfileValue::Location(Location::new("world", 1.0, 64.0, -3.5)),
                ValueKind::Raw => ProfileValue::Raw(Node::List(vec![Node::from("DIRT:64")])),
            };
            let node = serialize_value(sharable, &value).unwrap();
            assert_eq!(deserialize_value(sharable, &node).unwrap(), value);
        }
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let err = serialize_value(Sharable::Health, &ProfileValue::Integer(20)).unwrap_err();
        assert_eq!(
            err,
            ProfileError::KindMismatch {
                sharable: Sharable::Health,
                expected: "number",
                found: "integer",
            }
        );
    }

    #[test]
    fn decode_failure_names_the_sharable() {
        let err = deserialize_value(Sharable::PotionEffects, &Node::from("SPEED:x:1")).unwrap_err();
        assert!(err.to_string().starts_with("cannot read potion_effects"));
    }
}
