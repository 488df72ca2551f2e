//! Typed values stored in player profiles.

use serde::{Deserialize, Serialize};

use crate::document::Node;

/// Display flags carried by a potion effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PotionFlags {
    /// Applied by a beacon or similar ambient source.
    pub ambient: bool,
    /// Particles are shown.
    pub particles: bool,
    /// An icon is shown in the HUD.
    pub icon: bool,
}

impl PotionFlags {
    /// Whether no flag is set.
    pub fn is_empty(&self) -> bool {
        !(self.ambient || self.particles || self.icon)
    }
}

/// One active potion effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PotionEffect {
    /// Effect identifier, e.g. `SPEED` or `minecraft:speed`. Must not be empty.
    pub effect_type: String,
    /// Strength, zero-based.
    pub amplifier: i32,
    /// Remaining duration in ticks.
    pub duration: i32,
    /// Display flags.
    pub flags: PotionFlags,
}

impl PotionEffect {
    /// An effect with no flags set.
    pub fn new(effect_type: impl Into<String>, amplifier: i32, duration: i32) -> Self {
        Self {
            effect_type: effect_type.into(),
            amplifier,
            duration,
            flags: PotionFlags::default(),
        }
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: PotionFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A position in a named world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// World name.
    pub world: String,
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
    /// Horizontal rotation in degrees.
    pub yaw: f32,
    /// Vertical rotation in degrees.
    pub pitch: f32,
}

impl Location {
    /// A location facing yaw 0, pitch 0.
    pub fn new(world: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            world: world.into(),
            x,
            y,
            z,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// A captured value for one sharable.
///
/// Which variant a sharable holds is fixed by [`crate::serializer::ValueKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileValue {
    /// A floating-point stat.
    Number(f64),
    /// A whole-number stat.
    Integer(i64),
    /// Active potion effects.
    PotionEffects(Vec<PotionEffect>),
    /// A position.
    Location(Location),
    /// Payloads the core stores without interpreting (inventory contents,
    /// economy records).
    Raw(Node),
}

impl ProfileValue {
    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Integer(_) => "integer",
            Self::PotionEffects(_) => "potion effects",
            Self::Location(_) => "location",
            Self::Raw(_) => "raw",
        }
    }
}
