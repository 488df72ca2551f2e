//! Compact textual encoding for composite profile values.
//!
//! # Format
//!
//! A value is a sequence of records separated by [`FIELD_DELIMITER`] (`;`).
//! Each record is a fixed sequence of sub-fields separated by
//! [`SUB_DELIMITER`] (`:`). Inside string sub-fields, `\`, `;` and `:` are
//! written with a leading [`ESCAPE`] (`\`). No other escapes exist; a lone
//! trailing `\` or an escape of any other character is malformed.
//!
//! Potion effects: `{type}:{amplifier}:{duration}[:{flags}]`, one record per
//! effect. `flags` is a subset of `a` (ambient), `p` (particles), `i` (icon)
//! and is left out when no flag is set. An empty list encodes as `""`.
//!
//! Locations: a single record `{world}:{x}:{y}:{z}:{yaw}:{pitch}`. Floats use
//! the shortest representation that parses back to the same value.

use crate::error::{DeserializationError, DeserializeResult};
use crate::value::{Location, PotionEffect, PotionFlags};

/// Separates records.
pub const FIELD_DELIMITER: char = ';';
/// Separates the sub-fields of one record.
pub const SUB_DELIMITER: char = ':';
/// Escapes a delimiter or itself inside string data.
pub const ESCAPE: char = '\\';

/// Escape every delimiter and escape character in `data`.
pub fn escape(data: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for c in data.chars() {
        if is_reserved(c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Reverse [`escape`]. `segment` is used only for error reporting.
pub fn unescape(data: &str, segment: usize) -> DeserializeResult<String> {
    let mut out = String::with_capacity(data.len());
    let mut chars = data.chars();
    while let Some(c) = chars.next() {
        if c != ESCAPE {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) if is_reserved(next) => out.push(next),
            Some(next) => {
                return Err(DeserializationError::segment(
                    segment,
                    format!("invalid escape sequence \\{next}"),
                ));
            }
            None => {
                return Err(DeserializationError::segment(
                    segment,
                    "dangling escape character",
                ));
            }
        }
    }
    Ok(out)
}

/// Encode a list of potion effects.
pub fn encode_potion_effects(effects: &[PotionEffect]) -> String {
    effects
        .iter()
        .map(encode_potion_effect)
        .collect::<Vec<_>>()
        .join(&FIELD_DELIMITER.to_string())
}

/// Decode a list of potion effects. Any malformed record fails the whole
/// value, and the error names the record's index.
pub fn decode_potion_effects(encoded: &str) -> DeserializeResult<Vec<PotionEffect>> {
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    split_unescaped(encoded, FIELD_DELIMITER)
        .into_iter()
        .enumerate()
        .map(|(index, record)| decode_potion_effect(index, record))
        .collect()
}

/// Encode a location.
pub fn encode_location(location: &Location) -> String {
    let sep = SUB_DELIMITER;
    format!(
        "{}{sep}{}{sep}{}{sep}{}{sep}{}{sep}{}",
        escape(&location.world),
        location.x,
        location.y,
        location.z,
        location.yaw,
        location.pitch,
    )
}

/// Decode a location.
pub fn decode_location(encoded: &str) -> DeserializeResult<Location> {
    let fields = split_unescaped(encoded, SUB_DELIMITER);
    if fields.len() != 6 {
        return Err(DeserializationError::segment(
            0,
            format!("expected 6 location fields, found {}", fields.len()),
        ));
    }
    let world = unescape(fields[0], 0)?;
    if world.is_empty() {
        return Err(DeserializationError::segment(0, "missing world name"));
    }
    Ok(Location {
        world,
        x: parse_number(fields[1], "x", 0)?,
        y: parse_number(fields[2], "y", 0)?,
        z: parse_number(fields[3], "z", 0)?,
        yaw: parse_number(fields[4], "yaw", 0)?,
        pitch: parse_number(fields[5], "pitch", 0)?,
    })
}

fn encode_potion_effect(effect: &PotionEffect) -> String {
    let sep = SUB_DELIMITER;
    let mut out = format!(
        "{}{sep}{}{sep}{}",
        escape(&effect.effect_type),
        effect.amplifier,
        effect.duration
    );
    if !effect.flags.is_empty() {
        out.push(sep);
        if effect.flags.ambient {
            out.push('a');
        }
        if effect.flags.particles {
            out.push('p');
        }
        if effect.flags.icon {
            out.push('i');
        }
    }
    out
}

fn decode_potion_effect(index: usize, record: &str) -> DeserializeResult<PotionEffect> {
    let fields = split_unescaped(record, SUB_DELIMITER);
    if !(3..=4).contains(&fields.len()) {
        return Err(DeserializationError::segment(
            index,
            format!("expected 3 or 4 fields, found {}", fields.len()),
        ));
    }

    let effect_type = unescape(fields[0], index)?;
    if effect_type.is_empty() {
        return Err(DeserializationError::segment(index, "missing effect type"));
    }

    let flags = match fields.get(3) {
        Some(letters) => parse_flags(letters, index)?,
        None => PotionFlags::default(),
    };

    Ok(PotionEffect {
        effect_type,
        amplifier: parse_number(fields[1], "amplifier", index)?,
        duration: parse_number(fields[2], "duration", index)?,
        flags,
    })
}

fn parse_flags(letters: &str, index: usize) -> DeserializeResult<PotionFlags> {
    let mut flags = PotionFlags::default();
    for c in letters.chars() {
        match c {
            'a' => flags.ambient = true,
            'p' => flags.particles = true,
            'i' => flags.icon = true,
            other => {
                return Err(DeserializationError::segment(
                    index,
                    format!("unknown flag '{other}'"),
                ));
            }
        }
    }
    Ok(flags)
}

fn parse_number<T: std::str::FromStr>(field: &str, name: &str, index: usize) -> DeserializeResult<T> {
    field.parse().map_err(|_| {
        DeserializationError::segment(index, format!("{name} is not a number: \"{field}\""))
    })
}

/// Split on every `delimiter` not preceded by an escape. Escapes are left in
/// place so that nested splits and [`unescape`] still see them.
fn split_unescaped(data: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, c) in data.char_indices() {
        if escaped {
            escaped = false;
        } else if c == ESCAPE {
            escaped = true;
        } else if c == delimiter {
            parts.push(&data[start..i]);
            start = i + c.len_utf8();
        }
    }
    parts.push(&data[start..]);
    parts
}

fn is_reserved(c: char) -> bool {
    c == FIELD_DELIMITER || c == SUB_DELIMITER || c == ESCAPE
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn speed() -> PotionEffect {
        PotionEffect::new("SPEED", 1, 600)
    }

    #[test]
    fn encodes_records_with_delimiters() {
        let effects = vec![
            speed(),
            PotionEffect::new("minecraft:regeneration", 0, 200).with_flags(PotionFlags {
                ambient: true,
                particles: false,
                icon: true,
            }),
        ];
        assert_eq!(
            encode_potion_effects(&effects),
            r"SPEED:1:600;minecraft\:regeneration:0:200:ai"
        );
    }

    #[test]
    fn empty_list_is_empty_string() {
        assert_eq!(encode_potion_effects(&[]), "");
        assert!(decode_potion_effects("").unwrap().is_empty());
    }

    #[test]
    fn boundary_values_roundtrip() {
        let effects = vec![
            PotionEffect::new("A", 0, 0),
            PotionEffect::new("B", i32::MAX, i32::MAX),
            PotionEffect::new("C", i32::MIN, -1),
        ];
        let encoded = encode_potion_effects(&effects);
        assert_eq!(decode_potion_effects(&encoded).unwrap(), effects);
    }

    #[test]
    fn adversarial_effect_type_roundtrips() {
        let effects = vec![PotionEffect::new(r"a;b:c\d\", 2, 3)];
        let encoded = encode_potion_effects(&effects);
        assert_eq!(encoded, r"a\;b\:c\\d\\:2:3");
        assert_eq!(decode_potion_effects(&encoded).unwrap(), effects);
    }

    #[test]
    fn wrong_field_count_names_segment() {
        let err = decode_potion_effects("SPEED:1:600;JUMP:2").unwrap_err();
        assert_eq!(
            err,
            DeserializationError::MalformedSegment {
                segment: 1,
                reason: "expected 3 or 4 fields, found 2".to_string(),
            }
        );
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let err = decode_potion_effects("SPEED:fast:600").unwrap_err();
        assert!(err.to_string().contains("segment 0"));
        assert!(err.to_string().contains("amplifier"));
    }

    #[test]
    fn overflowing_number_is_rejected() {
        assert!(decode_potion_effects("SPEED:1:99999999999").is_err());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = decode_potion_effects("SPEED:1:600:x").unwrap_err();
        assert!(err.to_string().contains("unknown flag 'x'"));
    }

    #[test]
    fn empty_effect_type_is_rejected() {
        assert!(decode_potion_effects(":1:600").is_err());
    }

    #[test]
    fn trailing_delimiter_is_rejected() {
        let err = decode_potion_effects("SPEED:1:600;").unwrap_err();
        assert!(err.to_string().starts_with("segment 1"));
    }

    #[test]
    fn bad_escapes_are_rejected() {
        assert!(decode_potion_effects(r"SP\EED:1:600").is_err());
        assert!(unescape(r"abc\", 0).is_err());
    }

    #[test]
    fn empty_flags_field_decodes_as_no_flags() {
        let effects = decode_potion_effects("SPEED:1:600:").unwrap();
        assert_eq!(effects, vec![speed()]);
    }

    #[test]
    fn location_roundtrip() {
        let mut loc = Location::new("world_nether", 0.1 + 0.2, -64.0, 1e15);
        loc.yaw = 91.25;
        loc.pitch = -12.5;
        let encoded = encode_location(&loc);
        assert_eq!(decode_location(&encoded).unwrap(), loc);
    }

    #[test]
    fn location_with_wrong_arity_is_rejected() {
        assert!(decode_location("world:1:2:3").is_err());
        assert!(decode_location(":1:2:3:0:0").is_err());
        assert!(decode_location("world:1:2:up:0:0").is_err());
    }

    fn effect_strategy() -> impl Strategy<Value = PotionEffect> {
        (
            "[a-zA-Z0-9_:;\\\\ ]{1,12}",
            any::<i32>(),
            any::<i32>(),
            any::<(bool, bool, bool)>(),
        )
            .prop_map(|(effect_type, amplifier, duration, (ambient, particles, icon))| {
                PotionEffect::new(effect_type, amplifier, duration).with_flags(PotionFlags {
                    ambient,
                    particles,
                    icon,
                })
            })
    }

    proptest! {
        #[test]
        fn potion_effects_roundtrip(effects in prop::collection::vec(effect_strategy(), 0..6)) {
            let encoded = encode_potion_effects(&effects);
            prop_assert_eq!(decode_potion_effects(&encoded).unwrap(), effects);
        }

        #[test]
        fn escape_roundtrip(data in "\\PC{0,24}") {
            prop_assert_eq!(unescape(&escape(&data), 0).unwrap(), data);
        }

        #[test]
        fn location_roundtrip_finite(
            world in "[a-z_:;]{1,10}",
            x in -1e9f64..1e9,
            y in -1e9f64..1e9,
            z in -1e9f64..1e9,
            yaw in -360f32..360.0,
            pitch in -90f32..90.0
        ) {
            let loc = Location { world, x, y, z, yaw, pitch };
            prop_assert_eq!(decode_location(&encode_location(&loc)).unwrap(), loc);
        }
    }
}
