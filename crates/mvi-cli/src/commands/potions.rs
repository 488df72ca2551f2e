//! Helpers for the potion effect string codec.

use comfy_table::{ContentArrangement, Table};
use mvi_core::PotionFlags;
use mvi_core::data_strings::{decode_potion_effects, encode_potion_effects};

pub fn encode(records: &[String]) -> Result<(), String> {
    let mut effects = Vec::new();
    for (index, record) in records.iter().enumerate() {
        let decoded =
            decode_potion_effects(record).map_err(|e| format!("record {index}: {e}"))?;
        effects.extend(decoded);
    }
    println!("{}", encode_potion_effects(&effects));
    Ok(())
}

pub fn decode(encoded: &str, json: bool) -> Result<(), String> {
    let effects = decode_potion_effects(encoded).map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&effects)
            .map_err(|e| format!("JSON serialization failed: {e}"))?;
        println!("{out}");
        return Ok(());
    }

    if effects.is_empty() {
        println!("  No effects.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Type", "Amplifier", "Duration", "Flags"]);
    for effect in &effects {
        table.add_row(vec![
            effect.effect_type.clone(),
            effect.amplifier.to_string(),
            effect.duration.to_string(),
            describe_flags(effect.flags),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn describe_flags(flags: PotionFlags) -> String {
    let mut names = Vec::new();
    if flags.ambient {
        names.push("ambient");
    }
    if flags.particles {
        names.push("particles");
    }
    if flags.icon {
        names.push("icon");
    }
    if names.is_empty() {
        "—".to_string()
    } else {
        names.join(", ")
    }
}
