use std::path::Path;

use colored::Colorize;
use mvi_core::Shares;

pub fn run(dir: &Path, name: &str, tokens: &[String]) -> Result<(), String> {
    let (shares, unknown) = Shares::parse_tokens(tokens);
    for token in &unknown {
        eprintln!("{} unknown share \"{token}\"", "warning:".yellow());
    }
    if shares.is_empty() && !unknown.is_empty() {
        return Err("no valid share tokens given".into());
    }

    let mut ws = super::open(dir)?;
    ws.manager
        .set_shares(name, shares)
        .map_err(|e| e.to_string())?;

    if let Some(group) = ws.manager.group(name) {
        println!(
            "Group '{}' now shares: {}",
            group.name(),
            super::describe_shares(group)
        );
    }
    Ok(())
}
