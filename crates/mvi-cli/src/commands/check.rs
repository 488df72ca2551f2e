use std::path::Path;

use colored::Colorize;

pub fn run(dir: &Path) -> Result<(), String> {
    let ws = super::open(dir)?;
    let report = &ws.report;

    for (name, error) in &report.skipped {
        println!("  {} {name}: {error}", "skipped".red());
    }
    for warning in &report.warnings {
        println!("  {} {warning}", "warning".yellow());
    }

    let findings = ws.manager.validate(&ws.registry);
    for finding in &findings {
        println!("  {} {finding}", "warning".yellow());
    }

    println!(
        "  {} groups loaded, {} skipped, {} warnings",
        report.loaded.len(),
        report.skipped.len(),
        report.warnings.len() + findings.len()
    );

    if report.has_skipped() {
        return Err(format!(
            "{} groups could not be loaded",
            report.skipped.len()
        ));
    }
    if report.is_clean() && findings.is_empty() {
        println!("  All checks passed.");
    }
    Ok(())
}
