//! Script replay command.

use std::path::Path;

use anyhow::Result;
use novus_core::{ConfigSource, FileConfig, OverlaySettings, StaticConfig};
use novus_cli::replay::{ReplaySummary, replay};
use novus_cli::script::load_script;
use owo_colors::OwoColorize;
use tracing::info;

use super::load_catalog;

pub fn run(
    script: &Path,
    catalog_path: Option<&Path>,
    config_path: Option<&Path>,
    settings: OverlaySettings,
) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let lines = load_script(script)?;
    info!("Replaying {} steps from {}", lines.len(), script.display());

    let config: Box<dyn ConfigSource> = match config_path {
        Some(path) => Box::new(FileConfig::new(path)),
        None => Box::new(StaticConfig::default()),
    };

    let summary = replay(&lines, catalog, settings, config);
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ReplaySummary) {
    for message in &summary.chat {
        println!("{} {}", "[chat]".cyan(), message);
    }

    for report in summary.reported() {
        if let Some(message) = &report.decision.message {
            println!("{} line {}: {}", "[bonus]".green().bold(), report.line, message);
        }
    }

    for bonus in &summary.bonuses {
        let beginning = bonus
            .duty_beginning
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  zone {} began {} from start: {}",
            bonus.zone_id, beginning, bonus.entered_from_start
        );
    }

    for glass in &summary.glass {
        println!(
            "{} {}: light \"{}\" analyze \"{}\"",
            "[glass]".yellow(),
            glass.slot,
            glass.light,
            glass.analyze
        );
    }

    println!();
    println!(
        "{} steps, {} toasts, {} bonuses, {} skipped events, window {}",
        summary.steps,
        summary.toasts.len(),
        summary.bonuses.len(),
        summary.skipped,
        if summary.window.visible { "shown" } else { "hidden" }
    );
}
