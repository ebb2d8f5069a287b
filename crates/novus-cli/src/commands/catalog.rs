//! Catalog inspection command.

use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::load_catalog;

pub fn run(catalog_path: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    println!("{}", "Relics".bold());
    for relic in catalog.relics() {
        println!("  {:>6}  {}", relic.item_id, relic.display_name);
    }

    println!();
    println!("{}", "Duties".bold());
    if catalog.duties().is_empty() {
        println!("  (none)");
    }
    for duty in catalog.duties() {
        println!(
            "  {:>6}  {:<40} light {}",
            duty.zone_id, duty.duty_name, duty.default_light_intensity
        );
    }

    println!();
    println!("{}", "Light levels".bold());
    for level in catalog.levels() {
        println!("  {:>6}  {}", level.intensity, level.toast_substring);
    }

    Ok(())
}
