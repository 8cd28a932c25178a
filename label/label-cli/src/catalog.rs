//! The `presets` and `icons` listings.

use anyhow::Result;
use label_engine::{DEFAULT_PRESET_ID, HARDWARE_ICONS, PRESETS};
use owo_colors::OwoColorize;

pub fn presets(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&PRESETS)?);
        return Ok(());
    }
    for preset in &PRESETS {
        let marker = if preset.id == DEFAULT_PRESET_ID { "*" } else { " " };
        println!(
            "{marker} {:<12} {:>6.2} x {:<6.2} mm  {}",
            preset.id.bold(),
            preset.width_mm,
            preset.height_mm,
            preset.name.dimmed()
        );
    }
    Ok(())
}

pub fn icons(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&HARDWARE_ICONS)?);
        return Ok(());
    }
    for icon in &HARDWARE_ICONS {
        let asset = icon.asset_path().unwrap_or_else(|| "-".to_string());
        println!("  {:<14} {:<14} {}", icon.id.bold(), icon.name, asset.dimmed());
    }
    Ok(())
}
