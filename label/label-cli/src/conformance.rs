//! The `conformance` command: every preset must export a printable label.

use anyhow::{Context, Result, bail};
use label_engine::{LabelConfig, LabelEngine, LabelRequest, PRESETS, Preset, ReliefMode};
use label_outline::SegmentFont;
use mesh_printability::{StlReport, ValidationConfig, check_watertight, validate_stl};
use owo_colors::OwoColorize;

const SIZE_TOLERANCE_MM: f64 = 0.35;
const MIN_DEPTH_MM: f64 = 1.5;
const MAX_DEPTH_MM: f64 = 2.6;
const WELD_TOLERANCE_MM: f64 = 1e-4;

pub fn run(deboss: bool) -> Result<()> {
    let engine = LabelEngine::new(&SegmentFont, LabelConfig::default());
    let modes: &[ReliefMode] = if deboss {
        &[ReliefMode::Emboss, ReliefMode::Deboss]
    } else {
        &[ReliefMode::Emboss]
    };

    for &relief in modes {
        for preset in &PRESETS {
            let request = LabelRequest::new("BOLTS")
                .with_preset(preset)
                .with_padding(2.0)
                .with_icon_size(6.0)
                .with_relief(relief);
            let label = engine
                .generate(&request)
                .with_context(|| format!("{} ({relief})", preset.id))?;
            let report = validate_stl(&label.stl, &ValidationConfig::export())
                .with_context(|| format!("{} ({relief}): re-reading STL", preset.id))?;

            let seams = check_watertight(&label.mesh, WELD_TOLERANCE_MM);
            let verdict = check(preset, &report).and_then(|()| {
                if seams.is_watertight() {
                    Ok(())
                } else {
                    Err(format!(
                        "not watertight ({} open, {} non-manifold edges)",
                        seams.open_edges, seams.non_manifold_edges
                    ))
                }
            });
            if let Err(problem) = verdict {
                println!("{} {}: {problem}", "FAIL".red().bold(), preset.id);
                bail!("conformance failed for {} ({relief})", preset.id);
            }
            println!(
                "{} {} -> {:.2}x{:.2}x{:.2}mm, tris={}",
                "PASS".green().bold(),
                preset.id,
                report.width(),
                report.height(),
                report.depth(),
                report.triangle_count
            );
        }
    }

    println!("All STL verification checks passed.");
    Ok(())
}

fn check(preset: &Preset, report: &StlReport) -> Result<(), String> {
    for (what, got, want) in [
        ("width", report.width(), preset.width_mm),
        ("height", report.height(), preset.height_mm),
    ] {
        if (got - want).abs() > SIZE_TOLERANCE_MM {
            return Err(format!("{what}: expected ~{want:.2} but got {got:.2}"));
        }
    }
    let depth = report.depth();
    if !(MIN_DEPTH_MM..=MAX_DEPTH_MM).contains(&depth) {
        return Err(format!("depth out of range ({depth:.2})"));
    }
    if report.triangle_count < ValidationConfig::export().min_triangles {
        return Err(format!("too few triangles ({})", report.triangle_count));
    }
    Ok(())
}
