//! The `generate` command.

use std::path::Path;

use anyhow::{Context, Result};
use label_engine::{LabelEngine, preview_svg};
use label_outline::{FontOutlines, SegmentFont, TrueTypeFont};
use owo_colors::OwoColorize;
use tracing::info;

use crate::GenerateArgs;
use crate::request::RequestFile;

pub fn run(args: &GenerateArgs) -> Result<()> {
    let mut file = match &args.request {
        Some(path) => RequestFile::load(path)?,
        None => RequestFile::default(),
    };
    file.overlay(flags(args));

    let config = file.config();
    let request = file.to_request(&args.assets)?;

    let font: Box<dyn FontOutlines> = match &args.font {
        Some(path) => Box::new(
            TrueTypeFont::from_file(path)
                .with_context(|| format!("loading font {}", path.display()))?
                .with_curve_steps(file.curve_steps()),
        ),
        None => Box::new(SegmentFont),
    };

    let label = LabelEngine::new(font.as_ref(), config)
        .generate(&request)
        .with_context(|| format!("generating label \"{}\"", request.text))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let stl_path = args.out_dir.join(format!("{}.stl", args.name));
    write(&stl_path, &label.stl)?;

    // The preview links the icon by its relative asset path.
    let href = match (&file.icon_file, file.icon_path(Path::new(""))?) {
        _ if !request.has_icon() => None,
        (Some(p), _) => Some(p.display().to_string()),
        (None, p) => p.map(|p| p.display().to_string()),
    };
    let svg_path = args.out_dir.join(format!("{}.svg", args.name));
    write(&svg_path, preview_svg(&request, &label.layout, href.as_deref()).as_bytes())?;

    if args.preview_json {
        let json_path = args.out_dir.join(format!("{}.json", args.name));
        let json = serde_json::to_vec_pretty(&label.preview)?;
        write(&json_path, &json)?;
    }

    info!(stl = %stl_path.display(), "wrote label");
    println!(
        "{} {} -> {}",
        "OK".green().bold(),
        stl_path.display(),
        label.report.summary()
    );
    Ok(())
}

/// Command-line values as a request file, for overlaying.
fn flags(args: &GenerateArgs) -> RequestFile {
    RequestFile {
        text: args.text.clone(),
        preset: args.preset.clone(),
        width_mm: args.width,
        height_mm: args.height,
        icon: args.icon.clone(),
        icon_file: args.icon_file.clone(),
        icon_position: args.icon_position,
        padding_mm: args.padding,
        icon_size_mm: args.icon_size,
        relief: args.relief,
        ..RequestFile::default()
    }
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}
