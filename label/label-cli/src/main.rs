//! Label generator for Multiboard bins and drawers.
//!
//! # Commands
//!
//! - `labelgen generate` - Build a label and write `<name>.stl` and `<name>.svg`
//! - `labelgen verify <file.stl>` - Validate an existing binary STL
//! - `labelgen presets` / `labelgen icons` - List the built-in catalogs
//! - `labelgen conformance` - Run the six-preset export check
//!
//! Set `RUST_LOG` or pass `-v` for more detail.

mod catalog;
mod conformance;
mod generate;
mod request;
mod verify;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use label_engine::{IconPosition, ReliefMode};
use tracing_subscriber::EnvFilter;

/// Printable nameplate generator
///
/// Text plus an optional hardware icon on a rounded plate, raised or engraved.
#[derive(Parser)]
#[command(name = "labelgen")]
#[command(about = "Generate 3D-printable labels as binary STL", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a label and write STL and SVG preview files
    Generate(GenerateArgs),

    /// Validate an existing binary STL file
    Verify {
        /// The STL file to check
        #[arg(name = "FILE")]
        path: PathBuf,

        /// Minimum triangle count
        #[arg(long, default_value_t = mesh_printability::EXPORT_MIN_TRIANGLES)]
        min_triangles: usize,
    },

    /// List preset label sizes
    Presets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List built-in hardware icons
    Icons {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check every preset exports a printable "BOLTS" label
    Conformance {
        /// Also check engraved labels
        #[arg(long)]
        deboss: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// TOML request file; flags override its values
    #[arg(long)]
    request: Option<PathBuf>,

    /// Label text
    #[arg(short, long)]
    text: Option<String>,

    /// Preset size id (see `labelgen presets`)
    #[arg(short, long)]
    preset: Option<String>,

    /// Plate width in mm, overriding the preset
    #[arg(long)]
    width: Option<f64>,

    /// Plate height in mm, overriding the preset
    #[arg(long)]
    height: Option<f64>,

    /// Built-in icon id (see `labelgen icons`)
    #[arg(short, long)]
    icon: Option<String>,

    /// SVG file to use as the icon
    #[arg(long, conflicts_with = "icon")]
    icon_file: Option<PathBuf>,

    /// Icon placement: left, right or top
    #[arg(long)]
    icon_position: Option<IconPosition>,

    /// Margin around the content in mm
    #[arg(long)]
    padding: Option<f64>,

    /// Icon square side in mm
    #[arg(long)]
    icon_size: Option<f64>,

    /// emboss (raised) or deboss (engraved)
    #[arg(short, long)]
    relief: Option<ReliefMode>,

    /// TrueType/OpenType font; the built-in stencil font is used otherwise
    #[arg(long)]
    font: Option<PathBuf>,

    /// Directory holding `icons/<id>.svg`
    #[arg(long, default_value = ".")]
    assets: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Output file stem
    #[arg(long, default_value = "multiboard-label")]
    name: String,

    /// Also write the flat preview as `<name>.json`
    #[arg(long)]
    preview_json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate::run(&args),
        Commands::Verify {
            path,
            min_triangles,
        } => verify::run(&path, min_triangles),
        Commands::Presets { json } => catalog::presets(json),
        Commands::Icons { json } => catalog::icons(json),
        Commands::Conformance { deboss } => conformance::run(deboss),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
