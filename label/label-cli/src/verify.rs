//! The `verify` command.

use std::path::Path;

use anyhow::{Context, Result, bail};
use mesh_io::decode_stl;
use mesh_printability::{ValidationConfig, check_watertight, validate_stl};
use owo_colors::OwoColorize;

/// Weld tolerance for the watertightness check, in mm.
const WELD_TOLERANCE_MM: f64 = 1e-4;

pub fn run(path: &Path, min_triangles: usize) -> Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    match check(&bytes, min_triangles) {
        Ok(summary) => {
            println!("{} {} -> {summary}", "PASS".green().bold(), path.display());
            Ok(())
        }
        Err(problem) => {
            println!("{} {}: {problem}", "FAIL".red().bold(), path.display());
            bail!("{} is not a printable label", path.display());
        }
    }
}

/// Validate the bytes and require every edge to be shared by two triangles.
fn check(bytes: &[u8], min_triangles: usize) -> Result<String, String> {
    let config = ValidationConfig::export().with_min_triangles(min_triangles);
    let report = validate_stl(bytes, &config).map_err(|e| e.to_string())?;

    let soup = decode_stl(bytes).map_err(|e| e.to_string())?;
    let seams = check_watertight(&soup, WELD_TOLERANCE_MM);
    if !seams.is_watertight() {
        return Err(format!(
            "not watertight ({} open edges, {} non-manifold edges)",
            seams.open_edges, seams.non_manifold_edges
        ));
    }
    Ok(report.summary())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mesh_io::{encode_stl, save_stl};
    use mesh_types::{Point3, TriangleSoup, cuboid};
    use tempfile::tempdir;

    fn block() -> TriangleSoup {
        cuboid(Point3::origin(), Point3::new(36.0, 12.0, 1.6))
    }

    #[test]
    fn closed_block_passes() {
        let bytes = encode_stl(&block()).unwrap();
        assert!(check(&bytes, 12).is_ok());
    }

    #[test]
    fn open_block_is_rejected() {
        let open: TriangleSoup = block().iter().skip(1).copied().collect();
        let bytes = encode_stl(&open).unwrap();
        let problem = check(&bytes, 1).unwrap_err();
        assert!(problem.starts_with("not watertight (3 open edges"), "{problem}");
    }

    #[test]
    fn triangle_floor_still_applies() {
        let bytes = encode_stl(&block()).unwrap();
        assert!(check(&bytes, 100).is_err());
    }

    #[test]
    fn run_reads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("block.stl");
        save_stl(&block(), &path).unwrap();
        assert!(run(&path, 12).is_ok());
        assert!(run(&dir.path().join("missing.stl"), 12).is_err());
    }
}
