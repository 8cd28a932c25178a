//! Subtraction of closed solids.

use mesh_types::{MeshBounds, TriangleSoup};
use tracing::{debug, info};

use crate::bsp::BspTree;
use crate::config::BooleanConfig;
use crate::error::{BooleanError, BooleanResult};
use crate::polygon::{polygons_to_soup, soup_to_polygons};
use crate::seams::close_seams;

/// Removes the volume of one solid from another.
///
/// Both inputs must be closed, outward-wound triangle soups.
pub trait BooleanSubtractor {
    /// Compute `base - tool`.
    ///
    /// # Errors
    ///
    /// Returns an error if either input is empty, the tool encloses no
    /// volume, or the result is not a usable solid inside the base.
    fn subtract(&self, base: &TriangleSoup, tool: &TriangleSoup) -> BooleanResult<TriangleSoup>;
}

/// Subtractor built on polygon BSP trees.
///
/// Cut seams are welded and split after clipping, so a closed base minus a
/// closed tool gives a closed result. The output is fully determined by the
/// inputs and the config.
///
/// # Example
///
/// ```
/// use mesh_boolean::{BooleanSubtractor, BspSubtractor};
/// use mesh_types::{cuboid, MeshBounds, Point3};
///
/// let plate = cuboid(Point3::origin(), Point3::new(10.0, 10.0, 1.6));
/// let pocket = cuboid(Point3::new(3.0, 3.0, 1.1), Point3::new(7.0, 7.0, 1.9));
///
/// let cut = BspSubtractor::default().subtract(&plate, &pocket).unwrap();
/// assert!((cut.signed_volume() - (160.0 - 16.0 * 0.5)).abs() < 1e-6);
/// assert!((cut.bounds().depth() - 1.6).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BspSubtractor {
    config: BooleanConfig,
}

impl BspSubtractor {
    /// Subtractor with the given configuration.
    #[must_use]
    pub const fn new(config: BooleanConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &BooleanConfig {
        &self.config
    }
}

impl BooleanSubtractor for BspSubtractor {
    fn subtract(&self, base: &TriangleSoup, tool: &TriangleSoup) -> BooleanResult<TriangleSoup> {
        if base.is_empty() {
            return Err(BooleanError::EmptyMesh {
                details: "base mesh has no triangles".to_string(),
            });
        }
        if tool.is_empty() {
            return Err(BooleanError::EmptyMesh {
                details: "tool mesh has no triangles".to_string(),
            });
        }
        let tool_volume = tool.signed_volume();
        if !(tool_volume.is_finite() && tool_volume > 0.0) {
            return Err(BooleanError::DegenerateMesh {
                details: format!("tool encloses volume {tool_volume}"),
            });
        }

        let base_bounds = base.bounds();
        if !base_bounds.intersects(&tool.bounds()) {
            debug!("tool does not touch base; returning base unchanged");
            return Ok(base.clone());
        }

        let mut a = BspTree::new(soup_to_polygons(base), &self.config);
        let mut b = BspTree::new(soup_to_polygons(tool), &self.config);

        a.invert();
        a.clip_to(&b);
        b.clip_to(&a);
        b.invert();
        b.clip_to(&a);
        b.invert();
        a.build(b.all_polygons());
        a.invert();

        let clipped = polygons_to_soup(&a.all_polygons());
        let result = close_seams(&clipped, self.config.weld_tolerance);
        check_result(&result, base, self.config.bounds_tolerance)?;

        info!(
            base = base.len(),
            tool = tool.len(),
            result = result.len(),
            "subtracted solid"
        );
        Ok(result)
    }
}

/// Reject outputs that cannot be a cut of `base`.
fn check_result(result: &TriangleSoup, base: &TriangleSoup, tolerance: f64) -> BooleanResult<()> {
    if result.is_empty() {
        return Err(BooleanError::DegenerateResult {
            details: "no triangles survived".to_string(),
        });
    }
    let bounds = result.bounds();
    if !bounds.is_finite() {
        return Err(BooleanError::DegenerateResult {
            details: "non-finite coordinates".to_string(),
        });
    }
    let volume = result.signed_volume();
    if !(volume.is_finite() && volume > 0.0) {
        return Err(BooleanError::DegenerateResult {
            details: format!("result encloses volume {volume}"),
        });
    }
    if !base.bounds().encloses(&bounds, tolerance) {
        return Err(BooleanError::DegenerateResult {
            details: "result extends beyond the base".to_string(),
        });
    }
    Ok(())
}

/// Subtract `tool` from `base` with default settings.
///
/// # Errors
///
/// See [`BooleanSubtractor::subtract`].
pub fn difference(base: &TriangleSoup, tool: &TriangleSoup) -> BooleanResult<TriangleSoup> {
    BspSubtractor::default().subtract(base, tool)
}

/// Subtract each tool in order, skipping empty ones.
///
/// # Errors
///
/// Returns the first subtraction error; later tools are not attempted.
///
/// # Example
///
/// ```
/// use mesh_boolean::{sequential_difference, BspSubtractor};
/// use mesh_types::{cuboid, Point3, TriangleSoup};
///
/// let plate = cuboid(Point3::origin(), Point3::new(20.0, 10.0, 1.6));
/// let left = cuboid(Point3::new(2.0, 2.0, 1.1), Point3::new(6.0, 8.0, 1.9));
/// let right = cuboid(Point3::new(12.0, 2.0, 1.1), Point3::new(18.0, 8.0, 1.9));
///
/// let cut = sequential_difference(
///     &BspSubtractor::default(),
///     &plate,
///     &[&left, &TriangleSoup::new(), &right],
/// )
/// .unwrap();
/// assert!(cut.signed_volume() < plate.signed_volume());
/// ```
pub fn sequential_difference<S>(
    subtractor: &S,
    base: &TriangleSoup,
    tools: &[&TriangleSoup],
) -> BooleanResult<TriangleSoup>
where
    S: BooleanSubtractor + ?Sized,
{
    let mut current = base.clone();
    for (index, tool) in tools.iter().enumerate() {
        if tool.is_empty() {
            debug!(index, "skipping empty tool");
            continue;
        }
        current = subtractor.subtract(&current, tool)?;
    }
    Ok(current)
}
