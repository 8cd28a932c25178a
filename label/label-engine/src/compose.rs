//! Combining the base plate with feature solids.

use std::fmt;
use std::str::FromStr;

use mesh_boolean::{BooleanResult, BooleanSubtractor, sequential_difference};
use mesh_types::TriangleSoup;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LabelError;

/// How features meet the plate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReliefMode {
    /// Features are raised on top of the plate.
    #[default]
    Emboss,
    /// Features are engraved into the plate.
    Deboss,
}

impl ReliefMode {
    /// Lowercase name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emboss => "emboss",
            Self::Deboss => "deboss",
        }
    }
}

impl fmt::Display for ReliefMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReliefMode {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emboss" | "raised" => Ok(Self::Emboss),
            "deboss" | "engraved" => Ok(Self::Deboss),
            _ => Err(LabelError::UnknownReliefMode(s.to_string())),
        }
    }
}

/// Combine the plate with already placed features.
///
/// Emboss concatenates every triangle, plate first, then features in the
/// order given; nothing is merged, so the result may overlap but prints as
/// one body. Deboss subtracts the features from the plate one after another
/// in the order given and fails if any cut does not yield a valid solid.
///
/// # Errors
///
/// Only deboss can fail, with the subtractor's error.
///
/// # Example
///
/// ```
/// use label_engine::{ReliefMode, compose};
/// use mesh_boolean::BspSubtractor;
/// use mesh_types::{cuboid, MeshBounds, Point3};
///
/// let plate = cuboid(Point3::origin(), Point3::new(20.0, 10.0, 1.6));
/// let bar = cuboid(Point3::new(5.0, 4.0, 1.1), Point3::new(15.0, 6.0, 1.9));
///
/// let raised = compose(&plate, &[bar.clone()], ReliefMode::Emboss, &BspSubtractor::default()).unwrap();
/// assert_eq!(raised.len(), 24);
///
/// let engraved = compose(&plate, &[bar], ReliefMode::Deboss, &BspSubtractor::default()).unwrap();
/// assert!((engraved.bounds().depth() - 1.6).abs() < 1e-9);
/// ```
pub fn compose(
    plate: &TriangleSoup,
    features: &[TriangleSoup],
    mode: ReliefMode,
    subtractor: &dyn BooleanSubtractor,
) -> BooleanResult<TriangleSoup> {
    let composed = match mode {
        ReliefMode::Emboss => {
            let total = plate.len() + features.iter().map(TriangleSoup::len).sum::<usize>();
            let mut soup = TriangleSoup::with_capacity(total);
            soup.append(plate);
            for feature in features {
                soup.append(feature);
            }
            soup
        }
        ReliefMode::Deboss => {
            let tools: Vec<&TriangleSoup> = features.iter().collect();
            sequential_difference(subtractor, plate, &tools)?
        }
    };
    debug!(
        %mode,
        plate = plate.len(),
        features = features.len(),
        triangles = composed.len(),
        "composed label"
    );
    Ok(composed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_boolean::{BooleanError, BspSubtractor};
    use mesh_types::{Facet, MeshBounds, Point3, cuboid};

    fn plate() -> TriangleSoup {
        cuboid(Point3::origin(), Point3::new(20.0, 10.0, 1.6))
    }

    fn bar(x0: f64, x1: f64) -> TriangleSoup {
        cuboid(Point3::new(x0, 4.0, 1.1), Point3::new(x1, 6.0, 1.9))
    }

    #[test]
    fn emboss_concatenates_in_order() {
        let features = [bar(2.0, 6.0), bar(10.0, 14.0)];
        let out = compose(&plate(), &features, ReliefMode::Emboss, &BspSubtractor::default()).unwrap();
        assert_eq!(out.len(), 36);
        assert_eq!(&out.facets()[..12], plate().facets());
        assert_eq!(&out.facets()[24..], features[1].facets());
    }

    #[test]
    fn emboss_without_features_is_plate() {
        let out = compose(&plate(), &[], ReliefMode::Emboss, &BspSubtractor::default()).unwrap();
        assert_eq!(out, plate());
    }

    #[test]
    fn deboss_removes_each_feature() {
        let features = [bar(2.0, 6.0), bar(10.0, 14.0)];
        let out = compose(&plate(), &features, ReliefMode::Deboss, &BspSubtractor::default()).unwrap();
        // Each bar removes 4 x 2 x 0.5 mm.
        assert_relative_eq!(out.signed_volume(), 320.0 - 2.0 * 4.0, epsilon = 1e-6);
        let (got, want) = (out.bounds(), plate().bounds());
        assert_relative_eq!(got.min, want.min, epsilon = 1e-9);
        assert_relative_eq!(got.max, want.max, epsilon = 1e-9);
    }

    #[test]
    fn deboss_surfaces_subtraction_failure() {
        let inside_out: TriangleSoup = bar(2.0, 6.0)
            .triangles()
            .filter_map(|t| Facet::new(t.reversed()))
            .collect();
        let err = compose(&plate(), &[inside_out], ReliefMode::Deboss, &BspSubtractor::default())
            .unwrap_err();
        assert!(matches!(err, BooleanError::DegenerateMesh { .. }));
    }

    #[test]
    fn mode_parses_and_prints() {
        assert_eq!("Deboss".parse::<ReliefMode>().unwrap(), ReliefMode::Deboss);
        assert_eq!("raised".parse::<ReliefMode>().unwrap(), ReliefMode::Emboss);
        assert!("carve".parse::<ReliefMode>().is_err());
        assert_eq!(ReliefMode::Deboss.to_string(), "deboss");
    }
}
