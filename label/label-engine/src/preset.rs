//! Preset label sizes and the built-in icon catalog.
//!
//! Sizes follow the Multiboard grid, where one unit (MU) is 25 mm.

use serde::Serialize;
use tracing::warn;

/// One Multiboard unit in mm.
pub const MU_MM: f64 = 25.0;

/// Preset used when a lookup fails.
pub const DEFAULT_PRESET_ID: &str = "medium";

/// A named label size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    /// Lookup key.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Plate width in mm.
    pub width_mm: f64,
    /// Plate height in mm.
    pub height_mm: f64,
}

/// All preset sizes, smallest to largest within each family.
pub const PRESETS: [Preset; 6] = [
    Preset {
        id: "small",
        name: "Small (36 x 12 mm)",
        width_mm: 36.0,
        height_mm: 12.0,
    },
    Preset {
        id: "medium",
        name: "Medium (45 x 15 mm)",
        width_mm: 45.0,
        height_mm: 15.0,
    },
    Preset {
        id: "large",
        name: "Large (60 x 20 mm)",
        width_mm: 60.0,
        height_mm: 20.0,
    },
    Preset {
        id: "mu-1x0_5",
        name: "MU 1.0 x 0.5 (25 x 12.5 mm)",
        width_mm: MU_MM,
        height_mm: MU_MM * 0.5,
    },
    Preset {
        id: "mu-1_5x0_5",
        name: "MU 1.5 x 0.5 (37.5 x 12.5 mm)",
        width_mm: MU_MM * 1.5,
        height_mm: MU_MM * 0.5,
    },
    Preset {
        id: "mu-2x0_75",
        name: "MU 2.0 x 0.75 (50 x 18.75 mm)",
        width_mm: MU_MM * 2.0,
        height_mm: MU_MM * 0.75,
    },
];

/// Look up a preset by id.
#[must_use]
pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.id == id)
}

/// Look up a preset by id, falling back to [`DEFAULT_PRESET_ID`].
///
/// # Example
///
/// ```
/// use label_engine::resolve_preset;
///
/// assert_eq!(resolve_preset("large").width_mm, 60.0);
/// assert_eq!(resolve_preset("jumbo").id, "medium");
/// ```
#[must_use]
pub fn resolve_preset(id: &str) -> &'static Preset {
    find_preset(id).unwrap_or_else(|| {
        warn!(id, fallback = DEFAULT_PRESET_ID, "unknown preset");
        &PRESETS[1]
    })
}

/// An entry of the built-in hardware icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HardwareIcon {
    /// Lookup key, also the asset file stem.
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
}

impl HardwareIcon {
    /// Relative path of the icon's SVG asset, or `None` for "no icon".
    #[must_use]
    pub fn asset_path(&self) -> Option<String> {
        (self.id != "none").then(|| format!("icons/{}.svg", self.id))
    }
}

/// Built-in hardware icons. The first entry means "no icon".
pub const HARDWARE_ICONS: [HardwareIcon; 15] = [
    HardwareIcon { id: "none", name: "No icon" },
    HardwareIcon { id: "screw", name: "Screw" },
    HardwareIcon { id: "bolt", name: "Bolt" },
    HardwareIcon { id: "nut", name: "Nut" },
    HardwareIcon { id: "washer", name: "Washer" },
    HardwareIcon { id: "wing-nut", name: "Wing Nut" },
    HardwareIcon { id: "hex-key", name: "Hex Key" },
    HardwareIcon { id: "wrench", name: "Wrench" },
    HardwareIcon { id: "socket", name: "Socket" },
    HardwareIcon { id: "hammer", name: "Hammer" },
    HardwareIcon { id: "drill-bit", name: "Drill Bit" },
    HardwareIcon { id: "pliers", name: "Pliers" },
    HardwareIcon { id: "tape-measure", name: "Tape Measure" },
    HardwareIcon { id: "saw-blade", name: "Saw Blade" },
    HardwareIcon { id: "clamp", name: "Clamp" },
];

/// Look up a hardware icon by id.
#[must_use]
pub fn find_icon(id: &str) -> Option<&'static HardwareIcon> {
    HARDWARE_ICONS.iter().find(|i| i.id == id)
}
