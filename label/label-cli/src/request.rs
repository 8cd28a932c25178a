//! TOML request files and their merge with command-line flags.
//!
//! ```toml
//! text = "m4 bolts"
//! preset = "large"
//! icon = "bolt"
//! icon_position = "right"
//! relief = "deboss"
//!
//! [geometry]
//! engrave_depth = 0.6
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use label_engine::{IconPosition, LabelConfig, LabelRequest, ReliefMode, find_icon, resolve_preset};
use label_outline::CURVE_STEPS;
use serde::Deserialize;
use tracing::{debug, warn};

/// Request file contents. Every field is optional; flags win over the file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RequestFile {
    pub text: Option<String>,
    pub preset: Option<String>,
    pub width_mm: Option<f64>,
    pub height_mm: Option<f64>,
    /// Built-in icon id.
    pub icon: Option<String>,
    /// SVG file, used instead of `icon`.
    pub icon_file: Option<PathBuf>,
    pub icon_position: Option<IconPosition>,
    pub padding_mm: Option<f64>,
    pub icon_size_mm: Option<f64>,
    pub relief: Option<ReliefMode>,
    #[serde(default)]
    pub geometry: GeometryOverrides,
}

/// Optional overrides of [`LabelConfig`] fields.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeometryOverrides {
    pub base_thickness: Option<f64>,
    pub feature_height: Option<f64>,
    pub engrave_depth: Option<f64>,
    pub corner_radius: Option<f64>,
    pub corner_segments: Option<usize>,
    /// Segments per flattened curve of a TrueType font.
    pub curve_steps: Option<usize>,
    pub min_triangles: Option<usize>,
}

impl RequestFile {
    /// Read and parse a request file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading request file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing request file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Take every field `other` sets.
    pub fn overlay(&mut self, other: Self) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if other.$field.is_some() { self.$field = other.$field; })*
            };
        }
        take!(
            text,
            preset,
            width_mm,
            height_mm,
            icon,
            icon_file,
            icon_position,
            padding_mm,
            icon_size_mm,
            relief
        );
    }

    /// Build the normalized request, reading icon markup from disk.
    ///
    /// Icon files that cannot be read only drop the icon.
    pub fn to_request(&self, icon_root: &Path) -> Result<LabelRequest> {
        let mut request = LabelRequest::new(self.text.as_deref().unwrap_or("SCREWS"))
            .with_preset(resolve_preset(self.preset.as_deref().unwrap_or("medium")));
        if let Some(w) = self.width_mm {
            request.width_mm = w;
        }
        if let Some(h) = self.height_mm {
            request.height_mm = h;
        }
        if let Some(p) = self.padding_mm {
            request.padding_mm = p;
        }
        if let Some(s) = self.icon_size_mm {
            request.icon_size_mm = s;
        }
        if let Some(r) = self.relief {
            request.relief = r;
        }

        let markup = match (&self.icon_file, self.icon_path(icon_root)?) {
            (Some(file), _) => read_markup(file),
            (None, Some(path)) => read_markup(&path),
            (None, None) => String::new(),
        };
        request = request.with_icon(markup, self.icon_position.unwrap_or_default());
        Ok(request.normalized())
    }

    /// Asset path of the built-in icon, if one is selected.
    pub fn icon_path(&self, icon_root: &Path) -> Result<Option<PathBuf>> {
        let Some(id) = self.icon.as_deref() else {
            return Ok(None);
        };
        let Some(icon) = find_icon(id) else {
            bail!("unknown icon '{id}' (see `labelgen icons`)");
        };
        Ok(icon.asset_path().map(|p| icon_root.join(p)))
    }

    /// Label configuration with the `[geometry]` overrides applied.
    pub fn config(&self) -> LabelConfig {
        let g = &self.geometry;
        let mut config = LabelConfig::default();
        if let Some(v) = g.base_thickness {
            config = config.with_base_thickness(v);
        }
        if let Some(v) = g.feature_height {
            config = config.with_feature_height(v);
        }
        if let Some(v) = g.engrave_depth {
            config = config.with_engrave_depth(v);
        }
        if let Some(v) = g.corner_radius {
            config = config.with_corner_radius(v);
        }
        if let Some(v) = g.corner_segments {
            config = config.with_corner_segments(v);
        }
        if let Some(v) = g.min_triangles {
            config = config.with_min_triangles(v);
        }
        config
    }

    /// Flattening steps for a font loaded from disk, at least 1.
    pub fn curve_steps(&self) -> usize {
        self.geometry.curve_steps.unwrap_or(CURVE_STEPS).max(1)
    }
}

fn read_markup(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(markup) => {
            debug!(path = %path.display(), bytes = markup.len(), "read icon");
            markup
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "icon unreadable, omitting it");
            String::new()
        }
    }
}
