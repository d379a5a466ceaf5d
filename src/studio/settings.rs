//! Studio Settings
//!
//! Everything the controller needs that is not runtime state: drawing
//! canvas dimensions and brush, projection tuning, reference proxy layout
//! and the default texture asset.
//!
//! Every field has a default, so a settings file only lists what it changes:
//!
//! ```json
//! {
//!   "canvas": { "width": 1024, "height": 1024, "brush_color": "#ff0000" },
//!   "projection": { "u_offset": 0.25 },
//!   "default_texture": "textures/creature_skin.png"
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{MantleError, Result};
use crate::projection::ProjectionOptions;
use crate::studio::canvas::BrushColor;

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    /// Brush disc radius in pixels.
    pub brush_radius: f32,
    pub background: BrushColor,
    /// Color used by pointer strokes and by `stroke` commands without one.
    pub brush_color: BrushColor,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            brush_radius: 5.0,
            background: BrushColor::WHITE,
            brush_color: BrushColor::BLACK,
        }
    }
}

// ---------------------------------------------------------------------------
// Reference proxy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    /// Placement next to the model, in model space.
    pub position: [f32; 3],
    pub sphere_width_segments: u32,
    pub sphere_height_segments: u32,
    pub cylinder_radial_segments: u32,
}

impl Default for ProxySettings {
    fn default() -> Self {
        Self {
            position: [0.0, 0.075, 2.0],
            sphere_width_segments: 32,
            sphere_height_segments: 16,
            cylinder_radial_segments: 16,
        }
    }
}

// ---------------------------------------------------------------------------
// StudioSettings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioSettings {
    pub canvas: CanvasSettings,
    pub projection: ProjectionOptions,
    pub proxy: ProxySettings,
    /// Texture shown before any upload. `None` uses a generated checkerboard.
    pub default_texture: Option<String>,
}

impl StudioSettings {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads a JSON settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| MantleError::asset_load(path.as_ref().display().to_string(), e))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(MantleError::asset_load(
                "settings",
                format!("canvas must not be empty ({}x{})", self.canvas.width, self.canvas.height),
            ));
        }
        if !self.canvas.brush_radius.is_finite() || self.canvas.brush_radius < 0.0 {
            return Err(MantleError::asset_load(
                "settings",
                format!("invalid brush radius {}", self.canvas.brush_radius),
            ));
        }
        Ok(())
    }
}
