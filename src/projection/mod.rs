//! Procedural UV projection.
//!
//! Each [`ProjectionKind`] maps a vertex position to a texture coordinate in
//! three steps:
//!
//! 1. translate the vertex into a frame centered on the mesh's bounding
//!    volume (sphere center or box center, depending on the kind);
//! 2. parameterize it angularly (and linearly, for the cylinder height);
//! 3. normalize into `[0, 1]` and flip `v` (`v_out = 1 - v`).
//!
//! The longitude `θ = atan2(z, x)` has its branch cut at `θ = ±π`. Vertices
//! on either side of it get `u` close to 0 and close to 1 respectively; the
//! seam is kept as is.
//!
//! # Example
//!
//! ```rust,ignore
//! use mantle::projection::{apply_projection, ProjectionKind, ProjectionOptions};
//!
//! let mut geometry = Geometry::new_box(1.0, 1.0, 1.0);
//! apply_projection(&mut geometry, ProjectionKind::Cylindrical, &ProjectionOptions::default());
//! ```

pub mod cylindrical;
pub mod ellipsoidal;
pub mod spherical;

use std::f32::consts::{PI, TAU};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::MantleError;
use crate::resources::bounds::BoundingExtents;
use crate::resources::geometry::Geometry;

pub use cylindrical::CylindricalProjector;
pub use ellipsoidal::EllipsoidalProjector;
pub use spherical::SphericalProjector;

// ============================================================================
// Projection kinds
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectionKind {
    #[default]
    #[serde(rename = "sphere")]
    Spherical,
    #[serde(rename = "cylinder")]
    Cylindrical,
    #[serde(rename = "ellipsoid")]
    Ellipsoidal,
}

impl ProjectionKind {
    pub const ALL: [ProjectionKind; 3] = [
        ProjectionKind::Spherical,
        ProjectionKind::Cylindrical,
        ProjectionKind::Ellipsoidal,
    ];

    /// Name used on the command surface.
    #[must_use]
    pub fn command_name(self) -> &'static str {
        match self {
            ProjectionKind::Spherical => "sphere",
            ProjectionKind::Cylindrical => "cylinder",
            ProjectionKind::Ellipsoidal => "ellipsoid",
        }
    }

    /// The algorithm implementing this kind.
    #[must_use]
    pub fn projector(self) -> &'static dyn UvProjector {
        match self {
            ProjectionKind::Spherical => &SphericalProjector,
            ProjectionKind::Cylindrical => &CylindricalProjector,
            ProjectionKind::Ellipsoidal => &EllipsoidalProjector,
        }
    }
}

impl fmt::Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

impl FromStr for ProjectionKind {
    type Err = MantleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sphere" | "spherical" => Ok(ProjectionKind::Spherical),
            "cylinder" | "cylindrical" => Ok(ProjectionKind::Cylindrical),
            "ellipsoid" | "ellipsoidal" => Ok(ProjectionKind::Ellipsoidal),
            other => Err(MantleError::InvalidCommand(format!(
                "unknown projection '{other}' (expected sphere, cylinder or ellipsoid)"
            ))),
        }
    }
}

// ============================================================================
// Options
// ============================================================================

/// Per-asset tuning of the projection output.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionOptions {
    /// Shifts the seam along `u`. The result is wrapped back into `[0, 1)`.
    /// Zero leaves the raw `u` untouched.
    pub u_offset: f32,
}

// ============================================================================
// Projector trait
// ============================================================================

/// One UV parameterization.
pub trait UvProjector: Sync {
    fn kind(&self) -> ProjectionKind;

    /// Maps a single vertex to `(u, v)` before the seam offset and `v` flip.
    fn parameterize(&self, position: Vec3, extents: &BoundingExtents) -> (f32, f32);

    /// Projects every position. Output has the same length and order.
    fn project(&self, positions: &[Vec3], extents: &BoundingExtents, options: &ProjectionOptions) -> Vec<[f32; 2]> {
        positions
            .iter()
            .map(|&p| {
                let p = if p.is_finite() { p } else { extents.center() };
                let (u, v) = self.parameterize(p, extents);
                finish(u, v, options)
            })
            .collect()
    }
}

/// `θ = atan2(z, x)` mapped from `[-π, π]` onto `[0, 1]`.
#[inline]
pub(crate) fn longitude_u(x: f32, z: f32) -> f32 {
    (z.atan2(x) + PI) / TAU
}

/// `φ = acos(cos_phi) / π`, with the cosine clamped against float overshoot.
#[inline]
pub(crate) fn latitude_v(cos_phi: f32) -> f32 {
    cos_phi.clamp(-1.0, 1.0).acos() / PI
}

fn finish(u: f32, v: f32, options: &ProjectionOptions) -> [f32; 2] {
    let u = if options.u_offset == 0.0 {
        u
    } else {
        (u - options.u_offset).rem_euclid(1.0)
    };
    let u = if u.is_finite() { u.clamp(0.0, 1.0) } else { 0.5 };
    let v = if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
    [u, 1.0 - v]
}

// ============================================================================
// Engine entry points
// ============================================================================

/// Pure projection of a position list. `None` when there is nothing to frame.
pub fn project_positions(
    kind: ProjectionKind,
    positions: &[Vec3],
    options: &ProjectionOptions,
) -> Option<Vec<[f32; 2]>> {
    let extents = BoundingExtents::from_points(positions.iter().copied())?;
    Some(kind.projector().project(positions, &extents, options))
}

/// Writes a fresh `uv` attribute on `geometry`, replacing any previous one.
///
/// The frame comes from this geometry's own bounds. Returns `false` (and
/// leaves the geometry untouched) when it has no positions.
pub fn apply_projection(geometry: &mut Geometry, kind: ProjectionKind, options: &ProjectionOptions) -> bool {
    let positions = geometry.positions();
    let Some(extents) = geometry.bounding_extents() else {
        log::warn!("Geometry {} has no positions, skipping {kind} projection", geometry.uuid);
        return false;
    };

    let uvs = kind.projector().project(&positions, &extents, options);
    geometry.set_uvs(&uvs);
    log::debug!("Projected {} vertices of {} ({kind})", uvs.len(), geometry.uuid);
    true
}
