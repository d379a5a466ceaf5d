use glam::Vec3;

use super::{ProjectionKind, UvProjector, latitude_v, longitude_u};
use crate::resources::bounds::BoundingExtents;

/// Spherical angles after squashing the bounding box onto a unit sphere.
///
/// Each local axis is divided by its own half extent; for a true ellipsoid
/// the normalized point lies on the unit sphere. Flat axes contribute 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct EllipsoidalProjector;

impl UvProjector for EllipsoidalProjector {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Ellipsoidal
    }

    fn parameterize(&self, position: Vec3, extents: &BoundingExtents) -> (f32, f32) {
        let local = position - extents.bbox.center();
        let radii = extents.half_extents();

        let normalized = Vec3::new(
            safe_ratio(local.x, radii.x),
            safe_ratio(local.y, radii.y),
            safe_ratio(local.z, radii.z),
        );

        (longitude_u(normalized.x, normalized.z), latitude_v(normalized.y))
    }
}

#[inline]
fn safe_ratio(value: f32, radius: f32) -> f32 {
    if radius > 0.0 { value / radius } else { 0.0 }
}
