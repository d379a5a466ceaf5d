use glam::Vec3;

use super::{ProjectionKind, UvProjector, latitude_v, longitude_u};
use crate::resources::bounds::BoundingExtents;

/// Longitude/latitude around the bounding sphere.
///
/// `u = (atan2(z, x) + π) / 2π`, `v = acos(y / r) / π`, with `y` measured
/// from the sphere center. A zero radius puts every vertex on the equator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SphericalProjector;

impl UvProjector for SphericalProjector {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Spherical
    }

    fn parameterize(&self, position: Vec3, extents: &BoundingExtents) -> (f32, f32) {
        let local = position - extents.sphere.center;
        let radius = extents.radius();

        let u = longitude_u(local.x, local.z);
        let v = if radius > 0.0 {
            latitude_v(local.y / radius)
        } else {
            0.5
        };
        (u, v)
    }
}
