use glam::Vec3;

use super::{ProjectionKind, UvProjector, longitude_u};
use crate::resources::bounds::BoundingExtents;

/// Angle around the vertical axis plus normalized height in the bounding box.
///
/// The height is taken as a magnitude, so `v` runs from 0 at the bottom of
/// the box to 1 at the top (before the flip). A flat box (zero height) maps
/// every vertex to mid-height.
#[derive(Debug, Clone, Copy, Default)]
pub struct CylindricalProjector;

impl UvProjector for CylindricalProjector {
    fn kind(&self) -> ProjectionKind {
        ProjectionKind::Cylindrical
    }

    fn parameterize(&self, position: Vec3, extents: &BoundingExtents) -> (f32, f32) {
        let local = position - extents.bbox.center();
        let height = extents.bbox.size().y.abs();

        let u = longitude_u(local.x, local.z);
        let v = if height > 0.0 {
            (local.y + height * 0.5) / height
        } else {
            0.5
        };
        (u, v)
    }
}
