//! Bounding volumes derived from vertex positions.
//!
//! The box is the axis-aligned min/max of the points. The sphere is centered
//! on the box centroid (not the vertex average) and its radius is the largest
//! distance from that center to any point.

use glam::{Affine3A, Vec3};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Returns `None` for an empty (or entirely non-finite) point set.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut valid_points_count = 0usize;

        for p in points {
            if !p.is_finite() {
                continue;
            }
            min = min.min(p);
            max = max.max(p);
            valid_points_count += 1;
        }

        if valid_points_count == 0 {
            return None;
        }
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 { (self.min + self.max) * 0.5 }
    pub fn size(&self) -> Vec3 { self.max - self.min }

    /// Per-axis half widths (`xRadius`, `yRadius`, `zRadius`).
    pub fn half_extents(&self) -> Vec3 { self.size() * 0.5 }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Axis-aligned box around the eight transformed corners.
    #[must_use]
    pub fn transformed(&self, transform: &Affine3A) -> BoundingBox {
        let corners = (0..8).map(|i| {
            let pick = |bit: u32, lo: f32, hi: f32| if i & bit == 0 { lo } else { hi };
            transform.transform_point3(Vec3::new(
                pick(1, self.min.x, self.max.x),
                pick(2, self.min.y, self.max.y),
                pick(4, self.min.z, self.max.z),
            ))
        });
        BoundingBox::from_points(corners).unwrap_or(*self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        let bbox = BoundingBox::from_points(points.clone())?;
        Some(Self::enclosing(&bbox, points))
    }

    /// Second pass: radius around the box centroid.
    pub(crate) fn enclosing(bbox: &BoundingBox, points: impl Iterator<Item = Vec3>) -> Self {
        let center = bbox.center();
        let max_dist_sq = points
            .filter(|p| p.is_finite())
            .map(|p| p.distance_squared(center))
            .fold(0.0_f32, f32::max);

        Self {
            center,
            radius: max_dist_sq.sqrt(),
        }
    }
}

/// Box and sphere framing of one point set.
///
/// Produced whenever a mesh is (re)loaded and replaced wholesale, never
/// edited in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingExtents {
    pub bbox: BoundingBox,
    pub sphere: BoundingSphere,
}

impl BoundingExtents {
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
        I::IntoIter: Clone,
    {
        let points = points.into_iter();
        let bbox = BoundingBox::from_points(points.clone())?;
        let sphere = BoundingSphere::enclosing(&bbox, points);
        Some(Self { bbox, sphere })
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.bbox.center()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.sphere.radius
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        self.bbox.half_extents()
    }
}
