use glam::Vec3;

use crate::resources::bounds::{BoundingBox, BoundingExtents};
use crate::resources::mesh::MeshPart;

/// A loaded model: every renderable part, in file order.
///
/// Parts are iterated explicitly; there is no scene-graph walk.
#[derive(Debug, Default)]
pub struct MeshModel {
    pub name: String,
    parts: Vec<MeshPart>,
}

impl MeshModel {
    pub fn new(name: &str, parts: Vec<MeshPart>) -> Self {
        Self {
            name: name.to_string(),
            parts,
        }
    }

    pub fn push_part(&mut self, part: MeshPart) {
        self.parts.push(part);
    }

    #[inline]
    pub fn parts(&self) -> &[MeshPart] {
        &self.parts
    }

    #[inline]
    pub fn parts_mut(&mut self) -> &mut [MeshPart] {
        &mut self.parts
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(|p| p.geometry.vertex_count()).sum()
    }

    /// Union of the part boxes in model space. `None` when no part has
    /// positions.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.parts
            .iter()
            .filter_map(|p| {
                let bbox = p.geometry.bounding_extents()?.bbox;
                Some(bbox.transformed(&p.transform))
            })
            .reduce(|a, b| a.union(&b))
    }

    /// Box and sphere over all vertices of all parts, in model space.
    pub fn extents(&self) -> Option<BoundingExtents> {
        let positions: Vec<Vec3> = self
            .parts
            .iter()
            .flat_map(|p| {
                p.geometry
                    .positions()
                    .into_iter()
                    .map(|v| p.transform.transform_point3(v))
            })
            .collect();
        BoundingExtents::from_points(positions.iter().copied())
    }
}
