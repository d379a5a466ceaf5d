use crate::resources::geometry::{Attribute, Geometry, NORMAL, POSITION};
use glam::Vec3;
use wgpu::VertexFormat;

/// One face of the box: outward normal plus the two in-plane axes (u, v).
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::Z, Vec3::X, Vec3::Y),        // Front (+Z)
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y), // Back (-Z)
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),    // Top (+Y)
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),    // Bottom (-Y)
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),    // Right (+X)
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),    // Left (-X)
];

/// Axis-aligned box centered at the origin, 4 vertices per face.
#[must_use]
pub fn create_box(width: f32, height: f32, depth: f32) -> Geometry {
    let half = Vec3::new(width, height, depth) * 0.5;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(24);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(24);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(24);
    let mut indices: Vec<u16> = Vec::with_capacity(36);

    for (normal, u_axis, v_axis) in FACES {
        let base = positions.len() as u16;
        // Corners in counter-clockwise order seen from outside
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = (normal + u_axis * su + v_axis * sv) * half;
            positions.push(p.to_array());
            normals.push(normal.to_array());
            uvs.push([(su + 1.0) * 0.5, (1.0 - sv) * 0.5]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut geo = Geometry::new();
    geo.set_attribute(POSITION, Attribute::new_planar(&positions, VertexFormat::Float32x3));
    geo.set_attribute(NORMAL, Attribute::new_planar(&normals, VertexFormat::Float32x3));
    geo.set_uvs(&uvs);
    geo.set_indices(&indices);

    geo.compute_bounding_volume();
    geo
}
