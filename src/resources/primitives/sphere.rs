use crate::resources::geometry::{Attribute, Geometry, NORMAL, POSITION};
use wgpu::VertexFormat;
use std::f32::consts::PI;

#[derive(Debug, Clone, Copy)]
pub struct SphereOptions {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            width_segments: 32,
            height_segments: 16,
        }
    }
}

#[must_use]
pub fn create_sphere(options: &SphereOptions) -> Geometry {
    let radius = options.radius;
    let width_segments = options.width_segments.max(3);
    let height_segments = options.height_segments.max(2);

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for y in 0..=height_segments {
        let v_ratio = y as f32 / height_segments as f32;
        // Latitude angle: 0 at the north pole, PI at the south pole
        let theta = v_ratio * PI;

        let py = radius * theta.cos();
        let ring_radius = radius * theta.sin();

        for x in 0..=width_segments {
            let u_ratio = x as f32 / width_segments as f32;
            let phi = u_ratio * 2.0 * PI;

            let px = -ring_radius * phi.cos();
            let pz = ring_radius * phi.sin();

            positions.push([px, py, pz]);

            // Unit direction; stays valid for a zero radius
            normals.push([-theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()]);

            uvs.push([u_ratio, 1.0 - v_ratio]);
        }
    }

    let stride = width_segments + 1;
    for y in 0..height_segments {
        for x in 0..width_segments {
            let v0 = y * stride + x;
            let v1 = v0 + 1;
            let v2 = (y + 1) * stride + x;
            let v3 = v2 + 1;

            // The pole rows collapse to degenerate triangles; skip them
            if y != 0 {
                indices.extend_from_slice(&[v0, v2, v1]);
            }
            if y != height_segments - 1 {
                indices.extend_from_slice(&[v1, v2, v3]);
            }
        }
    }

    let mut geo = Geometry::new();
    geo.set_attribute(POSITION, Attribute::new_planar(&positions, VertexFormat::Float32x3));
    geo.set_attribute(NORMAL, Attribute::new_planar(&normals, VertexFormat::Float32x3));
    geo.set_uvs(&uvs);
    geo.set_indices_u32(&indices);

    geo.compute_bounding_volume();
    geo
}
