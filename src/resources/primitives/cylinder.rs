use crate::resources::geometry::{Attribute, Geometry, NORMAL, POSITION};
use wgpu::VertexFormat;
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy)]
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 16,
            height_segments: 1,
            open_ended: false,
        }
    }
}

/// Y-up cylinder centered at the origin, with optional end caps.
///
/// The side seam sits at angle 0 (+Z); side UVs run u = 0..1 around the
/// axis and v = 1 at the top.
#[must_use]
pub fn create_cylinder(options: &CylinderOptions) -> Geometry {
    let radial = options.radial_segments.max(3);
    let rows = options.height_segments.max(1);
    let half_height = options.height * 0.5;

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    // Side slope for cone-like normals
    let slope = if options.height == 0.0 {
        0.0
    } else {
        (options.radius_bottom - options.radius_top) / options.height
    };

    // --- Torso ---
    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (options.radius_bottom - options.radius_top) + options.radius_top;
        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * TAU;
            let (sin, cos) = theta.sin_cos();

            positions.push([radius * sin, half_height - v * options.height, radius * cos]);
            let n = glam::Vec3::new(sin, slope, cos).normalize_or_zero();
            normals.push(n.to_array());
            uvs.push([u, 1.0 - v]);
        }
    }

    let stride = radial + 1;
    for y in 0..rows {
        for x in 0..radial {
            let a = y * stride + x;
            let b = (y + 1) * stride + x;
            let c = b + 1;
            let d = a + 1;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    // --- Caps ---
    if !options.open_ended {
        for (top, radius) in [(true, options.radius_top), (false, options.radius_bottom)] {
            if radius <= 0.0 {
                continue;
            }
            let sign = if top { 1.0 } else { -1.0 };
            let center = positions.len() as u32;
            positions.push([0.0, half_height * sign, 0.0]);
            normals.push([0.0, sign, 0.0]);
            uvs.push([0.5, 0.5]);

            let ring = positions.len() as u32;
            for x in 0..=radial {
                let theta = x as f32 / radial as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                positions.push([radius * sin, half_height * sign, radius * cos]);
                normals.push([0.0, sign, 0.0]);
                uvs.push([cos * 0.5 + 0.5, sin * 0.5 * sign + 0.5]);
            }

            for x in 0..radial {
                if top {
                    indices.extend_from_slice(&[ring + x, ring + x + 1, center]);
                } else {
                    indices.extend_from_slice(&[ring + x + 1, ring + x, center]);
                }
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
