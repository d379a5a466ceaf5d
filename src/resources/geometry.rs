use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Affine3A, Vec3};
use rustc_hash::FxHashMap;
use uuid::Uuid;
use wgpu::{PrimitiveTopology, VertexFormat};

use crate::resources::bounds::BoundingExtents;
use crate::resources::primitives;

pub const POSITION: &str = "position";
pub const NORMAL: &str = "normal";
pub const UV: &str = "uv";

/// Attribute holds CPU-side vertex data and its layout.
///
/// The bytes sit behind an `Arc`, so cloning a geometry does not copy
/// vertex data.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub data: Arc<Vec<u8>>,

    /// Data version for change detection
    pub version: u64,

    pub format: VertexFormat,
    pub offset: u64,
    pub count: u32,
    pub stride: u64,
}

static NEXT_ATTR_VERSION: AtomicU64 = AtomicU64::new(1);

impl Attribute {
    /// Creates a planar (non-interleaved) attribute.
    pub fn new_planar<T: bytemuck::Pod>(data: &[T], format: VertexFormat) -> Self {
        let raw_data = bytemuck::cast_slice(data).to_vec();

        Self {
            data: Arc::new(raw_data),
            version: NEXT_ATTR_VERSION.fetch_add(1, Ordering::Relaxed),
            format,
            offset: 0,
            count: data.len() as u32,
            stride: std::mem::size_of::<T>() as u64,
        }
    }

    pub fn read<T>(&self, i: u32) -> Option<T>
    where
        T: bytemuck::Pod,
    {
        if i >= self.count {
            return None;
        }
        let stride = self.stride as usize;
        let offset = self.offset as usize + (i as usize) * stride;
        let size = std::mem::size_of::<T>();

        let bytes = self.data.get(offset..offset + size)?;
        Some(bytemuck::pod_read_unaligned(bytes))
    }

    pub fn read_vec3(&self, i: u32) -> Option<Vec3> {
        if self.format != VertexFormat::Float32x3 {
            return None;
        }
        self.read::<[f32; 3]>(i).map(Vec3::from_array)
    }

    /// Collects every element as `T`, stopping at the first out-of-range read.
    pub fn to_vec<T: bytemuck::Pod>(&self) -> Vec<T> {
        (0..self.count).map_while(|i| self.read::<T>(i)).collect()
    }
}

#[derive(Debug)]
pub struct Geometry {
    pub uuid: Uuid,

    // vertex layout versioning
    layout_version: u64,
    data_version: u64,

    attributes: FxHashMap<String, Attribute>,
    index_attribute: Option<Attribute>,

    pub topology: PrimitiveTopology,

    bounds: Option<BoundingExtents>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new()
    }
}

impl Geometry {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            layout_version: 0,
            data_version: 0,
            attributes: FxHashMap::default(),
            index_attribute: None,
            topology: PrimitiveTopology::TriangleList,
            bounds: None,
        }
    }

    /// Builds a geometry from raw positions (and optional triangle indices).
    pub fn from_positions(positions: &[[f32; 3]], indices: Option<&[u32]>) -> Self {
        let mut geo = Self::new();
        geo.set_attribute(POSITION, Attribute::new_planar(positions, VertexFormat::Float32x3));
        if let Some(indices) = indices {
            geo.set_indices_u32(indices);
        }
        geo.compute_bounding_volume();
        geo
    }

    // Version accessors
    pub fn layout_version(&self) -> u64 {
        self.layout_version
    }

    pub fn data_version(&self) -> u64 {
        self.data_version
    }

    // Attributes accessors
    pub fn attributes(&self) -> &FxHashMap<String, Attribute> {
        &self.attributes
    }

    pub fn index_attribute(&self) -> Option<&Attribute> {
        self.index_attribute.as_ref()
    }

    pub fn set_attribute(&mut self, name: &str, attr: Attribute) {
        let layout_changed = self
            .attributes
            .get(name)
            .is_none_or(|old| old.format != attr.format);

        if name == POSITION {
            self.bounds = None;
        }
        self.attributes.insert(name.to_string(), attr);

        if layout_changed {
            self.layout_version = self.layout_version.wrapping_add(1);
        }
        self.data_version = self.data_version.wrapping_add(1);
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<Attribute> {
        let removed = self.attributes.remove(name);
        if removed.is_some() {
            self.layout_version = self.layout_version.wrapping_add(1);
            self.data_version = self.data_version.wrapping_add(1);
        }
        removed
    }

    pub fn get_attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn set_indices(&mut self, indices: &[u16]) {
        self.index_attribute = Some(Attribute::new_planar(indices, VertexFormat::Uint16));
        self.data_version = self.data_version.wrapping_add(1);
    }

    pub fn set_indices_u32(&mut self, indices: &[u32]) {
        self.index_attribute = Some(Attribute::new_planar(indices, VertexFormat::Uint32));
        self.data_version = self.data_version.wrapping_add(1);
    }

    /// Triangle indices widened to `u32`, or `None` for non-indexed geometry.
    pub fn indices(&self) -> Option<Vec<u32>> {
        let attr = self.index_attribute.as_ref()?;
        match attr.format {
            VertexFormat::Uint16 => Some(attr.to_vec::<u16>().into_iter().map(u32::from).collect()),
            VertexFormat::Uint32 => Some(attr.to_vec::<u32>()),
            _ => None,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.attributes.get(POSITION).map_or(0, |a| a.count as usize)
    }

    /// Vertex positions in mesh-local space. Empty if the geometry has none.
    pub fn positions(&self) -> Vec<Vec3> {
        match self.attributes.get(POSITION) {
            Some(attr) if attr.format == VertexFormat::Float32x3 => {
                (0..attr.count).map_while(|i| attr.read_vec3(i)).collect()
            }
            _ => Vec::new(),
        }
    }

    pub fn uvs(&self) -> Option<Vec<[f32; 2]>> {
        let attr = self.attributes.get(UV)?;
        if attr.format != VertexFormat::Float32x2 {
            return None;
        }
        Some(attr.to_vec::<[f32; 2]>())
    }

    /// Installs a fresh `uv` attribute, discarding whatever was there.
    pub fn set_uvs(&mut self, uvs: &[[f32; 2]]) {
        self.set_attribute(UV, Attribute::new_planar(uvs, VertexFormat::Float32x2));
    }

    pub fn compute_vertex_normals(&mut self) {
        let positions = self.positions();
        let pos_count = positions.len();
        if pos_count == 0 {
            return;
        }
        let mut normals = vec![Vec3::ZERO; pos_count];

        let mut accumulate_triangle = |i0: usize, i1: usize, i2: usize| {
            if i0 >= pos_count || i1 >= pos_count || i2 >= pos_count {
                return;
            }
            let (v0, v1, v2) = (positions[i0], positions[i1], positions[i2]);

            // Area weighted: |cross| = 2 * triangle area
            let face_normal = (v1 - v0).cross(v2 - v0);
            normals[i0] += face_normal;
            normals[i1] += face_normal;
            normals[i2] += face_normal;
        };

        if let Some(indices) = self.indices() {
            for chunk in indices.chunks_exact(3) {
                accumulate_triangle(chunk[0] as usize, chunk[1] as usize, chunk[2] as usize);
            }
        } else {
            for i in (0..pos_count.saturating_sub(2)).step_by(3) {
                accumulate_triangle(i, i + 1, i + 2);
            }
        }

        let normals: Vec<[f32; 3]> = normals
            .into_iter()
            .map(|n| n.normalize_or_zero().to_array())
            .collect();
        self.set_attribute(NORMAL, Attribute::new_planar(&normals, VertexFormat::Float32x3));
    }

    /// Recomputes and caches the bounding box and sphere from `position`.
    ///
    /// Leaves the cache empty when there are no positions.
    pub fn compute_bounding_volume(&mut self) -> Option<BoundingExtents> {
        let positions = self.positions();
        self.bounds = BoundingExtents::from_points(positions.iter().copied());
        self.bounds
    }

    /// Cached extents, computed on demand if the cache is stale.
    pub fn bounding_extents(&self) -> Option<BoundingExtents> {
        self.bounds.or_else(|| {
            let positions = self.positions();
            BoundingExtents::from_points(positions.iter().copied())
        })
    }

    /// Bakes an affine transform into positions (and normals, if present).
    pub fn apply_transform(&mut self, transform: &Affine3A) {
        let positions: Vec<[f32; 3]> = self
            .positions()
            .into_iter()
            .map(|p| transform.transform_point3(p).to_array())
            .collect();
        if positions.is_empty() {
            return;
        }
        self.set_attribute(POSITION, Attribute::new_planar(&positions, VertexFormat::Float32x3));

        if let Some(attr) = self.attributes.get(NORMAL) {
            let normal_matrix = transform.matrix3.inverse().transpose();
            let normals: Vec<[f32; 3]> = attr
                .to_vec::<[f32; 3]>()
                .into_iter()
                .map(|n| normal_matrix.mul_vec3(Vec3::from_array(n)).normalize_or_zero().to_array())
                .collect();
            self.set_attribute(NORMAL, Attribute::new_planar(&normals, VertexFormat::Float32x3));
        }

        self.compute_bounding_volume();
    }

    /// Non-uniform scale, as used to stretch a unit sphere into an ellipsoid.
    pub fn scale(&mut self, factors: Vec3) {
        self.apply_transform(&Affine3A::from_scale(factors));
    }

    pub fn new_box(width: f32, height: f32, depth: f32) -> Self {
        primitives::create_box(width, height, depth)
    }

    pub fn new_sphere(radius: f32) -> Self {
        primitives::create_sphere(&primitives::SphereOptions {
            radius,
            ..Default::default()
        })
    }

    pub fn new_cylinder(radius: f32, height: f32) -> Self {
        primitives::create_cylinder(&primitives::CylinderOptions {
            radius_top: radius,
            radius_bottom: radius,
            height,
            ..Default::default()
        })
    }
}
