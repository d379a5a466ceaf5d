//! Core resource definitions.
//!
//! Plain data structures consumed by the external renderer, independent of
//! any GPU implementation:
//! - Geometry: vertex attributes and bounding volumes
//! - Image / Texture: versioned RGBA8 pixel buffers
//! - Material: texture binding of a mesh part
//! - MeshPart: geometry + material of one model primitive
//! - primitives: procedural solids (box, sphere, cylinder)

pub mod bounds;
pub mod geometry;
pub mod image;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod texture;

pub use bounds::{BoundingBox, BoundingExtents, BoundingSphere};
pub use geometry::{Attribute, Geometry};
pub use image::Image;
pub use material::Material;
pub use mesh::MeshPart;
pub use texture::{ColorSpace, Texture, TextureSampler};
