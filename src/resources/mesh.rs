use glam::Affine3A;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;

/// A renderable sub-object of a loaded model.
///
/// The part owns its vertex data in mesh-local space and its material
/// binding; projections and rebinds borrow it mutably for the duration of
/// one call. `transform` places the part in model space.
#[derive(Debug)]
pub struct MeshPart {
    pub name: String,

    pub geometry: Geometry,
    pub material: Material,

    /// Mesh-local to model space (the node's world matrix for loaded files).
    pub transform: Affine3A,
}

impl MeshPart {
    pub fn new(name: &str, geometry: Geometry, material: Material) -> Self {
        Self {
            name: name.to_string(),
            geometry,
            material,
            transform: Affine3A::IDENTITY,
        }
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Affine3A) -> Self {
        self.transform = transform;
        self
    }
}
