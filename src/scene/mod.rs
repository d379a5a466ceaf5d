//! Scene-side containers.
//!
//! - MeshModel: the loaded model as an ordered list of mesh parts
//! - Transform: TRS placement component (used by the reference proxy)

pub mod model;
pub mod transform;

pub use model::MeshModel;
pub use transform::Transform;
