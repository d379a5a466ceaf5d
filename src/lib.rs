#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod assets;
pub mod errors;
pub mod projection;
pub mod resources;
pub mod scene;
pub mod studio;

pub use assets::{AssetServer, GeometryHandle, MaterialHandle, TextureHandle, decode_image};
pub use errors::{MantleError, Result};
pub use projection::{ProjectionKind, ProjectionOptions, UvProjector, apply_projection, project_positions};
pub use resources::primitives::*;
pub use resources::{BoundingBox, BoundingExtents, BoundingSphere, ColorSpace, Geometry, Image, Material, MeshPart, Texture};
pub use scene::{MeshModel, Transform};
pub use studio::{
    BrushColor, Command, DrawCanvas, ProjectionState, ProjectionStateController, StudioSettings, TextureSource,
    TextureSourceRegistry,
};
