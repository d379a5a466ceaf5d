pub mod sphere;
pub mod cylinder;
pub mod box_shape;

pub use box_shape::create_box;
pub use sphere::{create_sphere, SphereOptions};
pub use cylinder::{create_cylinder, CylinderOptions};
