//! Reference proxy: the bare projection solid shown next to the model.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Quat, Vec3};

use crate::assets::{AssetServer, GeometryHandle, MaterialHandle, TextureHandle};
use crate::projection::ProjectionKind;
use crate::resources::bounds::BoundingBox;
use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::resources::primitives::{CylinderOptions, SphereOptions, create_cylinder, create_sphere};
use crate::scene::transform::Transform;
use crate::studio::settings::ProxySettings;

/// The live proxy. Its geometry and material live in the asset server.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceProxy {
    pub kind: ProjectionKind,
    pub geometry: GeometryHandle,
    pub material: MaterialHandle,
    pub transform: Transform,
}

/// Solid for `kind`, sized from the model box.
///
/// - sphere: radius is half the height
/// - cylinder: radius is half the larger of width and height, full height
/// - ellipsoid: unit sphere stretched by the three half extents
///
/// Keeps the primitive's own UVs.
pub fn build_proxy_geometry(kind: ProjectionKind, bbox: &BoundingBox, settings: &ProxySettings) -> Geometry {
    let size = bbox.size();
    let sphere = |radius: f32| SphereOptions {
        radius,
        width_segments: settings.sphere_width_segments,
        height_segments: settings.sphere_height_segments,
    };

    match kind {
        ProjectionKind::Spherical => create_sphere(&sphere(size.y * 0.5)),
        ProjectionKind::Cylindrical => {
            let radius = size.x.max(size.y) * 0.5;
            create_cylinder(&CylinderOptions {
                radius_top: radius,
                radius_bottom: radius,
                height: size.y,
                radial_segments: settings.cylinder_radial_segments,
                ..Default::default()
            })
        }
        ProjectionKind::Ellipsoidal => {
            let mut geometry = create_sphere(&sphere(1.0));
            geometry.scale(bbox.half_extents());
            geometry
        }
    }
}

/// Placement of the proxy: fixed offset, turned about +Y.
///
/// The cylinder is turned a quarter turn relative to the other two.
pub fn proxy_transform(kind: ProjectionKind, settings: &ProxySettings) -> Transform {
    let angle = match kind {
        ProjectionKind::Cylindrical => FRAC_PI_2,
        ProjectionKind::Spherical | ProjectionKind::Ellipsoidal => PI,
    };
    Transform {
        rotation: Quat::from_rotation_y(angle),
        ..Transform::from_position(Vec3::from_array(settings.position))
    }
}

/// Holds at most one [`ReferenceProxy`].
///
/// Rebuilding releases the previous proxy's assets before registering the
/// new ones.
#[derive(Debug, Default)]
pub struct ReferenceProxySlot {
    settings: ProxySettings,
    current: Option<ReferenceProxy>,
}

impl ReferenceProxySlot {
    pub fn new(settings: ProxySettings) -> Self {
        Self {
            settings,
            current: None,
        }
    }

    #[inline]
    pub fn current(&self) -> Option<&ReferenceProxy> {
        self.current.as_ref()
    }

    /// Replaces the proxy. Without a model box this does nothing and
    /// returns `None`.
    pub fn rebuild(
        &mut self,
        assets: &AssetServer,
        bbox: Option<&BoundingBox>,
        kind: ProjectionKind,
        texture: TextureHandle,
    ) -> Option<&ReferenceProxy> {
        let Some(bbox) = bbox else {
            log::warn!("No model extents yet, deferring {kind} proxy");
            return None;
        };

        self.release(assets);

        let geometry = build_proxy_geometry(kind, bbox, &self.settings);
        let material = Material::with_map(texture).with_name("Reference Proxy");

        self.current = Some(ReferenceProxy {
            kind,
            geometry: assets.add_geometry(geometry),
            material: assets.add_material(material),
            transform: proxy_transform(kind, &self.settings),
        });
        log::debug!("Rebuilt {kind} reference proxy");
        self.current.as_ref()
    }

    /// Drops the current proxy and its assets.
    pub fn release(&mut self, assets: &AssetServer) {
        if let Some(old) = self.current.take() {
            assets.geometries.remove(old.geometry);
            assets.materials.remove(old.material);
        }
    }
}
