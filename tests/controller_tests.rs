//! Projection State Controller Tests
//!
//! Tests for:
//! - Initial state and transitions without a model
//! - Model installation (success and failure)
//! - Projection selection, re-application and proxy lifetime
//! - Draw mode toggling and texture rebinding
//! - Uploads (decode failure, missing file, success) and reset
//! - Default texture fallback
//! - Texture source registry bookkeeping

use std::io::Cursor;

use glam::Vec3;

use mantle::assets::AssetServer;
use mantle::errors::MantleError;
use mantle::projection::ProjectionKind;
use mantle::resources::{Geometry, Material, MeshPart};
use mantle::scene::MeshModel;
use mantle::studio::canvas::{BrushColor, DrawCanvas};
use mantle::studio::command::Command;
use mantle::studio::controller::{ProjectionState, ProjectionStateController};
use mantle::studio::registry::{TextureSource, TextureSourceRegistry};
use mantle::studio::settings::{CanvasSettings, StudioSettings};
use mantle::{ColorSpace, Texture};

fn png_bytes(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(color));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn creature() -> MeshModel {
    let head = Geometry::new_sphere(0.4);
    MeshModel::new(
        "creature",
        vec![
            MeshPart::new("body", Geometry::new_box(1.0, 2.0, 0.6), Material::default()),
            MeshPart::new("head", head, Material::default())
                .with_transform(glam::Affine3A::from_translation(Vec3::new(0.0, 1.2, 0.0))),
        ],
    )
}

fn temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("mantle-studio-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn studio() -> (AssetServer, ProjectionStateController) {
    let assets = AssetServer::new();
    let controller = ProjectionStateController::new(assets.clone(), StudioSettings::default());
    (assets, controller)
}

fn loaded_studio() -> (AssetServer, ProjectionStateController) {
    let (assets, mut controller) = studio();
    controller.on_model_loaded("creature.glb", Ok(creature())).unwrap();
    (assets, controller)
}

fn bound_maps(controller: &ProjectionStateController) -> Vec<Option<mantle::TextureHandle>> {
    controller.model().unwrap().parts().iter().map(|p| p.material.map()).collect()
}

fn part_uvs(controller: &ProjectionStateController) -> Vec<Vec<[f32; 2]>> {
    controller
        .model()
        .unwrap()
        .parts()
        .iter()
        .map(|p| p.geometry.uvs().unwrap())
        .collect()
}

// ============================================================================
// Initial State
// ============================================================================

#[test]
fn starts_spherical_without_draw_mode() {
    let (assets, controller) = studio();
    assert_eq!(
        controller.state(),
        ProjectionState {
            kind: ProjectionKind::Spherical,
            draw_mode: false,
        }
    );
    assert_eq!(controller.active_source(), TextureSource::DefaultAsset);
    assert!(controller.model().is_none());
    assert!(controller.proxy().is_none());
    // default checkerboard + canvas texture
    assert_eq!(assets.textures.len(), 2);
}

#[test]
fn transitions_without_model_only_record_state() {
    let (assets, mut controller) = studio();

    controller.select_projection(ProjectionKind::Cylindrical);
    assert_eq!(controller.kind(), ProjectionKind::Cylindrical);

    controller.toggle_draw_mode();
    assert!(controller.draw_mode());
    assert_eq!(controller.active_source(), TextureSource::HandDrawn);

    controller.toggle_draw_mode();
    assert!(!controller.draw_mode());

    assert!(controller.proxy().is_none());
    assert!(assets.geometries.is_empty());
    assert!(assets.materials.is_empty());
}

#[test]
fn missing_default_texture_falls_back_to_checkerboard() {
    let settings = StudioSettings {
        default_texture: Some("definitely/not/here.png".to_string()),
        ..Default::default()
    };
    let assets = AssetServer::new();
    let mut controller = ProjectionStateController::new(assets.clone(), settings);

    assert!(matches!(
        controller.default_texture_error(),
        Some(MantleError::AssetLoadFailure { .. })
    ));
    let fallback = assets.textures.get(controller.registry().default_texture()).unwrap();
    assert_eq!(fallback.name, "Default Checkerboard");
    assert_eq!(controller.state(), ProjectionState::default());

    // still fully usable
    controller.on_model_loaded("creature.glb", Ok(creature())).unwrap();
    let default_texture = controller.registry().default_texture();
    assert!(bound_maps(&controller).iter().all(|m| *m == Some(default_texture)));
}

#[test]
fn configured_default_texture_is_loaded() {
    let dir = temp_dir();
    std::fs::write(dir.join("skin.png"), png_bytes(2, 2, [40, 50, 60, 255])).unwrap();
    let settings = StudioSettings {
        default_texture: Some("skin.png".to_string()),
        ..Default::default()
    };
    let assets = AssetServer::with_root(&dir);
    let controller = ProjectionStateController::new(assets.clone(), settings);

    assert!(controller.default_texture_error().is_none());
    let texture = assets.textures.get(controller.registry().default_texture()).unwrap();
    assert_eq!(texture.image.pixel(1, 1), Some([40, 50, 60, 255]));

    std::fs::remove_dir_all(dir).unwrap();
}

// ============================================================================
// Model Installation
// ============================================================================

#[test]
fn loading_a_model_projects_every_part() {
    let (_, controller) = loaded_studio();
    let model = controller.model().unwrap();
    let default_texture = controller.registry().default_texture();

    for part in model.parts() {
        let uvs = part.geometry.uvs().unwrap();
        assert_eq!(uvs.len(), part.geometry.vertex_count());
        assert_eq!(part.material.map(), Some(default_texture));
    }
    assert_eq!(controller.proxy().unwrap().kind, ProjectionKind::Spherical);
    assert!(controller.bounds().is_some());
}

#[test]
fn model_load_applies_recorded_state() {
    let (_, mut controller) = studio();
    controller.select_projection(ProjectionKind::Ellipsoidal);
    controller.on_model_loaded("creature.glb", Ok(creature())).unwrap();

    assert_eq!(controller.proxy().unwrap().kind, ProjectionKind::Ellipsoidal);

    let mut expected = creature();
    for part in expected.parts_mut() {
        mantle::apply_projection(&mut part.geometry, ProjectionKind::Ellipsoidal, &Default::default());
    }
    let expected: Vec<_> = expected.parts().iter().map(|p| p.geometry.uvs().unwrap()).collect();
    assert_eq!(part_uvs(&controller), expected);
}

#[test]
fn failed_model_load_changes_nothing() {
    let (assets, mut controller) = loaded_studio();
    let before = part_uvs(&controller);
    let geometries = assets.geometries.len();

    let err = controller
        .on_model_loaded("broken.glb", Err(MantleError::EmptyModel("broken.glb".into())))
        .unwrap_err();
    assert!(matches!(err, MantleError::AssetLoadFailure { ref path, .. } if path == "broken.glb"));

    assert_eq!(controller.model().unwrap().name, "creature");
    assert_eq!(part_uvs(&controller), before);
    assert_eq!(assets.geometries.len(), geometries);
}

#[test]
fn failed_first_load_leaves_no_model() {
    let (_, mut controller) = studio();
    let err = controller
        .on_model_loaded("x.glb", Err(MantleError::asset_load("x.glb", "network down")))
        .unwrap_err();
    assert!(matches!(err, MantleError::AssetLoadFailure { .. }));
    assert!(controller.model().is_none());
    assert!(controller.proxy().is_none());
}

#[test]
fn stays_usable_after_failed_model_load() {
    let (_, mut controller) = studio();
    assert!(controller.load_model("no/such/model.glb").is_err());

    let script = "select-projection cylinder\ntoggle-draw-mode\nstroke 5 5 black\ntoggle-draw-mode\n";
    for command in Command::parse_script(script).unwrap() {
        controller.execute(command).unwrap();
    }
    assert_eq!(controller.kind(), ProjectionKind::Cylindrical);
    assert!(!controller.draw_mode());
    assert_eq!(controller.canvas().pixel(5, 5), Some([0, 0, 0, 255]));
    assert!(controller.model().is_none());
    assert!(controller.proxy().is_none());
}

#[test]
fn load_model_reports_missing_file() {
    let (_, mut controller) = studio();
    let err = controller.load_model("no/such/model.glb").unwrap_err();
    assert!(matches!(err, MantleError::AssetLoadFailure { .. }));
    assert!(controller.model().is_none());
}

// ============================================================================
// Projection Selection & Proxy
// ============================================================================

#[test]
fn exactly_one_proxy_after_any_selection_sequence() {
    let (assets, mut controller) = loaded_studio();
    let sequence = [
        ProjectionKind::Cylindrical,
        ProjectionKind::Cylindrical,
        ProjectionKind::Ellipsoidal,
        ProjectionKind::Spherical,
        ProjectionKind::Ellipsoidal,
    ];
    for kind in sequence {
        controller.select_projection(kind);
        assert_eq!(assets.geometries.len(), 1);
        assert_eq!(assets.materials.len(), 1);
        assert_eq!(controller.proxy().unwrap().kind, kind);
    }

    controller.toggle_draw_mode();
    controller.reset_to_default();
    assert_eq!(assets.geometries.len(), 1);
    assert_eq!(assets.materials.len(), 1);
}

#[test]
fn proxy_assets_are_replaced_not_reused() {
    let (assets, mut controller) = loaded_studio();
    let old = *controller.proxy().unwrap();
    controller.select_projection(ProjectionKind::Spherical);
    let new = *controller.proxy().unwrap();

    assert_ne!(old.geometry, new.geometry);
    assert!(!assets.geometries.contains(old.geometry));
    assert!(!assets.materials.contains(old.material));
    assert!(assets.geometries.contains(new.geometry));
}

#[test]
fn proxy_uses_bound_texture() {
    let (assets, mut controller) = loaded_studio();
    let proxy = *controller.proxy().unwrap();
    let material = assets.materials.get(proxy.material).unwrap();
    assert_eq!(material.map(), Some(controller.registry().default_texture()));

    controller.enable_draw_mode();
    let proxy = *controller.proxy().unwrap();
    let material = assets.materials.get(proxy.material).unwrap();
    assert_eq!(material.map(), Some(controller.registry().canvas_texture()));
}

#[test]
fn sphere_cylinder_sphere_matches_single_sphere() {
    let (_, mut controller) = loaded_studio();
    let once = part_uvs(&controller);

    controller.select_projection(ProjectionKind::Cylindrical);
    assert_ne!(part_uvs(&controller), once);
    controller.select_projection(ProjectionKind::Spherical);

    let again = part_uvs(&controller);
    for (a, b) in once.iter().zip(&again) {
        for (x, y) in a.iter().zip(b) {
            assert_eq!(x[0].to_bits(), y[0].to_bits());
            assert_eq!(x[1].to_bits(), y[1].to_bits());
        }
    }
}

#[test]
fn reselecting_same_kind_still_rebinds() {
    let (_, mut controller) = loaded_studio();
    let versions: Vec<u64> = controller.model().unwrap().parts().iter().map(|p| p.material.version()).collect();
    controller.select_projection(ProjectionKind::Spherical);
    for (part, before) in controller.model().unwrap().parts().iter().zip(versions) {
        assert!(part.material.version() > before);
    }
}

// ============================================================================
// Draw Mode
// ============================================================================

#[test]
fn draw_mode_binds_canvas_without_reprojecting() {
    let (_, mut controller) = loaded_studio();
    controller.select_projection(ProjectionKind::Cylindrical);
    let uvs = part_uvs(&controller);

    controller.enable_draw_mode();
    assert!(controller.draw_mode());
    assert_eq!(controller.active_source(), TextureSource::HandDrawn);
    let canvas_texture = controller.registry().canvas_texture();
    assert!(bound_maps(&controller).iter().all(|m| *m == Some(canvas_texture)));
    assert_eq!(part_uvs(&controller), uvs);
    assert_eq!(controller.kind(), ProjectionKind::Cylindrical);
}

#[test]
fn disabling_draw_mode_restores_base_texture() {
    let (_, mut controller) = loaded_studio();
    controller.toggle_draw_mode();
    controller.toggle_draw_mode();

    assert!(!controller.draw_mode());
    assert_eq!(controller.active_source(), TextureSource::DefaultAsset);
    let default_texture = controller.registry().default_texture();
    assert!(bound_maps(&controller).iter().all(|m| *m == Some(default_texture)));
}

#[test]
fn selecting_projection_in_draw_mode_keeps_canvas() {
    let (_, mut controller) = loaded_studio();
    controller.enable_draw_mode();
    controller.select_projection(ProjectionKind::Ellipsoidal);

    assert!(controller.draw_mode());
    let canvas_texture = controller.registry().canvas_texture();
    assert!(bound_maps(&controller).iter().all(|m| *m == Some(canvas_texture)));
}

#[test]
fn strokes_dirty_the_bound_canvas_texture() {
    let (assets, mut controller) = loaded_studio();
    controller.enable_draw_mode();
    let texture = assets.textures.get(controller.registry().canvas_texture()).unwrap();
    let version = texture.image.version();

    assert!(controller.stroke(30.0, 30.0, Some(BrushColor([0, 128, 0, 255]))) > 0);
    assert!(texture.image.version() > version);
    assert_eq!(texture.image.pixel(30, 30), Some([0, 128, 0, 255]));

    // brush default is black
    controller.stroke(90.0, 90.0, None);
    assert_eq!(texture.image.pixel(90, 90), Some([0, 0, 0, 255]));

    controller.clear_canvas();
    assert_eq!(texture.image.pixel(30, 30), Some([255, 255, 255, 255]));
    assert!(controller.draw_mode());
}

// ============================================================================
// Uploads
// ============================================================================

#[test]
fn undecodable_upload_leaves_source_unchanged() {
    let (assets, mut controller) = loaded_studio();
    controller.select_projection(ProjectionKind::Cylindrical);
    let maps = bound_maps(&controller);
    let textures = assets.textures.len();

    let err = controller.install_uploaded_texture(b"definitely not an image").unwrap_err();
    assert!(matches!(err, MantleError::UploadDecodeFailure(_)));

    assert_eq!(controller.active_source(), TextureSource::DefaultAsset);
    assert_eq!(controller.kind(), ProjectionKind::Cylindrical);
    assert_eq!(bound_maps(&controller), maps);
    assert_eq!(assets.textures.len(), textures);
}

#[test]
fn empty_upload_is_rejected() {
    let (_, mut controller) = studio();
    let err = controller.install_uploaded_texture(&[]).unwrap_err();
    assert!(matches!(err, MantleError::UploadDecodeFailure(_)));
}

#[test]
fn upload_activates_image_and_leaves_draw_mode() {
    let (assets, mut controller) = loaded_studio();
    controller.enable_draw_mode();

    let handle = controller.install_uploaded_texture(&png_bytes(4, 2, [10, 20, 30, 255])).unwrap();

    assert!(!controller.draw_mode());
    assert_eq!(controller.active_source(), TextureSource::UploadedImage(handle));
    assert!(bound_maps(&controller).iter().all(|m| *m == Some(handle)));

    let texture = assets.textures.get(handle).unwrap();
    assert_eq!(texture.color_space, ColorSpace::Srgb);
    assert_eq!((texture.image.width(), texture.image.height()), (4, 2));
    assert_eq!(texture.image.pixel(3, 1), Some([10, 20, 30, 255]));
}

#[test]
fn second_upload_releases_first() {
    let (assets, mut controller) = loaded_studio();
    let first = controller.install_uploaded_texture(&png_bytes(2, 2, [255, 0, 0, 255])).unwrap();
    let second = controller.install_uploaded_texture(&png_bytes(2, 2, [0, 0, 255, 255])).unwrap();

    assert_ne!(first, second);
    assert!(!assets.textures.contains(first));
    assert!(assets.textures.contains(second));
    assert_eq!(controller.registry().uploaded_texture(), Some(second));
}

#[test]
fn draw_mode_off_after_upload_returns_to_upload() {
    let (_, mut controller) = loaded_studio();
    let handle = controller.install_uploaded_texture(&png_bytes(2, 2, [1, 2, 3, 255])).unwrap();
    controller.toggle_draw_mode();
    controller.toggle_draw_mode();
    assert_eq!(controller.active_source(), TextureSource::UploadedImage(handle));
}

#[test]
fn upload_from_missing_file_changes_nothing() {
    let (assets, mut controller) = loaded_studio();
    let maps = bound_maps(&controller);
    let textures = assets.textures.len();

    let err = controller
        .execute(Command::UploadTextureFile("missing/skin.png".to_string()))
        .unwrap_err();
    assert!(matches!(err, MantleError::AssetLoadFailure { .. }));
    assert_eq!(controller.active_source(), TextureSource::DefaultAsset);
    assert_eq!(bound_maps(&controller), maps);
    assert_eq!(assets.textures.len(), textures);
}

#[test]
fn upload_from_file_reads_at_execution() {
    let dir = temp_dir();
    let assets = AssetServer::with_root(&dir);
    let mut controller = ProjectionStateController::new(assets.clone(), StudioSettings::default());
    let command = Command::parse("upload-texture late.png").unwrap().unwrap();

    // written after parsing
    std::fs::write(dir.join("late.png"), png_bytes(3, 3, [7, 8, 9, 255])).unwrap();
    controller.execute(command).unwrap();

    let TextureSource::UploadedImage(handle) = controller.active_source() else {
        panic!("expected an uploaded source, got {:?}", controller.active_source());
    };
    assert_eq!(assets.textures.get(handle).unwrap().image.pixel(2, 2), Some([7, 8, 9, 255]));

    std::fs::remove_dir_all(dir).unwrap();
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_restores_initial_state() {
    let (assets, mut controller) = loaded_studio();
    let upload = controller.install_uploaded_texture(&png_bytes(2, 2, [9, 9, 9, 255])).unwrap();
    controller.select_projection(ProjectionKind::Cylindrical);
    controller.enable_draw_mode();
    controller.stroke(12.0, 12.0, Some(BrushColor::BLACK));

    controller.reset_to_default();

    assert_eq!(controller.state(), ProjectionState::default());
    assert_eq!(controller.active_source(), TextureSource::DefaultAsset);
    assert_eq!(controller.registry().uploaded_texture(), None);
    assert!(!assets.textures.contains(upload));
    assert_eq!(controller.canvas().pixel(12, 12), Some([255, 255, 255, 255]));
    assert_eq!(controller.proxy().unwrap().kind, ProjectionKind::Spherical);

    let default_texture = controller.registry().default_texture();
    assert!(bound_maps(&controller).iter().all(|m| *m == Some(default_texture)));
}

// ============================================================================
// Command Dispatch
// ============================================================================

#[test]
fn execute_dispatches_commands() {
    let (_, mut controller) = loaded_studio();

    controller.execute(Command::SelectProjection(ProjectionKind::Ellipsoidal)).unwrap();
    assert_eq!(controller.kind(), ProjectionKind::Ellipsoidal);

    controller.execute(Command::ToggleDrawMode).unwrap();
    assert!(controller.draw_mode());

    controller
        .execute(Command::Stroke {
            x: 50.0,
            y: 60.0,
            color: Some(BrushColor::BLACK),
        })
        .unwrap();
    assert_eq!(controller.canvas().pixel(50, 60), Some([0, 0, 0, 255]));

    controller.execute(Command::ClearCanvas).unwrap();
    assert_eq!(controller.canvas().pixel(50, 60), Some([255, 255, 255, 255]));

    let err = controller.execute(Command::UploadTexture(vec![0, 1, 2])).unwrap_err();
    assert!(matches!(err, MantleError::UploadDecodeFailure(_)));
    assert!(controller.draw_mode());

    controller.execute(Command::UploadTexture(png_bytes(1, 1, [5, 5, 5, 255]))).unwrap();
    assert!(!controller.draw_mode());

    controller.execute(Command::Reset).unwrap();
    assert_eq!(controller.state(), ProjectionState::default());
}

// ============================================================================
// Texture Source Registry
// ============================================================================

#[test]
fn registry_tracks_base_and_active_sources() {
    let assets = AssetServer::new();
    let default_texture = assets.add_texture(Texture::create_solid_color("default", [200, 200, 200, 255]));
    let upload = assets.add_texture(Texture::create_solid_color("upload", [1, 1, 1, 255]));
    let mut registry = TextureSourceRegistry::new(&assets, default_texture, DrawCanvas::new(&CanvasSettings::default()));

    assert_eq!(registry.active(), TextureSource::DefaultAsset);
    assert_eq!(registry.active_texture(), default_texture);

    assert_eq!(registry.set_uploaded(upload), None);
    assert_eq!(registry.base_source(), TextureSource::UploadedImage(upload));

    registry.set_hand_drawn();
    assert_eq!(registry.active_texture(), registry.canvas_texture());
    assert_eq!(registry.base_texture(), upload);

    registry.set_base();
    assert_eq!(registry.active(), TextureSource::UploadedImage(upload));

    assert_eq!(registry.set_default(), Some(upload));
    assert_eq!(registry.base_source(), TextureSource::DefaultAsset);
    assert_eq!(registry.set_default(), None);
}

#[test]
fn registry_canvas_texture_shares_canvas_pixels() {
    let assets = AssetServer::new();
    let default_texture = assets.add_texture(Texture::create_solid_color("default", [0, 0, 0, 255]));
    let mut registry = TextureSourceRegistry::new(&assets, default_texture, DrawCanvas::new(&CanvasSettings::default()));

    registry.canvas_mut().stroke(3.0, 3.0, BrushColor([7, 7, 7, 255]));
    let texture = assets.textures.get(registry.canvas_texture()).unwrap();
    assert_eq!(texture.image.pixel(3, 3), Some([7, 7, 7, 255]));
}
