//! Projection state controller.
//!
//! Owns the `(projection kind, draw mode)` state and applies every
//! transition to the loaded model: re-projects UVs, rebinds materials and
//! rebuilds the reference proxy. Transitions always re-run, even when the
//! requested state equals the current one.
//!
//! Without a model the state is still recorded; the model is brought up to
//! date when [`ProjectionStateController::on_model_loaded`] installs one.

use crate::assets::{AssetServer, TextureHandle, decode_image};
use crate::errors::{MantleError, Result};
use crate::projection::{ProjectionKind, apply_projection};
use crate::resources::bounds::BoundingBox;
use crate::resources::texture::{ColorSpace, Texture};
use crate::scene::model::MeshModel;
use crate::studio::canvas::{BrushColor, DrawCanvas};
use crate::studio::command::Command;
use crate::studio::proxy::{ReferenceProxy, ReferenceProxySlot};
use crate::studio::registry::{TextureSource, TextureSourceRegistry};
use crate::studio::settings::StudioSettings;

const CHECKERBOARD_SIZE: u32 = 256;
const CHECKERBOARD_CELL: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProjectionState {
    pub kind: ProjectionKind,
    pub draw_mode: bool,
}

pub struct ProjectionStateController {
    assets: AssetServer,
    settings: StudioSettings,

    state: ProjectionState,
    registry: TextureSourceRegistry,
    proxy: ReferenceProxySlot,

    model: Option<MeshModel>,
    bounds: Option<BoundingBox>,

    default_texture_error: Option<MantleError>,
}

impl ProjectionStateController {
    /// Loads the configured default texture, or generates a checkerboard.
    ///
    /// A default texture that cannot be read or decoded is logged and
    /// replaced by the checkerboard; the failure stays available through
    /// [`ProjectionStateController::default_texture_error`].
    pub fn new(assets: AssetServer, settings: StudioSettings) -> Self {
        let mut load_error = None;
        let default_texture = match settings.default_texture.as_deref() {
            Some(uri) => match assets.load_texture(uri, ColorSpace::Srgb) {
                Ok(handle) => Some(handle),
                Err(err) => {
                    log::error!("Default texture unavailable, using checkerboard: {err}");
                    load_error = Some(err);
                    None
                }
            },
            None => None,
        };
        let default_texture = default_texture.unwrap_or_else(|| {
            assets.add_texture(Texture::create_checkerboard(
                "Default Checkerboard",
                CHECKERBOARD_SIZE,
                CHECKERBOARD_SIZE,
                CHECKERBOARD_CELL,
            ))
        });

        let mut controller = Self::with_default_texture(assets, settings, default_texture);
        controller.default_texture_error = load_error;
        controller
    }

    /// Uses an already registered default texture.
    pub fn with_default_texture(assets: AssetServer, settings: StudioSettings, default_texture: TextureHandle) -> Self {
        let canvas = DrawCanvas::new(&settings.canvas);
        let registry = TextureSourceRegistry::new(&assets, default_texture, canvas);
        let proxy = ReferenceProxySlot::new(settings.proxy);
        Self {
            assets,
            settings,
            state: ProjectionState::default(),
            registry,
            proxy,
            model: None,
            bounds: None,
            default_texture_error: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    pub fn state(&self) -> ProjectionState {
        self.state
    }

    #[inline]
    pub fn kind(&self) -> ProjectionKind {
        self.state.kind
    }

    #[inline]
    pub fn draw_mode(&self) -> bool {
        self.state.draw_mode
    }

    #[inline]
    pub fn active_source(&self) -> TextureSource {
        self.registry.active()
    }

    #[inline]
    pub fn registry(&self) -> &TextureSourceRegistry {
        &self.registry
    }

    #[inline]
    pub fn canvas(&self) -> &DrawCanvas {
        self.registry.canvas()
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut DrawCanvas {
        self.registry.canvas_mut()
    }

    #[inline]
    pub fn model(&self) -> Option<&MeshModel> {
        self.model.as_ref()
    }

    #[inline]
    pub fn bounds(&self) -> Option<&BoundingBox> {
        self.bounds.as_ref()
    }

    #[inline]
    pub fn proxy(&self) -> Option<&ReferenceProxy> {
        self.proxy.current()
    }

    #[inline]
    pub fn assets(&self) -> &AssetServer {
        &self.assets
    }

    #[inline]
    pub fn settings(&self) -> &StudioSettings {
        &self.settings
    }

    /// Why the configured default texture was replaced by the checkerboard.
    #[inline]
    pub fn default_texture_error(&self) -> Option<&MantleError> {
        self.default_texture_error.as_ref()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Re-projects every part with `kind`, rebinds the active texture and
    /// rebuilds the proxy.
    pub fn select_projection(&mut self, kind: ProjectionKind) {
        self.state.kind = kind;
        let texture = self.bound_texture();

        if let Some(model) = self.model.as_mut() {
            let options = self.settings.projection;
            for part in model.parts_mut() {
                apply_projection(&mut part.geometry, kind, &options);
                part.material.set_map(Some(texture));
                log::debug!("Part '{}' projected with {kind}", part.name);
            }
            log::info!("Projection set to {kind} on {} parts", model.parts().len());
        } else {
            log::info!("Projection set to {kind} (no model loaded)");
        }

        self.rebuild_proxy(texture);
    }

    /// Binds the canvas texture everywhere. UVs stay as they are.
    pub fn enable_draw_mode(&mut self) {
        self.state.draw_mode = true;
        self.registry.set_hand_drawn();
        let texture = self.registry.canvas_texture();

        if let Some(model) = self.model.as_mut() {
            for part in model.parts_mut() {
                part.material.set_map(Some(texture));
            }
        }
        log::info!("Draw mode enabled");

        self.rebuild_proxy(texture);
    }

    /// Returns to the base texture and re-applies the current projection.
    pub fn disable_draw_mode(&mut self) {
        self.state.draw_mode = false;
        self.registry.set_base();
        log::info!("Draw mode disabled");
        self.select_projection(self.state.kind);
    }

    pub fn toggle_draw_mode(&mut self) {
        if self.state.draw_mode {
            self.disable_draw_mode();
        } else {
            self.enable_draw_mode();
        }
    }

    /// Decodes `bytes` and makes the image the active texture.
    ///
    /// On decode failure nothing changes and
    /// [`MantleError::UploadDecodeFailure`] is returned.
    pub fn install_uploaded_texture(&mut self, bytes: &[u8]) -> Result<TextureHandle> {
        let image = decode_image(bytes).inspect_err(|e| log::error!("Rejected upload: {e}"))?;
        log::info!("Uploaded texture {}x{}", image.width(), image.height());

        let handle = self
            .assets
            .add_texture(Texture::new("Uploaded Image", image, ColorSpace::Srgb));
        let replaced = self.registry.set_uploaded(handle);
        self.state.draw_mode = false;
        self.select_projection(self.state.kind);

        self.release_texture(replaced);
        Ok(handle)
    }

    /// Back to the initial state: blank canvas, default texture, spherical
    /// projection, draw mode off.
    pub fn reset_to_default(&mut self) {
        self.registry.canvas_mut().clear();
        let forgotten = self.registry.set_default();
        self.state.draw_mode = false;
        log::info!("Reset to default texture");
        self.select_projection(ProjectionKind::Spherical);

        self.release_texture(forgotten);
    }

    /// Completion of an asynchronous model load.
    ///
    /// A successful load replaces the model and its extents, then re-applies
    /// the current projection. A failure is logged and returned as
    /// [`MantleError::AssetLoadFailure`]; the previous model stays.
    pub fn on_model_loaded(&mut self, source: &str, result: Result<MeshModel>) -> Result<()> {
        let model = match result {
            Ok(model) => model,
            Err(err) => {
                log::error!("Failed to load model '{source}': {err}");
                return Err(match err {
                    MantleError::AssetLoadFailure { .. } => err,
                    other => MantleError::asset_load(source, other),
                });
            }
        };

        self.bounds = model.bounding_box();
        if self.bounds.is_none() {
            log::warn!("Model '{source}' has no vertex positions");
        }
        log::info!("Installed model '{source}' ({} parts)", model.parts().len());
        self.model = Some(model);

        self.select_projection(self.state.kind);
        Ok(())
    }

    /// Loads a model file through the asset server and installs it.
    pub fn load_model(&mut self, uri: &str) -> Result<()> {
        let result = self.assets.load_model(uri);
        self.on_model_loaded(uri, result)
    }

    // ========================================================================
    // Drawing
    // ========================================================================

    /// Paints on the canvas. `None` uses the canvas brush color.
    pub fn stroke(&mut self, x: f32, y: f32, color: Option<BrushColor>) -> usize {
        let canvas = self.registry.canvas_mut();
        let color = color.unwrap_or(canvas.brush_color());
        canvas.stroke(x, y, color)
    }

    pub fn clear_canvas(&mut self) {
        self.registry.canvas_mut().clear();
    }

    // ========================================================================
    // Command surface
    // ========================================================================

    pub fn execute(&mut self, command: Command) -> Result<()> {
        log::debug!("Executing '{}'", command.name());
        match command {
            Command::SelectProjection(kind) => self.select_projection(kind),
            Command::ToggleDrawMode => self.toggle_draw_mode(),
            Command::Stroke { x, y, color } => {
                self.stroke(x, y, color);
            }
            Command::ClearCanvas => self.clear_canvas(),
            Command::UploadTexture(bytes) => {
                self.install_uploaded_texture(&bytes)?;
            }
            Command::UploadTextureFile(path) => {
                let bytes = self
                    .assets
                    .read_bytes(&path)
                    .inspect_err(|e| log::error!("Upload unavailable: {e}"))?;
                self.install_uploaded_texture(&bytes)?;
            }
            Command::Reset => self.reset_to_default(),
        }
        Ok(())
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Hand-drawn texture in draw mode, base texture otherwise.
    fn bound_texture(&self) -> TextureHandle {
        if self.state.draw_mode {
            self.registry.canvas_texture()
        } else {
            self.registry.base_texture()
        }
    }

    fn rebuild_proxy(&mut self, texture: TextureHandle) {
        self.proxy
            .rebuild(&self.assets, self.bounds.as_ref(), self.state.kind, texture);
    }

    fn release_texture(&self, handle: Option<TextureHandle>) {
        if let Some(handle) = handle {
            self.assets.textures.remove(handle);
        }
    }
}
