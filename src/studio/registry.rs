use crate::assets::{AssetServer, TextureHandle};
use crate::resources::texture::{ColorSpace, Texture};
use crate::studio::canvas::DrawCanvas;

/// Where the texture bound to the model comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSource {
    DefaultAsset,
    UploadedImage(TextureHandle),
    HandDrawn,
}

/// Owns the three texture sources and knows which one is active.
///
/// The default texture is fixed for the registry's lifetime. At most one
/// uploaded texture is remembered; the canvas texture is created once and
/// mutated in place by strokes.
#[derive(Debug)]
pub struct TextureSourceRegistry {
    default_texture: TextureHandle,
    uploaded: Option<TextureHandle>,

    canvas: DrawCanvas,
    canvas_texture: TextureHandle,

    active: TextureSource,
}

impl TextureSourceRegistry {
    /// Registers the canvas texture with `assets`. Starts on the default source.
    pub fn new(assets: &AssetServer, default_texture: TextureHandle, canvas: DrawCanvas) -> Self {
        let texture = Texture::new("Hand Drawn", canvas.image().clone(), ColorSpace::Srgb);
        let canvas_texture = assets.add_texture(texture);
        Self {
            default_texture,
            uploaded: None,
            canvas,
            canvas_texture,
            active: TextureSource::DefaultAsset,
        }
    }

    #[inline]
    pub fn active(&self) -> TextureSource {
        self.active
    }

    /// Activates the default asset and forgets the uploaded image.
    ///
    /// Returns the forgotten upload so the caller can release it.
    pub fn set_default(&mut self) -> Option<TextureHandle> {
        self.active = TextureSource::DefaultAsset;
        self.uploaded.take()
    }

    /// Stores and activates an uploaded texture. Returns the one it replaces.
    pub fn set_uploaded(&mut self, handle: TextureHandle) -> Option<TextureHandle> {
        self.active = TextureSource::UploadedImage(handle);
        self.uploaded.replace(handle).filter(|&old| old != handle)
    }

    pub fn set_hand_drawn(&mut self) {
        self.active = TextureSource::HandDrawn;
    }

    /// Re-activates the base (non-drawn) source.
    pub fn set_base(&mut self) {
        self.active = self.base_source();
    }

    /// The uploaded image if there is one, otherwise the default asset.
    pub fn base_source(&self) -> TextureSource {
        self.uploaded
            .map_or(TextureSource::DefaultAsset, TextureSource::UploadedImage)
    }

    pub fn texture_of(&self, source: TextureSource) -> TextureHandle {
        match source {
            TextureSource::DefaultAsset => self.default_texture,
            TextureSource::UploadedImage(handle) => handle,
            TextureSource::HandDrawn => self.canvas_texture,
        }
    }

    #[inline]
    pub fn active_texture(&self) -> TextureHandle {
        self.texture_of(self.active)
    }

    #[inline]
    pub fn base_texture(&self) -> TextureHandle {
        self.texture_of(self.base_source())
    }

    #[inline]
    pub fn default_texture(&self) -> TextureHandle {
        self.default_texture
    }

    #[inline]
    pub fn uploaded_texture(&self) -> Option<TextureHandle> {
        self.uploaded
    }

    #[inline]
    pub fn canvas_texture(&self) -> TextureHandle {
        self.canvas_texture
    }

    #[inline]
    pub fn canvas(&self) -> &DrawCanvas {
        &self.canvas
    }

    #[inline]
    pub fn canvas_mut(&mut self) -> &mut DrawCanvas {
        &mut self.canvas
    }
}
