use uuid::Uuid;

use crate::assets::TextureHandle;

// Material
// ----------------------------------------------------------------------------

/// Texture binding of one mesh part.
///
/// Every rebind bumps `version`, even when the same texture is bound again,
/// so the renderer rebuilds its bind group after any explicit user action.
#[derive(Debug, Clone)]
pub struct Material {
    pub uuid: Uuid,
    pub name: String,

    map: Option<TextureHandle>,
    version: u64,
}

impl Material {
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: "Material".to_string(),
            map: None,
            version: 0,
        }
    }

    /// Material sampling `map`.
    pub fn with_map(map: TextureHandle) -> Self {
        let mut material = Self::new();
        material.set_map(Some(map));
        material
    }

    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[inline]
    pub fn map(&self) -> Option<TextureHandle> {
        self.map
    }

    pub fn set_map(&mut self, map: Option<TextureHandle>) {
        self.map = map;
        self.version = self.version.wrapping_add(1);
    }

    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
