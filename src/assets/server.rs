use slotmap::new_key_type;
use std::path::Path;
use std::sync::Arc;
use std::sync::OnceLock;
use tokio::runtime::Runtime;

use crate::assets::io::{AssetReader, FileAssetReader, source_filename};
use crate::assets::storage::AssetStorage;
use crate::errors::{MantleError, Result};
use crate::resources::geometry::Geometry;
use crate::resources::image::Image;
use crate::resources::material::Material;
use crate::resources::texture::{ColorSpace, Texture};
use crate::scene::model::MeshModel;

fn asset_runtime() -> Result<&'static Runtime> {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    if let Some(runtime) = RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Runtime::new()?;
    Ok(RUNTIME.get_or_init(|| runtime))
}

// Strongly-typed handles
new_key_type! {
    pub struct GeometryHandle;
    pub struct MaterialHandle;
    pub struct TextureHandle;
}

// Asset Server
// ----------------------------------------------------------------------------

/// Shared asset storages plus file access.
///
/// Cloning is cheap; clones see the same storages.
#[derive(Clone)]
pub struct AssetServer {
    pub geometries: Arc<AssetStorage<GeometryHandle, Geometry>>,
    pub materials: Arc<AssetStorage<MaterialHandle, Material>>,
    pub textures: Arc<AssetStorage<TextureHandle, Texture>>,

    reader: Arc<FileAssetReader>,
}

impl Default for AssetServer {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetServer {
    /// Server reading relative URIs from the working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(".")
    }

    /// Server reading relative URIs from `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self {
            geometries: Arc::new(AssetStorage::new()),
            materials: Arc::new(AssetStorage::new()),
            textures: Arc::new(AssetStorage::new()),
            reader: Arc::new(FileAssetReader::new(root)),
        }
    }

    #[inline]
    pub fn reader(&self) -> &FileAssetReader {
        &self.reader
    }

    pub fn add_geometry(&self, geometry: Geometry) -> GeometryHandle {
        self.geometries.add(geometry)
    }

    pub fn add_material(&self, material: Material) -> MaterialHandle {
        self.materials.add(material)
    }

    pub fn add_texture(&self, texture: Texture) -> TextureHandle {
        self.textures.add(texture)
    }

    // ========================================================================
    // Synchronous Methods
    // ========================================================================
    // Blocking wrappers that drive the async loaders on the shared runtime.

    pub fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        asset_runtime()?.block_on(self.read_bytes_async(uri))
    }

    pub fn load_texture(&self, uri: &str, color_space: ColorSpace) -> Result<TextureHandle> {
        asset_runtime()?.block_on(self.load_texture_async(uri, color_space))
    }

    pub fn load_model(&self, uri: &str) -> Result<MeshModel> {
        asset_runtime()?.block_on(self.load_model_async(uri))
    }

    // ========================================================================
    // Async Methods
    // ========================================================================

    pub async fn read_bytes_async(&self, uri: &str) -> Result<Vec<u8>> {
        self.reader.read_bytes(uri).await
    }

    /// Loads and registers a 2D texture.
    ///
    /// Decode failures are reported as [`MantleError::AssetLoadFailure`]: this
    /// path serves bundled assets, not user uploads.
    pub async fn load_texture_async(&self, uri: &str, color_space: ColorSpace) -> Result<TextureHandle> {
        let bytes = self.reader.read_bytes(uri).await?;
        let label = source_filename(uri).to_string();

        let image = Self::decode_image_async(bytes, label.clone(), color_space)
            .await
            .map_err(|e| MantleError::asset_load(uri, e))?;

        let texture = Texture::new(&label, image, color_space);
        let handle = self.textures.add(texture);
        log::info!("Loaded texture '{uri}'");
        Ok(handle)
    }

    /// Loads every mesh primitive of a glTF/GLB file as one model.
    pub async fn load_model_async(&self, uri: &str) -> Result<MeshModel> {
        #[cfg(feature = "gltf")]
        {
            let bytes = self.reader.read_bytes(uri).await?;
            let model = crate::assets::loaders::GltfLoader::new(&self.reader, uri)
                .load(&bytes)
                .await?;
            log::info!(
                "Loaded model '{uri}': {} parts, {} vertices",
                model.parts().len(),
                model.vertex_count()
            );
            Ok(model)
        }
        #[cfg(not(feature = "gltf"))]
        {
            Err(MantleError::asset_load(uri, "glTF support is disabled (enable the `gltf` feature)"))
        }
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Image decoding offloaded to the blocking pool.
    async fn decode_image_async(bytes: Vec<u8>, label: String, color_space: ColorSpace) -> Result<Image> {
        tokio::task::spawn_blocking(move || {
            crate::assets::decode_image_labeled(&bytes, &label, color_space)
        })
        .await?
    }
}
