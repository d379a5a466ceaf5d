//! Asset management.
//!
//! - [`AssetServer`]: shared storages for geometries, materials and textures
//!   plus file loading (models, textures, raw bytes)
//! - [`decode_image`]: user-provided image bytes to an RGBA8 [`Image`]

pub mod io;
pub mod loaders;
pub mod server;
pub mod storage;

pub use io::{AssetReader, FileAssetReader};
pub use server::{AssetServer, GeometryHandle, MaterialHandle, TextureHandle};
pub use storage::AssetStorage;

use crate::errors::Result;
use crate::resources::image::Image;
use crate::resources::texture::ColorSpace;

/// Decodes an encoded image (png, jpeg, bmp, webp) into sRGB RGBA8 pixels.
///
/// Fails with [`MantleError::UploadDecodeFailure`](crate::errors::MantleError::UploadDecodeFailure)
/// for anything the `image` crate cannot read.
pub fn decode_image(bytes: &[u8]) -> Result<Image> {
    decode_image_labeled(bytes, "Uploaded Image", ColorSpace::Srgb)
}

pub(crate) fn decode_image_labeled(bytes: &[u8], label: &str, color_space: ColorSpace) -> Result<Image> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.into_rgba8();
    Ok(Image::from_rgba8(Some(label), rgba, color_space.rgba8_format()))
}
