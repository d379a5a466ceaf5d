use serde::{Deserialize, Serialize};
use uuid::Uuid;
use wgpu::{AddressMode, TextureFormat};

use crate::resources::image::Image;

/// How texel values are to be interpreted by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Srgb,
    Linear,
}

impl ColorSpace {
    #[must_use]
    pub fn rgba8_format(self) -> TextureFormat {
        match self {
            ColorSpace::Srgb => TextureFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => TextureFormat::Rgba8Unorm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureSampler {
    pub address_mode_u: AddressMode,
    pub address_mode_v: AddressMode,
    pub mag_filter: wgpu::FilterMode,
    pub min_filter: wgpu::FilterMode,
}

impl Default for TextureSampler {
    fn default() -> Self {
        Self {
            // u wraps around the projection seam
            address_mode_u: AddressMode::Repeat,
            address_mode_v: AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
        }
    }
}

/// A sampled view of an [`Image`].
///
/// Pixel changes are tracked by the image itself (see [`Image::version`]).
#[derive(Debug)]
pub struct Texture {
    pub uuid: Uuid,
    pub name: String,

    pub image: Image,
    pub color_space: ColorSpace,
    pub sampler: TextureSampler,
}

impl Texture {
    /// Creates a texture from an existing image.
    pub fn new(name: &str, image: Image, color_space: ColorSpace) -> Self {
        image.set_format(color_space.rgba8_format());
        Self {
            uuid: Uuid::new_v4(),
            name: name.to_string(),
            image,
            color_space,
            sampler: TextureSampler::default(),
        }
    }

    /// Creates a 2D RGBA8 texture, allocating its image.
    pub fn new_2d(name: &str, width: u32, height: u32, data: Vec<u8>, color_space: ColorSpace) -> Self {
        let image = Image::new(Some(name), width, height, color_space.rgba8_format(), data);
        Self::new(name, image, color_space)
    }

    /// 1x1 solid color texture.
    pub fn create_solid_color(name: &str, color: [u8; 4]) -> Texture {
        Self::new_2d(name, 1, 1, color.to_vec(), ColorSpace::Srgb)
    }

    /// Checkerboard test pattern.
    pub fn create_checkerboard(name: &str, width: u32, height: u32, check_size: u32) -> Self {
        let check_size = check_size.max(1);
        let mut data = Vec::with_capacity((width * height * 4) as usize);

        let color_a = [255, 255, 255, 255];
        let color_b = [0, 0, 0, 255];

        for y in 0..height {
            for x in 0..width {
                let is_a = (x / check_size + y / check_size) % 2 == 0;
                data.extend_from_slice(if is_a { &color_a } else { &color_b });
            }
        }

        Self::new_2d(name, width, height, data, ColorSpace::Srgb)
    }
}
