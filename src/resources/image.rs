use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockReadGuard};
use uuid::Uuid;

// Global Image ID generator (uses u64 for cheap map lookups)
static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Bytes per texel of the RGBA8 layouts used here.
pub const RGBA8_BYTES_PER_PIXEL: usize = 4;

#[derive(Debug)]
pub struct ImageInner {
    pub id: u64,
    pub uuid: Uuid,
    label: String,

    pub width: AtomicU32,
    pub height: AtomicU32,

    format: RwLock<wgpu::TextureFormat>,

    // Pixel rows, top row first
    data: RwLock<Vec<u8>>,

    // Bumped whenever pixel data changes; the renderer re-uploads on change
    version: AtomicU64,
}

impl ImageInner {
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Shared CPU-side pixel buffer.
///
/// Clones share the same pixels, so a texture handed to the renderer sees
/// every later stroke. Equality and hashing go by id.
#[derive(Debug, Clone)]
pub struct Image(Arc<ImageInner>);

impl PartialEq for Image {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}
impl Eq for Image {}
impl std::hash::Hash for Image {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl Image {
    pub fn new(
        label: Option<&str>,
        width: u32,
        height: u32,
        format: wgpu::TextureFormat,
        data: Vec<u8>,
    ) -> Self {
        Self(Arc::new(ImageInner {
            id: NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed),
            uuid: Uuid::new_v4(),
            label: label.unwrap_or("Unnamed Image").to_string(),
            width: AtomicU32::new(width),
            height: AtomicU32::new(height),
            format: RwLock::new(format),
            data: RwLock::new(data),
            version: AtomicU64::new(1),
        }))
    }

    /// Wraps a decoded RGBA8 image.
    pub fn from_rgba8(label: Option<&str>, image: image::RgbaImage, format: wgpu::TextureFormat) -> Self {
        let (width, height) = image.dimensions();
        Self::new(label, width, height, format, image.into_raw())
    }

    #[must_use]
    pub fn id(&self) -> u64 {
        self.0.id
    }
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.0.uuid
    }
    #[must_use]
    pub fn version(&self) -> u64 {
        self.0.version.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width.load(Ordering::Relaxed)
    }
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn format(&self) -> wgpu::TextureFormat {
        *self.0.format.read()
    }

    pub fn set_format(&self, format: wgpu::TextureFormat) {
        let mut current = self.0.format.write();
        if *current != format {
            *current = format;
            self.0.version.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Read access to the raw pixel bytes.
    pub fn data(&self) -> RwLockReadGuard<'_, Vec<u8>> {
        self.0.data.read()
    }

    /// Replaces the pixel data and marks the image dirty.
    pub fn update_data(&self, data: Vec<u8>) {
        *self.0.data.write() = data;
        self.0.version.fetch_add(1, Ordering::Relaxed);
    }

    /// RGBA value at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = (y as usize * self.width() as usize + x as usize) * RGBA8_BYTES_PER_PIXEL;
        let data = self.0.data.read();
        let bytes = data.get(start..start + RGBA8_BYTES_PER_PIXEL)?;
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}

// Deref for convenient read-only access to inner data
impl std::ops::Deref for Image {
    type Target = ImageInner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
