//! Freehand drawing surface backing the hand-drawn texture source.

use std::fmt;
use std::str::FromStr;

use image::{Pixel, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::errors::MantleError;
use crate::resources::image::Image;
use crate::resources::texture::ColorSpace;
use crate::studio::settings::CanvasSettings;

// ============================================================================
// Brush color
// ============================================================================

/// 8-bit RGBA color as typed into the color picker.
///
/// Accepts `#rrggbb`, `#rrggbbaa`, `white` and `black`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BrushColor(pub [u8; 4]);

impl BrushColor {
    pub const WHITE: BrushColor = BrushColor([255, 255, 255, 255]);
    pub const BLACK: BrushColor = BrushColor([0, 0, 0, 255]);

    #[must_use]
    pub fn rgba(self) -> [u8; 4] {
        self.0
    }
}

impl Default for BrushColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for BrushColor {
    type Err = MantleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "white" => return Ok(Self::WHITE),
            "black" => return Ok(Self::BLACK),
            _ => {}
        }

        let invalid = || MantleError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }

        let mut rgba = [255u8; 4];
        for (i, channel) in rgba.iter_mut().enumerate().take(hex.len() / 2) {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(rgba))
    }
}

impl fmt::Display for BrushColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl TryFrom<String> for BrushColor {
    type Error = MantleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BrushColor> for String {
    fn from(color: BrushColor) -> Self {
        color.to_string()
    }
}

// ============================================================================
// Canvas
// ============================================================================

/// RGBA8 canvas painted with round brush stamps.
///
/// The pixels are mirrored into a shared [`Image`]; every stroke and clear
/// replaces the image data, which bumps its version so the renderer
/// re-uploads the texture.
#[derive(Debug)]
pub struct DrawCanvas {
    pixels: RgbaImage,
    image: Image,

    background: BrushColor,
    brush_color: BrushColor,
    brush_radius: f32,

    painting: bool,
}

impl DrawCanvas {
    pub fn new(settings: &CanvasSettings) -> Self {
        let pixels = RgbaImage::from_pixel(settings.width, settings.height, Rgba(settings.background.rgba()));
        let image = Image::from_rgba8(Some("Hand Drawn"), pixels.clone(), ColorSpace::Srgb.rgba8_format());
        Self {
            pixels,
            image,
            background: settings.background,
            brush_color: settings.brush_color,
            brush_radius: settings.brush_radius,
            painting: false,
        }
    }

    /// Shared image the canvas texture samples from.
    #[inline]
    pub fn image(&self) -> &Image {
        &self.image
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn brush_radius(&self) -> f32 {
        self.brush_radius
    }

    #[inline]
    pub fn brush_color(&self) -> BrushColor {
        self.brush_color
    }

    pub fn set_brush_color(&mut self, color: BrushColor) {
        self.brush_color = color;
    }

    #[inline]
    pub fn is_painting(&self) -> bool {
        self.painting
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Copy of the current pixels, e.g. for saving.
    pub fn to_rgba_image(&self) -> RgbaImage {
        self.pixels.clone()
    }

    /// Stamps a filled disc centered at `(x, y)` in pixel coordinates.
    ///
    /// A pixel is painted when its center lies within the brush radius.
    /// Parts outside the canvas are clipped. Returns the number of pixels
    /// written.
    pub fn stroke(&mut self, x: f32, y: f32, color: BrushColor) -> usize {
        let painted = self.stamp(x, y, color);
        self.sync_image();
        painted
    }

    /// Resets every pixel to the background color.
    pub fn clear(&mut self) {
        let background = Rgba(self.background.rgba());
        for pixel in self.pixels.pixels_mut() {
            *pixel = background;
        }
        self.sync_image();
    }

    // --- Pointer session ---

    pub fn pointer_down(&mut self, x: f32, y: f32) -> usize {
        self.painting = true;
        self.stroke(x, y, self.brush_color)
    }

    /// Paints only between `pointer_down` and `pointer_up`.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> usize {
        if !self.painting {
            return 0;
        }
        self.stroke(x, y, self.brush_color)
    }

    pub fn pointer_up(&mut self) {
        self.painting = false;
    }

    pub fn pointer_leave(&mut self) {
        self.painting = false;
    }

    fn stamp(&mut self, x: f32, y: f32, color: BrushColor) -> usize {
        if !x.is_finite() || !y.is_finite() {
            log::warn!("Ignoring stroke at non-finite position ({x}, {y})");
            return 0;
        }

        let r = self.brush_radius;
        let r_sq = r * r;
        let (w, h) = (self.pixels.width() as f32, self.pixels.height() as f32);

        // Candidate pixel range, clipped to the canvas.
        let x0 = (x - r).floor().max(0.0);
        let x1 = (x + r).ceil().min(w - 1.0);
        let y0 = (y - r).floor().max(0.0);
        let y1 = (y + r).ceil().min(h - 1.0);
        if x0 > x1 || y0 > y1 {
            return 0;
        }

        let rgba = Rgba(color.rgba());
        let opaque = color.rgba()[3] == u8::MAX;
        let mut painted = 0;
        for py in (y0 as u32)..=(y1 as u32) {
            for px in (x0 as u32)..=(x1 as u32) {
                let dx = px as f32 + 0.5 - x;
                let dy = py as f32 + 0.5 - y;
                if dx * dx + dy * dy <= r_sq {
                    if opaque {
                        self.pixels.put_pixel(px, py, rgba);
                    } else {
                        // source-over, as a 2D canvas fill composites
                        self.pixels.get_pixel_mut(px, py).blend(&rgba);
                    }
                    painted += 1;
                }
            }
        }
        painted
    }

    fn sync_image(&self) {
        self.image.update_data(self.pixels.as_raw().clone());
    }
}
