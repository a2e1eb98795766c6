//! Framebuffer and drawing
//!
//! The framebuffer is a packed 1bpp image of the panel. The [`Renderer`]
//! owns it exclusively and hands it to the display controller to refresh
//! the panel.

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Point, Size};
use embedded_graphics::Pixel;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::traits::{DisplayController, TextRenderer};

/// Bytes per framebuffer row
const ROW_BYTES: usize = DISPLAY_WIDTH.div_ceil(8);

/// Framebuffer size in bytes
pub const FRAMEBUFFER_BYTES: usize = ROW_BYTES * DISPLAY_HEIGHT;

/// Text origin used by [`Renderer::draw_text`]
pub const TEXT_ORIGIN: Point = Point::new(10, 10);
/// Font used by [`Renderer::draw_text`]
pub const TEXT_FONT: &str = "bitmap8";
/// Stroke thickness used by [`Renderer::draw_text`]
pub const TEXT_THICKNESS: u8 = 2;

/// Logical pixel value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pen {
    /// Dark pixel
    Ink,
    /// Light pixel
    Paper,
}

impl Pen {
    /// Pen for a "white" drawing flag
    pub const fn from_white(white: bool) -> Self {
        if white {
            Pen::Paper
        } else {
            Pen::Ink
        }
    }
}

impl From<BinaryColor> for Pen {
    fn from(color: BinaryColor) -> Self {
        match color {
            BinaryColor::On => Pen::Ink,
            BinaryColor::Off => Pen::Paper,
        }
    }
}

impl From<Pen> for BinaryColor {
    fn from(pen: Pen) -> Self {
        match pen {
            Pen::Ink => BinaryColor::On,
            Pen::Paper => BinaryColor::Off,
        }
    }
}

/// Integer panel region
///
/// Not clipped: callers keep regions inside the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The whole panel
    pub const fn full_panel() -> Self {
        Self::new(0, 0, DISPLAY_WIDTH as i32, DISPLAY_HEIGHT as i32)
    }

    /// Check whether the region covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Row stride in bytes of a packed bitmap `w` pixels wide
    pub const fn stride(&self) -> usize {
        if self.w <= 0 {
            0
        } else {
            (self.w as usize).div_ceil(8)
        }
    }
}

/// Drawing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GraphicsError {
    /// Bitmap is shorter than `stride * h` for the target region
    BitmapTooShort { needed: usize, got: usize },
}

/// Packed 1bpp panel image, MSB first, set bit = ink
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; FRAMEBUFFER_BYTES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// Create a framebuffer filled with paper
    pub const fn new() -> Self {
        Self {
            buffer: [0; FRAMEBUFFER_BYTES],
        }
    }

    /// Set one pixel
    ///
    /// Coordinates outside the panel are discarded.
    pub fn set_pixel(&mut self, x: i32, y: i32, pen: Pen) {
        let Some((index, mask)) = Self::locate(x, y) else {
            return;
        };
        match pen {
            Pen::Ink => self.buffer[index] |= mask,
            Pen::Paper => self.buffer[index] &= !mask,
        }
    }

    /// Read one pixel, `None` outside the panel
    pub fn pixel(&self, x: i32, y: i32) -> Option<Pen> {
        let (index, mask) = Self::locate(x, y)?;
        Some(if self.buffer[index] & mask != 0 {
            Pen::Ink
        } else {
            Pen::Paper
        })
    }

    /// Fill every pixel with `pen`
    pub fn fill(&mut self, pen: Pen) {
        let byte = match pen {
            Pen::Ink => 0xFF,
            Pen::Paper => 0x00,
        };
        self.buffer.fill(byte);
    }

    /// Raw packed rows, `ceil(width / 8)` bytes each
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Count pixels drawn with `pen`
    pub fn count(&self, pen: Pen) -> usize {
        let ink = (0..DISPLAY_HEIGHT as i32)
            .flat_map(|y| (0..DISPLAY_WIDTH as i32).map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y) == Some(Pen::Ink))
            .count();
        match pen {
            Pen::Ink => ink,
            Pen::Paper => DISPLAY_WIDTH * DISPLAY_HEIGHT - ink,
        }
    }

    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= DISPLAY_WIDTH as i32 || y >= DISPLAY_HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((y * ROW_BYTES + (x >> 3), 0x80 >> (x & 7)))
    }
}

impl core::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &DISPLAY_WIDTH)
            .field("height", &DISPLAY_HEIGHT)
            .finish()
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH as u32, DISPLAY_HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.into());
        }
        Ok(())
    }
}

/// Framebuffer owner and panel refresh front end
pub struct Renderer<D, T> {
    framebuffer: Framebuffer,
    display: D,
    text: T,
}

impl<D: DisplayController, T: TextRenderer> Renderer<D, T> {
    /// Create a renderer with a paper-filled framebuffer
    pub fn new(display: D, text: T) -> Self {
        Self {
            framebuffer: Framebuffer::new(),
            display,
            text,
        }
    }

    /// Fill the framebuffer with paper (`white`) or ink
    pub fn clear(&mut self, white: bool) {
        self.framebuffer.fill(Pen::from_white(white));
    }

    /// Fill a rectangle with paper (`white`) or ink
    ///
    /// A non-positive width or height draws nothing.
    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, white: bool) {
        let pen = Pen::from_white(white);
        for row in 0..h.max(0) {
            for col in 0..w.max(0) {
                self.framebuffer.set_pixel(x + col, y + row, pen);
            }
        }
    }

    /// Draw a text string at the fixed text origin
    ///
    /// Uses the `bitmap8` font at thickness 2, wrapping at the panel width.
    pub fn draw_text(&mut self, text: &str, white: bool) {
        self.text.set_font(TEXT_FONT);
        self.text.set_thickness(TEXT_THICKNESS);
        self.text.draw_text(
            &mut self.framebuffer,
            text,
            TEXT_ORIGIN,
            DISPLAY_WIDTH as u32,
            Pen::from_white(white),
        );
    }

    /// Unpack a 1bpp bitmap covering the whole panel
    pub fn draw_image(&mut self, bitmap: &[u8]) -> Result<(), GraphicsError> {
        self.draw_image_in(bitmap, Rect::full_panel())
    }

    /// Unpack a 1bpp bitmap into `rect`
    ///
    /// The bitmap is row-major, MSB first, with a row stride of
    /// `ceil(rect.w / 8)` bytes. A set bit draws ink, a clear bit paper.
    pub fn draw_image_in(&mut self, bitmap: &[u8], rect: Rect) -> Result<(), GraphicsError> {
        if rect.is_empty() {
            return Ok(());
        }

        let stride = rect.stride();
        let needed = stride * rect.h as usize;
        if bitmap.len() < needed {
            return Err(GraphicsError::BitmapTooShort {
                needed,
                got: bitmap.len(),
            });
        }

        for (y, row) in bitmap[..needed].chunks_exact(stride).enumerate() {
            for x in 0..rect.w as usize {
                let ink = row[x >> 3] & (0x80 >> (x & 7)) != 0;
                let pen = if ink { Pen::Ink } else { Pen::Paper };
                self.framebuffer
                    .set_pixel(rect.x + x as i32, rect.y + y as i32, pen);
            }
        }
        Ok(())
    }

    /// Refresh the whole panel, blocking until the controller is done
    pub fn update(&mut self) -> Result<(), D::Error> {
        self.display.update(&self.framebuffer)
    }

    /// Refresh only `region` of the panel, blocking until done
    pub fn partial_update(&mut self, region: Rect) -> Result<(), D::Error> {
        self.display.partial_update(&self.framebuffer, region)
    }

    /// Read-only view of the framebuffer
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Get access to the display controller
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Get access to the text renderer
    pub fn text_renderer(&self) -> &T {
        &self.text
    }
}
