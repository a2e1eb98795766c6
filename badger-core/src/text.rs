//! Text rendering on top of embedded-graphics mono fonts
//!
//! Font names follow the badge's bitmap font naming. Thickness is emulated
//! by over-striking each word one pixel to the right per extra stroke.

use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_6X10, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{Drawable, Point};
use embedded_graphics::text::{Baseline, Text};

use crate::graphics::{Framebuffer, Pen};
use crate::traits::TextRenderer;

/// Font name lookup
const FONTS: [(&str, &MonoFont<'static>); 3] = [
    ("bitmap6", &FONT_6X10),
    ("bitmap8", &FONT_8X13),
    ("bitmap14", &FONT_10X20),
];

const DEFAULT_FONT: &MonoFont<'static> = &FONT_8X13;

/// Default text renderer
pub struct MonoTextRenderer {
    font: &'static MonoFont<'static>,
    thickness: u8,
}

impl Default for MonoTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MonoTextRenderer {
    /// Create a renderer using `bitmap8` at thickness 1
    pub const fn new() -> Self {
        Self {
            font: DEFAULT_FONT,
            thickness: 1,
        }
    }

    /// Currently selected font
    pub fn font(&self) -> &'static MonoFont<'static> {
        self.font
    }

    /// Currently selected thickness
    pub fn thickness(&self) -> u8 {
        self.thickness
    }

    fn advance(&self) -> u32 {
        self.font.character_size.width + self.font.character_spacing
    }
}

impl TextRenderer for MonoTextRenderer {
    fn set_font(&mut self, name: &str) {
        if let Some(&(_, font)) = FONTS.iter().find(|(font_name, _)| *font_name == name) {
            self.font = font;
        }
    }

    fn set_thickness(&mut self, thickness: u8) {
        self.thickness = thickness.max(1);
    }

    fn draw_text(
        &mut self,
        target: &mut Framebuffer,
        text: &str,
        origin: Point,
        wrap_width: u32,
        pen: Pen,
    ) {
        let style = MonoTextStyle::new(self.font, BinaryColor::from(pen));
        let advance = self.advance() as i32;
        let line_height = self.font.character_size.height as i32;
        let right = origin.x + wrap_width as i32;

        let mut cursor = origin;
        for (line_index, line) in text.split('\n').enumerate() {
            if line_index > 0 {
                cursor = Point::new(origin.x, cursor.y + line_height);
            }

            for word in line.split(' ') {
                // Empty segments come from repeated spaces, each one a blank cell
                if word.is_empty() {
                    cursor.x += advance;
                    continue;
                }

                let width = advance * word.chars().count() as i32;
                // A word that starts a row is never wrapped
                if cursor.x != origin.x && cursor.x + width > right {
                    cursor = Point::new(origin.x, cursor.y + line_height);
                }

                for stroke in 0..i32::from(self.thickness) {
                    let at = cursor + Point::new(stroke, 0);
                    // Framebuffer drawing is infallible
                    let _ = Text::with_baseline(word, at, style, Baseline::Top).draw(target);
                }
                cursor.x += width + advance;
            }
        }
    }
}
