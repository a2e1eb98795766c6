//! Collaborator traits
//!
//! These traits define the interface between the runtime and the drivers
//! it does not own: the e-paper controller, the glyph rasterizer and the
//! wireless stack.

use embedded_graphics::prelude::Point;

use crate::config::CountryCode;
use crate::graphics::{Framebuffer, Pen, Rect};
use crate::wifi::{ScanOptions, ScanSink};

/// E-paper display controller (UC8151 on the badge)
///
/// Both refreshes are synchronous: they return once the controller has
/// taken the framebuffer and finished the refresh.
pub trait DisplayController {
    /// Error type for controller transfers
    type Error;

    /// Full refresh of the panel
    fn update(&mut self, framebuffer: &Framebuffer) -> Result<(), Self::Error>;

    /// Refresh only `region`
    ///
    /// Faster than a full refresh but leaves ghosting.
    fn partial_update(&mut self, framebuffer: &Framebuffer, region: Rect)
        -> Result<(), Self::Error>;
}

/// Glyph rasterizer drawing into the framebuffer
pub trait TextRenderer {
    /// Select a font by name
    ///
    /// Unknown names leave the current font selected.
    fn set_font(&mut self, name: &str);

    /// Set the stroke thickness in pixels
    fn set_thickness(&mut self, thickness: u8);

    /// Draw `text` with its top-left corner at `origin`
    ///
    /// Lines are wrapped so they do not extend more than `wrap_width`
    /// pixels past `origin.x`.
    fn draw_text(
        &mut self,
        target: &mut Framebuffer,
        text: &str,
        origin: Point,
        wrap_width: u32,
        pen: Pen,
    );
}

/// Wireless stack (CYW43 on the badge)
///
/// Status codes are the stack's raw integers: zero means success.
pub trait RadioStack {
    /// Bring up the radio; non-zero status on failure
    fn init(&mut self) -> i32;

    /// Switch to station (client) mode
    fn enable_station_mode(&mut self);

    /// Set the regulatory domain and bring the station interface up
    fn set_regulatory_domain(&mut self, country: CountryCode);

    /// Start an asynchronous scan
    ///
    /// Returns immediately with the acceptance status. Each discovered
    /// network is delivered to `sink` from the stack's own polling context,
    /// which is not necessarily the caller's.
    fn scan(&mut self, options: &ScanOptions, sink: &'static dyn ScanSink) -> i32;

    /// Check whether a scan is still running
    fn is_scan_active(&self) -> bool;

    /// Raw station link status
    fn link_status(&self) -> i32;

    /// Drive a GPIO owned by the radio chip
    fn gpio_put(&mut self, pin: u8, on: bool);
}
