//! Board-agnostic runtime logic for the e-paper badge
//!
//! This crate contains the badge runtime that does not depend on a
//! specific board implementation:
//!
//! - Pin identity table and button masks
//! - Wake-source and button state tracking
//! - Power-rail halt sequencing
//! - 1bpp framebuffer drawing and panel refresh hand-off
//! - Status LED gamma mapping
//! - Wifi scan coordination with a tear-free result cache
//! - Collaborator traits (display controller, radio stack, text)
//!
//! Everything is driven from one host loop; the only state shared with
//! another execution context is the wifi [`ScanCache`](wifi::ScanCache).

#![no_std]
#![deny(unsafe_code)]

pub mod badger;
pub mod config;
pub mod graphics;
pub mod input;
pub mod led;
pub mod pins;
pub mod power;
pub mod text;
pub mod traits;
pub mod wifi;

pub use badger::{Badger, Board, BoardParts, InitError};
pub use config::BadgerConfig;
pub use graphics::{Framebuffer, Pen, Rect};
pub use input::{Button, ButtonMask};
