//! Badger Hardware Abstraction Layer
//!
//! This crate defines the low-level hardware traits the badge runtime
//! consumes. A board support crate implements them on top of the chip HAL
//! (RP2040 SIO/PWM/watchdog), and the host test suite implements them with
//! scripted mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Host application (badge firmware)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  badger-core (runtime logic)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  badger-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board support │       │  host mocks   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputBank`] - Atomic snapshot of all input lines
//! - [`gpio::OutputPin`] - Digital output (power rail enable)
//! - [`pwm::PwmOutput`] - 16-bit PWM channel (status LED)
//! - [`reset::SystemReset`] - Immediate cold restart

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod pwm;
pub mod reset;

// Re-export key traits at crate root for convenience
pub use gpio::{InputBank, OutputPin};
pub use pwm::PwmOutput;
pub use reset::SystemReset;
