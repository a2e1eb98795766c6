//! Runtime configuration
//!
//! Panel geometry and pin numbers are fixed by the board and live as
//! constants; the values here are the ones a badge build may tune.

use crate::led::DEFAULT_GAMMA;
use crate::wifi::ScanType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Panel width in pixels
pub const DISPLAY_WIDTH: usize = 296;

/// Panel height in pixels
pub const DISPLAY_HEIGHT: usize = 128;

/// Two-letter ISO 3166 country code for the radio regulatory domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CountryCode(pub [u8; 2]);

impl CountryCode {
    pub const GERMANY: CountryCode = CountryCode(*b"DE");
    pub const UK: CountryCode = CountryCode(*b"GB");
    pub const USA: CountryCode = CountryCode(*b"US");
    /// Worldwide safe defaults
    pub const WORLDWIDE: CountryCode = CountryCode(*b"XX");

    /// Parse a two-letter code, normalising to upper case
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().as_bytes() {
            &[a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Some(CountryCode([a.to_ascii_uppercase(), b.to_ascii_uppercase()]))
            }
            _ => None,
        }
    }

    /// Code as a string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.0).unwrap_or("XX")
    }
}

/// Badge runtime configuration
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BadgerConfig {
    /// Regulatory domain handed to the radio at init
    pub country: CountryCode,
    /// Gamma exponent for the status LED
    pub led_gamma: f32,
    /// LED brightness applied at init
    pub initial_led: u8,
    /// Scan strategy for every wifi scan
    pub scan_type: ScanType,
}

impl Default for BadgerConfig {
    fn default() -> Self {
        Self {
            country: CountryCode::GERMANY,
            led_gamma: DEFAULT_GAMMA,
            initial_led: 0,
            scan_type: ScanType::Active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BadgerConfig::default();
        assert_eq!(config.country, CountryCode::GERMANY);
        assert_eq!(config.initial_led, 0);
        assert_eq!(config.scan_type, ScanType::Active);
    }

    #[test]
    fn test_parse_country() {
        assert_eq!(CountryCode::parse("de"), Some(CountryCode::GERMANY));
        assert_eq!(CountryCode::parse(" US "), Some(CountryCode::USA));
        assert_eq!(CountryCode::GERMANY.as_str(), "DE");

        // Invalid
        assert_eq!(CountryCode::parse("D"), None);
        assert_eq!(CountryCode::parse("DEU"), None);
        assert_eq!(CountryCode::parse("1A"), None);
    }
}
