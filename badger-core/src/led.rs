//! Status LED brightness with gamma correction

use badger_hal::pwm::PWM_WRAP;
use badger_hal::PwmOutput;

/// Gamma exponent matching the perceived brightness of the badge LED
pub const DEFAULT_GAMMA: f32 = 2.8;

/// Map a logical brightness to a 16-bit PWM duty
///
/// Brightness is treated as `b / 256`, raised to `gamma` and scaled to the
/// full counter range. The mapping is monotonic non-decreasing and
/// brightness 0 always yields duty 0. A non-positive `gamma` falls back to
/// [`DEFAULT_GAMMA`].
pub fn gamma_duty(brightness: u8, gamma: f32) -> u16 {
    if brightness == 0 {
        return 0;
    }
    let gamma = if gamma > 0.0 { gamma } else { DEFAULT_GAMMA };

    let level = f32::from(brightness) / 256.0;
    (libm::powf(level, gamma) * f32::from(PWM_WRAP) + 0.5) as u16
}

/// Gamma-corrected status LED on a PWM channel
pub struct StatusLed<L> {
    pwm: L,
    gamma: f32,
    brightness: u8,
}

impl<L: PwmOutput> StatusLed<L> {
    /// Create the LED and drive it to `brightness`
    pub fn new(pwm: L, gamma: f32, brightness: u8) -> Self {
        let mut led = Self {
            pwm,
            gamma,
            brightness,
        };
        led.set(brightness);
        led
    }

    /// Set the brightness (0 = off, 255 = full)
    pub fn set(&mut self, brightness: u8) {
        self.brightness = brightness;
        self.pwm.set_duty(gamma_duty(brightness, self.gamma));
    }

    /// Last brightness written
    pub fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Get access to the underlying PWM channel
    pub fn pwm(&self) -> &L {
        &self.pwm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Duty(u16);

    impl PwmOutput for Duty {
        fn set_duty(&mut self, duty: u16) {
            self.0 = duty;
        }
    }

    #[test]
    fn test_zero_is_off() {
        assert_eq!(gamma_duty(0, DEFAULT_GAMMA), 0);
    }

    #[test]
    fn test_full_brightness() {
        // (255/256)^2.8 * 65535
        let duty = gamma_duty(255, DEFAULT_GAMMA);
        assert!(duty > 64_700 && duty < 64_900, "duty = {}", duty);
    }

    #[test]
    fn test_midpoint_is_dim() {
        // Gamma pushes the midpoint well below half duty
        let duty = gamma_duty(128, DEFAULT_GAMMA);
        assert!(duty < 65535 / 4, "duty = {}", duty);
    }

    #[test]
    fn test_bad_gamma_falls_back() {
        assert_eq!(gamma_duty(100, -1.0), gamma_duty(100, DEFAULT_GAMMA));
        assert_eq!(gamma_duty(0, 0.0), 0);
    }

    #[test]
    fn test_led_writes_duty() {
        let mut led = StatusLed::new(Duty(1), DEFAULT_GAMMA, 0);
        assert_eq!(led.pwm().0, 0);

        led.set(200);
        assert_eq!(led.brightness(), 200);
        assert_eq!(led.pwm().0, gamma_duty(200, DEFAULT_GAMMA));
    }
}
