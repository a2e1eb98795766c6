//! GPIO abstractions
//!
//! The badge reads its buttons as one bank rather than pin by pin, so that
//! a single sample sees every line at the same instant.

/// Bank of digital inputs sampled in one read
///
/// On the RP2040 this is a read of the SIO `GPIO_IN` register; bit `n` of
/// the returned word is the level of GPIO `n`.
pub trait InputBank {
    /// Read the level of every GPIO line in a single access
    fn read_all(&mut self) -> u32;

    /// Yield hook called on each iteration of a blocking input spin
    ///
    /// The default is a processor spin-loop hint. Implementations running
    /// under a scheduler can yield instead.
    fn relax(&mut self) {
        core::hint::spin_loop();
    }
}

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Latch(bool);

    impl OutputPin for Latch {
        fn set_high(&mut self) {
            self.0 = true;
        }

        fn set_low(&mut self) {
            self.0 = false;
        }

        fn is_set_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_set_state_drives_level() {
        let mut pin = Latch(false);
        pin.set_state(true);
        assert!(pin.is_set_high());
        pin.set_state(false);
        assert!(!pin.is_set_high());
    }
}
