//! Power-down sequencing
//!
//! The badge holds its own supply on through the 3V3 enable line. Dropping
//! that line cuts power when running from battery; on USB power the
//! processor keeps running, so halt falls back to waiting for a button
//! press and rebooting.

use badger_hal::{InputBank, OutputPin, SystemReset};

use crate::input::InputStateTracker;

/// Drives the power rail hold and the final restart
pub struct PowerSequencer<P, R> {
    rail: P,
    reset: R,
}

impl<P: OutputPin, R: SystemReset> PowerSequencer<P, R> {
    /// Take over the rail enable and assert it
    pub fn new(mut rail: P, reset: R) -> Self {
        rail.set_high();
        Self { rail, reset }
    }

    /// Check if the power rail hold is asserted
    pub fn rail_enabled(&self) -> bool {
        self.rail.is_set_high()
    }

    /// Drop the rail hold without waiting or restarting
    ///
    /// Used when bring-up fails and no badge is left to halt.
    pub fn release_rail(&mut self) {
        self.rail.set_low();
    }

    /// Power the badge down
    ///
    /// Releases the rail hold, then waits for a full press-and-release and
    /// restarts immediately. On battery the first step already removes
    /// power; otherwise the restart ends it. This never returns.
    pub fn halt<B: InputBank>(&mut self, input: &mut InputStateTracker<B>) -> ! {
        self.release_rail();

        #[cfg(feature = "defmt")]
        defmt::info!("Power rail released, waiting for press to restart");

        input.wait_for_press();
        self.reset.cold_restart()
    }
}
