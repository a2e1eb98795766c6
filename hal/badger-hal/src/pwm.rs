//! PWM output abstraction

/// Counter wrap value the badge configures on its PWM slices
///
/// A duty of `PWM_WRAP` keeps the output high for the whole period.
pub const PWM_WRAP: u16 = u16::MAX;

/// A single PWM channel with a 16-bit compare level
pub trait PwmOutput {
    /// Set the compare level (0 = always low, [`PWM_WRAP`] = always high)
    fn set_duty(&mut self, duty: u16);
}
