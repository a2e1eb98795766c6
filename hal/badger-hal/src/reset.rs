//! System reset abstraction

/// Whole-chip restart
///
/// On the RP2040 this is a watchdog reboot with a zero countdown.
pub trait SystemReset {
    /// Restart the processor immediately
    ///
    /// There is no delay and no return: code after this call never runs.
    fn cold_restart(&mut self) -> !;
}
