//! Wifi scan coordination
//!
//! A scan runs asynchronously inside the radio stack. Every discovered
//! network is pushed into a single-slot [`ScanCache`] from the stack's own
//! context while the host loop reads snapshots out of it. The cache keeps
//! only the latest discovery: a caller that wants every network has to poll
//! faster than discoveries arrive. [`ScanCache::overwritten`] reports how
//! many discoveries were replaced before anyone read them.
//!
//! ```text
//!            start_wifi_scan() accepted
//!   ┌──────┐ ─────────────────────────▶ ┌──────────┐
//!   │ Idle │                            │ Scanning │ ──▶ on_result() × n
//!   └──────┘ ◀───────────────────────── └──────────┘
//!              radio reports scan inactive
//! ```

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;

use crate::config::CountryCode;
use crate::pins;
use crate::traits::RadioStack;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum SSID length in bytes
pub const MAX_SSID_LEN: usize = 32;

/// Non-zero status code returned by the radio stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioStatus(pub i32);

impl RadioStatus {
    /// Convert a raw stack status into a result (zero = success)
    pub fn check(code: i32) -> Result<(), RadioStatus> {
        if code == 0 {
            Ok(())
        } else {
            Err(RadioStatus(code))
        }
    }
}

/// Station link state as reported by the radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkStatus {
    /// Not connected
    Down,
    /// Joining a network
    Join,
    /// Joined, no IP address yet
    NoIp,
    /// Connected with an IP address
    Up,
    /// Connection failed
    Fail,
    /// No matching network found
    NoNet,
    /// Authentication failure
    BadAuth,
    /// Code not known to this runtime
    Unknown(i32),
}

impl LinkStatus {
    /// Map the stack's raw link status code
    pub const fn from_raw(code: i32) -> Self {
        match code {
            0 => LinkStatus::Down,
            1 => LinkStatus::Join,
            2 => LinkStatus::NoIp,
            3 => LinkStatus::Up,
            -1 => LinkStatus::Fail,
            -2 => LinkStatus::NoNet,
            -3 => LinkStatus::BadAuth,
            other => LinkStatus::Unknown(other),
        }
    }

    /// Check if the link is fully up
    pub const fn is_up(&self) -> bool {
        matches!(self, LinkStatus::Up)
    }
}

/// Security flags advertised by a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AuthMode(pub u8);

impl AuthMode {
    pub const OPEN: AuthMode = AuthMode(0);
    pub const WEP: u8 = 0x01;
    pub const WPA: u8 = 0x02;
    pub const WPA2: u8 = 0x04;

    /// Check if the network needs no credentials
    pub const fn is_open(&self) -> bool {
        self.0 == 0
    }

    /// Check if the network advertises `flag`
    pub const fn has(&self, flag: u8) -> bool {
        self.0 & flag != 0
    }
}

/// One discovered network
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScanResult {
    /// Access point MAC address
    pub bssid: [u8; 6],
    /// Network name, raw bytes (not guaranteed UTF-8)
    pub ssid: Vec<u8, MAX_SSID_LEN>,
    /// Signal strength in dBm
    pub rssi: i16,
    /// Radio channel
    pub channel: u16,
    /// Advertised security
    pub auth_mode: AuthMode,
}

impl Default for ScanResult {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl ScanResult {
    /// Value held by the cache before any discovery arrives
    pub const EMPTY: ScanResult = ScanResult {
        bssid: [0; 6],
        ssid: Vec::new(),
        rssi: 0,
        channel: 0,
        auth_mode: AuthMode::OPEN,
    };

    /// Build a result, truncating the SSID to [`MAX_SSID_LEN`] bytes
    pub fn new(bssid: [u8; 6], ssid: &[u8], rssi: i16, channel: u16, auth_mode: AuthMode) -> Self {
        let mut name = Vec::new();
        let _ = name.extend_from_slice(&ssid[..ssid.len().min(MAX_SSID_LEN)]);
        Self {
            bssid,
            ssid: name,
            rssi,
            channel,
            auth_mode,
        }
    }

    /// Check if this is the reset value
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// SSID as text, if it is valid UTF-8
    pub fn ssid_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.ssid).ok()
    }
}

/// Scan strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ScanType {
    /// Send probe requests
    #[default]
    Active,
    /// Only listen for beacons
    Passive,
}

/// Options passed to [`RadioStack::scan`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanOptions {
    pub scan_type: ScanType,
}

/// Receiver for discovered networks
///
/// Called from the radio stack's context, which may differ from the host
/// loop, hence the `Sync` bound.
pub trait ScanSink: Sync {
    /// Accept one discovery
    fn on_result(&self, result: &ScanResult);
}

/// Coordinator state, derived from the radio's scan flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanState {
    Idle,
    Scanning,
}

#[derive(Debug, Clone)]
struct Slot {
    latest: ScanResult,
    /// Latest result has not been read yet
    unread: bool,
    delivered: u32,
    overwritten: u32,
}

impl Slot {
    const EMPTY: Slot = Slot {
        latest: ScanResult::EMPTY,
        unread: false,
        delivered: 0,
        overwritten: 0,
    };
}

/// Single-slot result cache shared with the radio callback
///
/// Writes and reads go through a blocking mutex, so a snapshot is never a
/// mix of two discoveries. On hardware `M` is
/// `CriticalSectionRawMutex` and the cache lives in a `static`.
pub struct ScanCache<M: RawMutex> {
    slot: Mutex<M, RefCell<Slot>>,
}

impl<M: RawMutex> Default for ScanCache<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> ScanCache<M> {
    /// Create an empty cache
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(RefCell::new(Slot::EMPTY)),
        }
    }

    /// Drop the cached result and the counters
    pub fn reset(&self) {
        self.slot.lock(|slot| *slot.borrow_mut() = Slot::EMPTY);
    }

    /// Replace the cached result with `result`
    pub fn publish(&self, result: &ScanResult) {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            if slot.unread {
                slot.overwritten = slot.overwritten.saturating_add(1);
            }
            slot.latest = result.clone();
            slot.unread = true;
            slot.delivered = slot.delivered.saturating_add(1);
        });
    }

    /// Copy out the latest result (or [`ScanResult::EMPTY`])
    ///
    /// Does not block on the scan and does not drain anything.
    pub fn snapshot(&self) -> ScanResult {
        self.slot.lock(|slot| {
            let mut slot = slot.borrow_mut();
            slot.unread = false;
            slot.latest.clone()
        })
    }

    /// Discoveries delivered since the last reset
    pub fn delivered(&self) -> u32 {
        self.slot.lock(|slot| slot.borrow().delivered)
    }

    /// Discoveries replaced before being read since the last reset
    pub fn overwritten(&self) -> u32 {
        self.slot.lock(|slot| slot.borrow().overwritten)
    }
}

impl<M> ScanSink for ScanCache<M>
where
    M: RawMutex + Send + Sync,
{
    fn on_result(&self, result: &ScanResult) {
        self.publish(result);
    }
}

/// Drives scans on the radio and serves results from the cache
pub struct WifiScanCoordinator<R, M: RawMutex + 'static> {
    radio: R,
    cache: &'static ScanCache<M>,
    options: ScanOptions,
}

impl<R, M> WifiScanCoordinator<R, M>
where
    R: RadioStack,
    M: RawMutex + Send + Sync + 'static,
{
    /// Bring the radio up in station mode
    ///
    /// Fails with the stack's status if the radio does not initialise; no
    /// coordinator exists in that case.
    pub fn init(
        mut radio: R,
        cache: &'static ScanCache<M>,
        country: CountryCode,
    ) -> Result<Self, RadioStatus> {
        RadioStatus::check(radio.init())?;
        radio.enable_station_mode();
        radio.set_regulatory_domain(country);
        Ok(Self {
            radio,
            cache,
            options: ScanOptions::default(),
        })
    }

    /// Reset the cache and ask the radio to start scanning
    ///
    /// A rejection carries the stack's status code unchanged; there is no
    /// retry.
    pub fn start_wifi_scan(&mut self) -> Result<(), RadioStatus> {
        self.cache.reset();

        let status = self.radio.scan(&self.options, self.cache);

        #[cfg(feature = "defmt")]
        {
            if status == 0 {
                defmt::info!("Wifi scan started");
            } else {
                defmt::warn!("Wifi scan rejected: {}", status);
            }
        }

        RadioStatus::check(status)
    }

    /// Options used by every following [`start_wifi_scan`](Self::start_wifi_scan)
    pub fn set_scan_options(&mut self, options: ScanOptions) {
        self.options = options;
    }

    pub fn scan_options(&self) -> ScanOptions {
        self.options
    }

    /// Check whether the radio is still scanning
    pub fn is_scanning_wifi(&self) -> bool {
        self.radio.is_scan_active()
    }

    /// Current coordinator state
    pub fn scan_state(&self) -> ScanState {
        if self.is_scanning_wifi() {
            ScanState::Scanning
        } else {
            ScanState::Idle
        }
    }

    /// Latest discovery, or the empty result if none arrived yet
    pub fn wifi_get_scan_result(&self) -> ScanResult {
        self.cache.snapshot()
    }

    /// Station link status
    pub fn wifi_status(&self) -> LinkStatus {
        LinkStatus::from_raw(self.radio.link_status())
    }

    /// Switch the radio module LED
    pub fn wifi_led_on(&mut self, on: bool) {
        self.radio.gpio_put(pins::WL_GPIO_LED, on);
    }

    /// Shared result cache
    pub fn cache(&self) -> &'static ScanCache<M> {
        self.cache
    }

    /// Get access to the radio stack
    pub fn radio(&self) -> &R {
        &self.radio
    }

    /// Get mutable access to the radio stack
    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}
