//! Assembled badge runtime
//!
//! [`Badger`] wires the input tracker, power sequencer, status LED,
//! renderer and wifi coordinator together and exposes the call surface the
//! host loop uses. It is only ever handed out fully initialised.

use badger_hal::{InputBank, OutputPin, PwmOutput, SystemReset};
use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::config::BadgerConfig;
use crate::graphics::{GraphicsError, Rect, Renderer};
use crate::input::{Button, ButtonMask, InputStateTracker};
use crate::led::StatusLed;
use crate::power::PowerSequencer;
use crate::traits::{DisplayController, RadioStack, TextRenderer};
use crate::wifi::{
    LinkStatus, RadioStatus, ScanCache, ScanOptions, ScanResult, WifiScanCoordinator,
};

/// Board-specific driver types
pub trait Board {
    type Inputs: InputBank;
    type Rail: OutputPin;
    type Reset: SystemReset;
    type Led: PwmOutput;
    type Display: DisplayController;
    type Text: TextRenderer;
    type Radio: RadioStack;
    /// RTC driver, wired up by board support and only held here
    type Rtc;
}

/// Drivers handed to [`Badger::init`]
pub struct BoardParts<H: Board> {
    pub inputs: H::Inputs,
    pub rail: H::Rail,
    pub reset: H::Reset,
    pub led: H::Led,
    pub display: H::Display,
    pub text: H::Text,
    pub radio: H::Radio,
    pub rtc: H::Rtc,
}

/// Errors that prevent the badge from coming up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Radio stack failed to initialise
    Radio(RadioStatus),
}

impl From<RadioStatus> for InitError {
    fn from(status: RadioStatus) -> Self {
        InitError::Radio(status)
    }
}

/// The badge runtime
pub struct Badger<H: Board, M: RawMutex + 'static> {
    input: InputStateTracker<H::Inputs>,
    power: PowerSequencer<H::Rail, H::Reset>,
    led: StatusLed<H::Led>,
    renderer: Renderer<H::Display, H::Text>,
    wifi: WifiScanCoordinator<H::Radio, M>,
    rtc: H::Rtc,
}

impl<H, M> Badger<H, M>
where
    H: Board,
    M: RawMutex + Send + Sync + 'static,
{
    /// Bring the badge up
    ///
    /// Order: hold the power rail, capture the wake sources, bring up the
    /// radio, then the LED and renderer. If the radio fails the rail hold
    /// is released again, the whole badge is dropped and the error
    /// returned.
    pub fn init(
        parts: BoardParts<H>,
        scan_cache: &'static ScanCache<M>,
        config: &BadgerConfig,
    ) -> Result<Self, InitError> {
        let mut power = PowerSequencer::new(parts.rail, parts.reset);
        let input = InputStateTracker::init(parts.inputs);

        #[cfg(feature = "defmt")]
        defmt::info!("Wake sources: {}", input.wake_states());

        let mut wifi = match WifiScanCoordinator::init(parts.radio, scan_cache, config.country) {
            Ok(wifi) => wifi,
            Err(status) => {
                #[cfg(feature = "defmt")]
                defmt::error!("Radio init failed: {}", status);
                // Nothing is left to halt, so let battery power drop now
                power.release_rail();
                return Err(status.into());
            }
        };
        wifi.set_scan_options(ScanOptions {
            scan_type: config.scan_type,
        });

        let led = StatusLed::new(parts.led, config.led_gamma, config.initial_led);
        let renderer = Renderer::new(parts.display, parts.text);

        #[cfg(feature = "defmt")]
        defmt::info!("Badge initialized");

        Ok(Self {
            input,
            power,
            led,
            renderer,
            wifi,
            rtc: parts.rtc,
        })
    }

    // Power

    /// Power down; see [`PowerSequencer::halt`]
    pub fn halt(&mut self) -> ! {
        self.power.halt(&mut self.input)
    }

    // State

    /// Set the status LED brightness (0-255, gamma corrected)
    pub fn led(&mut self, brightness: u8) {
        self.led.set(brightness);
    }

    // Inputs

    /// Resample the buttons
    pub fn update_button_states(&mut self) {
        self.input.update();
    }

    /// Mask from the latest [`update_button_states`](Self::update_button_states)
    pub fn button_states(&self) -> ButtonMask {
        self.input.button_states()
    }

    pub fn pressed(&self, button: Button) -> bool {
        self.input.pressed(button)
    }

    pub fn pressed_to_wake(&self, button: Button) -> bool {
        self.input.pressed_to_wake(button)
    }

    /// Block until a button is pressed and released
    pub fn wait_for_press(&mut self) {
        self.input.wait_for_press();
    }

    // Drawing

    pub fn clear(&mut self, white: bool) {
        self.renderer.clear(white);
    }

    pub fn draw_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, white: bool) {
        self.renderer.draw_rectangle(x, y, w, h, white);
    }

    pub fn draw_text(&mut self, text: &str, white: bool) {
        self.renderer.draw_text(text, white);
    }

    pub fn draw_image(&mut self, bitmap: &[u8]) -> Result<(), GraphicsError> {
        self.renderer.draw_image(bitmap)
    }

    pub fn draw_image_in(&mut self, bitmap: &[u8], rect: Rect) -> Result<(), GraphicsError> {
        self.renderer.draw_image_in(bitmap, rect)
    }

    pub fn update(&mut self) -> Result<(), <H::Display as DisplayController>::Error> {
        self.renderer.update()
    }

    pub fn partial_update(
        &mut self,
        region: Rect,
    ) -> Result<(), <H::Display as DisplayController>::Error> {
        self.renderer.partial_update(region)
    }

    // Wifi

    pub fn start_wifi_scan(&mut self) -> Result<(), RadioStatus> {
        self.wifi.start_wifi_scan()
    }

    pub fn wifi_get_scan_result(&self) -> ScanResult {
        self.wifi.wifi_get_scan_result()
    }

    pub fn is_scanning_wifi(&self) -> bool {
        self.wifi.is_scanning_wifi()
    }

    pub fn wifi_status(&self) -> LinkStatus {
        self.wifi.wifi_status()
    }

    pub fn wifi_led_on(&mut self, on: bool) {
        self.wifi.wifi_led_on(on);
    }

    // Component access

    pub fn input(&self) -> &InputStateTracker<H::Inputs> {
        &self.input
    }

    pub fn power(&self) -> &PowerSequencer<H::Rail, H::Reset> {
        &self.power
    }

    pub fn status_led(&self) -> &StatusLed<H::Led> {
        &self.led
    }

    pub fn renderer(&self) -> &Renderer<H::Display, H::Text> {
        &self.renderer
    }

    pub fn wifi(&self) -> &WifiScanCoordinator<H::Radio, M> {
        &self.wifi
    }

    pub fn wifi_mut(&mut self) -> &mut WifiScanCoordinator<H::Radio, M> {
        &mut self.wifi
    }

    pub fn rtc(&self) -> &H::Rtc {
        &self.rtc
    }
}
