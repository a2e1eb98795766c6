//! Mock collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use badger_core::config::CountryCode;
use badger_core::graphics::{Framebuffer, Pen, Rect};
use badger_core::traits::{DisplayController, RadioStack, TextRenderer};
use badger_core::wifi::{ScanCache, ScanOptions, ScanResult, ScanSink};
use badger_core::{Board, BoardParts};
use badger_hal::{InputBank, OutputPin, PwmOutput, SystemReset};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_graphics::prelude::Point;

pub type TestCache = ScanCache<CriticalSectionRawMutex>;

/// Allocate a scan cache that lives for the rest of the test process
pub fn leak_cache() -> &'static TestCache {
    Box::leak(Box::new(ScanCache::new()))
}

/// GPIO word with the given pins asserted
pub fn gpio(pins: &[u8]) -> u32 {
    pins.iter().fold(0, |word, pin| word | (1 << pin))
}

// Inputs

/// Input bank replaying a script of GPIO words
///
/// Once the script runs out, the last word repeats forever.
#[derive(Clone)]
pub struct ScriptedBank {
    script: Arc<Mutex<VecDeque<u32>>>,
    last: Arc<AtomicU32>,
    reads: Arc<AtomicUsize>,
    relaxes: Arc<AtomicUsize>,
}

impl ScriptedBank {
    pub fn new(words: &[u32]) -> Self {
        Self {
            script: Arc::new(Mutex::new(words.iter().copied().collect())),
            last: Arc::new(AtomicU32::new(0)),
            reads: Arc::new(AtomicUsize::new(0)),
            relaxes: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of yield-hook calls seen so far
    pub fn relaxes(&self) -> usize {
        self.relaxes.load(Ordering::SeqCst)
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

impl InputBank for ScriptedBank {
    fn read_all(&mut self) -> u32 {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(word) = self.script.lock().unwrap().pop_front() {
            self.last.store(word, Ordering::SeqCst);
        }
        self.last.load(Ordering::SeqCst)
    }

    fn relax(&mut self) {
        self.relaxes.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_micros(50));
    }
}

// Power

#[derive(Clone, Default)]
pub struct RailPin {
    high: Arc<AtomicBool>,
}

impl RailPin {
    pub fn is_high(&self) -> bool {
        self.high.load(Ordering::SeqCst)
    }
}

impl OutputPin for RailPin {
    fn set_high(&mut self) {
        self.high.store(true, Ordering::SeqCst);
    }

    fn set_low(&mut self) {
        self.high.store(false, Ordering::SeqCst);
    }

    fn is_set_high(&self) -> bool {
        self.is_high()
    }
}

/// Panic message used to escape from `cold_restart`
pub const RESTART_PANIC: &str = "cold restart";

#[derive(Clone, Default)]
pub struct MockReset {
    restarted: Arc<AtomicBool>,
}

impl MockReset {
    pub fn restarted(&self) -> bool {
        self.restarted.load(Ordering::SeqCst)
    }
}

impl SystemReset for MockReset {
    fn cold_restart(&mut self) -> ! {
        self.restarted.store(true, Ordering::SeqCst);
        panic!("{}", RESTART_PANIC);
    }
}

#[derive(Clone, Default)]
pub struct MockPwm {
    duty: Arc<AtomicU32>,
    writes: Arc<AtomicUsize>,
}

impl MockPwm {
    pub fn duty(&self) -> u16 {
        self.duty.load(Ordering::SeqCst) as u16
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl PwmOutput for MockPwm {
    fn set_duty(&mut self, duty: u16) {
        self.duty.store(u32::from(duty), Ordering::SeqCst);
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

// Display

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Full,
    Partial(Rect),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelFault;

#[derive(Default)]
pub struct MockDisplay {
    pub refreshes: Vec<Refresh>,
    /// Ink pixel count of the framebuffer at each refresh
    pub ink_seen: Vec<usize>,
    pub fail: bool,
}

impl DisplayController for MockDisplay {
    type Error = PanelFault;

    fn update(&mut self, framebuffer: &Framebuffer) -> Result<(), Self::Error> {
        if self.fail {
            return Err(PanelFault);
        }
        self.refreshes.push(Refresh::Full);
        self.ink_seen.push(framebuffer.count(Pen::Ink));
        Ok(())
    }

    fn partial_update(
        &mut self,
        framebuffer: &Framebuffer,
        region: Rect,
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(PanelFault);
        }
        self.refreshes.push(Refresh::Partial(region));
        self.ink_seen.push(framebuffer.count(Pen::Ink));
        Ok(())
    }
}

// Text

#[derive(Debug, Clone, PartialEq)]
pub struct TextCall {
    pub font: String,
    pub thickness: u8,
    pub text: String,
    pub origin: Point,
    pub wrap_width: u32,
    pub pen: Pen,
}

#[derive(Default)]
pub struct RecordingText {
    font: String,
    thickness: u8,
    pub calls: Vec<TextCall>,
}

impl TextRenderer for RecordingText {
    fn set_font(&mut self, name: &str) {
        self.font = name.to_string();
    }

    fn set_thickness(&mut self, thickness: u8) {
        self.thickness = thickness;
    }

    fn draw_text(
        &mut self,
        _target: &mut Framebuffer,
        text: &str,
        origin: Point,
        wrap_width: u32,
        pen: Pen,
    ) {
        self.calls.push(TextCall {
            font: self.font.clone(),
            thickness: self.thickness,
            text: text.to_string(),
            origin,
            wrap_width,
            pen,
        });
    }
}

// Radio

/// Radio state shared between the mock and the test body
#[derive(Default)]
pub struct RadioShared {
    pub init_status: AtomicI32,
    pub scan_status: AtomicI32,
    pub scan_calls: AtomicUsize,
    pub scanning: AtomicBool,
    pub link: AtomicI32,
    pub led: AtomicBool,
    pub led_pin: AtomicU32,
    pub station_mode: AtomicBool,
    pub country: Mutex<Option<CountryCode>>,
    pub scan_options: Mutex<Option<ScanOptions>>,
    pub log: Mutex<Vec<&'static str>>,
    sink: Mutex<Option<&'static dyn ScanSink>>,
}

impl RadioShared {
    /// Deliver a discovery as the radio's polling context would
    pub fn discover(&self, result: &ScanResult) {
        let sink = *self.sink.lock().unwrap();
        if let Some(sink) = sink {
            sink.on_result(result);
        }
    }

    /// End the running scan
    pub fn finish_scan(&self) {
        self.scanning.store(false, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct MockRadio {
    pub shared: Arc<RadioShared>,
}

impl MockRadio {
    pub fn failing_init(status: i32) -> Self {
        let radio = Self::default();
        radio.shared.init_status.store(status, Ordering::SeqCst);
        radio
    }
}

impl RadioStack for MockRadio {
    fn init(&mut self) -> i32 {
        self.shared.log.lock().unwrap().push("init");
        self.shared.init_status.load(Ordering::SeqCst)
    }

    fn enable_station_mode(&mut self) {
        self.shared.log.lock().unwrap().push("sta");
        self.shared.station_mode.store(true, Ordering::SeqCst);
    }

    fn set_regulatory_domain(&mut self, country: CountryCode) {
        self.shared.log.lock().unwrap().push("country");
        *self.shared.country.lock().unwrap() = Some(country);
    }

    fn scan(&mut self, options: &ScanOptions, sink: &'static dyn ScanSink) -> i32 {
        self.shared.scan_calls.fetch_add(1, Ordering::SeqCst);
        *self.shared.scan_options.lock().unwrap() = Some(*options);
        let status = self.shared.scan_status.load(Ordering::SeqCst);
        if status == 0 {
            *self.shared.sink.lock().unwrap() = Some(sink);
            self.shared.scanning.store(true, Ordering::SeqCst);
        }
        status
    }

    fn is_scan_active(&self) -> bool {
        self.shared.scanning.load(Ordering::SeqCst)
    }

    fn link_status(&self) -> i32 {
        self.shared.link.load(Ordering::SeqCst)
    }

    fn gpio_put(&mut self, pin: u8, on: bool) {
        self.shared.led_pin.store(u32::from(pin), Ordering::SeqCst);
        self.shared.led.store(on, Ordering::SeqCst);
    }
}

// Board

/// Stand-in for the RTC driver, only carried by the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockRtc {
    pub alarm_gpio: u8,
}

pub struct TestBoard;

impl Board for TestBoard {
    type Inputs = ScriptedBank;
    type Rail = RailPin;
    type Reset = MockReset;
    type Led = MockPwm;
    type Display = MockDisplay;
    type Text = RecordingText;
    type Radio = MockRadio;
    type Rtc = MockRtc;
}

/// Handles kept by the test after the parts are moved into the badge
pub struct Probes {
    pub bank: ScriptedBank,
    pub rail: RailPin,
    pub reset: MockReset,
    pub led: MockPwm,
    pub radio: Arc<RadioShared>,
}

pub fn parts(bank: ScriptedBank, radio: MockRadio) -> (BoardParts<TestBoard>, Probes) {
    let rail = RailPin::default();
    let reset = MockReset::default();
    let led = MockPwm::default();
    let probes = Probes {
        bank: bank.clone(),
        rail: rail.clone(),
        reset: reset.clone(),
        led: led.clone(),
        radio: radio.shared.clone(),
    };
    let parts = BoardParts {
        inputs: bank,
        rail,
        reset,
        led,
        display: MockDisplay::default(),
        text: RecordingText::default(),
        radio,
        rtc: MockRtc {
            alarm_gpio: badger_core::pins::RTC,
        },
    };
    (parts, probes)
}

pub fn network(name: &str, rssi: i16, channel: u16) -> ScanResult {
    ScanResult::new(
        [0x02, 0, 0, 0, 0, channel as u8],
        name.as_bytes(),
        rssi,
        channel,
        Default::default(),
    )
}
